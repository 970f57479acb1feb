extern crate image;
extern crate nalgebra as na;
extern crate rayon;

pub mod camera;
pub mod error;
pub mod pixmap;
pub mod progress;
pub mod raster;
pub mod scene;
pub mod shading;
pub mod vector;

pub use camera::{render, Camera, RenderSettings};
pub use error::RenderError;
pub use raster::Raster;
pub use scene::Scene;
pub use shading::{trace, ShadingModel, Termination, TraceOutcome};

use vector::{Vector3, VectorExt};

/// A point light source.
///
/// All three intensities are white in every scene this renderer draws.
#[derive(Debug, Clone)]
pub struct Light {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Light {
    pub fn new(x: f32, y: f32, z: f32) -> Light {
        let white = Vector3::new(1.0, 1.0, 1.0);
        Light {
            position: Vector3::new(x, y, z),
            ambient: white,
            diffuse: white,
            specular: white,
        }
    }
}

/// Surface response of a sphere.
///
/// The ambient colour is a tenth of the diffuse colour and highlights are
/// always white.
#[derive(Debug, Clone)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
    pub reflectivity: f32,
}

impl Material {
    pub fn new(diffuse: Vector3<f32>, shininess: f32, reflectivity: f32) -> Material {
        Material {
            ambient: 0.1 * diffuse,
            diffuse,
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess,
            reflectivity,
        }
    }
}

/// A sphere, defined by its center, its radius and its material.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vector3<f32>,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(x: f32, y: f32, z: f32, radius: f32, material: Material) -> Sphere {
        Sphere {
            center: Vector3::new(x, y, z),
            radius,
            material,
        }
    }

    /// Distance along `ray` to the closest intersection in front of its origin.
    ///
    /// Both roots are clamped at zero before taking the smaller one, so a hit
    /// behind the origin or exactly on it is ignored. This keeps bounce and
    /// shadow rays from re-hitting the surface they start on; it also means a
    /// ray starting inside a sphere never hits that sphere.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let center_to_origin = ray.origin - self.center;
        // assuming unit direction
        let b = ray.direction.dot(&(2.0 * center_to_origin));
        let c = power_of_point(&center_to_origin, self.radius);
        let discriminant = b * b - 4.0 * c;
        if discriminant <= 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let far = (-b + root) / 2.0;
        let near = (-b - root) / 2.0;
        let distance = far.max(0.0).min(near.max(0.0));
        if distance > 0.0 {
            Some(Intersection { distance })
        } else {
            None
        }
    }

    pub fn surface_normal(&self, point: &Vector3<f32>) -> Vector3<f32> {
        (point - self.center).normalized()
    }
}

/// `|o - c|^2 - r^2`, the constant term of the intersection quadratic.
///
/// Both squares are taken in f64. For the huge floor sphere they are close
/// to 8.1e7 and an f32 subtraction loses the low digits that decide hits
/// and shadows near the horizon.
fn power_of_point(center_to_origin: &Vector3<f32>, radius: f32) -> f32 {
    let distance = f64::from(center_to_origin.norm());
    let radius = f64::from(radius);
    (distance * distance - radius * radius) as f32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn from_to(origin: Vector3<f32>, target: &Vector3<f32>) -> Ray {
        Ray {
            origin,
            direction: (target - origin).normalized(),
        }
    }

    pub fn origin_direction(origin: Vector3<f32>, normalized_direction: Vector3<f32>) -> Ray {
        Ray {
            origin,
            direction: normalized_direction,
        }
    }

    pub fn at(&self, distance: f32) -> Vector3<f32> {
        self.origin + distance * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // let's be generous for now
    const EPSILON: f32 = 0.0001;

    fn grey() -> Material {
        Material::new(Vector3::new(0.5, 0.5, 0.5), 100.0, 0.5)
    }

    /// Ray intersecting a sphere in an easy to compute position.
    #[test]
    fn ray_intersects_sphere() {
        let origin = Vector3::<f32>::new(0.0, 0.0, 0.0);
        let sphere_center = Vector3::<f32>::new(0.0, 0.0, 1.0);
        let ray = Ray::from_to(origin, &sphere_center);
        let sphere = Sphere::new(0.0, 0.0, 1.0, 0.5, grey());
        let intersection = sphere.intersect(&ray).unwrap();
        assert!((intersection.distance - 0.5).abs() < EPSILON);
    }

    /// Aimed at the center, the distance is the gap to the surface.
    #[test]
    fn ray_at_center_hits_at_surface_distance() {
        let origin = Vector3::new(1.0, -2.0, 3.0);
        let sphere = Sphere::new(-2.0, 2.0, -1.0, 1.5, grey());
        let ray = Ray::from_to(origin, &sphere.center);
        let expected = (origin - sphere.center).norm() - sphere.radius;
        let intersection = sphere.intersect(&ray).unwrap();
        assert!((intersection.distance - expected).abs() < EPSILON);
    }

    #[test]
    fn ray_missing_sphere() {
        let sphere = Sphere::new(0.0, 0.0, -5.0, 1.0, grey());
        // passes 1.5 units from the center
        let ray = Ray::origin_direction(
            Vector3::new(1.5, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        );
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn tangent_ray_is_a_miss() {
        let sphere = Sphere::new(0.0, 0.0, -5.0, 1.0, grey());
        let ray = Ray::origin_direction(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        );
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let sphere = Sphere::new(0.0, 0.0, 5.0, 1.0, grey());
        let ray = Ray::origin_direction(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn ray_from_inside_sphere_is_ignored() {
        let sphere = Sphere::new(0.0, 0.0, 0.0, 2.0, grey());
        let ray = Ray::origin_direction(Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(sphere.intersect(&ray), None);
    }

    /// Camera straight above the floor of the reference scene. Squaring in
    /// f32 would give 12600 here.
    #[test]
    fn power_of_point_keeps_precision_for_huge_spheres() {
        let radius = 9000.0 - 0.7;
        let center_to_origin = Vector3::new(0.0, 9000.0, 1.0);
        let c = power_of_point(&center_to_origin, radius);
        assert!((c - 12603.025).abs() < 0.01);
    }

    #[test]
    fn ray_hits_huge_floor_sphere_from_above() {
        let floor = Sphere::new(0.0, -9000.0, 0.0, 9000.0 - 0.7, grey());
        let ray = Ray::origin_direction(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, -1.0, 0.0));
        let intersection = floor.intersect(&ray).unwrap();
        assert!((intersection.distance - 0.7).abs() < 0.01);
    }

    /// Trivial case of a surface normal calculation.
    #[test]
    fn sphere_surface_normal() {
        let sphere = Sphere::new(0.0, 0.0, 1.0, 0.1, grey());
        let intersection_point = Vector3::<f32>::new(0.0, 0.0, 0.0);
        let surface_normal = sphere.surface_normal(&intersection_point);
        let expected_surface_normal = Vector3::<f32>::new(0.0, 0.0, -1.0);
        for i in 0..3 {
            assert!((surface_normal[i] - expected_surface_normal[i]).abs() < EPSILON);
        }
    }

    #[test]
    fn material_derives_ambient_and_specular() {
        let material = Material::new(Vector3::new(0.7, 0.0, 0.7), 100.0, 0.5);
        for i in 0..3 {
            assert!((material.ambient[i] - 0.1 * material.diffuse[i]).abs() < EPSILON);
        }
        assert_eq!(material.specular, Vector3::new(1.0, 1.0, 1.0));
    }
}
