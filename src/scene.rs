use crate::vector::Vector3;
use crate::{Intersection, Light, Material, Ray, Sphere};

/// The closest sphere along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub distance: f32,
    pub sphere: &'a Sphere,
}

/// Spheres, a single point light and the camera position.
///
/// Read-only once built, so it can be shared between render threads.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    light: Light,
    camera: Vector3<f32>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, light: Light, camera: Vector3<f32>) -> Scene {
        Scene {
            spheres,
            light,
            camera,
        }
    }

    /// Two small spheres in front of a big red one, all on a huge grey
    /// sphere acting as the floor.
    pub fn reference() -> Scene {
        let spheres = vec![
            Sphere::new(
                -0.2,
                0.0,
                -1.0,
                0.7,
                Material::new(Vector3::new(0.7, 0.0, 0.0), 100.0, 0.5),
            ),
            Sphere::new(
                0.1,
                -0.3,
                0.0,
                0.1,
                Material::new(Vector3::new(0.7, 0.0, 0.7), 100.0, 0.5),
            ),
            Sphere::new(
                -0.3,
                0.0,
                0.0,
                0.15,
                Material::new(Vector3::new(0.0, 0.6, 0.0), 100.0, 0.5),
            ),
            Sphere::new(
                0.0,
                -9000.0,
                0.0,
                9000.0 - 0.7,
                Material::new(Vector3::new(0.6, 0.6, 0.6), 100.0, 0.5),
            ),
        ];
        Scene::new(
            spheres,
            Light::new(5.0, 5.0, 5.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn camera(&self) -> Vector3<f32> {
        self.camera
    }

    /// Scan every sphere and keep the closest positive intersection.
    ///
    /// On equal distances the sphere listed first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<Hit<'_>> = None;
        for sphere in &self.spheres {
            if let Some(Intersection { distance }) = sphere.intersect(ray) {
                if nearest.map_or(true, |hit| distance < hit.distance) {
                    nearest = Some(Hit { distance, sphere });
                }
            }
        }
        nearest
    }

    /// Whether any sphere blocks `ray`.
    ///
    /// There is no upper bound on the distance, a sphere beyond the light
    /// still casts a shadow.
    pub fn is_occluded(&self, ray: &Ray) -> bool {
        self.spheres
            .iter()
            .any(|sphere| sphere.intersect(ray).is_some())
    }
}
