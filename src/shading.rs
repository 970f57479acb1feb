//! Local illumination and the reflection bounce loop.

use crate::scene::{Hit, Scene};
use crate::vector::{Vector3, VectorExt};
use crate::Ray;

/// Distance a hit point is pushed along its normal before casting the
/// shadow ray and the next bounce from it.
pub const SURFACE_OFFSET: f32 = 0.001;

/// How the diffuse and specular dot products are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingModel {
    /// Dot products are used as-is. A light behind the surface subtracts
    /// colour and a negative specular base goes straight into `powf`.
    #[default]
    Reference,
    /// Both dot products are clamped to zero first.
    Clamped,
}

/// Why a traced ray stopped bouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Missed,
    Shadowed,
    DepthExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOutcome {
    /// Accumulated colour, clamped to [0, 1] per component.
    pub color: Vector3<f32>,
    /// Number of surfaces that contributed a local colour.
    pub bounces: u32,
    pub termination: Termination,
}

enum Bounce {
    Tracing(Ray),
    Done(Termination),
}

/// Follow `ray` through up to `max_depth` mirror reflections.
///
/// Every unshadowed hit adds its local colour, scaled by the product of the
/// reflectivities seen so far. A miss or a shadowed hit ends the walk and
/// keeps whatever was accumulated before it.
pub fn trace(scene: &Scene, ray: Ray, max_depth: u32, model: ShadingModel) -> TraceOutcome {
    let mut color: Vector3<f32> = Vector3::zeros();
    let mut attenuation: f32 = 1.0;
    let mut bounces = 0;
    let mut state = Bounce::Tracing(ray);

    let termination = loop {
        state = match state {
            Bounce::Done(termination) => break termination,
            Bounce::Tracing(_) if bounces >= max_depth => {
                Bounce::Done(Termination::DepthExhausted)
            }
            Bounce::Tracing(ray) => match scene.nearest_hit(&ray) {
                None => Bounce::Done(Termination::Missed),
                Some(hit) => {
                    let point = ray.at(hit.distance);
                    let normal = hit.sphere.surface_normal(&point);
                    let shifted = point + SURFACE_OFFSET * normal;
                    let to_light = (scene.light().position - shifted).normalized();

                    if scene.is_occluded(&Ray::origin_direction(shifted, to_light)) {
                        Bounce::Done(Termination::Shadowed)
                    } else {
                        color += attenuation
                            * local_color(scene, &hit, &shifted, &normal, &to_light, model);
                        attenuation *= hit.sphere.material.reflectivity;
                        bounces += 1;
                        Bounce::Tracing(Ray::origin_direction(
                            shifted,
                            ray.direction.reflected(&normal),
                        ))
                    }
                }
            },
        };
    };

    TraceOutcome {
        color: color.map(|c| c.clamp(0.0, 1.0)),
        bounces,
        termination,
    }
}

/// Ambient, diffuse and Blinn-Phong specular terms at a lit point.
fn local_color(
    scene: &Scene,
    hit: &Hit<'_>,
    point: &Vector3<f32>,
    normal: &Vector3<f32>,
    to_light: &Vector3<f32>,
    model: ShadingModel,
) -> Vector3<f32> {
    let material = &hit.sphere.material;
    let light = scene.light();

    let to_camera = (scene.camera() - point).normalized();
    let halfway = (to_camera + to_light).normalized();

    let mut diffuse_factor = to_light.dot(normal);
    let mut specular_base = halfway.dot(normal);
    if model == ShadingModel::Clamped {
        diffuse_factor = diffuse_factor.max(0.0);
        specular_base = specular_base.max(0.0);
    }
    let specular_factor = specular_base.powf(material.shininess / 4.0);

    material.ambient.tint(&light.ambient)
        + diffuse_factor * material.diffuse.tint(&light.diffuse)
        + specular_factor * material.specular.tint(&light.specular)
}
