use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::RenderError;
use crate::progress::Progress;
use crate::raster::Raster;
use crate::scene::Scene;
use crate::shading::{trace, ShadingModel};
use crate::vector::Vector3;
use crate::Ray;

pub const MAX_DEPTH: u32 = 5;

/// Maps pixels onto a screen in the z=0 plane spanning x in [-1, 1], with
/// the height following the aspect ratio, seen from `position`.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector3<f32>,
    upper_left: Vector3<f32>,
    x_step: Vector3<f32>,
    y_step: Vector3<f32>,
}

impl Camera {
    pub fn new(position: Vector3<f32>, width: usize, height: usize) -> Camera {
        let width = width as f32;
        let height = height as f32;
        let aspect_ratio = width / height;
        Camera {
            position,
            upper_left: Vector3::new(-1.0, 1.0 / aspect_ratio, 0.0),
            x_step: Vector3::new(2.0 / width, 0.0, 0.0),
            y_step: Vector3::new(0.0, -2.0 / aspect_ratio / height, 0.0),
        }
    }

    /// Ray through the upper left corner of pixel (`col`, `row`).
    pub fn primary_ray(&self, col: usize, row: usize) -> Ray {
        let pixel = self.upper_left + col as f32 * self.x_step + row as f32 * self.y_step;
        Ray::from_to(self.position, &pixel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub max_depth: u32,
    pub shading: ShadingModel,
    pub parallel: bool,
}

impl Default for RenderSettings {
    fn default() -> RenderSettings {
        RenderSettings {
            width: 1920,
            height: 1080,
            max_depth: MAX_DEPTH,
            shading: ShadingModel::Reference,
            parallel: true,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings("image dimensions must be non-zero"));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidSettings("max depth must be at least 1"));
        }
        Ok(())
    }
}

/// Render `scene` with one ray per pixel, shot from the scene's camera.
///
/// Columns are traced left to right, each one top to bottom, and `progress`
/// hears about every finished column. In parallel mode columns are handed to
/// rayon; pixels do not depend on each other so the raster is the same
/// either way.
pub fn render<P: Progress>(
    scene: &Scene,
    settings: &RenderSettings,
    progress: &P,
) -> Result<Raster, RenderError> {
    settings.validate()?;
    debug!(?settings, spheres = scene.spheres().len(), "render settings");
    info!(width = settings.width, height = settings.height, "rendering");

    let camera = Camera::new(scene.camera(), settings.width, settings.height);
    let trace_column = |col: usize| -> Vec<Vector3<f32>> {
        (0..settings.height)
            .map(|row| {
                trace(
                    scene,
                    camera.primary_ray(col, row),
                    settings.max_depth,
                    settings.shading,
                )
                .color
            })
            .collect()
    };

    let mut raster = Raster::new(settings.width, settings.height);
    if settings.parallel {
        let finished = AtomicUsize::new(0);
        let columns: Vec<Vec<Vector3<f32>>> = (0..settings.width)
            .into_par_iter()
            .map(|col| {
                let column = trace_column(col);
                let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                progress.column_done(done, settings.width);
                column
            })
            .collect();
        for (col, column) in columns.into_iter().enumerate() {
            for (row, color) in column.into_iter().enumerate() {
                raster.set(row, col, color);
            }
        }
    } else {
        for col in 0..settings.width {
            for (row, color) in trace_column(col).into_iter().enumerate() {
                raster.set(row, col, color);
            }
            progress.column_done(col + 1, settings.width);
        }
    }

    info!("render finished");
    Ok(raster)
}
