//! Turning a finished raster into bytes on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::error::RenderError;
use crate::raster::Raster;

/// `c * 255` truncated to a byte. Colours are expected to be clamped
/// already; anything else saturates and NaN becomes 0.
pub fn channel_to_byte(c: f32) -> u8 {
    (c * 255.0) as u8
}

pub fn to_rgb_image(raster: &Raster) -> RgbImage {
    RgbImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        let color = raster.get(y as usize, x as usize);
        Rgb([
            channel_to_byte(color[0]),
            channel_to_byte(color[1]),
            channel_to_byte(color[2]),
        ])
    })
}

/// Binary portable pixmap (P6) with a maximum value of 255.
pub fn write_ppm<W: Write>(mut writer: W, image: &RgbImage) -> std::io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width(), image.height())?;
    writer.write_all(image.as_raw())?;
    writer.flush()
}

/// Save `raster` to `filename`.
///
/// `.ppm` files, and paths without an extension, are written as P6. Other
/// extensions are left to the `image` crate to encode.
pub fn save<P: AsRef<Path>>(filename: P, raster: &Raster) -> Result<(), RenderError> {
    let path = filename.as_ref();
    let image = to_rgb_image(raster);
    let is_ppm = path
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        debug!(path = %path.display(), "writing P6 pixmap");
        let io_error = |source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        write_ppm(BufWriter::new(file), &image).map_err(io_error)
    } else {
        debug!(path = %path.display(), "encoding with image crate");
        image.save(path)?;
        Ok(())
    }
}
