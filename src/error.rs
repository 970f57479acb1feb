use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render settings: {0}")]
    InvalidSettings(&'static str),
    #[error("cannot write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
