//! Rendering error types.

use std::path::PathBuf;

use thiserror::Error;

/// Per-target rendering failures.
///
/// None of these abort a batch: the orchestrator records them and moves
/// on to the next target.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid SVG `{0}`")]
    InvalidVector(PathBuf, #[source] usvg::Error),

    #[error("cannot decode image `{0}`")]
    InvalidRaster(PathBuf, #[source] image::ImageError),

    #[error("failed to write `{0}`")]
    Encode(PathBuf, #[source] image::ImageError),

    #[error("no source assigned to `{0}`")]
    MissingSource(String),

    #[error("cannot allocate a {0}x{1} canvas")]
    Canvas(u32, u32),
}

impl RenderError {
    /// One-line message including the underlying cause.
    pub fn detail(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
