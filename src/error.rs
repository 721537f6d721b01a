use std::path::PathBuf;

use thiserror::Error;

/// Reasons a loader could not produce a resource.
///
/// None of these are fatal to a [`ResourceCache`](crate::resource::ResourceCache), which turns
/// them into null handles and keeps its state unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no resource file at {path:?}")]
    Missing { path: PathBuf },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid loader options: {0}")]
    InvalidOptions(String),
    #[error("malformed glyph sheet {path:?}: {reason}")]
    GlyphSheet { path: PathBuf, reason: String },
    #[error("{0}")]
    Backend(String),
}

impl LoadError {
    pub fn from_image(path: PathBuf, e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                Self::Missing { path }
            }
            source => Self::Decode { path, source },
        }
    }
}
