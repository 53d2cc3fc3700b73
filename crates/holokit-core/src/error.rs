/// Core error types for the HoloKit engine.
///
/// Rendering itself never fails; these cover the edges around it: artwork
/// loading, PNG output, configuration files, and parsing variant identifiers.
use std::path::PathBuf;

/// A specialized Result type for HoloKit operations.
pub type HoloResult<T> = Result<T, HoloError>;

/// Top-level error type encompassing all HoloKit subsystems.
#[derive(Debug, thiserror::Error)]
pub enum HoloError {
    #[error("asset error: {message} ({path:?})")]
    Asset { message: String, path: PathBuf },

    #[error("unknown card variant: '{0}'")]
    UnknownVariant(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl HoloError {
    /// Create an asset error.
    pub fn asset(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        HoloError::Asset {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl From<toml::de::Error> for HoloError {
    fn from(err: toml::de::Error) -> Self {
        HoloError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for HoloError {
    fn from(err: toml::ser::Error) -> Self {
        HoloError::Config(err.to_string())
    }
}
