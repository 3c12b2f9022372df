// THEORY:
// Every failure the engine can report lives in `HueError`. The taxonomy is small
// because the pipeline has exactly one recoverable failure: an image that cannot be
// decoded is dropped and the run carries on. Everything else ends the run, either
// before any processing (bad options, bad config, missing directory) or after it
// (nothing left to aggregate).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dominant_hue operations.
pub type Result<T> = std::result::Result<T, HueError>;

#[derive(Error, Debug)]
pub enum HueError {
    /// The file is not a recognized image, or reading it failed.
    #[error("Unable to open image file '{}': {message}", path.display())]
    Decode {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Writing an image failed. Never skipped.
    #[error("Unable to write image file '{}': {message}", path.display())]
    Encode {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No image contributed a color to the aggregate.
    #[error("No matching images found for name '{entity}'")]
    NoInput { entity: String },

    /// Mutually exclusive options were requested together.
    #[error("{0}")]
    Usage(String),

    #[error("The directory '{}' does not exist or is not a directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Invalid configuration in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A parallel extraction task was cancelled or its channel closed.
    #[error("Worker failed: {0}")]
    Worker(String),
}

impl HueError {
    /// Create a decode error with its underlying cause.
    pub fn decode<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            path: path.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Only a per-image decode failure can be skipped; the rest end the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HueError::Decode { .. })
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            HueError::Usage(_) => 2,
            HueError::InvalidDirectory(_) => 3,
            HueError::NoInput { .. } => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_decode_errors_are_recoverable() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "garbage");
        assert!(HueError::decode("a.png", io).is_recoverable());
        assert!(!HueError::NoInput { entity: "x".into() }.is_recoverable());
        assert!(!HueError::Usage("both".into()).is_recoverable());
        assert!(!HueError::encode("a.png", "disk full").is_recoverable());
    }

    #[test]
    fn exit_codes_separate_usage_and_empty_runs() {
        assert_eq!(HueError::Usage("both".into()).exit_code(), 2);
        assert_eq!(HueError::InvalidDirectory("nope".into()).exit_code(), 3);
        assert_eq!(HueError::NoInput { entity: "x".into() }.exit_code(), 4);
        assert_eq!(HueError::Worker("panic".into()).exit_code(), 1);
    }

    #[test]
    fn decode_message_names_the_file() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header");
        let message = HueError::decode("covers/game-box.png", io).to_string();
        assert!(message.contains("covers/game-box.png"));
        assert!(message.contains("bad header"));
    }
}
