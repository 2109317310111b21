use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or validating the JSON configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid colour '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Failures while loading images from disk.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No image files found in directory: {0}")]
    NoImages(PathBuf),

    #[error("Failed to read file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Failures of the music backend. A rejected play attempt is never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("No audio stream is loaded")]
    NoStream,

    #[error("Playback was rejected: {0}")]
    PlaybackRejected(String),
}
