//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ZypperDockerError`] which covers every failure mode of
//! zypper-docker. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`ZypperDockerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ZypperDockerError>`
//!
//! # Error Categories
//! - **Cache operations**: location, read, parse, serialization and write errors.
//!   These never abort a command; see [`ZypperDockerError::is_cache_error`].
//! - **Docker operations**: missing images, failed docker invocations
//! - **User input**: invalid image names, overwriting existing images
//! - **Configuration**: malformed config file

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for zypper-docker
#[derive(Error, Debug)]
pub enum ZypperDockerError {
    // Cache errors
    #[error("Could not find a writable location for the cache file")]
    CacheLocationUnavailable,

    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{path}': {source}")]
    CacheParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Docker errors
    #[error("Could not run '{binary}': {source}")]
    DockerUnavailable {
        binary: String,
        source: std::io::Error,
    },

    #[error("Image not found: {reference}")]
    ImageNotFound { reference: String },

    #[error("docker {command} failed: {message}")]
    DockerCommandFailed { command: String, message: String },

    #[error("Cannot overwrite an existing image. Please use a different repository/tag.")]
    ImageAlreadyExists { repo: String, tag: String },

    #[error("{image} is not a SUSE based image")]
    NotSuseImage { image: String },

    // User input errors
    #[error("Invalid image name: '{name}'")]
    InvalidImageName { name: String },

    // Configuration errors
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using ZypperDockerError
pub type Result<T> = std::result::Result<T, ZypperDockerError>;

impl ZypperDockerError {
    /// Whether this error comes from the classification cache.
    ///
    /// Cache failures only cost performance, so commands log them and carry on.
    pub fn is_cache_error(&self) -> bool {
        matches!(
            self,
            Self::CacheLocationUnavailable
                | Self::CacheReadFailed { .. }
                | Self::CacheParseFailed { .. }
                | Self::CacheSerializationFailed { .. }
                | Self::CacheWriteFailed { .. }
        )
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache parse failed error
    pub fn cache_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn docker_unavailable(binary: impl Into<String>, source: std::io::Error) -> Self {
        Self::DockerUnavailable {
            binary: binary.into(),
            source,
        }
    }

    /// Create an image not found error
    pub fn image_not_found(reference: impl Into<String>) -> Self {
        Self::ImageNotFound {
            reference: reference.into(),
        }
    }

    /// Create a docker command failed error
    pub fn docker_command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DockerCommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn image_already_exists(repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::ImageAlreadyExists {
            repo: repo.into(),
            tag: tag.into(),
        }
    }

    pub fn not_suse_image(image: impl Into<String>) -> Self {
        Self::NotSuseImage {
            image: image.into(),
        }
    }

    /// Create an invalid image name error
    pub fn invalid_image_name(name: impl Into<String>) -> Self {
        Self::InvalidImageName { name: name.into() }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
