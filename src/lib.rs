//! zypper-docker - patch and update SUSE based container images with zypper.
//!
//! This library provides the building blocks of the `zypper-docker` binary:
//! a disk backed cache remembering which images are SUSE based and which
//! have been upgraded, a thin client over the `docker` CLI, and the command
//! implementations.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The classification cache and its location resolver
//! - Docker probing primitives
//! - Error handling and result types
//! - Image name parsing and zypper command composition

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Classification cache
    resolve_location,
    CacheRecord,
    CacheStore,
    Classified,
    // Docker
    ContainerSummary,
    DockerCli,
    ImageClass,
    ImageInspector,
    ImageName,
    ImageSummary,
    Loaded,
    ResolvedLocation,
    Result,
    Settings,
    ZypperCommand,
    // Error handling
    ZypperDockerError,
    CACHE_FILE_NAME,
    PROBE_COMMAND,
};
