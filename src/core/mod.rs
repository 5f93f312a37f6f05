//! Core functionality for the zypper-docker tool.
//!
//! This module provides the image classification cache, the docker client,
//! error handling, configuration and the UI helpers shared by commands.

pub mod cache;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod docker;
pub mod error;
pub mod image_name;
pub mod output;
pub mod state;
pub mod zypper;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, ZypperDockerError};

// === Classification cache ===
// Disk backed memo of which images are SUSE based and which were upgraded
pub use cache::{CacheStore, Classified, Loaded, PROBE_COMMAND};
pub use dirs::{resolve_location, ResolvedLocation, CACHE_FILE_NAME};
pub use state::{CacheRecord, ImageClass};

// === Docker ===
pub use docker::{ContainerSummary, DockerCli, ImageInspector, ImageSummary};

// === Command initialization ===
pub use command_init::{log_cache_error, CommandContext, CommandInit};

pub use config::Settings;
pub use image_name::ImageName;
pub use zypper::ZypperCommand;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header, print_success, print_table};
