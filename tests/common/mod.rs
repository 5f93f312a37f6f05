//! Consolidated test utilities for zypper-docker
//!
//! Integration tests drive the real binary against a fake `docker` script
//! living in a temporary home directory, so no daemon is needed.

pub mod assertions;
pub mod fake_docker;
