//! Centralized initialization for commands.
//!
//! Every subcommand needs the same two things: a docker client configured
//! from the settings, and the classification cache. Cache problems found
//! while loading are logged here and never stop the command.
//!
//! # Public API
//! - [`CommandInit`]: builds the context
//! - [`CommandContext`]: docker client plus cache store
//! - [`log_cache_error`]: the single place where cache failures are absorbed

use crate::core::{
    cache::CacheStore,
    config::Settings,
    docker::{DockerCli, ImageInspector},
    error::{Result, ZypperDockerError},
};

pub struct CommandContext {
    pub docker: DockerCli,
    pub cache: CacheStore,
}

pub struct CommandInit;

impl CommandInit {
    pub fn initialize() -> Result<CommandContext> {
        let settings = Settings::load()?;
        log::debug!(
            "Using docker binary {} and probe command {}",
            settings.docker_binary,
            settings.probe_command
        );

        let loaded = CacheStore::load();
        if let Some(issue) = loaded.issue {
            match issue {
                ZypperDockerError::CacheLocationUnavailable => {
                    log::warn!("Could not find path for the cache! Images will not be cached.")
                }
                other => log::warn!("Decoding of cache file failed: {other}"),
            }
        }

        Ok(CommandContext {
            docker: DockerCli::new(settings.docker_binary),
            cache: loaded.store.with_probe_command(settings.probe_command),
        })
    }
}

/// Logs cache failures and passes every other error through.
pub fn log_cache_error(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_cache_error() => {
            log::warn!("Cannot write to the cache file: {e}");
            Ok(())
        }
        other => other,
    }
}

impl CommandContext {
    /// Classifies an image id through the cache, logging cache write errors.
    pub fn is_suse(&mut self, image_id: &str) -> bool {
        let answer = self.cache.is_suse(image_id, &self.docker);
        if let Err(e) = answer.flush {
            log::warn!("Cannot write to the cache file: {e}");
        }
        answer.is_suse
    }

    /// Resolves `image` and fails unless it is SUSE based.
    pub fn require_suse_image(&mut self, image: &str) -> Result<String> {
        let id = self.docker.image_id(image)?;
        if !self.is_suse(&id) {
            return Err(ZypperDockerError::not_suse_image(image));
        }
        Ok(id)
    }
}
