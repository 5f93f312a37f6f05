//! Fake docker environment for integration tests
//!
//! The fake `docker` is a shell script answering from plain text tables:
//! - `images.txt`: rows printed by `docker images`
//! - `suse.txt`: image ids that contain zypper
//! - `refs.txt`: `<reference> <id>` pairs resolved by `docker inspect`
//! - `containers.txt`: rows printed by `docker ps`
//! - `container_images.txt`: `<container id> <image id>` pairs
//!
//! Every invocation is appended to `calls.log`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zypper_docker::core::error::Result;
use zypper_docker::CACHE_FILE_NAME;

const SCRIPT: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$*" >> "$dir/calls.log"

lookup() {
    awk -v key="$2" '$1 == key { print $2 }' "$dir/$1" 2>/dev/null
}

case "$1" in
    images)
        if [ "$2" = "-q" ]; then
            lookup refs.txt "$3"
        else
            cat "$dir/images.txt" 2>/dev/null
        fi
        exit 0
        ;;
    run)
        case "$7" in
            "command -v"*) grep -qxF "$5" "$dir/suse.txt" 2>/dev/null; exit $? ;;
        esac
        exit 0
        ;;
    inspect)
        if [ "$3" = "container" ]; then
            lookup container_images.txt "$6"
            exit 0
        fi
        case "$5" in
            *Entrypoint*|*Cmd*) echo null; exit 0 ;;
        esac
        id="$(lookup refs.txt "$6")"
        if [ -z "$id" ]; then
            echo "Error: No such image: $6" >&2
            exit 1
        fi
        echo "$id"
        ;;
    create) echo "container123" ;;
    start) exit 0 ;;
    commit) echo "sha256:newimage" ;;
    rm) exit 0 ;;
    ps) cat "$dir/containers.txt" 2>/dev/null ;;
    *) echo "unexpected: $*" >&2; exit 1 ;;
esac
"#;

/// Temporary home directory with a fake docker binary.
///
/// The TempDir must be kept alive for the duration of the test.
pub struct FakeDocker {
    pub temp_dir: TempDir,
    pub home: PathBuf,
    pub bin_dir: PathBuf,
}

impl FakeDocker {
    /// Creates the home directory, including `~/.cache` so the cache file
    /// lands there instead of `/tmp`.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let home = temp_dir.path().join("home");
        let bin_dir = temp_dir.path().join("bin");
        fs::create_dir_all(home.join(".cache"))?;
        fs::create_dir_all(&bin_dir)?;

        let script = bin_dir.join("docker");
        fs::write(&script, SCRIPT)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;

        Ok(Self {
            temp_dir,
            home,
            bin_dir,
        })
    }

    pub fn docker_path(&self) -> PathBuf {
        self.bin_dir.join("docker")
    }

    pub fn cache_path(&self) -> PathBuf {
        self.home.join(".cache").join(CACHE_FILE_NAME)
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home.join(".config")
    }

    /// Adds an image listed by `docker images`.
    pub fn add_image(&self, repo: &str, tag: &str, id: &str, suse: bool) -> Result<()> {
        append(
            &self.bin_dir.join("images.txt"),
            &format!("{repo}\t{tag}\t{id}\t2 days ago\t254.5MB"),
        )?;
        self.add_reference(&format!("{repo}:{tag}"), id)?;
        if tag == "latest" {
            self.add_reference(repo, id)?;
        }
        if suse {
            append(&self.bin_dir.join("suse.txt"), id)?;
        }
        Ok(())
    }

    pub fn add_reference(&self, reference: &str, id: &str) -> Result<()> {
        append(&self.bin_dir.join("refs.txt"), &format!("{reference} {id}"))
    }

    pub fn add_container(&self, id: &str, image: &str, image_id: &str, name: &str) -> Result<()> {
        append(
            &self.bin_dir.join("containers.txt"),
            &format!("{id}\t{image}\t{name}\tUp 2 hours"),
        )?;
        append(
            &self.bin_dir.join("container_images.txt"),
            &format!("{id} {image_id}"),
        )
    }

    pub fn write_cache(&self, json: &str) -> Result<()> {
        fs::write(self.cache_path(), json)?;
        Ok(())
    }

    pub fn read_cache(&self) -> anyhow::Result<serde_json::Value> {
        let content = fs::read_to_string(self.cache_path())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Logged docker invocations.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.bin_dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Number of zypper probes run so far.
    pub fn probe_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with("run") && call.contains("command -v zypper"))
            .count()
    }

    /// The zypper-docker binary wired to this environment.
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("zypper-docker")
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        cmd.env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.config_dir())
            .env("ZYPPER_DOCKER_BIN", self.docker_path())
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}

fn append(path: &Path, line: &str) -> Result<()> {
    let mut content = fs::read_to_string(path).unwrap_or_default();
    content.push_str(line);
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// Ids stored under `key` in a decoded cache file.
pub fn ids(cache: &serde_json::Value, key: &str) -> Vec<String> {
    cache[key]
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
