//! Docker operations used by zypper-docker.
//!
//! Everything goes through the `docker` command line client, the same way a
//! user would drive it from a shell. The cache only needs the narrow
//! [`ImageInspector`] seam, which keeps it testable without a daemon.
//!
//! # Public API
//! - [`ImageInspector`]: probing primitives consumed by the cache
//! - [`DockerCli`]: implementation backed by the `docker` binary
//! - [`ImageSummary`], [`ContainerSummary`]: parsed listing rows

use crate::core::error::{Result, ZypperDockerError};
use std::process::{Command, Output, Stdio};

/// Probing primitives the classification cache relies on.
pub trait ImageInspector {
    /// Whether `command` can be found inside the image. Failures to run the
    /// probe at all count as "not found".
    fn has_command(&self, image_id: &str, command: &str) -> bool;

    /// Resolves a user supplied reference (`repo:tag`, short id...) to the
    /// canonical image id.
    fn image_id(&self, reference: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSummary {
    pub repository: String,
    pub tag: String,
    pub id: String,
    pub created: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSummary {
    pub id: String,
    pub image: String,
    pub name: String,
    pub status: String,
}

const IMAGE_FORMAT: &str = "{{.Repository}}\t{{.Tag}}\t{{.ID}}\t{{.CreatedSince}}\t{{.Size}}";
const CONTAINER_FORMAT: &str = "{{.ID}}\t{{.Image}}\t{{.Names}}\t{{.Status}}";

/// Exit codes zypper uses to report pending updates or patches. They are
/// informational, not failures.
const ZYPPER_INFO_CODES: std::ops::RangeInclusive<i32> = 100..=103;

/// Exit code of `docker run` when the daemon itself failed.
const DOCKER_RUN_ERROR: i32 = 125;

pub fn is_zypper_success(code: Option<i32>) -> bool {
    matches!(code, Some(0)) || code.is_some_and(|c| ZYPPER_INFO_CODES.contains(&c))
}

pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        log::debug!("Running: {} {}", self.binary, args.join(" "));
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ZypperDockerError::docker_unavailable(&self.binary, e))
    }

    /// Runs docker and returns its trimmed stdout, failing on a non-zero exit.
    fn stdout_of(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ZypperDockerError::docker_command_failed(
                args.first().copied().unwrap_or_default(),
                stderr,
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Runs docker with the terminal attached and returns its exit code.
    fn attached(&self, args: &[&str]) -> Result<Option<i32>> {
        log::debug!("Running attached: {} {}", self.binary, args.join(" "));
        let status = self
            .command(args)
            .status()
            .map_err(|e| ZypperDockerError::docker_unavailable(&self.binary, e))?;
        Ok(status.code())
    }

    /// Lists tagged images. Dangling `<none>` images are skipped.
    pub fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let stdout = self.stdout_of(&["images", "--no-trunc", "--format", IMAGE_FORMAT])?;
        Ok(parse_images(&stdout))
    }

    /// Lists running containers.
    pub fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        let stdout = self.stdout_of(&["ps", "--no-trunc", "--format", CONTAINER_FORMAT])?;
        Ok(parse_containers(&stdout))
    }

    /// Id of the image a container was started from.
    pub fn container_image_id(&self, container: &str) -> Result<String> {
        self.stdout_of(&[
            "inspect",
            "--type",
            "container",
            "--format",
            "{{.Image}}",
            container,
        ])
    }

    pub fn image_exists(&self, repo: &str, tag: &str) -> Result<bool> {
        let reference = format!("{repo}:{tag}");
        let stdout = self.stdout_of(&["images", "-q", &reference])?;
        Ok(!stdout.is_empty())
    }

    /// Runs a shell command in a throwaway container and returns its exit code.
    pub fn run_in_image(&self, image: &str, command: &str) -> Result<Option<i32>> {
        self.attached(&[
            "run",
            "--rm",
            "--entrypoint",
            "/bin/sh",
            image,
            "-c",
            command,
        ])
    }

    /// Runs a shell command in a new container based on `image` and commits
    /// the result as `repo:tag`. Returns the id of the new image.
    ///
    /// The entrypoint and command of the original image are restored on the
    /// committed one.
    pub fn commit_with_command(
        &self,
        image: &str,
        command: &str,
        repo: &str,
        tag: &str,
    ) -> Result<String> {
        let changes = self.restore_changes(image)?;
        let container = self.stdout_of(&[
            "create",
            "--entrypoint",
            "/bin/sh",
            image,
            "-c",
            command,
        ])?;
        log::debug!("Created container {container} from {image}");

        let result = self.start_and_commit(&container, &changes, repo, tag);

        if let Err(e) = self.stdout_of(&["rm", &container]) {
            log::warn!("Could not remove container {container}: {e}");
        }
        result
    }

    fn start_and_commit(
        &self,
        container: &str,
        changes: &[String],
        repo: &str,
        tag: &str,
    ) -> Result<String> {
        let code = self.attached(&["start", "-a", container])?;
        if !is_zypper_success(code) {
            return Err(ZypperDockerError::docker_command_failed(
                "start",
                format!("zypper exited with code {}", exit_code_text(code)),
            ));
        }

        let reference = format!("{repo}:{tag}");
        let mut args = vec!["commit"];
        for change in changes {
            args.push("--change");
            args.push(change);
        }
        args.push(container);
        args.push(&reference);
        self.stdout_of(&args)
    }

    fn restore_changes(&self, image: &str) -> Result<Vec<String>> {
        let entrypoint = self.image_config_field(image, "Entrypoint")?;
        let cmd = self.image_config_field(image, "Cmd")?;
        Ok(vec![
            format!("ENTRYPOINT {entrypoint}"),
            format!("CMD {cmd}"),
        ])
    }

    /// JSON value of a `.Config` field, with `null` mapped to `[]`.
    fn image_config_field(&self, image: &str, field: &str) -> Result<String> {
        let format = format!("{{{{json .Config.{field}}}}}");
        let value = self.stdout_of(&["inspect", "--type", "image", "--format", &format, image])?;
        if value.is_empty() || value == "null" {
            Ok("[]".to_string())
        } else {
            Ok(value)
        }
    }
}

impl ImageInspector for DockerCli {
    fn has_command(&self, image_id: &str, command: &str) -> bool {
        let probe = format!("command -v {command}");
        let output = self.run(&[
            "run",
            "--rm",
            "--entrypoint",
            "/bin/sh",
            image_id,
            "-c",
            &probe,
        ]);

        match output {
            Ok(output) => probe_found(image_id, command, output.status.code()),
            Err(e) => {
                log::debug!("Probing {image_id} for {command} failed: {e}");
                false
            }
        }
    }

    fn image_id(&self, reference: &str) -> Result<String> {
        let output = self.run(&["inspect", "--type", "image", "--format", "{{.Id}}", reference])?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.to_lowercase().contains("no such") {
            Err(ZypperDockerError::image_not_found(reference))
        } else {
            Err(ZypperDockerError::docker_command_failed("inspect", stderr))
        }
    }
}

/// Whether a `command -v` run inside a container found the command.
fn probe_found(image_id: &str, command: &str, code: Option<i32>) -> bool {
    match code {
        Some(0) => true,
        Some(DOCKER_RUN_ERROR) => {
            log::warn!("Docker failed while probing {image_id} for {command}");
            false
        }
        _ => false,
    }
}

fn exit_code_text(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

fn parse_images(stdout: &str) -> Vec<ImageSummary> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(5, '\t');
            let image = ImageSummary {
                repository: fields.next()?.to_string(),
                tag: fields.next()?.to_string(),
                id: fields.next()?.to_string(),
                created: fields.next()?.to_string(),
                size: fields.next()?.to_string(),
            };
            (image.repository != "<none>" && image.tag != "<none>").then_some(image)
        })
        .collect()
}

fn parse_containers(stdout: &str) -> Vec<ContainerSummary> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(4, '\t');
            Some(ContainerSummary {
                id: fields.next()?.to_string(),
                image: fields.next()?.to_string(),
                name: fields.next()?.to_string(),
                status: fields.next()?.to_string(),
            })
        })
        .collect()
}
