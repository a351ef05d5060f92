//! Docker-compatible CLI runtime client.
//!
//! Works with any binary that speaks the `docker` command line (`docker`,
//! `podman`). Containers are enumerated with `ps --all --format {{json .}}`,
//! one JSON object per line.

use std::collections::HashSet;

use async_trait::async_trait;
use dockrun_common::error::{DockrunError, Result};
use dockrun_common::types::{ContainerId, RunState};
use serde::Deserialize;
use tokio::process::Command;

use super::{ContainerInfo, RuntimeClient};

/// Stderr fragments that mean the daemon itself is unreachable.
const UNREACHABLE_MARKERS: &[&str] = &[
    "cannot connect to the docker daemon",
    "error during connect",
    "is the docker daemon running",
    "cannot connect to podman",
];

/// Client that shells out to a Docker-compatible CLI.
#[derive(Debug, Clone)]
pub struct DockerCliClient {
    runtime_bin: String,
    stop_timeout_secs: u32,
}

impl DockerCliClient {
    /// Creates a client invoking `runtime_bin` with the given stop grace period.
    #[must_use]
    pub const fn new(runtime_bin: String, stop_timeout_secs: u32) -> Self {
        Self {
            runtime_bin,
            stop_timeout_secs,
        }
    }

    /// Runs the CLI and returns stdout, classifying failures.
    async fn run(
        &self,
        action: &'static str,
        id: Option<&ContainerId>,
        args: &[&str],
    ) -> Result<String> {
        tracing::debug!(bin = %self.runtime_bin, ?args, "invoking runtime CLI");
        let output = Command::new(&self.runtime_bin)
            .args(args)
            .output()
            .await
            .map_err(|e| DockrunError::RuntimeUnavailable {
                message: format!("failed to run {}: {e}", self.runtime_bin),
            })?;

        if output.status.success() {
            return String::from_utf8(output.stdout).map_err(|e| DockrunError::Runtime {
                action,
                id: id.map_or_else(String::new, ToString::to_string),
                message: format!("invalid UTF-8 in runtime output: {e}"),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_failure(action, id, stderr))
    }
}

/// Maps a non-zero CLI exit to either a connectivity or a per-call error.
fn classify_failure(
    action: &'static str,
    id: Option<&ContainerId>,
    stderr: String,
) -> DockrunError {
    let lowered = stderr.to_ascii_lowercase();
    if UNREACHABLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return DockrunError::RuntimeUnavailable { message: stderr };
    }
    DockrunError::Runtime {
        action,
        id: id.map_or_else(String::new, ToString::to_string),
        message: stderr,
    }
}

/// One line of `ps --format {{json .}}` output.
///
/// Docker prints `ID` and a comma-joined `Names` string; Podman prints `Id`
/// and a `Names` array.
#[derive(Debug, Deserialize)]
struct PsLine {
    #[serde(rename = "ID", alias = "Id")]
    id: String,
    #[serde(rename = "Names", default)]
    names: PsNames,
    #[serde(rename = "State", default)]
    state: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PsNames {
    Joined(String),
    List(Vec<String>),
}

impl Default for PsNames {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl PsNames {
    /// First name without the leading `/`, or empty when unnamed.
    fn primary(&self) -> String {
        let first = match self {
            Self::Joined(joined) => joined.split(',').next(),
            Self::List(names) => names.first().map(String::as_str),
        };
        first.unwrap_or_default().trim_start_matches('/').to_string()
    }
}

/// Parses `ps` JSON-lines output, keeping the runtime's order and dropping
/// repeated ids.
fn parse_ps_output(stdout: &str) -> Result<Vec<ContainerInfo>> {
    let mut seen = HashSet::new();
    let mut containers: Vec<ContainerInfo> = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row: PsLine = serde_json::from_str(line)?;
        let id = ContainerId::new(row.id);
        if !seen.insert(id.clone()) {
            continue;
        }
        containers.push(ContainerInfo {
            id,
            name: row.names.primary(),
            state: RunState::parse(&row.state),
        });
    }
    Ok(containers)
}

#[async_trait]
impl RuntimeClient for DockerCliClient {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let stdout = self
            .run("list", None, &["ps", "--all", "--no-trunc", "--format", "{{json .}}"])
            .await?;
        let containers = parse_ps_output(&stdout)?;
        tracing::debug!(count = containers.len(), "listed containers");
        Ok(containers)
    }

    async fn start_container(&self, id: &ContainerId) -> Result<()> {
        let _ = self.run("start", Some(id), &["start", id.as_str()]).await?;
        tracing::info!(id = %id, "container started");
        Ok(())
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<()> {
        let timeout = self.stop_timeout_secs.to_string();
        let _ = self
            .run("stop", Some(id), &["stop", "-t", &timeout, id.as_str()])
            .await?;
        tracing::info!(id = %id, "container stopped");
        Ok(())
    }
}
