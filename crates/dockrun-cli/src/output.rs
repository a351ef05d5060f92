//! Formatted output helpers for CLI commands.
//!
//! Table rendering for `ps` and JSON-lines rendering for `--json` runs.

#![allow(clippy::print_stdout)]

use dockrun_core::container::Container;
use dockrun_core::surface::Event;
use serde::Serialize;

/// Row of the `ps` JSON output.
#[derive(Debug, Serialize)]
struct ContainerRow<'a> {
    id: &'a str,
    label: String,
    running: bool,
    tracked: bool,
}

/// Formats one table line.
fn format_row(id: &str, name: &str, state: &str, workspace: &str) -> String {
    format!("{id:<14} {name:<24} {state:<9} {workspace}")
}

fn state_word(running: bool) -> &'static str {
    if running { "running" } else { "stopped" }
}

fn membership_word(tracked: bool) -> &'static str {
    if tracked { "tracked" } else { "non-related" }
}

/// Prints containers as an aligned table.
pub fn print_container_table(containers: &[Container]) {
    if containers.is_empty() {
        println!("No containers found.");
        return;
    }
    println!("{}", format_row("CONTAINER ID", "NAME", "STATE", "WORKSPACE"));
    for c in containers {
        println!(
            "{}",
            format_row(
                c.id.short(),
                &c.label(),
                state_word(c.running),
                membership_word(c.tracked)
            )
        );
    }
}

/// Prints containers as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_containers_json(containers: &[Container]) -> anyhow::Result<()> {
    let rows: Vec<_> = containers
        .iter()
        .map(|c| ContainerRow {
            id: c.id.as_str(),
            label: c.label(),
            running: c.running,
            tracked: c.tracked,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Prints interaction events, one JSON object per line.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_events(events: &[Event]) -> anyhow::Result<()> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
