//! Terminal interaction surface.
//!
//! Selections are a numbered list on stderr answered on stdin: `1,3`,
//! `all`, ids or names; an empty line chooses nothing. Notifications go to
//! stdout (info) and stderr (warnings, errors, progress).

#![allow(clippy::print_stdout, clippy::print_stderr)]

use async_trait::async_trait;
use dockrun_common::types::ContainerId;
use dockrun_core::container::PickItem;
use dockrun_core::surface::{Interaction, ScriptedSelection};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive surface, optionally answering selections from flags.
#[derive(Debug)]
pub struct TerminalInteraction {
    preset: Option<ScriptedSelection>,
}

impl TerminalInteraction {
    /// Creates a surface; with a preset no prompt is shown.
    pub const fn new(preset: Option<ScriptedSelection>) -> Self {
        Self { preset }
    }
}

/// Parses a picker answer against the offered items.
///
/// Tokens are separated by commas or whitespace. A number picks by
/// 1-based position; anything else matches by id, name, or id prefix.
/// Unknown tokens are skipped and each item is chosen at most once.
pub fn parse_choice(input: &str, items: &[PickItem]) -> Vec<PickItem> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") || input == "*" {
        return items.to_vec();
    }

    let mut chosen: Vec<PickItem> = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let picked = match token.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => Some(items[n - 1].clone()),
            _ => ScriptedSelection::Ids(vec![ContainerId::new(token)])
                .pick(items)
                .into_iter()
                .next(),
        };
        match picked {
            Some(item) if !chosen.contains(&item) => chosen.push(item),
            Some(_) => {}
            None => tracing::warn!(token, "ignoring unknown selection"),
        }
    }
    chosen
}

#[async_trait]
impl Interaction for TerminalInteraction {
    async fn present_selection(&self, prompt: &str, items: &[PickItem]) -> Vec<PickItem> {
        if let Some(preset) = &self.preset {
            return preset.pick(items);
        }

        eprintln!("{prompt}:");
        for (idx, item) in items.iter().enumerate() {
            eprintln!("  {:>2}) {:<24} {}", idx + 1, item.label, item.id.short());
        }
        eprint!("Choose (e.g. 1,3 or all; empty for none): ");

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        if let Err(e) = reader.read_line(&mut line).await {
            tracing::warn!(error = %e, "failed to read selection");
            return Vec::new();
        }
        parse_choice(&line, items)
    }

    fn show_warning(&self, text: &str) {
        eprintln!("warning: {text}");
    }

    fn show_info(&self, text: &str) {
        println!("{text}");
    }

    fn show_error(&self, text: &str) {
        eprintln!("error: {text}");
    }

    fn progress_started(&self, title: &str) {
        eprintln!("{title}...");
    }

    fn progress_finished(&self, title: &str) {
        tracing::debug!(title, "progress finished");
    }
}
