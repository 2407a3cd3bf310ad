//! Text rendering of a [`CommandIndex`].

use std::fmt::Write;

use crate::core::config::HelpConfig;
use crate::help::index::CommandIndex;

pub const NOTHING_FOUND: &str = "No plugins or commands found";

/// What the user asked for, read from the raw invocation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpRequest {
    /// Just the command: list plugin names.
    Overview,
    /// Command plus a plugin name: list that plugin's commands.
    Plugin(String),
}

impl HelpRequest {
    pub fn parse(message: &str) -> Self {
        match message.split_whitespace().nth(1) {
            Some(plugin) => HelpRequest::Plugin(plugin.to_string()),
            None => HelpRequest::Overview,
        }
    }
}

/// Render the reply to a help invocation.
pub fn render_help(index: &CommandIndex, message: &str, config: &HelpConfig) -> String {
    if index.is_empty() {
        return NOTHING_FOUND.to_string();
    }

    let marker = &config.item_marker;
    let mut out = String::new();

    match HelpRequest::parse(message) {
        HelpRequest::Plugin(plugin) => match index.get(&plugin) {
            Some(commands) => {
                let _ = writeln!(out, "Commands of plugin {}:", plugin);
                for cmd in commands {
                    let _ = writeln!(out, "{}{}", marker, cmd);
                }
            }
            None => {
                let _ = write!(out, "plugin not found: {}", plugin);
            }
        },
        HelpRequest::Overview => {
            out.push_str("Available plugins:\n");
            for name in index.plugin_names() {
                let _ = writeln!(out, "{}{}", marker, name);
            }
            let _ = write!(
                out,
                "\nUse {}helps <plugin> to list its commands",
                config.command_prefix
            );
        }
    }

    out
}
