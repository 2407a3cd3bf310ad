//! Event filters attached to handlers.
//!
//! The host routes messages with these; the help star only reads them to
//! recover the command name a handler answers to.

use regex::Regex;

/// Binds a handler to a single command name plus optional aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFilter {
    pub command_name: String,
    pub aliases: Vec<String>,
}

impl CommandFilter {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Whether `token` is the command name or one of its aliases.
    pub fn answers_to(&self, token: &str) -> bool {
        self.command_name == token || self.aliases.iter().any(|a| a == token)
    }
}

/// Binds a handler to a named group of subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroupFilter {
    pub group_name: String,
}

impl CommandGroupFilter {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionLevel {
    Member,
    Admin,
}

#[derive(Debug, Clone)]
pub enum EventFilter {
    Command(CommandFilter),
    CommandGroup(CommandGroupFilter),
    Regex(Regex),
    Permission(PermissionLevel),
    /// Restricts a handler to the listed platform adapters.
    Platform(Vec<String>),
}

impl EventFilter {
    /// The command-bearing name of this filter, if it carries one.
    pub fn command_name(&self) -> Option<&str> {
        match self {
            EventFilter::Command(filter) => Some(&filter.command_name),
            EventFilter::CommandGroup(filter) => Some(&filter.group_name),
            EventFilter::Regex(_) | EventFilter::Permission(_) | EventFilter::Platform(_) => None,
        }
    }
}

impl From<CommandFilter> for EventFilter {
    fn from(filter: CommandFilter) -> Self {
        EventFilter::Command(filter)
    }
}

impl From<CommandGroupFilter> for EventFilter {
    fn from(filter: CommandGroupFilter) -> Self {
        EventFilter::CommandGroup(filter)
    }
}
