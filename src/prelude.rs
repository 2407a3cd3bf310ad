// Convenience re-exports: use helloworld::prelude::*;
pub use crate::core::{
    CommandFilter, CommandGroupFilter, ConfigStore, EventFilter, HandlerDescriptor, HelpConfig,
    Host, HostError, MessageEvent, MessageEventResult, PluginDescriptor, PluginInstance, Star,
    StarMetadata, StarRegistry,
};

pub use crate::help::{CommandIndex, HelpStar, build_command_index, render_help};

// Re-export async_trait for Star impls
pub use async_trait::async_trait;
