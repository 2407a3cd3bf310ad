pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod registry;
pub mod star;
pub mod store;

pub use config::{ConfigStore, Configurable, HelpConfig};
pub use error::{HostError, SkipReason};
pub use event::{MessageEvent, MessageEventResult};
pub use filter::{CommandFilter, CommandGroupFilter, EventFilter, PermissionLevel};
pub use registry::{HandlerDescriptor, Host, PluginDescriptor, PluginInstance};
pub use star::{Star, StarMetadata};
pub use store::StarRegistry;
