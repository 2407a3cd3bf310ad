//! Host-side registry model: what the host knows about loaded stars and
//! their handlers, and the [`Host`] trait that exposes it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::core::error::HostError;
use crate::core::filter::EventFilter;
use crate::core::star::Star;

// ============================================================================
// Plugin instances
// ============================================================================

/// Reference to the object behind a loaded plugin.
#[derive(Clone)]
pub enum PluginInstance {
    Star(Arc<dyn Star>),
    /// Something the host loaded that does not implement [`Star`].
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl PluginInstance {
    pub fn as_star(&self) -> Option<&Arc<dyn Star>> {
        match self {
            PluginInstance::Star(star) => Some(star),
            PluginInstance::Opaque(_) => None,
        }
    }

    /// Whether this instance is the very object `star` points at.
    pub fn is(&self, star: &dyn Star) -> bool {
        let other = star as *const dyn Star;
        match self {
            PluginInstance::Star(s) => std::ptr::addr_eq(Arc::as_ptr(s), other),
            PluginInstance::Opaque(o) => std::ptr::addr_eq(Arc::as_ptr(o), other),
        }
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginInstance::Star(star) => f.debug_tuple("Star").field(&star.meta().name).finish(),
            PluginInstance::Opaque(_) => f.write_str("Opaque"),
        }
    }
}

impl<S: Star> From<Arc<S>> for PluginInstance {
    fn from(star: Arc<S>) -> Self {
        PluginInstance::Star(star)
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One loaded plugin as seen by the host.
#[derive(Clone, Debug, Default)]
pub struct PluginDescriptor {
    pub name: Option<String>,
    pub module_path: Option<String>,
    pub instance: Option<PluginInstance>,
    pub activated: bool,
}

impl PluginDescriptor {
    /// Descriptor for a star instance, activated, with name and module path taken from the star.
    pub fn for_star(star: Arc<dyn Star>) -> Self {
        Self {
            name: Some(star.meta().name),
            module_path: Some(star.module_path().to_string()),
            instance: Some(PluginInstance::Star(star)),
            activated: true,
        }
    }

    /// Non-empty name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Non-empty module path, if any.
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref().filter(|p| !p.is_empty())
    }
}

/// One registered handler.
#[derive(Clone, Debug)]
pub struct HandlerDescriptor {
    pub handler_module_path: String,
    pub description: Option<String>,
    pub event_filters: Vec<EventFilter>,
}

impl HandlerDescriptor {
    pub fn new(handler_module_path: impl Into<String>) -> Self {
        Self {
            handler_module_path: handler_module_path.into(),
            description: None,
            event_filters: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<EventFilter>) -> Self {
        self.event_filters.push(filter.into());
        self
    }

    /// Name of the first command-bearing filter; later filters are not consulted.
    pub fn command_name(&self) -> Option<&str> {
        self.event_filters.iter().find_map(EventFilter::command_name)
    }
}

// ============================================================================
// Host
// ============================================================================

/// Read access to the registries the host owns.
pub trait Host: Send + Sync {
    /// Every plugin the host has loaded, activated or not.
    fn all_stars(&self) -> Result<Vec<PluginDescriptor>, HostError>;

    /// Snapshot of the global handler registry.
    fn handlers(&self) -> Vec<HandlerDescriptor>;

    /// Capability check for plugin instances.
    fn is_star_instance(&self, instance: &PluginInstance) -> bool {
        instance.as_star().is_some()
    }
}
