//! In-memory star registry.
//!
//! Keeps loaded stars in load order together with the handlers they
//! registered, and serves both through [`Host`].

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::core::error::HostError;
use crate::core::registry::{HandlerDescriptor, Host, PluginDescriptor, PluginInstance};
use crate::core::star::Star;

#[derive(Default)]
pub struct StarRegistry {
    /// Loaded plugins, in load order
    stars: RwLock<Vec<PluginDescriptor>>,
    /// Global handler registry
    handlers: RwLock<Vec<HandlerDescriptor>>,
}

impl StarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a star: run `initialize`, then record it as activated along with its handlers.
    pub async fn register<S: Star>(&self, star: Arc<S>) -> Result<(), HostError> {
        let meta = star.meta();

        if self.has(&meta.name) {
            return Err(HostError::AlreadyRegistered(meta.name));
        }

        star.initialize().await.map_err(|source| HostError::Lifecycle {
            name: meta.name.clone(),
            source,
        })?;

        let handlers = star.handlers();
        let descriptor = PluginDescriptor::for_star(star.clone());

        // initialize() may have raced with another registration of the same name
        let lost_race = {
            let mut stars = self.stars.write();
            if stars.iter().any(|d| d.name() == Some(meta.name.as_str())) {
                true
            } else {
                stars.push(descriptor);
                false
            }
        };

        if lost_race {
            if let Err(e) = star.terminate().await {
                warn!("Failed to terminate duplicate star {}: {}", meta.name, e);
            }
            return Err(HostError::AlreadyRegistered(meta.name));
        }

        info!(
            "Registered star: {} v{} by {} ({} handlers)",
            meta.name,
            meta.version,
            meta.author,
            handlers.len()
        );
        self.handlers.write().extend(handlers);
        Ok(())
    }

    /// Record a descriptor as-is. Used for plugins the host loaded some other way.
    pub fn insert_descriptor(&self, descriptor: PluginDescriptor) {
        debug!("Inserting plugin descriptor: {:?}", descriptor.name);
        self.stars.write().push(descriptor);
    }

    pub fn add_handler(&self, handler: HandlerDescriptor) {
        self.handlers.write().push(handler);
    }

    pub async fn activate(&self, name: &str) -> Result<(), HostError> {
        self.set_activated(name, true)?;
        info!("Activated star: {}", name);
        Ok(())
    }

    /// Mark a star inactive and run its `terminate` hook.
    pub async fn deactivate(&self, name: &str) -> Result<(), HostError> {
        let instance = self.set_activated(name, false)?;
        info!("Deactivated star: {}", name);
        terminate(name, instance).await
    }

    /// Drop a star and every handler registered under its module path.
    pub async fn unregister(&self, name: &str) -> Result<(), HostError> {
        let descriptor = {
            let mut stars = self.stars.write();
            let pos = stars
                .iter()
                .position(|d| d.name() == Some(name))
                .ok_or_else(|| HostError::NotFound(name.to_string()))?;
            stars.remove(pos)
        };

        if let Some(module_path) = descriptor.module_path() {
            let mut handlers = self.handlers.write();
            let before = handlers.len();
            handlers.retain(|h| h.handler_module_path != module_path);
            debug!(
                "Dropped {} handlers of star {}",
                before - handlers.len(),
                name
            );
        }

        info!("Unregistered star: {}", name);
        terminate(name, descriptor.instance).await
    }

    pub fn has(&self, name: &str) -> bool {
        self.stars.read().iter().any(|d| d.name() == Some(name))
    }

    pub fn count(&self) -> usize {
        self.stars.read().len()
    }

    fn set_activated(&self, name: &str, activated: bool) -> Result<Option<PluginInstance>, HostError> {
        let mut stars = self.stars.write();
        let descriptor = stars
            .iter_mut()
            .find(|d| d.name() == Some(name))
            .ok_or_else(|| HostError::NotFound(name.to_string()))?;
        descriptor.activated = activated;
        Ok(descriptor.instance.clone())
    }
}

async fn terminate(name: &str, instance: Option<PluginInstance>) -> Result<(), HostError> {
    let Some(star) = instance.as_ref().and_then(PluginInstance::as_star) else {
        warn!("Plugin {} has no star instance, skipping terminate", name);
        return Ok(());
    };

    star.terminate().await.map_err(|source| HostError::Lifecycle {
        name: name.to_string(),
        source,
    })
}

impl Host for StarRegistry {
    fn all_stars(&self) -> Result<Vec<PluginDescriptor>, HostError> {
        Ok(self.stars.read().clone())
    }

    fn handlers(&self) -> Vec<HandlerDescriptor> {
        self.handlers.read().clone()
    }
}
