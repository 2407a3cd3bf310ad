use anyhow::Result;
use async_trait::async_trait;

use crate::core::registry::HandlerDescriptor;

// ============================================================================
// Metadata
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StarMetadata {
    pub name: String,
    pub author: String,
    pub description: String,
    pub version: String,
}

impl StarMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: String::new(),
            description: String::new(),
            version: "0.0.0".to_string(),
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for StarMetadata {
    fn default() -> Self {
        Self::new("unnamed")
    }
}

/// A loadable unit of bot functionality.
#[async_trait]
pub trait Star: Send + Sync + 'static {
    /// Metadata (name/author/description/version)
    fn meta(&self) -> StarMetadata;

    /// Module the star's code lives in; handlers are correlated back to the star through it.
    /// Implementations usually return `module_path!()`.
    fn module_path(&self) -> &'static str;

    /// Handlers this star registers with the host.
    fn handlers(&self) -> Vec<HandlerDescriptor> {
        Vec::new()
    }

    /// Called once after the host instantiates the star.
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Called when the star is deactivated or unloaded.
    async fn terminate(&self) -> Result<()> {
        Ok(())
    }
}
