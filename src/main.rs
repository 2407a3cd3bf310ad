use std::sync::Arc;

use anyhow::Result;
use helloworld::core::filter::PermissionLevel;
use helloworld::prelude::*;
use tokio::io::{self, AsyncBufReadExt};
use tracing::{Level, info, warn};

// --- Demo stars ---

struct WeatherStar;

impl Star for WeatherStar {
    fn meta(&self) -> StarMetadata {
        StarMetadata::new("weather")
            .description("Weather lookups")
            .version("0.2.0")
    }

    fn module_path(&self) -> &'static str {
        "stars.weather"
    }

    fn handlers(&self) -> Vec<HandlerDescriptor> {
        vec![
            HandlerDescriptor::new(self.module_path())
                .description("get forecast")
                .filter(CommandFilter::new("forecast").alias("天气")),
            HandlerDescriptor::new(self.module_path()).filter(CommandFilter::new("alerts")),
        ]
    }
}

struct AdminStar;

impl Star for AdminStar {
    fn meta(&self) -> StarMetadata {
        StarMetadata::new("admin").description("Group administration")
    }

    fn module_path(&self) -> &'static str {
        "stars.admin"
    }

    fn handlers(&self) -> Vec<HandlerDescriptor> {
        vec![
            HandlerDescriptor::new(self.module_path())
                .description("manage the group")
                .filter(EventFilter::Permission(PermissionLevel::Admin))
                .filter(CommandGroupFilter::new("admin")),
        ]
    }
}

// --- Main Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup logging
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // 2. Load configuration
    let config: HelpConfig = match std::env::args().nth(1) {
        Some(path) => {
            let store = ConfigStore::from_file(path)?;
            if let Some(path) = store.path() {
                info!("Help config loaded from {}", path.display());
            }
            store.get()?
        }
        None => HelpConfig::default(),
    };

    // 3. Register stars
    let registry = StarRegistry::new();
    let help = Arc::new(HelpStar::new(config));
    registry.register(help.clone()).await?;
    registry.register(Arc::new(WeatherStar)).await?;
    registry.register(Arc::new(AdminStar)).await?;
    info!("Loaded {} stars", registry.count());

    // 4. Read commands from stdin
    let prefix = &help.config().command_prefix;
    println!("Type {}helps or {}helps <plugin>. Ctrl+D to exit.", prefix, prefix);

    let mut lines = io::BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let Some(message) = help.invocation(&line) else {
            warn!("No handler for: {}", line.trim());
            continue;
        };

        let event = MessageEvent::new("console", message).sender_id("console-user");
        let reply = help.get_help(&registry, &event).await;
        println!("{}", reply.into_text());
    }

    info!("Shutting down.");
    Ok(())
}
