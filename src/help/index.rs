//! Command index: which commands every other active star exposes.

use tracing::{debug, error, warn};

use crate::core::error::SkipReason;
use crate::core::registry::{HandlerDescriptor, Host, PluginDescriptor};
use crate::core::star::Star;

/// Core plugins that never show up in a help listing, whoever asks.
pub const RESERVED_PLUGINS: [&str; 3] = ["astrbot", "astrbot_plugin_help", "astrbot-reminder"];

/// Plugin name to formatted command entries, both in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandIndex {
    plugins: Vec<(String, Vec<String>)>,
}

impl CommandIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn get(&self, plugin: &str) -> Option<&[String]> {
        self.plugins
            .iter()
            .find(|(name, _)| name == plugin)
            .map(|(_, commands)| commands.as_slice())
    }

    pub fn contains(&self, plugin: &str) -> bool {
        self.get(plugin).is_some()
    }

    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.plugins
            .iter()
            .map(|(name, commands)| (name.as_str(), commands.as_slice()))
    }

    /// Append `entry` to `plugin`'s list unless already present. The plugin's key is created on
    /// its first entry.
    pub fn insert(&mut self, plugin: &str, entry: String) {
        let pos = match self.plugins.iter().position(|(name, _)| name == plugin) {
            Some(pos) => pos,
            None => {
                self.plugins.push((plugin.to_string(), Vec::new()));
                self.plugins.len() - 1
            }
        };

        let commands = &mut self.plugins[pos].1;
        if !commands.contains(&entry) {
            commands.push(entry);
        }
    }
}

/// `name#description`, or just `name` without a description.
pub fn format_command(command_name: &str, description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(desc) => format!("{}#{}", command_name, desc),
        None => command_name.to_string(),
    }
}

/// Formatted entry for a handler, if it answers to a command.
fn command_entry(handler: &HandlerDescriptor) -> Option<String> {
    let command_name = handler.command_name().filter(|n| !n.is_empty())?;
    Some(format_command(command_name, handler.description.as_deref()))
}

/// Name and module path of a descriptor the index may include.
fn validate<'a>(host: &dyn Host, star: &'a PluginDescriptor) -> Result<(&'a str, &'a str), SkipReason> {
    let name = star.name().ok_or(SkipReason::MissingName)?;
    let module_path = star.module_path().ok_or(SkipReason::MissingModulePath)?;
    match &star.instance {
        Some(instance) if host.is_star_instance(instance) => Ok((name, module_path)),
        _ => Err(SkipReason::NotAStar),
    }
}

/// Collect the commands of every activated star except `exclude_self` and the reserved core
/// plugins.
///
/// Never fails: registry errors are logged and yield an empty index.
pub fn build_command_index(host: &dyn Host, exclude_self: &dyn Star) -> CommandIndex {
    let mut index = CommandIndex::new();

    let stars: Vec<PluginDescriptor> = match host.all_stars() {
        Ok(stars) => stars.into_iter().filter(|s| s.activated).collect(),
        Err(e) => {
            error!("Failed to fetch plugin list: {}", e);
            return index;
        }
    };

    if stars.is_empty() {
        warn!("No activated plugins found");
        return index;
    }

    let self_name = exclude_self.meta().name;
    let handlers = host.handlers();

    for star in &stars {
        if let Some(name) = star.name()
            && (name == self_name || RESERVED_PLUGINS.contains(&name))
        {
            continue;
        }

        let (name, module_path) = match validate(host, star) {
            Ok(valid) => valid,
            Err(reason) => {
                warn!(
                    "Skipping plugin '{}' (module: {}): {}",
                    star.name().unwrap_or("<unknown>"),
                    star.module_path().unwrap_or("<none>"),
                    reason
                );
                continue;
            }
        };

        if star.instance.as_ref().is_some_and(|i| i.is(exclude_self)) {
            continue;
        }

        for handler in handlers.iter().filter(|h| h.handler_module_path == module_path) {
            if let Some(entry) = command_entry(handler) {
                index.insert(name, entry);
            }
        }
    }

    debug!("Command index covers {} plugins", index.len());
    index
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::error::HostError;
    use crate::core::filter::{CommandFilter, CommandGroupFilter, EventFilter, PermissionLevel};
    use crate::core::registry::PluginInstance;
    use crate::core::star::StarMetadata;

    struct Named(&'static str);

    impl Star for Named {
        fn meta(&self) -> StarMetadata {
            StarMetadata::new(self.0)
        }

        fn module_path(&self) -> &'static str {
            "stars.named"
        }
    }

    #[derive(Default)]
    struct Fixture {
        stars: Vec<PluginDescriptor>,
        handlers: Vec<HandlerDescriptor>,
        broken: bool,
    }

    impl Fixture {
        fn star(mut self, name: &'static str, module_path: &str) -> Self {
            self.stars.push(PluginDescriptor {
                name: Some(name.to_string()),
                module_path: Some(module_path.to_string()),
                instance: Some(PluginInstance::Star(Arc::new(Named(name)))),
                activated: true,
            });
            self
        }

        fn descriptor(mut self, descriptor: PluginDescriptor) -> Self {
            self.stars.push(descriptor);
            self
        }

        fn handler(mut self, handler: HandlerDescriptor) -> Self {
            self.handlers.push(handler);
            self
        }
    }

    impl Host for Fixture {
        fn all_stars(&self) -> Result<Vec<PluginDescriptor>, HostError> {
            if self.broken {
                return Err(HostError::Unavailable("registry poisoned".to_string()));
            }
            Ok(self.stars.clone())
        }

        fn handlers(&self) -> Vec<HandlerDescriptor> {
            self.handlers.clone()
        }
    }

    fn command(module_path: &str, name: &str, desc: Option<&str>) -> HandlerDescriptor {
        let handler = HandlerDescriptor::new(module_path).filter(CommandFilter::new(name));
        match desc {
            Some(desc) => handler.description(desc),
            None => handler,
        }
    }

    #[test]
    fn test_format_command() {
        assert_eq!(format_command("foo", Some("does X")), "foo#does X");
        assert_eq!(format_command("foo", None), "foo");
        assert_eq!(format_command("foo", Some("")), "foo");
    }

    #[test]
    fn test_fetch_failure_yields_empty_index() {
        let host = Fixture {
            broken: true,
            ..Default::default()
        }
        .star("weather", "m1")
        .handler(command("m1", "forecast", None));

        assert!(build_command_index(&host, &Named("helloworld")).is_empty());
    }

    #[test]
    fn test_no_activated_plugins_yields_empty_index() {
        let mut host = Fixture::default()
            .star("weather", "m1")
            .handler(command("m1", "forecast", None));
        host.stars[0].activated = false;

        assert!(build_command_index(&host, &Named("helloworld")).is_empty());
        assert!(build_command_index(&Fixture::default(), &Named("helloworld")).is_empty());
    }

    #[test]
    fn test_single_plugin() {
        let host = Fixture::default()
            .star("weather", "m1")
            .handler(command("m1", "forecast", Some("get forecast")));

        let index = build_command_index(&host, &Named("helloworld"));
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("weather"),
            Some(&["forecast#get forecast".to_string()][..])
        );
    }

    #[test]
    fn test_excludes_self_and_reserved_names() {
        let host = Fixture::default()
            .star("helloworld", "m0")
            .star("astrbot", "m1")
            .star("astrbot_plugin_help", "m2")
            .star("astrbot-reminder", "m3")
            .star("weather", "m4")
            .handler(command("m0", "helps", None))
            .handler(command("m1", "core", None))
            .handler(command("m2", "help", None))
            .handler(command("m3", "remind", None))
            .handler(command("m4", "forecast", None));

        let index = build_command_index(&host, &Named("helloworld"));
        assert_eq!(index.plugin_names().collect::<Vec<_>>(), vec!["weather"]);
    }

    #[test]
    fn test_excludes_own_instance_under_another_name() {
        let me = Arc::new(Named("helloworld"));
        let host = Fixture::default()
            .descriptor(PluginDescriptor {
                name: Some("renamed".to_string()),
                module_path: Some("m0".to_string()),
                instance: Some(PluginInstance::from(me.clone())),
                activated: true,
            })
            .handler(command("m0", "helps", None));

        assert!(build_command_index(&host, me.as_ref()).is_empty());
    }

    #[test]
    fn test_malformed_descriptors_are_skipped() {
        let host = Fixture::default()
            .descriptor(PluginDescriptor {
                name: None,
                module_path: Some("m1".to_string()),
                instance: Some(PluginInstance::Star(Arc::new(Named("a")))),
                activated: true,
            })
            .descriptor(PluginDescriptor {
                name: Some("nomodule".to_string()),
                module_path: None,
                instance: Some(PluginInstance::Star(Arc::new(Named("b")))),
                activated: true,
            })
            .descriptor(PluginDescriptor {
                name: Some("opaque".to_string()),
                module_path: Some("m3".to_string()),
                instance: Some(PluginInstance::Opaque(Arc::new("not a star"))),
                activated: true,
            })
            .descriptor(PluginDescriptor {
                name: Some("noinstance".to_string()),
                module_path: Some("m4".to_string()),
                instance: None,
                activated: true,
            })
            .star("weather", "m5")
            .handler(command("m1", "a", None))
            .handler(command("m3", "c", None))
            .handler(command("m4", "d", None))
            .handler(command("m5", "forecast", None));

        let index = build_command_index(&host, &Named("helloworld"));
        assert_eq!(index.plugin_names().collect::<Vec<_>>(), vec!["weather"]);
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let host = Fixture::default()
            .star("weather", "m1")
            .handler(command("m1", "forecast", Some("get forecast")))
            .handler(command("m1", "forecast", Some("get forecast")));

        let index = build_command_index(&host, &Named("helloworld"));
        assert_eq!(index.get("weather").map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_discovery_order_is_kept() {
        let host = Fixture::default()
            .star("weather", "m1")
            .star("admin", "m2")
            .handler(command("m1", "zeta", None))
            .handler(command("m2", "ban", None))
            .handler(command("m1", "alpha", Some("first letter")))
            .handler(command("m1", "zeta", None));

        let index = build_command_index(&host, &Named("helloworld"));
        assert_eq!(index.plugin_names().collect::<Vec<_>>(), vec!["weather", "admin"]);
        assert_eq!(
            index.get("weather").unwrap(),
            &["zeta".to_string(), "alpha#first letter".to_string()]
        );
    }

    #[test]
    fn test_group_filter_and_unrelated_filters() {
        let host = Fixture::default()
            .star("admin", "m1")
            .handler(
                HandlerDescriptor::new("m1")
                    .description("manage the group")
                    .filter(EventFilter::Permission(PermissionLevel::Admin))
                    .filter(CommandGroupFilter::new("admin"))
                    .filter(CommandFilter::new("kick")),
            )
            .handler(HandlerDescriptor::new("m1").filter(EventFilter::Platform(vec![
                "onebot".to_string(),
            ])));

        let index = build_command_index(&host, &Named("helloworld"));
        assert_eq!(
            index.get("admin").unwrap(),
            &["admin#manage the group".to_string()]
        );
    }

    #[test]
    fn test_plugin_without_commands_has_no_key() {
        let host = Fixture::default()
            .star("quiet", "m1")
            .star("weather", "m2")
            .handler(HandlerDescriptor::new("m1").filter(EventFilter::Permission(PermissionLevel::Member)))
            .handler(command("m2", "forecast", None));

        let index = build_command_index(&host, &Named("helloworld"));
        assert!(!index.contains("quiet"));
        assert!(index.contains("weather"));
    }

    #[test]
    fn test_insert_dedups_per_plugin() {
        let mut index = CommandIndex::new();
        index.insert("a", "x".to_string());
        index.insert("b", "x".to_string());
        index.insert("a", "x".to_string());

        assert_eq!(index.get("a").unwrap(), &["x".to_string()]);
        assert_eq!(index.get("b").unwrap(), &["x".to_string()]);
        assert_eq!(index.iter().count(), 2);
    }
}
