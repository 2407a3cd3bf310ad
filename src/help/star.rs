use async_trait::async_trait;
use tracing::debug;

use crate::core::config::HelpConfig;
use crate::core::event::{MessageEvent, MessageEventResult};
use crate::core::filter::CommandFilter;
use crate::core::registry::{HandlerDescriptor, Host};
use crate::core::star::{Star, StarMetadata};
use crate::help::index::{CommandIndex, build_command_index};
use crate::help::render::render_help;

pub const NAME: &str = "helloworld";
pub const COMMAND: &str = "helps";
pub const ALIASES: [&str; 2] = ["帮助", "使用方法"];

/// Lists the commands of every other active star.
#[derive(Debug, Clone, Default)]
pub struct HelpStar {
    config: HelpConfig,
}

impl HelpStar {
    pub fn new(config: HelpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    /// The filter the `helps` handler is registered with.
    pub fn command_filter() -> CommandFilter {
        ALIASES
            .iter()
            .fold(CommandFilter::new(COMMAND), |filter, alias| filter.alias(*alias))
    }

    /// Message text of a `helps` invocation typed as `line`, command prefix removed.
    ///
    /// `None` when the prefix is missing or the first token is another command.
    pub fn invocation<'a>(&self, line: &'a str) -> Option<&'a str> {
        let message = line.trim().strip_prefix(self.config.command_prefix.as_str())?;
        let command = message.split_whitespace().next()?;
        Self::command_filter().answers_to(command).then_some(message)
    }

    pub fn command_index(&self, host: &dyn Host) -> CommandIndex {
        build_command_index(host, self)
    }

    /// Handle one `helps` invocation.
    pub async fn get_help(&self, host: &dyn Host, event: &MessageEvent) -> MessageEventResult {
        debug!("Help requested on {}: {:?}", event.platform, event.message);
        let index = self.command_index(host);
        event.plain_result(render_help(&index, &event.message, &self.config))
    }
}

#[async_trait]
impl Star for HelpStar {
    fn meta(&self) -> StarMetadata {
        StarMetadata::new(NAME)
            .author("YourName")
            .description("A simple Hello World plugin")
            .version("1.0.0")
    }

    fn module_path(&self) -> &'static str {
        module_path!()
    }

    fn handlers(&self) -> Vec<HandlerDescriptor> {
        vec![
            HandlerDescriptor::new(self.module_path())
                .description("Show plugin help")
                .filter(Self::command_filter()),
        ]
    }
}
