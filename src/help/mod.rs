pub mod index;
pub mod render;
pub mod star;

pub use index::{CommandIndex, RESERVED_PLUGINS, build_command_index, format_command};
pub use render::{HelpRequest, render_help};
pub use star::HelpStar;
