//! helloworld
//!
//! A star that answers `helps` with the commands every other active star
//! registered with the host.

#![forbid(unsafe_code)]

pub mod core;
pub mod help;
pub mod prelude;

pub use help::HelpStar;
