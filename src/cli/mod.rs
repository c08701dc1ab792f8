//! Command-line interface module.

mod args;
pub mod bounds;
pub mod generate;
pub mod render;
pub mod targets;

pub use args::{Cli, Commands, GenerateArgs, RenderArgs};
