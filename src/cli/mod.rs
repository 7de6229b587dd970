//! CLI layer: argument parsing, command dispatch and the interactive session

pub mod args;
pub mod commands;
pub mod error;
pub mod menu;
pub mod output;
pub mod session;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use session::Session;
