//! Standalone shell bootstrap.
//!
//! Turns process arguments and standard streams into a running shell
//! session: parse arguments, resolve the command text, build the loading
//! context, discover commands, then run once or interactively.

pub mod args;
pub mod bootstrap;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod loader;
pub mod logging;
pub mod shell;
pub mod terminal;

pub use bootstrap::{Bootstrap, RunSummary, ShellIo};
pub use error::{BootstrapError, Result};
