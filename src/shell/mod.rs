//! Minimal shell runtime the bootstrap wires up: commands, registries,
//! sessions and their factory.

pub mod builtins;
mod command;
mod diagnostics;
mod factory;
mod line;
mod manager;
mod registry;
mod script;
mod session;

pub use command::{Command, CommandError, CommandType};
pub use diagnostics::log_exception;
pub use factory::SessionFactory;
pub use line::{parse_statements, substitute_args};
pub use manager::Manager;
pub use registry::{Origin, RegisteredCommand, Registry};
pub use script::ScriptCommand;
pub use session::{
    Input, Output, Session, StackTracePolicy, APPLICATION, DEFAULT_PROMPT, MULTI_SCOPE_MODE,
    PRINT_STACK_TRACES, USER,
};
