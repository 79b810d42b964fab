//! Command trait and the resolvable command types that produce commands.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::shell::session::Session;

/// An executable shell command.
pub trait Command: Send + Sync {
    /// Run the command with its arguments (command name excluded).
    fn execute(&self, session: &mut Session, args: &[String]) -> anyhow::Result<()>;
}

type Constructor = Arc<dyn Fn() -> Arc<dyn Command> + Send + Sync>;

/// A named, resolvable command type.
///
/// This is what a discovery resource line resolves to. Registering a type
/// instantiates it once through its constructor.
#[derive(Clone)]
pub struct CommandType {
    class_name: String,
    scope: String,
    name: String,
    description: String,
    constructor: Constructor,
}

impl CommandType {
    pub fn new<F>(
        class_name: impl Into<String>,
        scope: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        constructor: F,
    ) -> Self
    where
        F: Fn() -> Arc<dyn Command> + Send + Sync + 'static,
    {
        Self {
            class_name: class_name.into(),
            scope: scope.into(),
            name: name.into(),
            description: description.into(),
            constructor: Arc::new(constructor),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registry key, `scope:name`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.scope, self.name)
    }

    pub fn instantiate(&self) -> Arc<dyn Command> {
        (self.constructor)()
    }
}

impl fmt::Debug for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandType")
            .field("class_name", &self.class_name)
            .field("scope", &self.scope)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Errors raised while executing command text in a session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command not found: {name}")]
    NotFound { name: String },

    #[error("Command '{name}' is ambiguous, candidates: {}", candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },

    #[error("{command}: {source}")]
    Failed {
        command: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Script nesting exceeded {limit} levels")]
    RecursionLimit { limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
