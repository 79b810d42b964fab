//! Live shell session: I/O, terminal, registries and variables for one run.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use crate::shell::command::CommandError;
use crate::shell::diagnostics::log_exception;
use crate::shell::line::parse_statements;
use crate::shell::manager::Manager;
use crate::shell::registry::{RegisteredCommand, Registry};
use crate::terminal::TerminalHandle;

pub const USER: &str = "USER";
pub const APPLICATION: &str = "APPLICATION";
/// `"true"` addresses commands as `scope:name`, `"false"` by bare name only.
pub const MULTI_SCOPE_MODE: &str = "MULTI_SCOPE_MODE";
/// One of [`StackTracePolicy`]'s string forms.
pub const PRINT_STACK_TRACES: &str = "PRINT_STACK_TRACES";
pub const DEFAULT_PROMPT: &str = "{USER}@{APPLICATION}> ";

const MAX_NESTING: usize = 16;

/// When command failures are reported with their full cause chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackTracePolicy {
    Always,
    /// Only for in-line (batch) execution.
    Execution,
    Never,
}

impl StackTracePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            StackTracePolicy::Always => "always",
            StackTracePolicy::Execution => "execution",
            StackTracePolicy::Never => "never",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "always" => Some(StackTracePolicy::Always),
            "execution" => Some(StackTracePolicy::Execution),
            "never" => Some(StackTracePolicy::Never),
            _ => None,
        }
    }
}

pub type Input = Box<dyn BufRead + Send>;
pub type Output = Box<dyn Write + Send>;

pub struct Session {
    input: Option<Input>,
    out: Output,
    err: Output,
    terminal: TerminalHandle,
    registry: Registry,
    factory_registry: Registry,
    manager: Manager,
    variables: BTreeMap<String, String>,
    prompt: String,
    depth: usize,
    closing: bool,
}

impl Session {
    pub(crate) fn new(
        input: Option<Input>,
        out: Output,
        err: Output,
        terminal: TerminalHandle,
        factory_registry: Registry,
    ) -> Self {
        let registry = Registry::with_parent(factory_registry.clone());
        let manager = Manager::new(registry.clone(), factory_registry.clone());
        Self {
            input,
            out,
            err,
            terminal,
            registry,
            factory_registry,
            manager,
            variables: BTreeMap::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            depth: 0,
            closing: false,
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Session-level registry; falls back to the factory registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn factory_registry(&self) -> &Registry {
        &self.factory_registry
    }

    /// Lifecycle manager seeded at construction.
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn terminal(&self) -> &TerminalHandle {
        &self.terminal
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    pub fn err(&mut self) -> &mut dyn Write {
        &mut self.err
    }

    /// Ask the read-eval loop to stop after the current statement.
    pub fn close(&mut self) {
        self.closing = true;
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn is_multi_scope(&self) -> bool {
        self.get(MULTI_SCOPE_MODE)
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true)
    }

    pub fn stack_trace_policy(&self) -> StackTracePolicy {
        self.get(PRINT_STACK_TRACES)
            .and_then(StackTracePolicy::parse)
            .unwrap_or(StackTracePolicy::Never)
    }

    /// Execute every statement of `text` in order, stopping at the first
    /// failure or when the session is closed.
    pub fn execute(&mut self, text: &str) -> Result<(), CommandError> {
        if self.depth >= MAX_NESTING {
            return Err(CommandError::RecursionLimit { limit: MAX_NESTING });
        }
        self.depth += 1;
        let result = self.execute_statements(text);
        self.depth -= 1;
        self.out.flush()?;
        result
    }

    fn execute_statements(&mut self, text: &str) -> Result<(), CommandError> {
        for statement in parse_statements(text) {
            if self.closing {
                break;
            }
            let Some((name, args)) = statement.split_first() else {
                continue;
            };
            let entry = self.resolve(name)?;
            tracing::debug!(command = %entry.key(), args = args.len(), "Executing");
            entry
                .command
                .execute(self, args)
                .map_err(|e| match e.downcast::<CommandError>() {
                    Ok(inner) => inner,
                    Err(e) => CommandError::Failed {
                        command: entry.key(),
                        source: e.into(),
                    },
                })?;
        }
        Ok(())
    }

    /// Find the command a statement refers to, honouring the scoping mode.
    pub fn resolve(&self, name: &str) -> Result<RegisteredCommand, CommandError> {
        let not_found = || CommandError::NotFound {
            name: name.to_string(),
        };

        if self.is_multi_scope() && name.contains(':') {
            return self.manager.lookup(name).ok_or_else(not_found);
        }

        let bare = name.rsplit(':').next().unwrap_or(name);
        let mut candidates = self.registry.find_by_name(bare);
        match candidates.len() {
            0 => Err(not_found()),
            1 => Ok(candidates.remove(0)),
            _ if !self.is_multi_scope() => Ok(candidates.remove(0)),
            _ => Err(CommandError::Ambiguous {
                name: name.to_string(),
                candidates: candidates.iter().map(RegisteredCommand::key).collect(),
            }),
        }
    }

    /// Read-eval loop: prompt, read a line, execute, report failures.
    /// Returns on end of input or after `exit`.
    pub fn run(&mut self) -> io::Result<()> {
        let Some(mut input) = self.input.take() else {
            tracing::warn!("Session has no input stream, nothing to run");
            return Ok(());
        };

        let mut line = String::new();
        while !self.closing {
            let prompt = self.expand_prompt();
            self.out.write_all(prompt.as_bytes())?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }

            if let Err(e) = self.execute(&line) {
                log_exception(self, &e);
            }
        }

        self.out.flush()?;
        self.input = Some(input);
        Ok(())
    }

    fn expand_prompt(&self) -> String {
        self.prompt
            .replace("{USER}", self.get(USER).unwrap_or_default())
            .replace("{APPLICATION}", self.get(APPLICATION).unwrap_or_default())
    }
}
