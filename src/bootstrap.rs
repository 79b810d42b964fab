//! Bootstrap flow: arguments and standard streams in, a finished shell run out.
//!
//! ```text
//! parse → resolve input → build loading context → acquire terminal
//!       → create session → discover commands → dispatch → release terminal
//! ```

use std::io::{self, BufReader, Read};
use std::sync::Arc;

use crate::args::parse_args;
use crate::config::ShellConfig;
use crate::discovery::{discover_commands, DiscoveryReport};
use crate::dispatch::{dispatch, DispatchMode};
use crate::error::{BootstrapError, Result};
use crate::input::resolve_command_text;
use crate::loader::{build_loading_context, Catalog, LoadingContext};
use crate::shell::{Input, Output, SessionFactory, APPLICATION, USER};
use crate::terminal::{SystemTerminalFactory, TerminalFactory};

/// The standard stream triple a run is wired to.
pub struct ShellIo {
    pub stdin: Box<dyn Read + Send>,
    pub out: Output,
    pub err: Output,
}

impl ShellIo {
    pub fn new(stdin: Box<dyn Read + Send>, out: Output, err: Output) -> Self {
        Self { stdin, out, err }
    }

    /// The process's own streams.
    pub fn std() -> Self {
        Self::new(
            Box::new(io::stdin()),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: DispatchMode,
    pub discovery: DiscoveryReport,
}

pub struct Bootstrap {
    config: ShellConfig,
    term: Option<String>,
    system: Arc<LoadingContext>,
    terminal_factory: Box<dyn TerminalFactory>,
    session_factory: SessionFactory,
}

impl Bootstrap {
    /// Bootstrap over the built-in catalog and the process terminal.
    pub fn new(config: ShellConfig) -> Self {
        let system = Arc::new(LoadingContext::system(Catalog::builtin(
            &config.discovery_resource,
        )));
        Self {
            config,
            term: None,
            system,
            terminal_factory: Box::new(SystemTerminalFactory),
            session_factory: SessionFactory::new(),
        }
    }

    /// Replace the root loading context.
    pub fn with_system_context(mut self, system: Arc<LoadingContext>) -> Self {
        self.system = system;
        self
    }

    pub fn with_terminal_factory(mut self, factory: impl TerminalFactory + 'static) -> Self {
        self.terminal_factory = Box::new(factory);
        self
    }

    /// `TERM` value handed to the terminal factory.
    pub fn with_term(mut self, term: Option<String>) -> Self {
        self.term = term;
        self
    }

    pub fn session_factory(&self) -> &SessionFactory {
        &self.session_factory
    }

    /// Run one shell invocation.
    ///
    /// Usage, input, classpath and discovery errors are returned. Command
    /// failures are reported on the session's error stream and the run still
    /// succeeds. The terminal is released on every path.
    pub fn run(&self, args: &[String], io: ShellIo) -> Result<RunSummary> {
        let ShellIo {
            mut stdin,
            out,
            err,
        } = io;

        let bootstrap_config = parse_args(args)?;
        let command = resolve_command_text(&bootstrap_config, &mut stdin)?;
        let context = build_loading_context(
            bootstrap_config.classpath_root.as_deref(),
            Arc::clone(&self.system),
        )?;

        let (terminal, _terminal_guard) = self
            .terminal_factory
            .build(self.term.clone())
            .map_err(BootstrapError::Terminal)?;

        // Batch runs never read stdin again.
        let input: Option<Input> = if command.is_interactive() {
            Some(Box::new(BufReader::new(stdin)))
        } else {
            None
        };

        let session = self
            .session_factory
            .create_session(input, out, err, terminal);
        let mut session = scopeguard::guard(session, |mut session| {
            let _ = session.out().flush();
            let _ = session.err().flush();
        });
        session.put(USER, self.config.user.clone());
        session.put(APPLICATION, self.config.application.clone());
        session.set_prompt(self.config.prompt.clone());

        let discovery = discover_commands(
            &session,
            &context,
            &self.config.discovery_resource,
            self.config.discovery_policy,
        )?;

        let mode = dispatch(&mut session, &command, self.config.multi_scope)?;

        Ok(RunSummary { mode, discovery })
    }
}
