//! Execution dispatcher: run the command text once or enter the
//! read-eval loop.

use crate::error::{BootstrapError, Result};
use crate::input::CommandText;
use crate::shell::{
    log_exception, Session, StackTracePolicy, MULTI_SCOPE_MODE, PRINT_STACK_TRACES,
};

/// Which state the dispatcher entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Non-empty command text, executed once.
    Batch,
    /// Empty command text, handed to the session's read-eval loop.
    Interactive,
}

impl DispatchMode {
    pub fn for_command(command: &CommandText) -> Self {
        if command.is_interactive() {
            DispatchMode::Interactive
        } else {
            DispatchMode::Batch
        }
    }
}

/// Run `command` against `session`.
///
/// Batch failures are reported through the session and never returned; only
/// an I/O failure of the interactive loop escapes.
pub fn dispatch(
    session: &mut Session,
    command: &CommandText,
    multi_scope: bool,
) -> Result<DispatchMode> {
    let mode = DispatchMode::for_command(command);
    tracing::info!(?mode, source = ?command.source(), "Dispatching");

    match mode {
        DispatchMode::Batch => {
            session.put(MULTI_SCOPE_MODE, multi_scope.to_string());
            session.put(PRINT_STACK_TRACES, StackTracePolicy::Execution.as_str());
            if let Err(e) = session.execute(command.as_str()) {
                log_exception(session, &e);
            }
        }
        DispatchMode::Interactive => {
            session.run().map_err(BootstrapError::Session)?;
        }
    }

    Ok(mode)
}
