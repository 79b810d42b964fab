use std::error::Error as _;

use crate::shell::command::CommandError;
use crate::shell::session::{Session, StackTracePolicy};

/// Report a command failure on the session's error stream.
///
/// The cause chain is printed when the session's stack-trace policy is
/// `always`, or `execution` for failures raised by the command itself.
pub fn log_exception(session: &mut Session, error: &CommandError) {
    tracing::warn!(error = %error, "Command failed");

    let show_causes = match session.stack_trace_policy() {
        StackTracePolicy::Always => true,
        StackTracePolicy::Execution => matches!(error, CommandError::Failed { .. }),
        StackTracePolicy::Never => false,
    };

    let mut report = match error {
        CommandError::NotFound { .. } | CommandError::Ambiguous { .. } => format!("{}\n", error),
        _ => format!("Error executing command: {}\n", error),
    };
    if show_causes {
        let mut source = error.source();
        while let Some(cause) = source {
            report.push_str(&format!("Caused by: {}\n", cause));
            source = cause.source();
        }
    }

    let err = session.err();
    let _ = err.write_all(report.as_bytes());
    let _ = err.flush();
}
