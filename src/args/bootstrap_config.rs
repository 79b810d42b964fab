//! Bootstrap configuration: classified args folded into settings.

use std::path::PathBuf;

use crate::args::classifier::{classify, ClassifiedArg};
use crate::args::registry::{flag_registry, FlagTarget};
use crate::error::Result;

/// Structured result of argument parsing. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Directory scanned for command archives.
    pub classpath_root: Option<PathBuf>,
    /// Read the command text from standard input.
    pub batch: bool,
    /// Read the command text from this file. Wins over `batch`.
    pub input_file: Option<PathBuf>,
    /// Positional arguments, in order.
    pub inline_tokens: Vec<String>,
}

impl BootstrapConfig {
    /// Inline tokens joined the way the command line spelled them, each
    /// followed by a single space (`["echo", "hi"]` → `"echo hi "`).
    pub fn inline_command(&self) -> String {
        let mut command = String::new();
        for token in &self.inline_tokens {
            command.push_str(token);
            command.push(' ');
        }
        command
    }
}

/// Parse raw process arguments (without the program name).
///
/// Repeated flags follow last-write-wins.
pub fn parse_args(raw_args: &[String]) -> Result<BootstrapConfig> {
    let registry = flag_registry();
    let classified = classify(raw_args, &registry)?;

    let mut config = BootstrapConfig::default();
    for arg in classified {
        match arg {
            ClassifiedArg::Flag {
                target,
                flag,
                value,
            } => {
                tracing::debug!(%flag, ?value, "Applying bootstrap flag");
                match target {
                    FlagTarget::Classpath => config.classpath_root = value.map(PathBuf::from),
                    FlagTarget::File => config.input_file = value.map(PathBuf::from),
                    FlagTarget::Batch => config.batch = true,
                }
            }
            ClassifiedArg::Positional(token) => config.inline_tokens.push(token),
        }
    }

    Ok(config)
}
