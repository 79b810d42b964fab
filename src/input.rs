//! Input resolution: decides where the command text comes from.

use std::fs;
use std::io::Read;

use crate::args::BootstrapConfig;
use crate::error::{BootstrapError, Result};

/// Where the command text was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// `--file` contents.
    File,
    /// Standard input read to end of stream (`--batch`).
    Stdin,
    /// Positional arguments.
    Inline,
}

/// The fully assembled command to execute.
///
/// An empty text is the sentinel for interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandText {
    text: String,
    source: InputSource,
}

impl CommandText {
    pub fn new(text: impl Into<String>, source: InputSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> InputSource {
        self.source
    }

    /// True when no command was supplied and the shell should go interactive.
    pub fn is_interactive(&self) -> bool {
        self.text.is_empty()
    }
}

/// Resolve the command text, first match wins: input file, batch stdin,
/// inline tokens. File and stdin contents replace the inline tokens.
///
/// `stdin` is only read in batch mode.
pub fn resolve_command_text<R: Read>(config: &BootstrapConfig, stdin: R) -> Result<CommandText> {
    if let Some(path) = &config.input_file {
        let text = fs::read_to_string(path).map_err(|source| BootstrapError::InputFile {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Read commands from file");
        return Ok(CommandText::new(text, InputSource::File));
    }

    if config.batch {
        let mut text = String::new();
        let mut stdin = stdin;
        stdin
            .read_to_string(&mut text)
            .map_err(BootstrapError::Stdin)?;
        tracing::debug!(bytes = text.len(), "Read commands from standard input");
        return Ok(CommandText::new(text, InputSource::Stdin));
    }

    Ok(CommandText::new(config.inline_command(), InputSource::Inline))
}
