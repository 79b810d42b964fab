//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

use parking_lot::Mutex;
use shellboot::config::ShellConfig;
use shellboot::loader::{Catalog, LoadingContext};
use shellboot::shell::{Command, CommandType, Session, SessionFactory};
use shellboot::terminal::{TerminalFactory, TerminalGuard, TerminalHandle};
use shellboot::{Bootstrap, ShellIo};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub const RESOURCE: &str = "shell/commands";

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

// -- Streams ------------------------------------------------------------------

/// Writer that records everything written to it.
#[derive(Clone, Default)]
pub struct SpyBuffer(Arc<Mutex<Vec<u8>>>);

impl SpyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SpyBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream triple with spies on both outputs.
pub fn spy_io(stdin: &str) -> (ShellIo, SpyBuffer, SpyBuffer) {
    let out = SpyBuffer::new();
    let err = SpyBuffer::new();
    let io = ShellIo::new(
        Box::new(Cursor::new(stdin.as_bytes().to_vec())),
        Box::new(out.clone()),
        Box::new(err.clone()),
    );
    (io, out, err)
}

// -- Terminal -----------------------------------------------------------------

/// Terminal factory counting builds and releases.
#[derive(Clone, Default)]
pub struct CountingTerminalFactory {
    pub built: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
}

impl CountingTerminalFactory {
    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl TerminalFactory for CountingTerminalFactory {
    fn build(&self, _term: Option<String>) -> io::Result<(TerminalHandle, TerminalGuard)> {
        self.built.fetch_add(1, Ordering::SeqCst);
        let released = Arc::clone(&self.released);
        let guard = TerminalGuard::new(move || {
            released.fetch_add(1, Ordering::SeqCst);
        });
        Ok((TerminalHandle::new(80), guard))
    }
}

// -- Commands -----------------------------------------------------------------

/// Records every invocation's arguments.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Vec<String>>>>);

impl Recorder {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.0.lock().clone()
    }
}

struct RecordingCommand(Recorder);

impl Command for RecordingCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> anyhow::Result<()> {
        self.0 .0.lock().push(args.to_vec());
        writeln!(session.out(), "{}", args.join(" "))?;
        Ok(())
    }
}

struct FailingCommand;

impl Command for FailingCommand {
    fn execute(&self, _session: &mut Session, _args: &[String]) -> anyhow::Result<()> {
        let root = io::Error::new(io::ErrorKind::Other, "disk on fire");
        Err(anyhow::Error::new(root).context("could not finish"))
    }
}

/// `com.example.EchoCommand` (`example:echo`) backed by `recorder`.
pub fn echo_type(recorder: &Recorder) -> CommandType {
    let recorder = recorder.clone();
    CommandType::new(
        "com.example.EchoCommand",
        "example",
        "echo",
        "Records and prints its arguments",
        move || Arc::new(RecordingCommand(recorder.clone())) as Arc<dyn Command>,
    )
}

/// `com.example.FailCommand` (`example:fail`), always fails with a cause chain.
pub fn fail_type() -> CommandType {
    CommandType::new(
        "com.example.FailCommand",
        "example",
        "fail",
        "Always fails",
        || Arc::new(FailingCommand) as Arc<dyn Command>,
    )
}

/// System context exposing the example commands and a resource listing them.
pub fn example_context(recorder: &Recorder, listing: &str) -> Arc<LoadingContext> {
    let mut catalog = Catalog::new();
    catalog
        .insert(echo_type(recorder))
        .insert(fail_type())
        .add_resource(RESOURCE, listing);
    Arc::new(LoadingContext::system(catalog))
}

pub fn bootstrap_with(
    context: Arc<LoadingContext>,
    terminal: &CountingTerminalFactory,
) -> Bootstrap {
    Bootstrap::new(ShellConfig::default())
        .with_system_context(context)
        .with_terminal_factory(terminal.clone())
        .with_term(Some("xterm".to_string()))
}

pub fn session_for(factory: &SessionFactory) -> (Session, SpyBuffer, SpyBuffer) {
    let out = SpyBuffer::new();
    let err = SpyBuffer::new();
    let session = factory.create_session(
        None,
        Box::new(out.clone()),
        Box::new(err.clone()),
        TerminalHandle::dumb(),
    );
    (session, out, err)
}

// -- File-system fixtures -----------------------------------------------------

pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
    }
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Archive declaring one script command and listing it in the resource.
pub fn greet_archive(scope: &str, class_name: &str) -> String {
    format!(
        r#"[resources]
"{resource}" = """
# contributed by an archive
{class}
"""

[commands."{class}"]
scope = "{scope}"
name = "greet"
description = "Greets the caller"
script = "echo hello $*"
"#,
        resource = RESOURCE,
        class = class_name,
        scope = scope,
    )
}

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
