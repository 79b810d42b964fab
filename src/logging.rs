//! Diagnostic logging for the bootstrap.
//!
//! Shell output owns stdout and stderr, so events only ever go to a file
//! named by `SHELLBOOT_LOG`. Without it no subscriber is installed.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "SHELLBOOT_LOG";

const DEFAULT_FILTER: &str = "info";

/// Per-process log file: `{base}.{started}.{pid}`.
pub fn log_file_path(base: &Path, started: u64, pid: u32) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!(".{}.{}", started, pid));
    PathBuf::from(name)
}

/// Install the file subscriber when `SHELLBOOT_LOG` is set.
///
/// `RUST_LOG` selects events, `info` otherwise. A log file that cannot be
/// created leaves logging off and the shell still runs.
pub fn init_tracing() {
    let Some(base) = std::env::var_os(LOG_ENV).filter(|p| !p.is_empty()) else {
        return;
    };

    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = log_file_path(Path::new(&base), started, std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339()),
        )
        .init();
}
