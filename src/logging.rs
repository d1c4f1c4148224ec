//! Tracing initialization for the server binary.
//!
//! Logs go to stderr by default or to a rolling daily file under the user's
//! cache dir, never to stdout: stdout carries the MCP stdio transport.
//! Initialization is idempotent so tests and library reuse won't panic on a
//! second call.

use directories::ProjectDirs;
use std::{fs, path::PathBuf, sync::Once};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// * `log_to_file` - write to a rolling daily file instead of stderr
/// * `verbose` - default filter `debug` instead of `info` (`RUST_LOG` wins)
pub fn init_subscriber(log_to_file: bool, verbose: bool) {
    INIT.call_once(|| {
        let level = if verbose { "debug" } else { "info" };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        if log_to_file
            && let Some(dir) = log_dir()
        {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, "pokedex.log"));
            // Keep the guard alive for the program lifetime so logs flush.
            Box::leak(Box::new(guard));
            fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .init();
            tracing::debug!("logging to {dir:?} (verbose={verbose})");
        } else {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
                .init();
            tracing::debug!("logging to stderr (verbose={verbose})");
        }
    });
}

fn log_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("dev", "pokedex_mcp", "pokedex_mcp")?;
    let dir = proj.cache_dir().join("logs");
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Failed to create log dir {dir:?}: {e}");
        return None;
    }
    Some(dir)
}
