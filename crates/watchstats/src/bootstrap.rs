use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    // Map conventional log-level names to tracing level names
    // (tracing uses lowercase).
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Input-path discovery ───────────────────────────────────────────────────────

/// Attempt to locate a watch-history export on the local system.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./watch_history.json`
/// 2. `~/Downloads/Takeout/YouTube and YouTube Music/history/watch_history.json`
///
/// Returns `None` when neither path exists.
pub fn discover_input_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_input_path_in(&cwd, dirs::home_dir().as_deref())
}

/// Candidate-list discovery rooted at explicit directories (used for
/// testing).
pub fn discover_input_path_in(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = vec![cwd.join("watch_history.json")];
    if let Some(home) = home {
        candidates.push(
            home.join("Downloads")
                .join("Takeout")
                .join("YouTube and YouTube Music")
                .join("history")
                .join("watch_history.json"),
        );
    }
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
