//! Logging initialization
//!
//! Wires the `tracing` subscriber from the `logging` section of the suite
//! configuration: an `EnvFilter` (environment wins over the configured
//! level), an ANSI console layer, and a rolling file layer whose cadence
//! follows `logging.rotation`. Rotated files older than the retention
//! window are swept on startup; the appender itself never deletes.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use apicheck_domain::LoggingConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the logging subsystem from configuration.
///
/// Idempotent: tests may race to open a session, so every call after the
/// first is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

        let directory = config
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = config
            .file_path
            .file_name()
            .map_or_else(|| "runtime.log".to_owned(), |n| n.to_string_lossy().into_owned());

        if let Err(e) = std::fs::create_dir_all(directory) {
            eprintln!("apicheck: cannot create log directory {}: {e}", directory.display());
        }
        let appender =
            RollingFileAppender::new(parse_rotation(&config.rotation), directory, file_name);

        let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stdout());
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_ansi(is_terminal))
            .with(fmt::layer().with_writer(appender).with_ansi(false));

        // A subscriber may already be installed (e.g. by a test harness)
        if subscriber.try_init().is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }

        prune_old_logs(directory, config.retention_days);
    });
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// Deletes log files in `directory` older than `retention_days`.
///
/// Best effort: an unreadable directory or file is skipped, never fatal.
fn prune_old_logs(directory: &Path, retention_days: u64) {
    let cutoff = Duration::from_secs(retention_days.saturating_mul(86_400));
    let Ok(entries) = std::fs::read_dir(directory) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let expired = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age > cutoff);
        if expired {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to prune old log file");
            } else {
                tracing::info!(path = %path.display(), "pruned expired log file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_parse_rotation() {
        assert_eq!(parse_rotation("hourly"), Rotation::HOURLY);
        assert_eq!(parse_rotation("NEVER"), Rotation::NEVER);
        assert_eq!(parse_rotation("daily"), Rotation::DAILY);
        assert_eq!(parse_rotation("10 MB"), Rotation::DAILY);
    }

    #[test]
    fn test_prune_skips_fresh_files() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("runtime.log");
        File::create(&fresh).unwrap();

        prune_old_logs(dir.path(), 7);
        assert!(fresh.exists());
    }

    #[test]
    fn test_prune_with_zero_retention_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("runtime.log.2020-01-01");
        File::create(&stale).unwrap();

        // Zero retention makes any file with measurable age eligible
        std::thread::sleep(Duration::from_millis(20));
        prune_old_logs(dir.path(), 0);
        assert!(!stale.exists());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        let config = LoggingConfig {
            file_path: std::env::temp_dir().join("apicheck-test-logs/runtime.log"),
            ..LoggingConfig::default()
        };
        init_logging(&config);
        init_logging(&config);
    }
}
