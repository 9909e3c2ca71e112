use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the background log writer alive until dropped.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    pub json_path: Option<PathBuf>,
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    let level = logging.level().unwrap_or(Level::WARN);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber: JSON lines into `json_file` when
/// configured, otherwise compact text on stderr. `RUST_LOG` overrides the
/// configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = env_filter(logging);

    let Some(json_file) = logging.json_file.as_deref() else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .finish();
        // Ignore error if a global subscriber is already set (e.g., when running in tests)
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(LoggingGuard {
            _guard: None,
            json_path: None,
        });
    };

    let json_path = PathBuf::from(json_file);
    if let Some(dir) = json_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    let file = File::create(&json_path)
        .with_context(|| format!("creating log file at {}", json_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(LoggingGuard {
        _guard: Some(guard),
        json_path: Some(json_path),
    })
}

#[cfg(test)]
mod tests {
    use super::init_logging;
    use crate::config::LoggingConfig;
    use tempfile::tempdir;

    #[test]
    fn json_file_is_created_under_missing_directory() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("logs").join("run.jsonl");
        let logging = LoggingConfig {
            tracing_level: "debug".to_string(),
            json_file: Some(path.display().to_string()),
        };
        let guard = init_logging(&logging).expect("logging initialises");
        assert_eq!(guard.json_path.as_deref(), Some(path.as_path()));
        assert!(path.exists());
    }
}
