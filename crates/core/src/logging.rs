use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory holding rolling log files, `~/.pkglink/logs` by default.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pkglink/logs")
}

/// Install the global subscriber for one `pkglink` command. Keep the
/// returned guard alive until exit so buffered lines reach the log file.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    init_logging_in(&log_dir(), component, to_stderr)
}

/// Like [`init_logging`], writing `<component>.log.<yyyy-mm-dd>` files into
/// `log_dir`. `RUST_LOG` overrides the default `info` level.
pub fn init_logging_in(log_dir: &Path, component: &str, to_stderr: bool) -> WorkerGuard {
    let _ = std::fs::create_dir_all(log_dir);

    let appender = tracing_appender::rolling::daily(log_dir, format!("{component}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
    if installed.is_err() {
        warn!(component, "a global subscriber is already installed");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_logging_creates_dir() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("nested/logs");

        let _guard = init_logging_in(&logs, "test", false);
        let _again = init_logging_in(&logs, "test", false);

        assert!(logs.is_dir());
    }
}
