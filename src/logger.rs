use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "flashcard-generator.log";
const DEFAULT_FILTER: &str = "flashcard_generator=info";

/// Keeps the non-blocking writer alive; logs are flushed when it drops.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// `override_dir`, else the platform data dir, else the temp dir.
pub fn resolve_log_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    dirs::data_local_dir()
        .map(|d| d.join("flashcard-generator").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("flashcard-generator").join("logs"))
}

/// Route tracing output to a daily log file. The terminal belongs to the UI,
/// so nothing is written to stdout or stderr.
pub fn init(override_dir: Option<&Path>) -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir(override_dir);
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

/// Log panics, running `restore` first and then whatever hook was installed
/// before, so the default stderr report still reaches a usable terminal.
pub fn install_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        tracing::error!(panic = %panic_info, "panic");
        previous(panic_info);
    }));
}
