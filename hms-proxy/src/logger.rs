//! Logging setup

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "hms_proxy=info,tower_http=info";

/// Initialize tracing
///
/// Console output always; with `log_dir` set, also a daily rolling file
/// `hms-proxy.YYYY-MM-DD` in that directory. Keep the returned guard alive
/// for the lifetime of the process or buffered file lines are lost.
pub fn init_logger(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console = tracing_subscriber::fmt::layer().with_target(false);

    let Some(dir) = log_dir.map(Path::new) else {
        tracing_subscriber::registry().with(filter).with(console).init();
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing_subscriber::registry().with(filter).with(console).init();
        tracing::warn!(dir = %dir.display(), error = %e, "Log directory unavailable, console only");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, "hms-proxy");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
    Some(guard)
}
