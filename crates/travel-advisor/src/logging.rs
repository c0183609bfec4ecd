use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,travel_advisor=debug";

/// Appends to the session log file; buffered lines flush when the guard drops.
fn open_log_file(log_dir: &Path, file_name: &str) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Plain-text lines of the form `<rfc3339 timestamp> <LEVEL> <message>`.
fn file_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'a> MakeWriter<'a> + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
}

/// Installs the global subscriber. Keep the returned guard alive until exit.
pub(crate) fn init_tracing(
    log_dir: &Path,
    file_name: &str,
    log_to_stderr: bool,
) -> anyhow::Result<WorkerGuard> {
    let (file_writer, file_guard) = open_log_file(log_dir, file_name)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer(file_writer));

    if log_to_stderr {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    Ok(file_guard)
}
