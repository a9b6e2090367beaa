use std::sync::OnceLock;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

use listino::args::Args;

/// Keeps the non-blocking log writer alive for the process lifetime.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Local wall-clock timestamps for log lines.
struct ListinoTimer;

impl FormatTime for ListinoTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Log to a file under the config directory; the terminal is busy drawing
/// the UI, so nothing may write to stdout or stderr while running.
fn init_tracing() {
    let file_appender = tracing_appender::rolling::never(listino::theme::logs_dir(), "listino.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(ListinoTimer)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if let Err(e) = listino::app::run(args).await {
        tracing::error!(error = %e, "fatal error");
        eprintln!("listino: {e}");
        std::process::exit(1);
    }
}
