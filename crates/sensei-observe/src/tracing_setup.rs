//! Tracing subscriber initialization with a terminal layer, a log file layer
//! and optional OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use sensei_observe::tracing_setup::{init_tracing, stderr_directive, LoggingOptions};
//!
//! let options = LoggingOptions {
//!     stderr_directive: stderr_directive(0, false).to_string(),
//!     log_file: Some("/tmp/sensei.log".into()),
//!     otel: false,
//! };
//! let _guard = init_tracing(&options).unwrap();
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Level written to the log file. The terminal is usually quieter.
pub const FILE_DIRECTIVE: &str = "info,sensei_core=debug,sensei_infra=debug";

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter for the stderr layer, used when `RUST_LOG` is unset.
    pub stderr_directive: String,
    /// Append-only log file. Parent directories are created.
    pub log_file: Option<PathBuf>,
    /// Bridge spans to the OpenTelemetry stdout exporter.
    pub otel: bool,
}

/// Keeps the non-blocking file writer alive. Drop it last.
#[must_use = "dropping the guard stops the log file writer"]
pub struct TracingGuard {
    _file: Option<WorkerGuard>,
}

/// Map `-v` / `--quiet` to a stderr filter directive.
pub fn stderr_directive(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,sensei_core=debug,sensei_infra=debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// - stderr gets compact human-readable events filtered by `RUST_LOG`, or
///   by `stderr_directive` when `RUST_LOG` is unset.
/// - The log file, when configured, gets every event at [`FILE_DIRECTIVE`]
///   with span close timing. A file that cannot be opened is reported on
///   stderr and skipped.
/// - When `otel` is set, spans are additionally exported to stdout through
///   OpenTelemetry (suitable for local development).
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(
    options: &LoggingOptions,
) -> Result<TracingGuard, Box<dyn std::error::Error + Send + Sync>> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.stderr_directive));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, file_guard) = match options.log_file.as_deref().map(open_log_file) {
        Some(Ok(file)) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(EnvFilter::new(FILE_DIRECTIVE));
            (Some(layer), Some(guard))
        }
        Some(Err(err)) => {
            eprintln!("Warning: could not open log file: {err}");
            (None, None)
        }
        None => (None, None),
    };

    let otel_layer = if options.otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("sensei");

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(TracingGuard { _file: file_guard })
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// Safe to call even when OTel was not enabled (no-op in that case).
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

/// Open `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
