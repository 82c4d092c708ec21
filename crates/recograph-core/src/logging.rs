//! Structured logging setup
//!
//! Library code only emits `tracing` events; the binary decides whether and
//! how they are rendered by calling [`init_tracing`] once at startup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "build_graph");
/// // Or with additional fields:
/// trace_time!(start, "build_graph", nodes = graph.node_count());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "recograph=debug,recograph_core=debug",
        (false, None) => "recograph=warn,recograph_core=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins, then RECOGRAPH_LOG, then the CLI flags
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("RECOGRAPH_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(expand_level(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Turn a bare level ("debug") into directives for both crates; full
/// directives ("recograph_core=trace") pass through untouched.
fn expand_level(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("recograph={level},recograph_core={level}")
    }
}
