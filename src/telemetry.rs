//! # Telemetry
//!
//! Tracing setup plus the per-request trace ID plumbing used by the HTTP
//! layer. [`init_tracing`] installs the global subscriber (JSON or pretty,
//! per [`AppConfig`]) and bridges `log::` macros into tracing;
//! [`with_trace_context`] and [`current_trace_id`] carry the request's trace
//! ID through task-local storage so error payloads can echo it.

use std::any::type_name_of_val;
use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;
use tokio::task_local;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::AppConfig;

/// Correlation ID attached to a single HTTP request.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: String,
}

task_local! {
    static REQUEST_TRACE: TraceContext;
}

static TRACING_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installs the global tracing subscriber once per process.
///
/// Re-invocations are no-ops. A subscriber installed elsewhere (the test
/// harness does this) is left in place with a warning rather than treated as
/// fatal.
pub fn init_tracing(config: &AppConfig) {
    if TRACING_INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    // Bridge first so `log::` macros from dependencies land in tracing.
    install_log_bridge();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let format_layer = match config.log_format.as_str() {
        "pretty" => fmt::layer().pretty().boxed(),
        _ => fmt::layer().json().boxed(),
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(format_layer)
        .try_init()
    {
        TRACING_INSTALLED.store(false, Ordering::SeqCst);
        eprintln!("Warning: tracing subscriber already set: {err}. Keeping the existing one.");
    }
}

fn install_log_bridge() {
    if let Err(err) = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init()
    {
        // A LogTracer registered by an earlier init is fine; anything else
        // means `log::` output will bypass tracing.
        if !type_name_of_val(log::logger()).contains("LogTracer") {
            eprintln!("Warning: log bridge not installed: {err}.");
        }
    }
}

/// Runs `future` with `context` as the task-local trace context.
pub async fn with_trace_context<Fut, R>(context: TraceContext, future: Fut) -> R
where
    Fut: std::future::Future<Output = R>,
{
    REQUEST_TRACE.scope(context, future).await
}

/// Trace ID of the request the current task is serving, if any.
pub fn current_trace_id() -> Option<String> {
    REQUEST_TRACE.try_with(|ctx| ctx.trace_id.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trace_id_visible_only_inside_scope() {
        assert_eq!(current_trace_id(), None);

        let context = TraceContext {
            trace_id: "trace-abc".to_string(),
        };
        let seen = with_trace_context(context, async { current_trace_id() }).await;

        assert_eq!(seen.as_deref(), Some("trace-abc"));
        assert_eq!(current_trace_id(), None);
    }
}
