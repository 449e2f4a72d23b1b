/*!
 * Structured Tracing
 * Logging setup and scenario spans using the tracing crate
 *
 * Features:
 * - Run ID generation for correlating one driver run
 * - JSON-formatted logs for structured parsing
 * - Per-scenario spans with elapsed time
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

const ENV_TRACE_JSON: &str = "LESSONS_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - LESSONS_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique run ID for log correlation
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one driver scenario
pub struct ScenarioSpan {
    span: tracing::Span,
    start: Instant,
    name: &'static str,
}

impl ScenarioSpan {
    pub fn new(name: &'static str, run_id: &str) -> Self {
        let span = span!(
            Level::INFO,
            "scenario",
            run_id = %run_id,
            scenario = name,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            name,
        }
    }

    /// Record the scenario result
    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for ScenarioSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_ms", duration.as_millis() as u64);

        if duration.as_secs() >= 10 {
            warn!(
                scenario = self.name,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow scenario"
            );
        } else {
            info!(
                scenario = self.name,
                duration_ms = duration.as_millis() as u64,
                "scenario finished"
            );
        }
    }
}
