/*!
 * Monitoring
 * Structured logging for driver runs
 */

mod tracer;

pub use tracer::{generate_run_id, init_tracing, ScenarioSpan};
