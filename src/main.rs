/*!
 * Sync Lessons - Main Entry Point
 *
 * Runs the three concurrency lessons:
 * - Background computation with a single-owner handle
 * - One-shot producer/consumer handoff
 * - Shared counter trials (unsynchronized, coarse lock, reduced critical section)
 *
 * Exits non-zero if any scenario fails or a locked counter loses an update.
 */

use miette::IntoDiagnostic;
use sync_lessons::{init_tracing, run_all, LessonConfig};
use tracing::{info, warn};

fn main() -> miette::Result<()> {
    init_tracing();

    info!("Sync lessons starting...");
    info!("================================================");

    let config = LessonConfig::from_env()?;
    info!(
        workers = config.workers,
        increments = config.increments,
        trials = config.trials,
        work_min = config.work_min,
        work_max = config.work_max,
        "Configuration loaded"
    );

    let report = run_all(&config)?;

    for counter in &report.counters {
        if counter.divergent.is_empty() {
            info!(
                strategy = %counter.strategy,
                trials = counter.trials,
                "All trials reached the expected total"
            );
        } else {
            warn!(
                strategy = %counter.strategy,
                divergent = counter.divergent.len(),
                trials = counter.trials,
                min_observed = counter.min_observed,
                "Lost updates observed"
            );
        }
    }

    let print_json = std::env::var("LESSONS_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if print_json {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{}", json);
    }

    report.verify()?;

    info!("================================================");
    info!("All invariants held");
    Ok(())
}
