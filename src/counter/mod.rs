/*!
 * Shared Counters
 *
 * A mutable integer shared by concurrently running workers, under three
 * mutation disciplines:
 *
 * - **UnsyncCounter**: no mutual exclusion, increments can be lost
 * - **CoarseLockCounter**: one lock held across each worker's whole loop
 * - **ReducedLockCounter**: private accumulation, lock held for one addition
 *
 * # Invariant
 *
 * After K workers each call `increment_by(N)` and all are joined, the locked
 * variants read exactly K * N. The unsynchronized variant reads at most
 * K * N and usually less under contention.
 */

mod coarse;
mod reduced;
mod traits;
mod trial;
mod unsync;

pub use coarse::CoarseLockCounter;
pub use reduced::ReducedLockCounter;
pub use traits::{SharedCounter, Strategy};
pub use trial::{run_trial, run_trials, TrialOutcome, TrialReport, TrialSpec};
pub use unsync::UnsyncCounter;
