/*!
 * Background Computation
 *
 * Offload a CPU-bound computation to a background thread and collect its
 * result through a single-owner handle.
 *
 * ## Example
 *
 * ```rust
 * use sync_lessons::compute::{launch, WorkSpec};
 *
 * let mut handle = launch(WorkSpec::new(0, 10)?)?;
 * handle.wait()?;
 * let total = handle.result()?;
 * assert!(total > 22.0);
 * # Ok::<(), sync_lessons::LessonError>(())
 * ```
 */

mod handle;
mod work;

pub use handle::{launch, ComputationHandle};
pub use work::{sum_of_square_roots, WorkSpec};
