/*!
 * Sync Lessons Library
 * Background computation, one-shot handoff and shared counters under
 * different locking disciplines
 */

pub mod compute;
pub mod core;
pub mod counter;
pub mod driver;
pub mod handoff;
pub mod monitoring;

// Re-exports
pub use compute::{launch, ComputationHandle, WorkSpec};
pub use crate::core::{LessonConfig, LessonError, LessonResult};
pub use counter::{SharedCounter, Strategy, TrialReport, TrialSpec};
pub use driver::{run_all, DriverReport};
pub use handoff::{channel, ConsumerEnd, ProducerEnd};
pub use monitoring::init_tracing;
