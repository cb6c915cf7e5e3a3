//! Comparison coordinator for shingle-based passage detection.
//!
//! A [`Run`] moves through `Idle → Shingling → Comparing` and ends
//! `Completed`, `Cancelled` or `Failed`. [`Comparator`] runs it on tokio's
//! blocking pool and streams [`RunMessage`]s to the caller.

pub mod cancel;
pub mod comparator;
pub mod parallel;
pub mod progress;
pub mod run;

pub use cancel::CancelSignal;
pub use comparator::{Comparator, RunHandle, RunMessage};
pub use progress::{NoProgress, ProgressReporter, ProgressTracker};
pub use run::{total_pairs, Run};
