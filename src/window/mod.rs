//! Puzzle window cache and its daily rotation
//!
//! The window keeps a precomputed nearest table for each day in a small run
//! around today. A background scheduler advances it once per day.

mod cache;
mod retry;
mod scheduler;
mod settings;

pub use cache::{PuzzleWindow, RotationReport, WindowSnapshot};
pub use retry::RetryPolicy;
pub use scheduler::{RotationSchedule, RotationScheduler};
pub use settings::{OffsetsError, WindowOffsets, WindowSettings};
