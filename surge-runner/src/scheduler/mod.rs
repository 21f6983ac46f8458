//! Scheduler layer for the runner
//!
//! One polling task per catalog service, all supervised as a group: the
//! supervisor spawns them, broadcasts cancellation and waits for orderly
//! shutdown.

pub mod supervisor;
pub mod task;

#[cfg(test)]
pub mod testing;

pub use supervisor::TaskGroup;
