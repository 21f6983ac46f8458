//! Task descriptor domain model
//!
//! Describes one recurring order task as derived from the service catalog.

use std::time::Duration;

/// Interval used when a catalog entry does not carry its own timer.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(600);

/// Immutable description of one recurring order task
///
/// Built once at startup from a catalog entry marked available, then owned
/// by the polling task that executes it. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Numeric service identifier assigned by the remote API
    pub service_id: u32,

    /// Human-readable name used when presenting task events
    pub display_name: String,

    /// Pause between iterations that reached the remote service
    pub wait: Duration,

    /// Whether orders for this service target the profile link
    /// (and carry an empty media id) instead of the media link
    pub uses_profile_link: bool,
}

impl TaskDescriptor {
    /// Creates a descriptor with the default interval
    pub fn new(service_id: u32, display_name: impl Into<String>, uses_profile_link: bool) -> Self {
        Self {
            service_id,
            display_name: display_name.into(),
            wait: DEFAULT_WAIT,
            uses_profile_link,
        }
    }

    /// Replaces the interval, keeping the default when the catalog timer is zero
    pub fn with_wait(mut self, wait: Duration) -> Self {
        if !wait.is_zero() {
            self.wait = wait;
        }
        self
    }
}
