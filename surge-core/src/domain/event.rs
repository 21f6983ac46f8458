//! Task event domain types
//!
//! Polling tasks report each iteration outcome as one structured event.
//! The presentation layer decides how events look on the console; tasks
//! never format or colorize anything themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a task event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Info,
    Warning,
    Error,
}

/// One structured event from a polling task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEvent {
    pub timestamp: DateTime<Utc>,
    pub level: EventLevel,
    /// Service id of the task that produced the event
    pub service_id: u32,
    pub message: String,
}

impl TaskEvent {
    pub fn info(service_id: u32, message: impl Into<String>) -> Self {
        Self::new(EventLevel::Info, service_id, message)
    }

    pub fn warning(service_id: u32, message: impl Into<String>) -> Self {
        Self::new(EventLevel::Warning, service_id, message)
    }

    pub fn error(service_id: u32, message: impl Into<String>) -> Self {
        Self::new(EventLevel::Error, service_id, message)
    }

    fn new(level: EventLevel, service_id: u32, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            service_id,
            message: message.into(),
        }
    }
}
