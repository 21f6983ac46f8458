//! Execution context domain model

/// Shared read-only inputs for every polling task in a run
///
/// Assembled once by startup code, before any task is spawned, and handed
/// to the task group behind an `Arc`. No task mutates it, so no locking is
/// needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Link to the account profile, used by profile-targeting services
    pub profile_link: String,

    /// Link to the media item, used by every other service
    pub media_link: String,

    /// Identifier resolved from the media link by the remote service
    pub media_id: String,
}
