//! Task group supervisor
//!
//! Spawns one polling task per descriptor, broadcasts a single
//! cancellation token to all of them, and waits for orderly shutdown.
//! Tasks never exit on their own, so a task returning outside of shutdown
//! means it panicked; the group is fail-fast and cancels everyone else
//! when that happens.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use surge_client::OrderSubmitter;
use surge_core::domain::context::ExecutionContext;
use surge_core::domain::event::TaskEvent;
use surge_core::domain::task::TaskDescriptor;

use crate::scheduler::task::PollingTask;

/// Handle to a running group of polling tasks
pub struct TaskGroup {
    cancel: CancellationToken,
    tasks: JoinSet<()>,
}

impl TaskGroup {
    /// Spawns one polling task per descriptor
    ///
    /// All tasks share the context read-only and the same cancellation
    /// token. An empty descriptor set yields an already-idle group; the
    /// caller decides whether that is acceptable.
    pub fn start(
        descriptors: Vec<TaskDescriptor>,
        ctx: Arc<ExecutionContext>,
        client: Arc<dyn OrderSubmitter>,
        events: UnboundedSender<TaskEvent>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for descriptor in descriptors {
            debug!(
                "Spawning polling task for service {} ({})",
                descriptor.service_id, descriptor.display_name
            );

            let task = PollingTask::new(
                descriptor,
                Arc::clone(&ctx),
                Arc::clone(&client),
                events.clone(),
            );
            let token = cancel.clone();
            tasks.spawn(async move { task.run(token).await });
        }

        Self { cancel, tasks }
    }

    /// Number of tasks still running
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when no task is running
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The token shared by every task in the group
    ///
    /// Cancelling it is equivalent to calling [`stop`](Self::stop) without
    /// waiting for the tasks to unwind.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Signals cancellation and waits for every task to unwind
    ///
    /// Bounded by at most one in-flight request plus one sleep tick per
    /// task; both are cancellable suspension points.
    pub async fn stop(mut self) {
        self.cancel.cancel();

        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                if e.is_panic() {
                    warn!("Polling task panicked during shutdown: {}", e);
                }
            }
        }
    }

    /// Waits for the first task exit, then cancels the rest
    ///
    /// Tasks only return on cancellation, so an exit observed here while
    /// the group is running is either shutdown already in progress or a
    /// panic. A panic is surfaced as an error after the whole group has
    /// been cancelled.
    pub async fn wait_any(&mut self) -> Result<()> {
        match self.tasks.join_next().await {
            None => Ok(()),
            Some(Ok(())) => {
                self.cancel.cancel();
                Ok(())
            }
            Some(Err(e)) => {
                self.cancel.cancel();
                Err(anyhow::anyhow!("polling task panicked: {e}"))
            }
        }
    }

    /// Waits for every task to exit
    ///
    /// Any panic cancels the remaining tasks and is reported once all of
    /// them have unwound.
    pub async fn wait_all(&mut self) -> Result<()> {
        let mut first_panic = None;

        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                self.cancel.cancel();
                if first_panic.is_none() {
                    first_panic = Some(e);
                }
            }
        }

        match first_panic {
            Some(e) => Err(anyhow::anyhow!("polling task panicked: {e}")),
            None => Ok(()),
        }
    }
}
