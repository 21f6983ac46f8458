//! Polling task
//!
//! One state machine per task descriptor: build an order with a fresh
//! nonce, submit it, report the outcome as an event, wait, repeat. Nothing
//! an iteration produces terminates the loop; the only way out is the
//! group's cancellation token.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{self, Duration};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use surge_client::{OrderOutcome, OrderSubmitter};
use surge_core::domain::context::ExecutionContext;
use surge_core::domain::event::TaskEvent;
use surge_core::domain::task::TaskDescriptor;
use surge_core::dto::order::OrderRequest;

/// Fixed pause after a transport or decode failure, replacing the
/// descriptor interval for that iteration
pub const RETRY_WAIT: Duration = Duration::from_secs(15);

/// Recurring order task for one descriptor
pub struct PollingTask {
    descriptor: TaskDescriptor,
    ctx: Arc<ExecutionContext>,
    client: Arc<dyn OrderSubmitter>,
    events: UnboundedSender<TaskEvent>,
}

impl PollingTask {
    /// Creates a new polling task
    pub fn new(
        descriptor: TaskDescriptor,
        ctx: Arc<ExecutionContext>,
        client: Arc<dyn OrderSubmitter>,
        events: UnboundedSender<TaskEvent>,
    ) -> Self {
        Self {
            descriptor,
            ctx,
            client,
            events,
        }
    }

    /// Runs iterations until the token is cancelled
    ///
    /// Cancellation is observed at the top of each iteration, during the
    /// network call and during the sleep; there is never more than one
    /// request in flight. Each iteration outcome produces exactly one
    /// event on the channel.
    pub async fn run(&self, cancel: CancellationToken) {
        let _ = self.events.send(TaskEvent::info(
            self.descriptor.service_id,
            format!("polling started (interval {}s)", self.descriptor.wait.as_secs()),
        ));

        loop {
            if cancel.is_cancelled() {
                return;
            }

            let request = self.next_request();

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return,
                outcome = self.client.submit_order(&request) => outcome,
            };

            let (event, wait) = self.interpret(&outcome);
            let _ = self.events.send(event);

            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = time::sleep(wait) => {}
            }
        }
    }

    /// Builds the order for the next iteration with a fresh nonce
    fn next_request(&self) -> OrderRequest {
        let (link, media_id) = if self.descriptor.uses_profile_link {
            (self.ctx.profile_link.clone(), String::new())
        } else {
            (self.ctx.media_link.clone(), self.ctx.media_id.clone())
        };

        OrderRequest {
            service_id: self.descriptor.service_id,
            link,
            nonce: Uuid::new_v4(),
            media_id,
        }
    }

    /// Maps an outcome to the event it reports and the pause before the
    /// next iteration
    ///
    /// A rejected order is expected remote-side throttling, so it waits
    /// out the full descriptor interval like a success. Only transport and
    /// decode failures use the short retry pause.
    fn interpret(&self, outcome: &OrderOutcome) -> (TaskEvent, Duration) {
        let service_id = self.descriptor.service_id;

        match outcome {
            OrderOutcome::Accepted { message } => {
                (TaskEvent::info(service_id, message.clone()), self.descriptor.wait)
            }
            OrderOutcome::Rejected { message } => {
                (TaskEvent::warning(service_id, message.clone()), self.descriptor.wait)
            }
            OrderOutcome::Transport { cause } => (
                TaskEvent::error(service_id, format!("request failed: {cause}")),
                RETRY_WAIT,
            ),
            OrderOutcome::Decode { cause } => (
                TaskEvent::error(service_id, format!("unusable response: {cause}")),
                RETRY_WAIT,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ScriptedSubmitter;
    use std::collections::HashSet;
    use surge_core::domain::event::EventLevel;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    fn ctx() -> Arc<ExecutionContext> {
        Arc::new(ExecutionContext {
            profile_link: "P".to_string(),
            media_link: "V".to_string(),
            media_id: "X".to_string(),
        })
    }

    fn task(
        descriptor: TaskDescriptor,
        client: Arc<ScriptedSubmitter>,
    ) -> (PollingTask, mpsc::UnboundedReceiver<TaskEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (PollingTask::new(descriptor, ctx(), client, tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TaskEvent>) -> Vec<TaskEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_profile_service_targets_profile_link() {
        let descriptor =
            TaskDescriptor::new(228, "Followers", true).with_wait(Duration::from_secs(600));
        let (task, _rx) = task(descriptor, Arc::new(ScriptedSubmitter::default()));

        let request = task.next_request();
        assert_eq!(request.service_id, 228);
        assert_eq!(request.link, "P");
        assert_eq!(request.media_id, "");
    }

    #[test]
    fn test_media_service_targets_media_link() {
        let (task, _rx) = task(
            TaskDescriptor::new(229, "Views", false),
            Arc::new(ScriptedSubmitter::default()),
        );

        let request = task.next_request();
        assert_eq!(request.link, "V");
        assert_eq!(request.media_id, "X");
    }

    #[test]
    fn test_nonces_are_pairwise_distinct() {
        let (task, _rx) = task(
            TaskDescriptor::new(229, "Views", false),
            Arc::new(ScriptedSubmitter::default()),
        );

        let nonces: HashSet<Uuid> = (0..64).map(|_| task.next_request().nonce).collect();
        assert_eq!(nonces.len(), 64);
    }

    #[test]
    fn test_failures_always_use_the_retry_wait() {
        let descriptor =
            TaskDescriptor::new(229, "Views", false).with_wait(Duration::from_secs(600));
        let (task, _rx) = task(descriptor, Arc::new(ScriptedSubmitter::default()));

        for outcome in [
            ScriptedSubmitter::transport_outcome(),
            ScriptedSubmitter::decode_outcome(),
            ScriptedSubmitter::transport_outcome(),
        ] {
            let (event, wait) = task.interpret(&outcome);
            assert_eq!(event.level, EventLevel::Error);
            assert_eq!(wait, RETRY_WAIT);
        }
    }

    #[test]
    fn test_rejection_waits_full_interval() {
        let descriptor =
            TaskDescriptor::new(229, "Views", false).with_wait(Duration::from_secs(600));
        let (task, _rx) = task(descriptor, Arc::new(ScriptedSubmitter::default()));

        let outcome = OrderOutcome::Rejected {
            message: "limit reached".to_string(),
        };
        let (event, wait) = task.interpret(&outcome);
        assert_eq!(event.level, EventLevel::Warning);
        assert!(event.message.contains("limit reached"));
        assert_eq!(wait, Duration::from_secs(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_issues_no_requests() {
        let client = Arc::new(ScriptedSubmitter::default());
        let (task, _rx) = task(TaskDescriptor::new(229, "Views", false), client.clone());

        let cancel = CancellationToken::new();
        cancel.cancel();
        task.run(cancel).await;

        assert_eq!(client.submissions().len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_retries_once_after_short_wait() {
        // Transport failure, then one success; the fake cancels the token
        // on its second call so the loop ends before a third request.
        let client = Arc::new(
            ScriptedSubmitter::default()
                .with_outcome(ScriptedSubmitter::transport_outcome())
                .cancel_after(2),
        );
        let descriptor =
            TaskDescriptor::new(229, "Views", false).with_wait(Duration::from_secs(600));
        let (task, mut rx) = task(descriptor, client.clone());

        let cancel = CancellationToken::new();
        client.bind_token(cancel.clone());

        let started = Instant::now();
        task.run(cancel).await;

        // One failed request, 15 s pause, exactly one follow-up request.
        assert_eq!(client.submissions().len(), 2);
        assert_eq!(started.elapsed(), RETRY_WAIT);

        let events = drain(&mut rx);
        let errors: Vec<_> = events
            .iter()
            .filter(|e| e.level == EventLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_sleeps_descriptor_interval() {
        let client = Arc::new(
            ScriptedSubmitter::default()
                .with_outcome(OrderOutcome::Rejected {
                    message: "limit reached".to_string(),
                })
                .cancel_after(2),
        );
        let descriptor =
            TaskDescriptor::new(229, "Views", false).with_wait(Duration::from_secs(600));
        let (task, mut rx) = task(descriptor, client.clone());

        let cancel = CancellationToken::new();
        client.bind_token(cancel.clone());

        let started = Instant::now();
        task.run(cancel).await;

        assert_eq!(started.elapsed(), Duration::from_secs(600));

        let warnings: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter(|e| e.level == EventLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("limit reached"));
    }
}
