//! Test doubles for the scheduler
//!
//! A scripted [`OrderSubmitter`] that records every request it sees,
//! replays a queue of outcomes (defaulting to acceptance once the queue is
//! empty), and can cancel a bound token or panic at a chosen call. Lets
//! the state machine and supervisor run against fully deterministic
//! remote behavior.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use surge_client::{ClientError, OrderOutcome, OrderSubmitter};
use surge_core::dto::order::OrderRequest;

#[derive(Default)]
pub struct ScriptedSubmitter {
    scripted: Mutex<VecDeque<OrderOutcome>>,
    seen: Mutex<Vec<OrderRequest>>,
    cancel_on_call: Option<usize>,
    panic_on_call: Option<usize>,
    token: Mutex<Option<CancellationToken>>,
}

impl ScriptedSubmitter {
    /// Queues one outcome; calls past the queue are accepted
    pub fn with_outcome(self, outcome: OrderOutcome) -> Self {
        self.scripted.lock().unwrap().push_back(outcome);
        self
    }

    /// Cancels the bound token when the n-th call (1-based) arrives
    pub fn cancel_after(mut self, call: usize) -> Self {
        self.cancel_on_call = Some(call);
        self
    }

    /// Panics on the n-th call (1-based), simulating a task crash
    pub fn panic_on_call(mut self, call: usize) -> Self {
        self.panic_on_call = Some(call);
        self
    }

    /// Binds the token that `cancel_after` fires
    pub fn bind_token(&self, token: CancellationToken) {
        *self.token.lock().unwrap() = Some(token);
    }

    /// Every request submitted so far, in order
    pub fn submissions(&self) -> Vec<OrderRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn transport_outcome() -> OrderOutcome {
        OrderOutcome::Transport {
            cause: ClientError::api_error(502, "bad gateway"),
        }
    }

    pub fn decode_outcome() -> OrderOutcome {
        OrderOutcome::Decode {
            cause: ClientError::Decode("truncated body".to_string()),
        }
    }
}

#[async_trait]
impl OrderSubmitter for ScriptedSubmitter {
    async fn submit_order(&self, request: &OrderRequest) -> OrderOutcome {
        let call = {
            let mut seen = self.seen.lock().unwrap();
            seen.push(request.clone());
            seen.len()
        };

        if self.panic_on_call == Some(call) {
            panic!("scripted submitter panic on call {call}");
        }

        if self.cancel_on_call == Some(call) {
            if let Some(token) = self.token.lock().unwrap().as_ref() {
                token.cancel();
            }
        }

        self.scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| OrderOutcome::Accepted {
                message: "order accepted".to_string(),
            })
    }
}
