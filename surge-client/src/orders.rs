//! Order submission
//!
//! One request/response exchange per call. Retry policy belongs to the
//! polling task; this layer only normalizes what happened into an
//! [`OrderOutcome`].

use async_trait::async_trait;
use tracing::debug;

use surge_core::dto::order::{OrderReply, OrderRequest};

use crate::error::ClientError;
use crate::PromoClient;

/// Outcome of one order submission
///
/// Transport and decode failures are folded into the outcome instead of
/// being surfaced as `Err`: to the polling task every variant is a normal
/// iteration result, none of them abort anything.
#[derive(Debug)]
pub enum OrderOutcome {
    /// Remote accepted the order
    Accepted { message: String },
    /// Remote processed the request but refused the order
    /// (rate limiting, business rules); expected and non-exceptional
    Rejected { message: String },
    /// Request never produced a usable response
    Transport { cause: ClientError },
    /// Response arrived but was not valid JSON of the expected shape
    Decode { cause: ClientError },
}

/// Seam between the polling task and the HTTP client
///
/// Lets tests drive the task state machine with a scripted fake instead of
/// a live endpoint.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submits one order and reports what happened
    async fn submit_order(&self, request: &OrderRequest) -> OrderOutcome;
}

impl PromoClient {
    /// Submit one order to the promotion API
    ///
    /// Sends `POST {base}?action=order` with the request as form fields.
    /// Never returns `Err`: every failure class maps to an
    /// [`OrderOutcome`] variant.
    pub async fn submit_order(&self, request: &OrderRequest) -> OrderOutcome {
        debug!(
            "Submitting order for service {} (nonce {})",
            request.service_id, request.nonce
        );

        let url = self.action_url("order");
        let response = match self.http().post(&url).form(request).send().await {
            Ok(response) => response,
            Err(e) => {
                return OrderOutcome::Transport { cause: e.into() };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return OrderOutcome::Transport {
                cause: ClientError::api_error(status.as_u16(), error_text),
            };
        }

        let reply: OrderReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) if e.is_decode() => {
                return OrderOutcome::Decode {
                    cause: ClientError::Decode(e.to_string()),
                };
            }
            Err(e) => {
                return OrderOutcome::Transport { cause: e.into() };
            }
        };

        outcome_from_reply(reply)
    }
}

/// Map a parsed reply onto the accepted/rejected split
fn outcome_from_reply(reply: OrderReply) -> OrderOutcome {
    if reply.success {
        OrderOutcome::Accepted {
            message: reply
                .message
                .unwrap_or_else(|| "order accepted".to_string()),
        }
    } else {
        OrderOutcome::Rejected {
            message: reply
                .message
                .unwrap_or_else(|| "unknown rejection".to_string()),
        }
    }
}

#[async_trait]
impl OrderSubmitter for PromoClient {
    async fn submit_order(&self, request: &OrderRequest) -> OrderOutcome {
        PromoClient::submit_order(self, request).await
    }
}
