//! Order DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One order submission, built fresh on every iteration
///
/// The `nonce` must be unique per submission: the remote service drops
/// repeats of a token it has already seen, so reusing one would silently
/// turn distinct orders into duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "service")]
    pub service_id: u32,

    /// Profile or media link, depending on the service flavor
    pub link: String,

    #[serde(rename = "uuid")]
    pub nonce: Uuid,

    /// Resolved media identifier, empty for profile-targeting services
    #[serde(rename = "mediaId")]
    pub media_id: String,
}

/// Parsed body of an order response
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_with_wire_names() {
        let request = OrderRequest {
            service_id: 229,
            link: "https://example.com/v/1".to_string(),
            nonce: Uuid::new_v4(),
            media_id: "abc123".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["service"], 229);
        assert_eq!(value["link"], "https://example.com/v/1");
        assert_eq!(value["mediaId"], "abc123");
        assert!(value["uuid"].is_string());
    }

    #[test]
    fn test_reply_defaults_when_fields_absent() {
        let reply: OrderReply = serde_json::from_str("{}").unwrap();
        assert!(!reply.success);
        assert!(reply.message.is_none());
    }

    #[test]
    fn test_reply_with_message() {
        let reply: OrderReply =
            serde_json::from_str(r#"{"success": false, "message": "limit reached"}"#).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("limit reached"));
    }
}
