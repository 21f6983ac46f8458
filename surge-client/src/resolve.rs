//! Media id resolution
//!
//! One-time startup lookup: the remote service turns a share link into the
//! internal media identifier that order submissions must carry.

use tracing::debug;

use surge_core::dto::catalog::ResolvedMedia;

use crate::error::{ClientError, Result};
use crate::PromoClient;

impl PromoClient {
    /// Resolve the media identifier behind a share link
    ///
    /// Sends `POST {base}` with form fields `action=checkMediaId` and the
    /// link. A response without a usable id is a decode error; callers
    /// treat that as fatal at startup, this is never retried here.
    pub async fn resolve_media_id(&self, link: &str) -> Result<String> {
        let response = self
            .http()
            .post(self.base_url())
            .form(&[("action", "checkMediaId"), ("link", link)])
            .send()
            .await?;

        let resolved: ResolvedMedia = self.read_envelope(response).await?;

        let media_id = resolved
            .media_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ClientError::Decode("response carries no media id".to_string()))?;

        debug!("Resolved media id {} for {}", media_id, link);
        Ok(media_id)
    }
}
