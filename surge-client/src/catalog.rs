//! Catalog endpoint

use surge_core::dto::catalog::{CatalogData, CatalogService};

use crate::error::Result;
use crate::PromoClient;

impl PromoClient {
    /// Fetch the service catalog from the promotion API
    ///
    /// Sends `GET {base}?action=config`. The returned entries are
    /// unfiltered; availability filtering is up to the caller.
    ///
    /// # Returns
    /// Every service entry the remote currently advertises
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogService>> {
        let url = self.action_url("config");
        let response = self.http().get(&url).send().await?;

        let data: CatalogData = self.read_envelope(response).await?;
        Ok(data.services)
    }
}
