//! Catalog and envelope DTOs

use serde::Deserialize;

/// Envelope wrapping every structured response from the promotion API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Payload of the catalog endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub services: Vec<CatalogService>,
}

/// One service entry in the remote catalog
///
/// Entries are sparse: only `id` is guaranteed, everything else defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogService {
    pub id: u32,

    #[serde(default)]
    pub name: Option<String>,

    /// Rate description shown in the startup listing (e.g. "50 per order")
    #[serde(default)]
    pub description: Option<String>,

    /// Human-readable timer shown in the startup listing
    #[serde(default)]
    pub timer: Option<String>,

    #[serde(default)]
    pub available: bool,

    /// Seconds to wait between orders for this service
    #[serde(default, rename = "timerSeconds")]
    pub timer_seconds: Option<u64>,
}

/// Payload of the media-id resolution endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedMedia {
    #[serde(default, rename = "mediaId")]
    pub media_id: Option<String>,
}
