//! Service catalog handling
//!
//! Turns raw catalog entries into task descriptors: drops unavailable
//! services, applies the default interval, picks display names and marks
//! the profile-targeting service.

use std::path::Path;

use anyhow::{Context, Result};
use std::time::Duration;

use surge_core::domain::task::TaskDescriptor;
use surge_core::dto::catalog::{ApiEnvelope, CatalogData, CatalogService};

/// Service id whose orders target the profile link instead of the media link
pub const PROFILE_SERVICE_ID: u32 = 228;

/// Display names for well-known service ids
///
/// Presentation data only; unknown ids fall back to the catalog name.
fn known_name(service_id: u32) -> Option<&'static str> {
    match service_id {
        228 => Some("Followers"),
        229 => Some("Views"),
        232 => Some("Likes"),
        235 => Some("Shares"),
        236 => Some("Favorites"),
        _ => None,
    }
}

/// Builds one descriptor per catalog entry marked available
///
/// Accepts an unfiltered catalog; everything not marked available is
/// dropped here. An empty result is the caller's problem to report.
pub fn available_tasks(services: &[CatalogService]) -> Vec<TaskDescriptor> {
    services
        .iter()
        .filter(|service| service.available)
        .map(descriptor_from)
        .collect()
}

fn descriptor_from(service: &CatalogService) -> TaskDescriptor {
    let display_name = known_name(service.id)
        .map(str::to_string)
        .or_else(|| {
            service
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("service {}", service.id));

    let descriptor = TaskDescriptor::new(
        service.id,
        display_name,
        service.id == PROFILE_SERVICE_ID,
    );

    match service.timer_seconds {
        Some(seconds) => descriptor.with_wait(Duration::from_secs(seconds)),
        None => descriptor,
    }
}

/// Loads a catalog snapshot from a local JSON file
///
/// The file holds the same envelope the catalog endpoint returns, so a
/// saved API response works unchanged.
pub fn load_catalog_file(path: &Path) -> Result<Vec<CatalogService>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;

    let envelope: ApiEnvelope<CatalogData> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse catalog file {}", path.display()))?;

    if !envelope.success {
        anyhow::bail!(
            "catalog file {} reports failure: {}",
            path.display(),
            envelope.message.unwrap_or_else(|| "no message".to_string())
        );
    }

    let data = envelope
        .data
        .with_context(|| format!("catalog file {} carries no data", path.display()))?;

    Ok(data.services)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, available: bool) -> CatalogService {
        CatalogService {
            id,
            name: None,
            description: None,
            timer: None,
            available,
            timer_seconds: None,
        }
    }

    #[test]
    fn test_unavailable_entries_are_dropped() {
        let services = vec![entry(228, true), entry(229, false), entry(232, true)];
        let tasks = available_tasks(&services);
        let ids: Vec<u32> = tasks.iter().map(|t| t.service_id).collect();
        assert_eq!(ids, vec![228, 232]);
    }

    #[test]
    fn test_profile_link_rule() {
        let tasks = available_tasks(&[entry(228, true), entry(229, true)]);
        assert!(tasks[0].uses_profile_link);
        assert!(!tasks[1].uses_profile_link);
    }

    #[test]
    fn test_timer_defaulting() {
        let mut timed = entry(229, true);
        timed.timer_seconds = Some(60);
        let tasks = available_tasks(&[timed, entry(232, true)]);
        assert_eq!(tasks[0].wait, Duration::from_secs(60));
        assert_eq!(tasks[1].wait, surge_core::domain::task::DEFAULT_WAIT);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut named = entry(500, true);
        named.name = Some("  Custom Boost  ".to_string());
        let nameless = entry(501, true);

        let tasks = available_tasks(&[entry(228, true), named, nameless]);
        assert_eq!(tasks[0].display_name, "Followers");
        assert_eq!(tasks[1].display_name, "Custom Boost");
        assert_eq!(tasks[2].display_name, "service 501");
    }

    #[test]
    fn test_empty_catalog_yields_no_tasks() {
        assert!(available_tasks(&[]).is_empty());
    }
}
