//! Data Transfer Objects for the promotion API
//!
//! This module contains the wire representations exchanged with the remote
//! service: the response envelope, catalog entries, and order payloads.
//! Field names follow what the API actually sends, not our domain names.

pub mod catalog;
pub mod order;
