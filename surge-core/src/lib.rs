//! Surge Core
//!
//! Core types for the surge order poller.
//!
//! This crate contains:
//! - Domain types: Core entities (TaskDescriptor, ExecutionContext, TaskEvent)
//! - DTOs: Wire representations of what the promotion API sends and receives

pub mod domain;
pub mod dto;
