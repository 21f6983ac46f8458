//! Core domain types
//!
//! This module contains the structures shared between the client and the
//! runner. They represent one run of the poller: which tasks exist, the
//! links they target, and the events they report.

pub mod context;
pub mod event;
pub mod task;
