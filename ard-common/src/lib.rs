//! # ARD Common Library
//!
//! Shared code for the AI research dashboard crates:
//! - Event types (`DashboardEvent`) and the broadcast `EventBus`
//! - Session state and notification severity shared by producers and consumers
//! - Configuration file resolution and TOML loading
//! - Server-Sent Events helpers

pub mod config;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
