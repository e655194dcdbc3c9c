//! Services module for Holomine
//!
//! Provides the boundary operations consumed by the HTTP layer.

pub mod privacy_mining;

pub use privacy_mining::{EncryptResponse, HealthStatus, PrivacyMiningService, SessionSummary};
