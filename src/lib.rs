// Holomine Library
// Holographic encryption and privacy-preserving data mining over a local HTTP API

pub mod dataset;
pub mod error;
pub mod local_server;
pub mod mining;
pub mod services;
pub mod session;
pub mod transform;

pub use error::{AppError, ErrorResponse};
