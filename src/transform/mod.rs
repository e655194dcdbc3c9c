//! Transform engine
//!
//! Two-stage transform applied to every uploaded dataset:
//!
//! 1. **Holographic encoding**: each byte of the serialized dataset becomes a
//!    `{phase, amplitude, frequency}` cell keyed by a fresh 32-byte key.
//! 2. **AES-256-CBC**: the encoded form is PKCS#7-padded and encrypted under
//!    the same key and a fresh 16-byte IV.
//!
//! Both key and IV come from the OS CSPRNG on every call.

mod encryptor;
mod error;
mod hologram;


pub use encryptor::{CiphertextBundle, HolographicEncryptor};
pub use error::{TransformError, TransformResult};
pub use hologram::{encode_hologram, HologramCell};

/// Algorithm display name reported to clients
pub const ALGORITHM_NAME: &str = "Holographic-AES-256-CBC";

/// AES-256 key size in bytes
pub const KEY_SIZE: usize = 32;

/// AES block size (and IV size) in bytes
pub const BLOCK_SIZE: usize = 16;
