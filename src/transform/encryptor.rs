//! Holographic-AES-256-CBC encryptor
//!
//! Serializes a dataset, applies holographic encoding with a fresh key, then
//! PKCS#7-pads and encrypts the encoded form with AES-256 in CBC mode.

use aes::Aes256;
use base64::Engine;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::fmt;

use super::error::{TransformError, TransformResult};
use super::hologram::{encode_hologram, HologramCell};
use super::{ALGORITHM_NAME, BLOCK_SIZE, KEY_SIZE};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Output of one encryption call
///
/// The bundle carries the key and IV next to the ciphertext. Anyone holding
/// the bundle can decrypt it, so it must never leave the server as-is; the
/// HTTP surface only returns the ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct CiphertextBundle {
    /// AES-256-CBC output, always a multiple of [`BLOCK_SIZE`]
    pub ciphertext: Vec<u8>,
    /// Encoding and encryption key
    pub key: [u8; KEY_SIZE],
    /// CBC initialization vector
    pub iv: [u8; BLOCK_SIZE],
    /// Algorithm display name
    pub algorithm: String,
    /// Key size in bits
    pub key_size_bits: u32,
}

impl CiphertextBundle {
    /// Standard base64 of the ciphertext
    pub fn ciphertext_b64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.ciphertext)
    }

    /// Standard base64 of the key
    pub fn key_b64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.key)
    }

    /// Standard base64 of the IV
    pub fn iv_b64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.iv)
    }

    /// Decrypts the bundle and parses the hologram back
    ///
    /// Verification helper only; the mining path never decrypts.
    pub fn decrypt_hologram(&self) -> TransformResult<Vec<HologramCell>> {
        let plaintext = Aes256CbcDec::new((&self.key).into(), (&self.iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(&self.ciphertext)
            .map_err(|_| TransformError::Decryption("invalid PKCS#7 padding".to_string()))?;

        Ok(serde_json::from_slice(&plaintext)?)
    }
}

impl fmt::Debug for CiphertextBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiphertextBundle")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("key_size_bits", &self.key_size_bits)
            .finish()
    }
}

/// Encode-then-encrypt engine
#[derive(Debug, Clone, Default)]
pub struct HolographicEncryptor;

impl HolographicEncryptor {
    /// Creates a new encryptor
    pub fn new() -> Self {
        Self
    }

    /// Algorithm display name
    pub fn algorithm_name(&self) -> &'static str {
        ALGORITHM_NAME
    }

    /// Key size in bits
    pub fn key_size_bits(&self) -> u32 {
        (KEY_SIZE * 8) as u32
    }

    /// Fresh 32-byte key from the OS CSPRNG
    pub fn generate_key() -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        key
    }

    /// Fresh 16-byte IV from the OS CSPRNG
    pub fn generate_iv() -> [u8; BLOCK_SIZE] {
        let mut iv = [0u8; BLOCK_SIZE];
        OsRng.fill_bytes(&mut iv);
        iv
    }

    /// Encodes and encrypts `data` under a fresh key and IV
    ///
    /// # Errors
    /// Returns [`TransformError::Serialization`] if `data` cannot be
    /// serialized to JSON.
    pub fn encrypt<T>(&self, data: &T) -> TransformResult<CiphertextBundle>
    where
        T: Serialize + ?Sized,
    {
        let serialized = serde_json::to_vec(data)?;

        let key = Self::generate_key();
        let iv = Self::generate_iv();

        let hologram = encode_hologram(&serialized, &key);
        let encoded = serde_json::to_vec(&hologram)?;

        let ciphertext = Aes256CbcEnc::new((&key).into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(&encoded);

        Ok(CiphertextBundle {
            ciphertext,
            key,
            iv,
            algorithm: self.algorithm_name().to_string(),
            key_size_bits: self.key_size_bits(),
        })
    }
}
