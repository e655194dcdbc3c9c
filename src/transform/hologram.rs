//! Holographic encoding
//!
//! A keyed per-byte numeric re-encoding that runs before encryption. It is
//! obfuscation only and is never decoded on the request path; all
//! confidentiality comes from the block cipher that follows.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::KEY_SIZE;

/// One encoded byte of the serialized dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HologramCell {
    /// `(byte * key_byte) mod 256`
    pub phase: f64,
    /// `sin(phase * π / 128)`
    pub amplitude: f64,
    /// `cos(byte * π / 256)`
    pub frequency: f64,
}

impl HologramCell {
    /// Encodes a single byte against its key byte
    pub fn encode(byte: u8, key_byte: u8) -> Self {
        let phase = f64::from((u32::from(byte) * u32::from(key_byte)) % 256);

        Self {
            phase,
            amplitude: (phase * PI / 128.0).sin(),
            frequency: (f64::from(byte) * PI / 256.0).cos(),
        }
    }
}

/// Encodes `data` into a hologram, cycling `key` over the input
///
/// Produces exactly one cell per input byte.
pub fn encode_hologram(data: &[u8], key: &[u8; KEY_SIZE]) -> Vec<HologramCell> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(&byte, &key_byte)| HologramCell::encode(byte, key_byte))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_zero_byte_cell() {
        let cell = HologramCell::encode(0, 200);
        assert_eq!(cell.phase, 0.0);
        assert!(cell.amplitude.abs() < EPSILON);
        assert!((cell.frequency - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_phase_wraps_modulo_256() {
        // 'a' (97) * 3 = 291 -> 35
        let cell = HologramCell::encode(b'a', 3);
        assert_eq!(cell.phase, 35.0);

        // 128 * 2 = 256 -> 0
        let cell = HologramCell::encode(128, 2);
        assert_eq!(cell.phase, 0.0);
    }

    #[test]
    fn test_amplitude_and_frequency() {
        // phase 64 -> sin(π/2) = 1
        let cell = HologramCell::encode(64, 1);
        assert_eq!(cell.phase, 64.0);
        assert!((cell.amplitude - 1.0).abs() < EPSILON);

        // byte 128 -> cos(π/2) = 0
        let cell = HologramCell::encode(128, 1);
        assert!(cell.frequency.abs() < EPSILON);
    }

    #[test]
    fn test_one_cell_per_byte() {
        let key = [7u8; KEY_SIZE];
        let data = b"[{\"id\":0,\"content\":\"a\"}]";
        assert_eq!(encode_hologram(data, &key).len(), data.len());
        assert!(encode_hologram(b"", &key).is_empty());
    }

    #[test]
    fn test_key_cycles_after_32_bytes() {
        let mut key = [1u8; KEY_SIZE];
        key[0] = 3;

        let data = [b'a'; KEY_SIZE + 1];
        let hologram = encode_hologram(&data, &key);

        assert_eq!(hologram[0].phase, 35.0);
        assert_eq!(hologram[1].phase, 97.0);
        assert_eq!(hologram[KEY_SIZE].phase, 35.0);
    }

    #[test]
    fn test_encoding_is_deterministic_for_fixed_key() {
        let key = [42u8; KEY_SIZE];
        let data = b"{\"name\":\"holomine\"}";
        assert_eq!(encode_hologram(data, &key), encode_hologram(data, &key));
    }
}
