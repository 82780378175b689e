//! Compact `(r, vs)` signature encoding used by the protocol's fill entry point.
//!
//! A 65-byte `(r, s, v)` ECDSA signature is folded into two words: `r`
//! unchanged, and `vs` carrying `s` with the recovery parity in its top bit.

use alloy_primitives::{hex, B256, U256};

use crate::error::ValidationError;

/// Hex characters in a 65-byte signature without the `0x` prefix.
const SIGNATURE_HEX_LEN: usize = 130;

/// Recovery byte that sets the parity bit of `vs`.
const ODD_PARITY_V: u8 = 28;

/// Recovery byte with the parity bit clear.
const EVEN_PARITY_V: u8 = 27;

/// Decode a hex `(r, s, v)` signature, with or without `0x`.
///
/// A recovery byte of 0 or 1 is rewritten to 27 or 28, so the result always
/// uses the convention the protocol expects.
///
/// # Errors
///
/// Returns [`ValidationError::SignatureLength`] unless the stripped input
/// is exactly 130 characters, [`ValidationError::SignatureHex`] if it is not
/// valid hex, and [`ValidationError::SignatureRecoveryId`] for any other
/// recovery byte.
pub fn parse_signature_hex(signature: &str) -> Result<[u8; 65], ValidationError> {
    let stripped = signature.strip_prefix("0x").unwrap_or(signature);
    if stripped.len() != SIGNATURE_HEX_LEN {
        return Err(ValidationError::SignatureLength {
            length: stripped.len(),
        });
    }
    let mut bytes = [0u8; 65];
    hex::decode_to_slice(stripped, &mut bytes)
        .map_err(|e| ValidationError::SignatureHex(e.to_string()))?;
    bytes[64] = match bytes[64] {
        0 | EVEN_PARITY_V => EVEN_PARITY_V,
        1 | ODD_PARITY_V => ODD_PARITY_V,
        v => return Err(ValidationError::SignatureRecoveryId { v }),
    };
    Ok(bytes)
}

/// Signature split into the two words accepted by `fillOrder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature {
    pub r: B256,
    pub vs: B256,
}

impl CompactSignature {
    /// Compact a hex-encoded `(r, s, v)` signature, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Same as [`parse_signature_hex`].
    pub fn from_hex(signature: &str) -> Result<Self, ValidationError> {
        parse_signature_hex(signature).map(|bytes| Self::from_bytes(&bytes))
    }

    /// Compact raw `(r, s, v)` bytes. `v` must be 27 or 28.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let r = B256::from_slice(&bytes[..32]);
        let s = U256::from_be_slice(&bytes[32..64]);
        let v = bytes[64];

        let vs = if v == ODD_PARITY_V {
            s | (U256::from(1u8) << 255)
        } else {
            s
        };

        Self {
            r,
            vs: B256::from(vs),
        }
    }

    /// Reconstruct `(r, s, v)` with `v` in the 27/28 convention.
    #[must_use]
    pub fn expand(&self) -> (B256, B256, u8) {
        let vs = U256::from_be_bytes(self.vs.0);
        let high_bit: U256 = U256::from(1u8) << 255;
        let v = if vs & high_bit == U256::ZERO {
            EVEN_PARITY_V
        } else {
            ODD_PARITY_V
        };
        let s = vs & !high_bit;
        (self.r, B256::from(s), v)
    }

    /// `r` as a 0x-prefixed 32-byte hex string.
    #[must_use]
    pub fn r_hex(&self) -> String {
        self.r.to_string()
    }

    /// `vs` as a 0x-prefixed 32-byte hex string.
    #[must_use]
    pub fn vs_hex(&self) -> String {
        self.vs.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_signature(r_byte: u8, s: B256, v: u8) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].fill(r_byte);
        bytes[32..64].copy_from_slice(s.as_slice());
        bytes[64] = v;
        bytes
    }

    fn sample_s() -> B256 {
        // Low-s values always leave the top bit clear.
        let mut s = [0x11u8; 32];
        s[0] = 0x3f;
        B256::from(s)
    }

    #[test]
    fn v27_leaves_s_unchanged() {
        let s = sample_s();
        let sig = CompactSignature::from_bytes(&raw_signature(0xaa, s, 27));
        assert_eq!(sig.vs, s);
        assert_eq!(sig.r, B256::repeat_byte(0xaa));
    }

    #[test]
    fn v28_sets_top_bit() {
        let s = sample_s();
        let sig = CompactSignature::from_bytes(&raw_signature(0xaa, s, 28));
        assert_eq!(sig.vs[0], s[0] | 0x80);
        assert_eq!(sig.vs[1..], s[1..]);
    }

    #[test]
    fn expand_round_trips_both_parities() {
        for v in [27u8, 28] {
            let s = sample_s();
            let raw = raw_signature(0x42, s, v);
            let (r, s_back, v_back) = CompactSignature::from_bytes(&raw).expand();
            assert_eq!(r, B256::repeat_byte(0x42));
            assert_eq!(s_back, s);
            assert_eq!(v_back, v);
        }
    }

    #[test]
    fn hex_input_accepts_optional_prefix() {
        let raw = raw_signature(0x01, sample_s(), 28);
        let plain = hex::encode(raw);
        let prefixed = format!("0x{plain}");
        assert_eq!(
            CompactSignature::from_hex(&plain).unwrap(),
            CompactSignature::from_hex(&prefixed).unwrap()
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        let short = "ab".repeat(64);
        assert_eq!(
            CompactSignature::from_hex(&short).unwrap_err(),
            ValidationError::SignatureLength { length: 128 }
        );

        let long = format!("0x{}", "ab".repeat(66));
        assert_eq!(
            CompactSignature::from_hex(&long).unwrap_err(),
            ValidationError::SignatureLength { length: 132 }
        );
    }

    #[test]
    fn non_hex_is_rejected() {
        let bad = "zz".repeat(65);
        assert!(matches!(
            CompactSignature::from_hex(&bad),
            Err(ValidationError::SignatureHex(_))
        ));
    }

    #[test]
    fn zero_one_recovery_bytes_are_normalized() {
        let s = sample_s();
        for (v, normalized) in [(0u8, 27u8), (1, 28), (27, 27), (28, 28)] {
            let parsed = parse_signature_hex(&hex::encode(raw_signature(0x05, s, v))).unwrap();
            assert_eq!(parsed[64], normalized, "v = {v}");
        }

        let odd = CompactSignature::from_hex(&hex::encode(raw_signature(0x05, s, 1))).unwrap();
        assert_eq!(odd, CompactSignature::from_bytes(&raw_signature(0x05, s, 28)));
        assert_eq!(odd.expand().2, 28);
    }

    #[test]
    fn other_recovery_bytes_are_rejected() {
        for v in [2u8, 26, 29, 35, 0xff] {
            let raw = hex::encode(raw_signature(0x05, sample_s(), v));
            assert_eq!(
                parse_signature_hex(&raw).unwrap_err(),
                ValidationError::SignatureRecoveryId { v }
            );
        }
    }

    #[test]
    fn hex_rendering_is_full_width() {
        let sig = CompactSignature::from_bytes(&raw_signature(0x0f, sample_s(), 27));
        assert_eq!(sig.r_hex().len(), 66);
        assert!(sig.vs_hex().starts_with("0x3f"));
    }
}
