use crate::error::EncodingError;
use alloy::primitives::{Signature, B256};
use serde::{Deserialize, Serialize};

/// An EIP-2098 compact signature: `r` plus `s` with the recovery bit
/// folded into the top bit of `vs`.
///
/// `fillOrder` takes signatures in this form, saving a calldata word over
/// the 65-byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSignature {
    /// The `r` value, unchanged.
    pub r: B256,
    /// The `s` value with bit 255 set when `v == 28`.
    pub vs: B256,
}

impl CompactSignature {
    /// Compress a 65-byte `r ‖ s ‖ v` signature. A raw recovery id below
    /// 27 is normalized to 27 or 28 first.
    pub fn from_raw(signature: &[u8]) -> Result<Self, EncodingError> {
        let bytes: &[u8; 65] = signature
            .try_into()
            .map_err(|_| EncodingError::InvalidSignatureLength(signature.len()))?;

        let r = B256::from_slice(&bytes[..32]);
        let mut vs = B256::from_slice(&bytes[32..64]);
        let v = if bytes[64] < 27 { bytes[64] + 27 } else { bytes[64] };
        if v == 28 {
            vs.0[0] |= 0x80;
        }
        Ok(Self { r, vs })
    }

    /// Expand back to the 65-byte `r ‖ s ‖ v` form.
    pub fn to_raw(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.vs.as_slice());
        out[32] &= 0x7f;
        out[64] = 27 + (self.vs.0[0] >> 7);
        out
    }
}

impl From<&Signature> for CompactSignature {
    fn from(signature: &Signature) -> Self {
        // as_bytes is always 65 bytes with v already 27 or 28
        Self::from_raw(&signature.as_bytes()).expect("signature is 65 bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_signature(v: u8) -> [u8; 65] {
        let mut raw = [0u8; 65];
        raw[..32].copy_from_slice(&[0x11; 32]);
        raw[32..64].copy_from_slice(&[0x22; 32]);
        raw[64] = v;
        raw
    }

    #[test]
    fn v27_leaves_s_untouched() {
        let compact = CompactSignature::from_raw(&raw_signature(27)).unwrap();
        assert_eq!(compact.vs.0[0], 0x22);
        assert_eq!(compact.to_raw(), raw_signature(27));
    }

    #[test]
    fn v28_sets_the_top_bit() {
        let compact = CompactSignature::from_raw(&raw_signature(28)).unwrap();
        assert_eq!(compact.vs.0[0], 0xa2);
        assert_eq!(compact.to_raw(), raw_signature(28));
    }

    #[test]
    fn raw_recovery_ids_are_normalized() {
        let zero = CompactSignature::from_raw(&raw_signature(0)).unwrap();
        assert_eq!(zero, CompactSignature::from_raw(&raw_signature(27)).unwrap());
        let one = CompactSignature::from_raw(&raw_signature(1)).unwrap();
        assert_eq!(one, CompactSignature::from_raw(&raw_signature(28)).unwrap());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            CompactSignature::from_raw(&[0u8; 64]),
            Err(EncodingError::InvalidSignatureLength(64))
        );
    }
}
