use alloy::primitives::{keccak256, U256};
use chrono::Utc;

/// Tracking-code source used when the caller does not supply one.
pub const DEFAULT_SOURCE: &str = "sdk";

/// Low 160 bits of a salt, reserved for the extension hash.
fn extension_bits(extension: &[u8]) -> U256 {
    if extension.is_empty() {
        return U256::ZERO;
    }
    U256::from_be_bytes(keccak256(extension).0) & ((U256::from(1) << 160) - U256::from(1))
}

/// The middle 64 bits of a tracked salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltMiddle {
    /// A caller-chosen value, for deterministic salts.
    Base(u64),
    /// The current unix time in seconds.
    Timestamp,
    /// Eight random bytes.
    Random,
}

impl SaltMiddle {
    fn value(self) -> u64 {
        match self {
            Self::Base(base) => base,
            Self::Timestamp => Utc::now().timestamp() as u64,
            Self::Random => rand::random(),
        }
    }
}

/// Generate a salt carrying a tracking code.
///
/// Bits 224-255 hold the first four bytes of `keccak256(source)`, bits
/// 160-223 the middle value, and bits 0-159 the low bits of the extension
/// hash (zero when the extension is empty).
pub fn tracked_salt(extension: &[u8], middle: SaltMiddle, source: Option<&str>) -> U256 {
    let track = keccak256(source.unwrap_or(DEFAULT_SOURCE).as_bytes());
    let track = u32::from_be_bytes([track[0], track[1], track[2], track[3]]);

    (U256::from(track) << 224) | (U256::from(middle.value()) << 160) | extension_bits(extension)
}

/// The original salt scheme: the current unix time in milliseconds for
/// plain orders, or the low 160 bits of the extension hash when an
/// extension is present.
pub fn legacy_salt(extension: &[u8]) -> U256 {
    if extension.is_empty() {
        U256::from(Utc::now().timestamp_millis() as u64)
    } else {
        extension_bits(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_160() -> U256 {
        (U256::from(1) << 160) - U256::from(1)
    }

    #[test]
    fn binds_salt_to_extension_hash() {
        let extension = [0xaa; 40];
        let salt = tracked_salt(&extension, SaltMiddle::Base(7), None);
        let expected = U256::from_be_bytes(keccak256(extension).0) & mask_160();
        assert_eq!(salt & mask_160(), expected);
    }

    #[test]
    fn empty_extension_leaves_low_bits_zero() {
        let salt = tracked_salt(&[], SaltMiddle::Base(7), None);
        assert_eq!(salt & mask_160(), U256::ZERO);
    }

    #[test]
    fn middle_bits_carry_the_base() {
        let salt = tracked_salt(&[], SaltMiddle::Base(0xdead_beef), None);
        assert_eq!((salt >> 160) & U256::from(u64::MAX), U256::from(0xdead_beefu64));
    }

    #[test]
    fn tracking_code_is_keccak_of_source() {
        let salt = tracked_salt(&[], SaltMiddle::Base(0), Some("otc"));
        let hash = keccak256("otc".as_bytes());
        let track = u32::from_be_bytes([hash[0], hash[1], hash[2], hash[3]]);
        assert_eq!(salt >> 224, U256::from(track));
    }

    #[test]
    fn legacy_salt_uses_extension_hash() {
        let extension = [0x01, 0x02, 0x03];
        assert_eq!(
            legacy_salt(&extension),
            U256::from_be_bytes(keccak256(extension).0) & mask_160()
        );
    }

    #[test]
    fn legacy_salt_without_extension_is_a_timestamp() {
        let salt = legacy_salt(&[]);
        // millisecond timestamps are far below 2^64
        assert!(salt < U256::from(u64::MAX));
        assert!(salt > U256::ZERO);
    }
}
