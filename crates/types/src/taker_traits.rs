use crate::{
    bitmask::BitMask,
    error::{ValidationError, ValidationErrors},
};
use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Flag bit positions in the taker traits word.
const MAKER_AMOUNT: u32 = 255;
const UNWRAP_WETH: u32 = 254;
const SKIP_ORDER_PERMIT: u32 = 253;
const USE_PERMIT2: u32 = 252;
const ARGS_HAS_RECEIVER: u32 = 251;

/// Field windows in the taker traits word.
const THRESHOLD: BitMask = BitMask::new(0, 185);
const ARGS_INTERACTION_LENGTH: BitMask = BitMask::new(220, 224);
const ARGS_EXTENSION_LENGTH: BitMask = BitMask::new(224, 248);

/// How the router interprets the `amount` argument of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmountMode {
    /// `amount` is the taking amount.
    #[default]
    Taker,
    /// `amount` is the making amount.
    Maker,
}

/// Fill-side configuration packed into a `uint256` alongside an `args`
/// blob for `fillOrderArgs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TakerTraits {
    /// Where the taker wants the maker asset delivered, if not to the
    /// caller.
    pub receiver: Option<Address>,
    /// The order's extension bytes, required when the order was created
    /// with one.
    pub extension: Bytes,
    /// Taker interaction calldata, run during the fill.
    pub interaction: Bytes,
    /// Whether `amount` names the making or the taking side.
    pub amount_mode: AmountMode,
    /// Unwrap WETH to native ether before delivery.
    pub unwrap_weth: bool,
    /// Skip the maker permit carried in the extension.
    pub skip_order_permit: bool,
    /// Pull taker funds through Permit2.
    pub use_permit2: bool,
    /// Price protection: the worst acceptable amount on the opposite side
    /// of the fill, or zero for none. At most 185 bits.
    pub threshold: U256,
}

/// The wire form of [`TakerTraits`]: the packed word plus the args blob
/// the word describes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TakerTraitsEncoded {
    /// The packed traits word.
    pub trait_flags: U256,
    /// Receiver, extension, and interaction bytes, concatenated in that
    /// order.
    pub args: Bytes,
}

impl TakerTraits {
    /// Pack into the traits word and args blob.
    pub fn encode(&self) -> Result<TakerTraitsEncoded, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.threshold.bit_len() > THRESHOLD.width() as usize {
            errors.push(ValidationError::ThresholdTooLarge);
        }
        let interaction_max = (1u64 << ARGS_INTERACTION_LENGTH.width()) - 1;
        if self.interaction.len() as u64 > interaction_max {
            errors.push(ValidationError::FieldOutOfRange {
                name: "interaction length",
                value: self.interaction.len() as u64,
                max: interaction_max,
            });
        }
        let extension_max = (1u64 << ARGS_EXTENSION_LENGTH.width()) - 1;
        if self.extension.len() as u64 > extension_max {
            errors.push(ValidationError::FieldOutOfRange {
                name: "extension length",
                value: self.extension.len() as u64,
                max: extension_max,
            });
        }
        errors.into_result()?;

        let mut word = U256::ZERO;
        for (bit, set) in [
            (MAKER_AMOUNT, matches!(self.amount_mode, AmountMode::Maker)),
            (UNWRAP_WETH, self.unwrap_weth),
            (SKIP_ORDER_PERMIT, self.skip_order_permit),
            (USE_PERMIT2, self.use_permit2),
            (ARGS_HAS_RECEIVER, self.receiver.is_some()),
        ] {
            if set {
                word = BitMask::bit(bit).set(word, U256::from(1));
            }
        }
        word = THRESHOLD.set(word, self.threshold);
        word = ARGS_INTERACTION_LENGTH.set(word, U256::from(self.interaction.len()));
        word = ARGS_EXTENSION_LENGTH.set(word, U256::from(self.extension.len()));

        let mut args = Vec::with_capacity(
            self.receiver.map_or(0, |_| Address::len_bytes())
                + self.extension.len()
                + self.interaction.len(),
        );
        if let Some(receiver) = self.receiver {
            args.extend_from_slice(receiver.as_slice());
        }
        args.extend_from_slice(&self.extension);
        args.extend_from_slice(&self.interaction);

        Ok(TakerTraitsEncoded { trait_flags: word, args: args.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn default_is_all_zero() {
        let encoded = TakerTraits::default().encode().unwrap();
        assert_eq!(encoded.trait_flags, U256::ZERO);
        assert!(encoded.args.is_empty());
    }

    #[test]
    fn extension_length_and_bytes_agree() {
        let traits = TakerTraits {
            extension: Bytes::from(vec![0xab; 87]),
            ..Default::default()
        };
        let encoded = traits.encode().unwrap();
        assert_eq!(ARGS_EXTENSION_LENGTH.get(encoded.trait_flags), U256::from(87));
        assert_eq!(encoded.args.len(), 87);
    }

    #[test]
    fn receiver_sets_flag_and_prefixes_args() {
        let receiver = address!("0x2c9b2dbdba8a9c969ac24153f5c1c23cb0e63914");
        let traits = TakerTraits {
            receiver: Some(receiver),
            extension: Bytes::from(vec![0x01, 0x02]),
            interaction: Bytes::from(vec![0x03]),
            ..Default::default()
        };
        let encoded = traits.encode().unwrap();
        assert!(encoded.trait_flags.bit(ARGS_HAS_RECEIVER as usize));
        assert_eq!(&encoded.args[..20], receiver.as_slice());
        assert_eq!(&encoded.args[20..], &[0x01, 0x02, 0x03]);
        assert_eq!(ARGS_INTERACTION_LENGTH.get(encoded.trait_flags), U256::from(1));
    }

    #[test]
    fn maker_amount_and_threshold() {
        let traits = TakerTraits {
            amount_mode: AmountMode::Maker,
            threshold: U256::from(1_000_000u64),
            ..Default::default()
        };
        let encoded = traits.encode().unwrap();
        assert!(encoded.trait_flags.bit(MAKER_AMOUNT as usize));
        assert_eq!(THRESHOLD.get(encoded.trait_flags), U256::from(1_000_000u64));
    }

    #[test]
    fn oversized_threshold_is_rejected() {
        let traits = TakerTraits { threshold: U256::MAX, ..Default::default() };
        let err = traits.encode().unwrap_err();
        assert_eq!(err.errors(), [ValidationError::ThresholdTooLarge]);
    }

    #[test]
    fn oversized_interaction_is_rejected() {
        let traits = TakerTraits {
            interaction: Bytes::from(vec![0u8; 16]),
            ..Default::default()
        };
        assert!(traits.encode().is_err());
    }
}
