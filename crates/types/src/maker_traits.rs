use crate::{
    bitmask::BitMask,
    error::{ValidationError, ValidationErrors},
};
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag bit positions in the maker traits word.
const NO_PARTIAL_FILLS: u32 = 255;
const ALLOW_MULTIPLE_FILLS: u32 = 254;
const NEED_PRE_INTERACTION: u32 = 252;
const NEED_POST_INTERACTION: u32 = 251;
const NEED_EPOCH_CHECK: u32 = 250;
const HAS_EXTENSION: u32 = 249;
const USE_PERMIT2: u32 = 248;
const UNWRAP_WETH: u32 = 247;

/// Field windows in the maker traits word.
const SERIES: BitMask = BitMask::new(200, 240);
const NONCE_OR_EPOCH: BitMask = BitMask::new(160, 200);
const EXPIRY: BitMask = BitMask::new(80, 160);
const ALLOWED_SENDER: BitMask = BitMask::new(0, 80);

/// Largest value a 40-bit field admits.
const MAX_U40: u64 = (1 << 40) - 1;

/// Everything a maker can configure about how their order may be filled.
///
/// Packed into a single `uint256` by [`MakerTraits::encode`]. Zero values
/// mean "unset": a zero `expiry` never expires, a zero `allowed_sender`
/// lets anyone fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerTraitsParams {
    /// The only taker permitted to fill, or zero for anyone. Only the
    /// lower 80 bits are stored.
    pub allowed_sender: Address,
    /// Unix expiry in seconds, zero for no expiry.
    pub expiry: u64,
    /// Order nonce or epoch, at most 40 bits.
    pub nonce_or_epoch: u64,
    /// Nonce series, at most 40 bits.
    pub series: u64,
    /// Whether the order may be filled for less than its full amount.
    pub allow_partial_fills: bool,
    /// Whether the order may be filled more than once.
    pub allow_multiple_fills: bool,
    /// Run the maker's pre-interaction on fill.
    pub need_pre_interaction: bool,
    /// Run the maker's post-interaction on fill.
    pub need_post_interaction: bool,
    /// Check the maker's epoch against `nonce_or_epoch` on fill.
    pub need_epoch_check: bool,
    /// The order carries an extension blob.
    pub has_extension: bool,
    /// Pull maker funds through Permit2 instead of a direct allowance.
    pub use_permit2: bool,
    /// Unwrap WETH to native ether before sending it to the maker.
    pub unwrap_weth: bool,
}

impl Default for MakerTraitsParams {
    fn default() -> Self {
        Self {
            allowed_sender: Address::ZERO,
            expiry: 0,
            nonce_or_epoch: 0,
            series: 0,
            allow_partial_fills: true,
            allow_multiple_fills: true,
            need_pre_interaction: false,
            need_post_interaction: false,
            need_epoch_check: false,
            has_extension: false,
            use_permit2: false,
            unwrap_weth: false,
        }
    }
}

/// The packed maker traits word consumed by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MakerTraits(U256);

impl MakerTraits {
    /// Pack the parameters into a traits word.
    ///
    /// All fields are checked before returning, so the error carries every
    /// problem at once.
    pub fn encode(params: &MakerTraitsParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if params.allow_partial_fills != params.allow_multiple_fills {
            errors.push(ValidationError::InconsistentFillFlags);
        }
        if params.nonce_or_epoch > MAX_U40 {
            errors.push(ValidationError::FieldOutOfRange {
                name: "nonceOrEpoch",
                value: params.nonce_or_epoch,
                max: MAX_U40,
            });
        }
        if params.series > MAX_U40 {
            errors.push(ValidationError::FieldOutOfRange {
                name: "series",
                value: params.series,
                max: MAX_U40,
            });
        }
        errors.into_result()?;

        let mut word = U256::ZERO;
        for (bit, set) in [
            (NO_PARTIAL_FILLS, !params.allow_partial_fills),
            (ALLOW_MULTIPLE_FILLS, params.allow_multiple_fills),
            (NEED_PRE_INTERACTION, params.need_pre_interaction),
            (NEED_POST_INTERACTION, params.need_post_interaction),
            (NEED_EPOCH_CHECK, params.need_epoch_check),
            (HAS_EXTENSION, params.has_extension),
            (USE_PERMIT2, params.use_permit2),
            (UNWRAP_WETH, params.unwrap_weth),
        ] {
            if set {
                word = BitMask::bit(bit).set(word, U256::from(1));
            }
        }

        word = SERIES.set(word, U256::from(params.series));
        word = NONCE_OR_EPOCH.set(word, U256::from(params.nonce_or_epoch));
        word = EXPIRY.set(word, U256::from(params.expiry));
        word = ALLOWED_SENDER.set(word, allowed_sender_bits(params.allowed_sender));

        Ok(Self(word))
    }

    /// Wrap an already-packed traits word, e.g. one read back from the
    /// orderbook.
    pub const fn from_word(word: U256) -> Self {
        Self(word)
    }

    /// The packed word.
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// The unix expiry in seconds, zero if the order never expires.
    pub fn expiry(&self) -> u64 {
        EXPIRY.get(self.0).saturating_to()
    }

    /// The nonce or epoch field.
    pub fn nonce_or_epoch(&self) -> u64 {
        NONCE_OR_EPOCH.get(self.0).saturating_to()
    }

    /// The nonce series.
    pub fn series(&self) -> u64 {
        SERIES.get(self.0).saturating_to()
    }

    /// The lower 80 bits of the permitted taker, zero when anyone may fill.
    pub fn allowed_sender_bits(&self) -> U256 {
        ALLOWED_SENDER.get(self.0)
    }

    /// Whether partial fills are permitted.
    pub fn allow_partial_fills(&self) -> bool {
        !self.0.bit(NO_PARTIAL_FILLS as usize)
    }

    /// Whether the order may be filled more than once.
    pub fn allow_multiple_fills(&self) -> bool {
        self.0.bit(ALLOW_MULTIPLE_FILLS as usize)
    }

    /// Whether the order carries an extension.
    pub fn has_extension(&self) -> bool {
        self.0.bit(HAS_EXTENSION as usize)
    }

    /// Whether a post-interaction must run on fill.
    pub fn need_post_interaction(&self) -> bool {
        self.0.bit(NEED_POST_INTERACTION as usize)
    }

    /// Whether maker funds are pulled through Permit2.
    pub fn use_permit2(&self) -> bool {
        self.0.bit(USE_PERMIT2 as usize)
    }
}

impl From<MakerTraits> for U256 {
    fn from(traits: MakerTraits) -> Self {
        traits.0
    }
}

impl fmt::Display for MakerTraits {
    /// Formats as the canonical 0x-prefixed, 64-digit hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:064x}", self.0)
    }
}

fn allowed_sender_bits(sender: Address) -> U256 {
    // lower 80 bits, i.e. the last 10 bytes of the address
    U256::from_be_slice(&sender.as_slice()[10..])
}
