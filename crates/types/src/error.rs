use core::fmt;

/// A single problem found while validating order parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Partial and multiple fills must be enabled or disabled together.
    #[error("allowPartialFills and allowMultipleFills must both be set or both be unset")]
    InconsistentFillFlags,
    /// A numeric field does not fit its bit window.
    #[error("{name} out of range: {value} exceeds maximum {max}")]
    FieldOutOfRange {
        /// Name of the offending field.
        name: &'static str,
        /// The supplied value.
        value: u64,
        /// The largest value the field's encoding admits.
        max: u64,
    },
    /// The fill threshold occupies bits 0 through 184 of the taker traits
    /// word and cannot be larger.
    #[error("threshold does not fit in 185 bits")]
    ThresholdTooLarge,
    /// Whitelists are length-prefixed by a single byte.
    #[error("whitelist holds {0} addresses, the encoding caps out at 255")]
    WhitelistTooLarge(usize),
    /// An order amount was zero.
    #[error("{0} must be non-zero")]
    ZeroAmount(&'static str),
    /// An address that must be set was the zero address.
    #[error("{0} must not be the zero address")]
    ZeroAddress(&'static str),
    /// The maker and taker assets are the same token.
    #[error("maker and taker assets must differ")]
    IdenticalAssets,
    /// The native gas token cannot be traded directly; wrap it first.
    #[error("{0} is the native token sentinel, orders require an ERC-20")]
    NativeAsset(&'static str),
}

/// Every [`ValidationError`] found in one pass over the input.
///
/// Validation inspects all fields before returning so a caller can fix an
/// order in one round trip instead of discovering problems one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Create an empty collection.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a problem.
    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    /// Whether any problem was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded problems.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// `Ok` if nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

/// Any failure while building, hashing, or signing an order.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// One or more parameters failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// A byte format could not be encoded or decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// The signer rejected the order hash.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
    /// The chain has no deployed router.
    #[error(transparent)]
    Chain(#[from] oneinch_constants::ChainError),
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.into())
    }
}

/// An error raised while encoding or decoding protocol byte formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A maker permit is encoded as the maker asset address followed by the
    /// permit calldata, so the permit alone is not enough.
    #[error("a maker permit requires the maker asset address it applies to")]
    PermitRequiresMakerAsset,
    /// The counterpart: a maker asset in the permit slot with no calldata.
    #[error("a maker asset was supplied for the permit field without permit calldata")]
    MakerAssetRequiresPermit,
    /// Extension bytes too short or with inconsistent offsets.
    #[error("malformed extension: {0}")]
    MalformedExtension(&'static str),
    /// Signatures must be 65 bytes (r, s, v) to be compacted.
    #[error("expected a 65-byte signature, got {0} bytes")]
    InvalidSignatureLength(usize),
    /// Orders with an extension can only be filled through `fillOrderArgs`,
    /// which needs taker traits to describe the args layout.
    #[error("an order with an extension requires taker traits to fill")]
    MissingTakerTraits,
}
