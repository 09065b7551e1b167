use crate::{
    error::{OrderError, ValidationError, ValidationErrors},
    extension::Extension,
    maker_traits::{MakerTraits, MakerTraitsParams},
    salt::{legacy_salt, tracked_salt, SaltMiddle},
    signature::CompactSignature,
    u256_decimal,
};
use alloy::{
    dyn_abi::TypedData,
    primitives::{Address, Bytes, Signature, B256, U256},
    signers::SignerSync,
    sol_types::{Eip712Domain, SolStruct},
};
use oneinch_bindings::AggregationRouterV6::Order;
use oneinch_constants::{
    router_address, ChainError, AGGREGATION_ROUTER_V6_NAME, AGGREGATION_ROUTER_V6_VERSION,
    NATIVE_TOKEN_ADDRESS,
};
use serde::{Deserialize, Serialize};

/// The EIP-712 domain of the Aggregation Router on the given chain.
pub fn order_eip712_domain(chain_id: u64) -> Result<Eip712Domain, ChainError> {
    let router = router_address(chain_id)?;
    Ok(Eip712Domain::new(
        Some(AGGREGATION_ROUTER_V6_NAME.into()),
        Some(AGGREGATION_ROUTER_V6_VERSION.into()),
        Some(U256::from(chain_id)),
        Some(router),
        None,
    ))
}

/// The EIP-712 digest a maker signs to place the order on `chain_id`.
pub fn order_hash(order: &Order, chain_id: u64) -> Result<B256, ChainError> {
    Ok(order.eip712_signing_hash(&order_eip712_domain(chain_id)?))
}

/// How the order salt is derived. See the salt module for the two layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaltScheme {
    /// The tracked layout: tracking code, middle value, extension hash.
    Tracked {
        /// The middle 64 bits.
        middle: SaltMiddle,
        /// Tracking-code source, `"sdk"` when absent.
        source: Option<String>,
    },
    /// The original layout: a millisecond timestamp, or the extension
    /// hash when an extension is present.
    Legacy,
    /// A caller-supplied salt, used verbatim. The caller is responsible
    /// for binding it to the extension.
    Fixed(U256),
}

impl Default for SaltScheme {
    fn default() -> Self {
        Self::Tracked { middle: SaltMiddle::Timestamp, source: None }
    }
}

/// Everything needed to build and sign a limit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderParams {
    /// Chain the order settles on.
    pub chain_id: u64,
    /// The order's maker; must match the signing key.
    pub maker: Address,
    /// Token the maker sells.
    pub maker_asset: Address,
    /// Token the maker buys.
    pub taker_asset: Address,
    /// Amount of maker asset offered.
    pub making_amount: U256,
    /// Amount of taker asset wanted in return.
    pub taking_amount: U256,
    /// Recipient of the taker asset when it is not the maker. This never
    /// restricts who may fill; use `maker_traits.allowed_sender` for that.
    pub receiver: Option<Address>,
    /// Fill constraints, expiry, nonce, and flags.
    pub maker_traits: MakerTraitsParams,
    /// Optional extension.
    pub extension: Extension,
    /// Salt derivation.
    pub salt: SaltScheme,
}

impl CreateOrderParams {
    /// Check every field, reporting all problems at once. Runs before any
    /// hashing or signing.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.maker.is_zero() {
            errors.push(ValidationError::ZeroAddress("maker"));
        }
        if self.maker_asset.is_zero() {
            errors.push(ValidationError::ZeroAddress("makerAsset"));
        }
        if self.taker_asset.is_zero() {
            errors.push(ValidationError::ZeroAddress("takerAsset"));
        }
        if self.maker_asset == NATIVE_TOKEN_ADDRESS {
            errors.push(ValidationError::NativeAsset("makerAsset"));
        }
        if self.taker_asset == NATIVE_TOKEN_ADDRESS {
            errors.push(ValidationError::NativeAsset("takerAsset"));
        }
        if !self.maker_asset.is_zero() && self.maker_asset == self.taker_asset {
            errors.push(ValidationError::IdenticalAssets);
        }
        if self.making_amount.is_zero() {
            errors.push(ValidationError::ZeroAmount("makingAmount"));
        }
        if self.taking_amount.is_zero() {
            errors.push(ValidationError::ZeroAmount("takingAmount"));
        }
        if let Err(traits_errors) = MakerTraits::encode(&self.maker_traits) {
            for err in traits_errors.errors() {
                errors.push(err.clone());
            }
        }
        errors.into_result()
    }

    /// Build the unsigned order and its encoded extension.
    pub fn build(&self) -> Result<(Order, Bytes), OrderError> {
        self.validate()?;

        let extension = self.extension.encode();

        let mut traits_params = self.maker_traits;
        traits_params.has_extension = !extension.is_empty();
        let maker_traits = MakerTraits::encode(&traits_params).map_err(ValidationErrors::from)?;

        let salt = match &self.salt {
            SaltScheme::Tracked { middle, source } => {
                tracked_salt(&extension, *middle, source.as_deref())
            }
            SaltScheme::Legacy => legacy_salt(&extension),
            SaltScheme::Fixed(salt) => *salt,
        };

        let order = Order {
            salt,
            maker: self.maker,
            receiver: self.receiver.unwrap_or(Address::ZERO),
            makerAsset: self.maker_asset,
            takerAsset: self.taker_asset,
            makingAmount: self.making_amount,
            takingAmount: self.taking_amount,
            makerTraits: maker_traits.as_u256(),
        };
        Ok((order, extension))
    }
}

/// A built and signed limit order, ready for the orderbook or a direct
/// fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrder {
    /// The order as hashed and signed.
    pub order: Order,
    /// The encoded extension, empty for plain orders.
    pub extension: Bytes,
    /// The EIP-712 digest.
    pub order_hash: B256,
    /// The maker's signature over the digest, `v` normalized to 27/28.
    pub signature: Signature,
}

impl LimitOrder {
    /// The signature in EIP-2098 compact form for `fillOrder`.
    pub fn compact_signature(&self) -> CompactSignature {
        CompactSignature::from(&self.signature)
    }
}

/// Validate, build, hash, and sign an order in one step.
pub fn create_order<S: SignerSync>(
    params: &CreateOrderParams,
    signer: &S,
) -> Result<LimitOrder, OrderError> {
    let (order, extension) = params.build()?;
    let order_hash = order_hash(&order, params.chain_id)?;
    let signature = signer.sign_hash_sync(&order_hash)?;
    Ok(LimitOrder { order, extension, order_hash, signature })
}

/// The order as stored and returned by the orderbook service: camelCase
/// field names, decimal amounts, and hex-encoded traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    /// Order salt as a decimal string.
    #[serde(with = "u256_decimal")]
    pub salt: U256,
    /// The maker address.
    pub maker: Address,
    /// The receiver address, zero when the maker receives.
    pub receiver: Address,
    /// Token the maker sells.
    pub maker_asset: Address,
    /// Token the maker buys.
    pub taker_asset: Address,
    /// Offered amount, decimal string.
    #[serde(with = "u256_decimal")]
    pub making_amount: U256,
    /// Wanted amount, decimal string.
    #[serde(with = "u256_decimal")]
    pub taking_amount: U256,
    /// The packed maker traits as a padded hex string.
    #[serde(with = "maker_traits_hex")]
    pub maker_traits: MakerTraits,
    /// The encoded extension, `"0x"` for none.
    pub extension: Bytes,
}

impl OrderData {
    /// Build the wire form from a built order.
    pub fn from_order(order: &Order, extension: Bytes) -> Self {
        Self {
            salt: order.salt,
            maker: order.maker,
            receiver: order.receiver,
            maker_asset: order.makerAsset,
            taker_asset: order.takerAsset,
            making_amount: order.makingAmount,
            taking_amount: order.takingAmount,
            maker_traits: MakerTraits::from_word(order.makerTraits),
            extension,
        }
    }

    /// Convert back to the ABI order struct.
    pub const fn to_order(&self) -> Order {
        Order {
            salt: self.salt,
            maker: self.maker,
            receiver: self.receiver,
            makerAsset: self.maker_asset,
            takerAsset: self.taker_asset,
            makingAmount: self.making_amount,
            takingAmount: self.taking_amount,
            makerTraits: self.maker_traits.as_u256(),
        }
    }
}

/// Maker traits travel as the full 66-character hex string.
mod maker_traits_hex {
    use super::MakerTraits;
    use alloy::primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        traits: &MakerTraits,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&traits.to_string())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<MakerTraits, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let hex = raw.strip_prefix("0x").unwrap_or(&raw);
        let word = U256::from_str_radix(hex, 16).map_err(de::Error::custom)?;
        Ok(MakerTraits::from_word(word))
    }
}

/// The typed-data document for `eth_signTypedData_v4` flows, e.g. when a
/// browser wallet signs instead of a raw key.
pub fn order_typed_data(order: &Order, chain_id: u64) -> Result<TypedData, ChainError> {
    Ok(TypedData::from_struct(order, Some(order_eip712_domain(chain_id)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::{build_fee_extension, FeeExtensionParams};
    use alloy::{primitives::address, signers::local::PrivateKeySigner};
    use oneinch_constants::chains;
    use std::str::FromStr;

    fn params() -> CreateOrderParams {
        CreateOrderParams {
            chain_id: chains::ETHEREUM,
            maker: address!("0xfb3c7eb936caa12b5a884d612393969a557d4307"),
            maker_asset: address!("0xe9e7cea3dedca5984780bafc599bd69add087d56"),
            taker_asset: address!("0x111111111117dc0aa78b770fa6a738034120c302"),
            making_amount: U256::from(1_000_000_000_000_000_000u128),
            taking_amount: U256::from(1_000_000_000_000_000_000u128),
            receiver: None,
            maker_traits: MakerTraitsParams {
                allow_partial_fills: false,
                allow_multiple_fills: false,
                ..Default::default()
            },
            extension: Extension::default(),
            salt: SaltScheme::Fixed(U256::from(618054093254u64)),
        }
    }

    #[test]
    fn signs_a_plain_order() {
        let signer = PrivateKeySigner::from_str(
            "d8d1f95deb28949ea0ecc4e9a0decf89e98422c2d76ab6e5f736792a388c56c7",
        )
        .unwrap();
        let order = Order {
            salt: U256::from(618054093254u64),
            maker: address!("0xfb3c7eb936caa12b5a884d612393969a557d4307"),
            receiver: Address::ZERO,
            makerAsset: address!("0xe9e7cea3dedca5984780bafc599bd69add087d56"),
            takerAsset: address!("0x111111111117dc0aa78b770fa6a738034120c302"),
            makingAmount: U256::from(1_000_000_000_000_000_000u128),
            takingAmount: U256::from(1_000_000_000_000_000_000u128),
            makerTraits: U256::ZERO,
        };
        let hash = order_hash(&order, chains::ETHEREUM).unwrap();
        let signature = signer.sign_hash_sync(&hash).unwrap();
        assert_eq!(
            hex::encode_prefixed(signature.as_bytes()),
            "0x8e1cbdc41ebb253aea91bfa41a028e735be4a5b25d93da0e3a6817070f40dcd31dfbc38bd3800ce2ff88089c77ca2f442dc84637006808aab0af00d966c917b11b"
        );
    }

    #[test]
    fn create_order_hashes_and_signs() {
        let signer = PrivateKeySigner::from_str(
            "d8d1f95deb28949ea0ecc4e9a0decf89e98422c2d76ab6e5f736792a388c56c7",
        )
        .unwrap();
        let limit_order = create_order(&params(), &signer).unwrap();
        assert_eq!(
            limit_order.order_hash,
            order_hash(&limit_order.order, chains::ETHEREUM).unwrap()
        );
        let compact = limit_order.compact_signature();
        assert_eq!(compact.to_raw(), limit_order.signature.as_bytes());
    }

    #[test]
    fn validation_collects_everything() {
        let params = CreateOrderParams {
            chain_id: chains::ETHEREUM,
            maker: Address::ZERO,
            maker_asset: Address::ZERO,
            taker_asset: Address::ZERO,
            making_amount: U256::ZERO,
            taking_amount: U256::ZERO,
            receiver: None,
            maker_traits: MakerTraitsParams::default(),
            extension: Extension::default(),
            salt: SaltScheme::default(),
        };
        let errors = params.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 5);
    }

    #[test]
    fn identical_assets_are_rejected() {
        let mut params = params();
        params.taker_asset = params.maker_asset;
        let errors = params.validate().unwrap_err();
        assert_eq!(errors.errors(), [ValidationError::IdenticalAssets]);
    }

    #[test]
    fn native_token_is_rejected() {
        let mut params = params();
        params.maker_asset = NATIVE_TOKEN_ADDRESS;
        let errors = params.validate().unwrap_err();
        assert_eq!(errors.errors(), [ValidationError::NativeAsset("makerAsset")]);
    }

    #[test]
    fn extension_forces_the_flag_and_binds_the_salt() {
        let mut params = params();
        params.extension = build_fee_extension(&FeeExtensionParams {
            extension_target: address!("0xc0dfdb9e7a392c3dbbe7c6fbe8fbc1789c9fe05e"),
            ..Default::default()
        })
        .unwrap();
        params.salt = SaltScheme::Tracked { middle: SaltMiddle::Base(1), source: None };
        params.maker_traits.has_extension = false;

        let (order, extension) = params.build().unwrap();
        let traits = MakerTraits::from_word(order.makerTraits);
        assert!(traits.has_extension());
        let mask = (U256::from(1) << 160) - U256::from(1);
        assert_eq!(
            order.salt & mask,
            U256::from_be_bytes(alloy::primitives::keccak256(&extension).0) & mask
        );
    }

    #[test]
    fn order_data_round_trips_through_json() {
        let (order, extension) = params().build().unwrap();
        let data = OrderData::from_order(&order, extension);
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"makingAmount\":\"1000000000000000000\""));
        assert!(json.contains("\"makerTraits\":\"0x8"));
        let back: OrderData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
        assert_eq!(back.to_order(), order);
    }

    #[test]
    fn typed_data_matches_the_hash() {
        let (order, _) = params().build().unwrap();
        let typed = order_typed_data(&order, chains::ETHEREUM).unwrap();
        assert_eq!(
            typed.eip712_signing_hash().unwrap(),
            order_hash(&order, chains::ETHEREUM).unwrap()
        );
    }
}
