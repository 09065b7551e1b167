//! Limit-order types and utilities for the 1inch Limit Order Protocol v4.
//!
//! This crate covers the offline half of the protocol: packing maker and
//! taker traits into their bit-packed `uint256` encodings, building order
//! extensions, generating salts, hashing orders per EIP-712, and producing
//! router calldata for fills.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod bitmask;
pub use bitmask::BitMask;

mod calldata;
pub use calldata::fill_order_calldata;

mod error;
pub use error::{EncodingError, OrderError, ValidationError, ValidationErrors};

mod extension;
pub use extension::{Extension, ExtensionBuilder};

mod fees;
pub use fees::{
    build_fee_extension, encode_whitelist, pack_fee_parameter, FeeExtensionParams, IntegratorFee,
    ResolverFee,
};

mod maker_traits;
pub use maker_traits::{MakerTraits, MakerTraitsParams};

mod order;
pub use order::{
    create_order, order_eip712_domain, order_hash, order_typed_data, CreateOrderParams, LimitOrder,
    OrderData, SaltScheme,
};

mod salt;
pub use salt::{legacy_salt, tracked_salt, SaltMiddle, DEFAULT_SOURCE};

mod signature;
pub use signature::CompactSignature;

mod taker_traits;
pub use taker_traits::{AmountMode, TakerTraits, TakerTraitsEncoded};

pub mod u256_decimal;
