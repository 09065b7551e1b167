//! Contract bindings for the 1inch Limit Order Protocol.
//!
//! Contains [`alloy::sol!`] bindings for the Aggregation Router v6, the
//! ERC-20 permit surfaces, Uniswap's Permit2, the 1inch Multicall v2
//! helper, and the Series Nonce Manager. The EIP-712 struct definitions
//! here are the single source of truth for typed-data hashing: field order
//! in the `sol!` blocks is the field order that gets hashed.

#![allow(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations, unreachable_pub, rustdoc::all)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bindings;
pub use bindings::{
    AggregationRouterV6, DaiPermit, Erc2612Permit, MulticallV2, Permit2, SeriesNonceManager, IERC20,
};
