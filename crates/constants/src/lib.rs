//! Chain and contract constants for the 1inch Limit Order Protocol.
//!
//! This crate contains the static per-chain tables the SDK needs: the
//! Aggregation Router v6 deployments, the Multicall v2 helper contracts,
//! the Series Nonce Manager deployments, and the EIP-712 domain constants
//! of the limit order protocol.

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
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chains;
pub use chains::{
    is_eip1559_applicable, multicall_address, router_address, series_nonce_manager_address,
};

use alloy::primitives::{address, Address};

/// Placeholder address for the native token of the current chain. By
/// convention this is `0xee..ee`; it is never a valid order asset.
pub const NATIVE_TOKEN_ADDRESS: Address = Address::repeat_byte(0xee);

/// The canonical Permit2 deployment, identical on every chain.
pub const PERMIT2_ADDRESS: Address = address!("0x000000000022d473030f116ddee9f6b43ac78ba3");

/// EIP-712 domain name of the Aggregation Router v6.
pub const AGGREGATION_ROUTER_V6_NAME: &str = "1inch Aggregation Router";

/// EIP-712 domain version of the Aggregation Router v6.
pub const AGGREGATION_ROUTER_V6_VERSION: &str = "6";

/// An error raised when a chain has no deployment of a required contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The chain id is not in the static deployment tables.
    #[error("chain {0} is not supported")]
    UnsupportedChain(u64),
}
