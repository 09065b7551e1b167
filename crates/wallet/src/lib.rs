//! Wallet, permit builders, and transaction plumbing for the 1inch Limit
//! Order SDK.
//!
//! The [`Wallet`] owns a secp256k1 key and a node connection. On top of it
//! sit the ERC-2612, Dai-style, and Permit2 permit builders, the batched
//! multicall helper, and the [`TransactionBuilder`] that finalizes legacy
//! or EIP-1559 transactions depending on the chain.

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

mod error;
pub use error::{RpcError, WalletError};

mod multicall;
pub use multicall::MulticallRequest;

mod permit;
pub use permit::{erc2612_domain, ContractPermitData};

mod permit_dai;
pub use permit_dai::DaiPermitData;

mod permit2;
pub use permit2::{
    permit2_domain, Permit2SingleParams, Permit2TransferParams, MAX_UINT160, MAX_UINT48,
};

mod tx;
pub use tx::TransactionBuilder;

mod wallet;
pub use wallet::Wallet;
