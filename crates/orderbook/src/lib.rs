//! REST client for the 1inch limit-order-book service.

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

/// The [`OrderbookClient`].
///
/// [`OrderbookClient`]: crate::client::OrderbookClient
pub mod client;

/// Errors returned by the [`OrderbookClient`].
///
/// [`OrderbookClient`]: crate::client::OrderbookClient
pub mod error;

/// Request and response types for the order-book service.
pub mod types;

pub use client::OrderbookClient;
pub use error::{OrderbookError, Result};
