use oneinch_constants::ChainError;

/// A failure talking to or decoding from the node.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The transport failed or the node returned an error.
    #[error(transparent)]
    Transport(#[from] alloy::transports::TransportError),
    /// Returned bytes did not decode against the expected ABI.
    #[error("failed to decode call return data: {0}")]
    AbiDecode(#[from] alloy::sol_types::Error),
    /// The multicall contract returned no results.
    #[error("multicall returned an empty result set")]
    EmptyResponse,
    /// No contract deployment is known for the chain.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Any failure in the wallet layer.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The private key hex did not parse to a valid secp256k1 key.
    #[error("invalid private key: {0}")]
    InvalidKey(#[from] alloy::signers::local::LocalSignerError),
    /// Signing failed.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
    /// A node interaction failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),
    /// Only legacy and EIP-1559 transactions are supported.
    #[error("unsupported transaction type {0}")]
    UnsupportedTxType(u8),
    /// A required transaction field was never set and cannot be derived.
    #[error("transaction is missing {0}")]
    MissingField(&'static str),
    /// A Permit2 value does not fit its field width.
    #[error("permit2 {field} exceeds {bits} bits")]
    Permit2FieldOutOfRange {
        /// The offending field.
        field: &'static str,
        /// The field's width on chain.
        bits: u32,
    },
}

impl From<ChainError> for WalletError {
    fn from(err: ChainError) -> Self {
        Self::Rpc(err.into())
    }
}
