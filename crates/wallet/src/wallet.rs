use crate::error::{RpcError, WalletError};
use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TypedTransaction},
    eips::eip2718::Encodable2718,
    network::TransactionBuilder as _,
    primitives::{Address, Bytes, B256, U256},
    providers::{Provider, RootProvider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::{local::PrivateKeySigner, Signature, SignerSync},
    sol_types::SolCall,
};
use oneinch_bindings::{SeriesNonceManager, IERC20};
use oneinch_constants::{is_eip1559_applicable, series_nonce_manager_address};
use oneinch_types::{create_order, CreateOrderParams, LimitOrder, OrderError};
use tracing::{debug, instrument};
use url::Url;

/// A signing key plus a node connection.
///
/// Signing is synchronous and stateless aside from the key; every network
/// method suspends on a single RPC round trip and holds no state across
/// it.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    provider: RootProvider,
    chain_id: u64,
}

impl Wallet {
    /// Connect a wallet from a hex private key (no `0x` prefix required)
    /// and a node URL.
    pub fn new(private_key: &str, node_url: Url, chain_id: u64) -> Result<Self, WalletError> {
        let signer: PrivateKeySigner = private_key.parse()?;
        let provider = RootProvider::new_http(node_url);
        Ok(Self { signer, provider, chain_id })
    }

    /// The address derived from the private key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The chain this wallet signs for.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The underlying provider, for callers needing raw RPC access.
    pub const fn provider(&self) -> &RootProvider {
        &self.provider
    }

    /// The signer, for offline signing flows.
    pub const fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Whether this chain accepts EIP-1559 transactions.
    pub const fn is_eip1559_applicable(&self) -> bool {
        is_eip1559_applicable(self.chain_id)
    }

    /// The next pending nonce for this wallet.
    pub async fn nonce(&self) -> Result<u64, RpcError> {
        Ok(self.provider.get_transaction_count(self.address()).pending().await?)
    }

    /// Native token balance.
    pub async fn balance(&self) -> Result<U256, RpcError> {
        Ok(self.provider.get_balance(self.address()).await?)
    }

    /// The node's current gas price.
    pub async fn gas_price(&self) -> Result<u128, RpcError> {
        Ok(self.provider.get_gas_price().await?)
    }

    /// The node's suggested priority fee.
    pub async fn gas_tip_cap(&self) -> Result<u128, RpcError> {
        Ok(self.provider.get_max_priority_fee_per_gas().await?)
    }

    /// Issue an `eth_call` against `to` with the given calldata.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        let request = TransactionRequest::default().with_to(to).with_input(data);
        Ok(self.provider.call(request).await?)
    }

    /// Sign a legacy or EIP-1559 transaction. Other transaction types are
    /// rejected.
    pub fn sign(&self, tx: TypedTransaction) -> Result<TxEnvelope, WalletError> {
        match tx {
            TypedTransaction::Legacy(tx) => {
                let signature = self.signer.sign_hash_sync(&tx.signature_hash())?;
                Ok(tx.into_signed(signature).into())
            }
            TypedTransaction::Eip1559(tx) => {
                let signature = self.signer.sign_hash_sync(&tx.signature_hash())?;
                Ok(tx.into_signed(signature).into())
            }
            other => Err(WalletError::UnsupportedTxType(other.tx_type() as u8)),
        }
    }

    /// Sign an arbitrary 32-byte digest.
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature, WalletError> {
        Ok(self.signer.sign_hash_sync(hash)?)
    }

    /// Broadcast a signed transaction, returning its hash.
    #[instrument(skip_all, fields(tx_hash = %tx.hash()))]
    pub async fn broadcast(&self, tx: &TxEnvelope) -> Result<B256, RpcError> {
        let pending = self.provider.send_raw_transaction(&tx.encoded_2718()).await?;
        debug!("transaction broadcast");
        Ok(*pending.tx_hash())
    }

    /// Fetch the receipt for a transaction, `None` while pending.
    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        Ok(self.provider.get_transaction_receipt(hash).await?)
    }

    /// Calldata for an ERC-20 `approve`.
    pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
        IERC20::approveCall { spender, amount }.abi_encode().into()
    }

    /// This wallet's allowance of `token` granted to `spender`.
    pub async fn allowance(&self, token: Address, spender: Address) -> Result<U256, RpcError> {
        let data = IERC20::allowanceCall { owner: self.address(), spender }.abi_encode();
        let raw = self.call(token, data.into()).await?;
        Ok(IERC20::allowanceCall::abi_decode_returns(&raw)?)
    }

    /// This wallet's nonce in `series` from the series nonce manager.
    pub async fn series_nonce(&self, series: U256) -> Result<U256, RpcError> {
        let manager = series_nonce_manager_address(self.chain_id)?;
        let data =
            SeriesNonceManager::nonceCall { series, makerAddress: self.address() }.abi_encode();
        let raw = self.call(manager, data.into()).await?;
        Ok(SeriesNonceManager::nonceCall::abi_decode_returns(&raw)?)
    }

    /// Build, hash, and sign a limit order with this wallet's key.
    pub fn create_order(&self, params: &CreateOrderParams) -> Result<LimitOrder, OrderError> {
        create_order(params, &self.signer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use oneinch_constants::chains;

    fn test_wallet(chain_id: u64) -> Wallet {
        Wallet::new(
            "965e092fdfc08940d2bd05c7b5c7e1c51e283e92c7f52bbf1408973ae9a9acb7",
            Url::parse("http://localhost:8545").unwrap(),
            chain_id,
        )
        .unwrap()
    }

    #[test]
    fn derives_the_address_from_the_key() {
        let wallet = test_wallet(chains::ETHEREUM);
        assert_eq!(wallet.address(), address!("0x2c9b2dbdba8a9c969ac24153f5c1c23cb0e63914"));
    }

    #[test]
    fn rejects_garbage_keys() {
        let err = Wallet::new("not-a-key", Url::parse("http://localhost:8545").unwrap(), 1)
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn legacy_chains_are_flagged() {
        assert!(!test_wallet(chains::BSC).is_eip1559_applicable());
        assert!(test_wallet(chains::ETHEREUM).is_eip1559_applicable());
    }

    #[test]
    fn approve_calldata_has_the_selector() {
        let calldata = Wallet::approve_calldata(Address::ZERO, U256::from(1u64));
        assert_eq!(&calldata[..4], IERC20::approveCall::SELECTOR);
        assert_eq!(calldata.len(), 4 + 64);
    }
}
