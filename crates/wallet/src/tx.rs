use crate::{error::WalletError, wallet::Wallet};
use alloy::{
    consensus::{TxEip1559, TxLegacy, TypedTransaction},
    primitives::{Address, Bytes, TxKind, U256},
};

/// Gas limit applied when the caller sets none.
const DEFAULT_GAS_LIMIT: u64 = 150_000;

/// Builds a [`TypedTransaction`] for a [`Wallet`], filling unset fields
/// from the chain: the pending nonce, current fee levels, and a default
/// gas limit. The transaction type follows the chain; legacy on chains
/// without EIP-1559, dynamic-fee everywhere else.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    nonce: Option<u64>,
    gas_price: Option<u128>,
    gas_tip_cap: Option<u128>,
    gas_fee_cap: Option<u128>,
    gas_limit: Option<u64>,
    to: Option<Address>,
    value: Option<U256>,
    data: Option<Bytes>,
}

impl TransactionBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account nonce.
    pub const fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set the gas price for legacy transactions.
    pub const fn gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Set the priority fee for dynamic-fee transactions.
    pub const fn gas_tip_cap(mut self, tip: u128) -> Self {
        self.gas_tip_cap = Some(tip);
        self
    }

    /// Set the fee cap for dynamic-fee transactions.
    pub const fn gas_fee_cap(mut self, cap: u128) -> Self {
        self.gas_fee_cap = Some(cap);
        self
    }

    /// Set the gas limit.
    pub const fn gas_limit(mut self, limit: u64) -> Self {
        self.gas_limit = Some(limit);
        self
    }

    /// Set the recipient.
    pub const fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Set the value in wei.
    pub const fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the calldata.
    pub fn data(mut self, data: Bytes) -> Self {
        self.data = Some(data);
        self
    }

    /// Resolve unset fields against the wallet's chain and produce the
    /// transaction. `to` is required; a builder with every gas field
    /// and the nonce set makes no network calls.
    pub async fn build(self, wallet: &Wallet) -> Result<TypedTransaction, WalletError> {
        let to = self.to.ok_or(WalletError::MissingField("to"))?;
        let nonce = match self.nonce {
            Some(nonce) => nonce,
            None => wallet.nonce().await?,
        };
        let gas_limit = self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT);
        let value = self.value.unwrap_or(U256::ZERO);
        let input = self.data.unwrap_or_default();

        if !wallet.is_eip1559_applicable() {
            let gas_price = match self.gas_price {
                Some(price) => price,
                None => wallet.gas_price().await?,
            };
            return Ok(TypedTransaction::Legacy(TxLegacy {
                chain_id: Some(wallet.chain_id()),
                nonce,
                gas_price,
                gas_limit,
                to: TxKind::Call(to),
                value,
                input,
            }));
        }

        let tip = match self.gas_tip_cap {
            Some(tip) => tip,
            None => wallet.gas_tip_cap().await?,
        };
        let fee_cap = match self.gas_fee_cap {
            Some(cap) => cap,
            None => 2 * wallet.gas_price().await? + tip,
        };
        Ok(TypedTransaction::Eip1559(TxEip1559 {
            chain_id: wallet.chain_id(),
            nonce,
            gas_limit,
            max_fee_per_gas: fee_cap,
            max_priority_fee_per_gas: tip,
            to: TxKind::Call(to),
            value,
            input,
            access_list: Default::default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use oneinch_constants::chains;
    use url::Url;

    fn test_wallet(chain_id: u64) -> Wallet {
        Wallet::new(
            "965e092fdfc08940d2bd05c7b5c7e1c51e283e92c7f52bbf1408973ae9a9acb7",
            Url::parse("http://localhost:8545").unwrap(),
            chain_id,
        )
        .unwrap()
    }

    fn full_builder() -> TransactionBuilder {
        TransactionBuilder::new()
            .to(address!("0x1111111254eeb25477b68fb85ed929f73a960582"))
            .nonce(7)
            .gas_limit(220_000)
            .gas_price(5_000_000_000)
            .gas_tip_cap(1_000_000_000)
            .gas_fee_cap(12_000_000_000)
            .value(U256::from(42u64))
            .data(Bytes::from_static(&[0xde, 0xad]))
    }

    #[tokio::test]
    async fn dynamic_fee_chains_get_eip1559_transactions() {
        let tx = full_builder().build(&test_wallet(chains::ETHEREUM)).await.unwrap();
        match tx {
            TypedTransaction::Eip1559(tx) => {
                assert_eq!(tx.chain_id, chains::ETHEREUM);
                assert_eq!(tx.nonce, 7);
                assert_eq!(tx.gas_limit, 220_000);
                assert_eq!(tx.max_priority_fee_per_gas, 1_000_000_000);
                assert_eq!(tx.max_fee_per_gas, 12_000_000_000);
                assert_eq!(tx.value, U256::from(42u64));
            }
            other => panic!("expected an EIP-1559 transaction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn legacy_chains_get_legacy_transactions() {
        let tx = full_builder().build(&test_wallet(chains::BSC)).await.unwrap();
        match tx {
            TypedTransaction::Legacy(tx) => {
                assert_eq!(tx.chain_id, Some(chains::BSC));
                assert_eq!(tx.gas_price, 5_000_000_000);
                assert_eq!(tx.to, TxKind::Call(address!("0x1111111254eeb25477b68fb85ed929f73a960582")));
            }
            other => panic!("expected a legacy transaction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_recipient_is_an_error() {
        let err = TransactionBuilder::new().build(&test_wallet(chains::ETHEREUM)).await.unwrap_err();
        assert!(matches!(err, WalletError::MissingField("to")));
    }

    #[tokio::test]
    async fn defaults_fill_in_without_network_when_fees_are_set() {
        let tx = TransactionBuilder::new()
            .to(Address::ZERO)
            .nonce(0)
            .gas_tip_cap(1)
            .gas_fee_cap(2)
            .build(&test_wallet(chains::ETHEREUM))
            .await
            .unwrap();
        match tx {
            TypedTransaction::Eip1559(tx) => {
                assert_eq!(tx.gas_limit, DEFAULT_GAS_LIMIT);
                assert_eq!(tx.value, U256::ZERO);
                assert!(tx.input.is_empty());
            }
            other => panic!("expected an EIP-1559 transaction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signed_transaction_round_trips_type() {
        let wallet = test_wallet(chains::ETHEREUM);
        let tx = full_builder().build(&wallet).await.unwrap();
        let envelope = wallet.sign(tx).unwrap();
        assert!(envelope.is_eip1559());
    }
}
