use crate::{
    error::{RpcError, WalletError},
    multicall::MulticallRequest,
    permit::vrs_words,
    wallet::Wallet,
};
use alloy::{
    primitives::{Address, Bytes, Signature, B256, U256},
    signers::SignerSync,
    sol_types::{Eip712Domain, SolCall, SolStruct},
};
use oneinch_bindings::{DaiPermit, IERC20};
use serde::{Deserialize, Serialize};

/// Permit parameters for Dai-style tokens, whose `permit` takes an
/// expiry and an allowed flag instead of an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaiPermitData {
    /// The token being permitted.
    pub token: Address,
    /// Who is granted the allowance.
    pub spender: Address,
    /// The token's EIP-712 domain name.
    pub name: String,
    /// The token's domain version; `"1"` when the contract has none.
    pub version: Option<String>,
    /// Chain the permit is valid on.
    pub chain_id: u64,
    /// The holder's current permit nonce.
    pub nonce: U256,
    /// Unix timestamp after which the permit is void.
    pub expiry: U256,
    /// Whether the spender is being granted or revoked.
    pub allowed: bool,
    /// Set for tokens whose domain type omits `version`.
    pub domain_without_version: bool,
}

impl DaiPermitData {
    fn domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(self.name.clone().into()),
            (!self.domain_without_version)
                .then(|| self.version.clone().unwrap_or_else(|| "1".to_owned()).into()),
            Some(U256::from(self.chain_id)),
            Some(self.token),
            None,
        )
    }
}

impl Wallet {
    /// Sign a Dai-style permit message with this wallet as the holder.
    pub fn permit_signature_dai(&self, data: &DaiPermitData) -> Result<Signature, WalletError> {
        let permit = DaiPermit {
            holder: self.address(),
            spender: data.spender,
            nonce: data.nonce,
            expiry: data.expiry,
            allowed: data.allowed,
        };
        let digest = permit.eip712_signing_hash(&data.domain());
        Ok(self.signer().sign_hash_sync(&digest)?)
    }

    /// Build the calldata tail for a Dai-style `permit`:
    /// `holder ‖ spender ‖ nonce ‖ expiry ‖ allowed ‖ v ‖ r ‖ s`, each
    /// zero-padded to a word.
    pub fn token_permit_dai(&self, data: &DaiPermitData) -> Result<Bytes, WalletError> {
        let signature = self.permit_signature_dai(data)?;

        let mut out = Vec::with_capacity(8 * 32);
        out.extend_from_slice(B256::left_padding_from(self.address().as_slice()).as_slice());
        out.extend_from_slice(B256::left_padding_from(data.spender.as_slice()).as_slice());
        out.extend_from_slice(&data.nonce.to_be_bytes::<32>());
        out.extend_from_slice(&data.expiry.to_be_bytes::<32>());
        out.extend_from_slice(&U256::from(data.allowed as u8).to_be_bytes::<32>());
        out.extend_from_slice(&vrs_words(&signature));
        Ok(out.into())
    }

    /// Fetch Dai-style permit metadata in one multicall, with the same
    /// version-last fallback as [`Wallet::permit_data`].
    ///
    /// [`Wallet::permit_data`]: crate::Wallet::permit_data
    pub async fn permit_data_dai(
        &self,
        token: Address,
        spender: Address,
        expiry: U256,
    ) -> Result<DaiPermitData, WalletError> {
        let requests = [
            MulticallRequest { to: token, data: IERC20::nameCall {}.abi_encode().into() },
            MulticallRequest {
                to: token,
                data: IERC20::noncesCall { owner: self.address() }.abi_encode().into(),
            },
            MulticallRequest { to: token, data: IERC20::versionCall {}.abi_encode().into() },
        ];
        let results = self.multicall(&requests).await?;
        if results.len() < 2 {
            return Err(RpcError::EmptyResponse.into());
        }

        let name =
            IERC20::nameCall::abi_decode_returns(&results[0]).map_err(RpcError::AbiDecode)?;
        let nonce =
            IERC20::noncesCall::abi_decode_returns(&results[1]).map_err(RpcError::AbiDecode)?;
        let version =
            results.get(2).and_then(|raw| IERC20::versionCall::abi_decode_returns(raw).ok());

        Ok(DaiPermitData {
            token,
            spender,
            name,
            version,
            chain_id: self.chain_id(),
            nonce,
            expiry,
            allowed: true,
            domain_without_version: false,
        })
    }
}
