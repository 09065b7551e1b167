use crate::{
    error::{RpcError, WalletError},
    multicall::MulticallRequest,
    wallet::Wallet,
};
use alloy::{
    primitives::{Address, Bytes, Signature, B256, U256},
    signers::SignerSync,
    sol_types::{Eip712Domain, SolCall, SolStruct},
};
use oneinch_bindings::{Erc2612Permit, IERC20};
use serde::{Deserialize, Serialize};

/// Everything needed to build an ERC-2612 permit for a token.
///
/// Usually fetched from the chain with [`Wallet::permit_data`]; the two
/// flags cover tokens that deviate from the standard domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPermitData {
    /// The token being permitted.
    pub token: Address,
    /// Who may spend the permitted amount.
    pub spender: Address,
    /// The token's EIP-712 domain name.
    pub name: String,
    /// The token's domain version; `"1"` when the contract has none.
    pub version: Option<String>,
    /// Chain the permit is valid on.
    pub chain_id: u64,
    /// The owner's current permit nonce.
    pub nonce: U256,
    /// The permitted amount.
    pub amount: U256,
    /// Unix deadline for the permit.
    pub deadline: U256,
    /// Some tokens (e.g. Gitcoin) omit `version` from the domain type.
    pub domain_without_version: bool,
    /// Some tokens replace `chainId` with a 32-byte salt.
    pub salt: Option<B256>,
}

/// The token's EIP-712 domain, honoring the without-version and
/// salt-instead-of-chain-id variants.
pub fn erc2612_domain(data: &ContractPermitData) -> Eip712Domain {
    Eip712Domain::new(
        Some(data.name.clone().into()),
        (!data.domain_without_version)
            .then(|| data.version.clone().unwrap_or_else(|| "1".to_owned()).into()),
        data.salt.is_none().then(|| U256::from(data.chain_id)),
        Some(data.token),
        data.salt,
    )
}

/// `v` zero-padded to a word, then `r` and `s`: the trailing signature
/// layout of on-chain `permit` calldata.
pub(crate) fn vrs_words(signature: &Signature) -> [u8; 96] {
    let raw = signature.as_bytes();
    let mut out = [0u8; 96];
    out[31] = raw[64];
    out[32..96].copy_from_slice(&raw[..64]);
    out
}

impl Wallet {
    /// Sign an ERC-2612 permit message with this wallet as the owner.
    pub fn permit_signature(&self, data: &ContractPermitData) -> Result<Signature, WalletError> {
        let permit = Erc2612Permit {
            owner: self.address(),
            spender: data.spender,
            value: data.amount,
            nonce: data.nonce,
            deadline: data.deadline,
        };
        let digest = permit.eip712_signing_hash(&erc2612_domain(data));
        Ok(self.signer().sign_hash_sync(&digest)?)
    }

    /// Build the calldata tail for the token's `permit` function:
    /// `owner ‖ spender ‖ amount ‖ deadline ‖ v ‖ r ‖ s`, each
    /// zero-padded to a word.
    pub fn token_permit(&self, data: &ContractPermitData) -> Result<Bytes, WalletError> {
        let signature = self.permit_signature(data)?;

        let mut out = Vec::with_capacity(7 * 32);
        out.extend_from_slice(B256::left_padding_from(self.address().as_slice()).as_slice());
        out.extend_from_slice(B256::left_padding_from(data.spender.as_slice()).as_slice());
        out.extend_from_slice(&data.amount.to_be_bytes::<32>());
        out.extend_from_slice(&data.deadline.to_be_bytes::<32>());
        out.extend_from_slice(&vrs_words(&signature));
        Ok(out.into())
    }

    /// Fetch the permit metadata for `token` in one multicall: name,
    /// nonce, and version. The version call is last so tokens without a
    /// `version()` function still yield the other two; those default to
    /// version `"1"`.
    pub async fn permit_data(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
        deadline: U256,
    ) -> Result<ContractPermitData, WalletError> {
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

        Ok(ContractPermitData {
            token,
            spender,
            name,
            version,
            chain_id: self.chain_id(),
            nonce,
            amount,
            deadline,
            domain_without_version: false,
            salt: None,
        })
    }
}
