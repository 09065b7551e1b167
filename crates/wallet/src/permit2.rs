use crate::{error::WalletError, wallet::Wallet};
use alloy::{
    primitives::{
        aliases::{U160, U48},
        Address, Signature, U256,
    },
    signers::SignerSync,
    sol_types::{Eip712Domain, SolStruct},
};
use oneinch_bindings::Permit2;
use oneinch_constants::PERMIT2_ADDRESS;
use serde::{Deserialize, Serialize};

/// Largest amount Permit2 can represent, `2^160 - 1`.
pub const MAX_UINT160: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0xffff_ffff, 0]);

/// Largest expiration or nonce Permit2 can represent, `2^48 - 1`.
pub const MAX_UINT48: u64 = (1 << 48) - 1;

/// The Permit2 signing domain. The contract lives at the same address
/// on every chain and its domain has no version field.
pub fn permit2_domain(chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some("Permit2".into()),
        None,
        Some(U256::from(chain_id)),
        Some(PERMIT2_ADDRESS),
        None,
    )
}

/// Parameters for a Permit2 allowance-style permit (`permit` on the
/// AllowanceTransfer side of the contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit2SingleParams {
    /// Token the allowance covers.
    pub token: Address,
    /// Allowance amount, at most [`MAX_UINT160`].
    pub amount: U256,
    /// Unix timestamp the allowance expires at, at most [`MAX_UINT48`].
    pub expiration: u64,
    /// The owner's Permit2 nonce for this token and spender.
    pub nonce: u64,
    /// Who may spend through Permit2.
    pub spender: Address,
    /// Deadline for submitting the signed permit itself.
    pub sig_deadline: U256,
}

impl Permit2SingleParams {
    fn to_message(self) -> Result<Permit2::PermitSingle, WalletError> {
        if self.amount > MAX_UINT160 {
            return Err(WalletError::Permit2FieldOutOfRange { field: "amount", bits: 160 });
        }
        let limbs = self.amount.as_limbs();
        let amount = U160::from_limbs([limbs[0], limbs[1], limbs[2]]);
        let expiration = permit2_u48(self.expiration, "expiration")?;
        let nonce = permit2_u48(self.nonce, "nonce")?;
        Ok(Permit2::PermitSingle {
            details: Permit2::PermitDetails { token: self.token, amount, expiration, nonce },
            spender: self.spender,
            sigDeadline: self.sig_deadline,
        })
    }
}

fn permit2_u48(value: u64, field: &'static str) -> Result<U48, WalletError> {
    if value > MAX_UINT48 {
        return Err(WalletError::Permit2FieldOutOfRange { field, bits: 48 });
    }
    Ok(U48::from(value))
}

/// Parameters for a Permit2 signature-transfer permit
/// (`permitTransferFrom`), where the nonce is unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit2TransferParams {
    /// Token being transferred.
    pub token: Address,
    /// Amount being transferred.
    pub amount: U256,
    /// Who may execute the transfer.
    pub spender: Address,
    /// Unordered nonce; any unused word-slot value.
    pub nonce: U256,
    /// Unix deadline for the transfer.
    pub deadline: U256,
}

impl Wallet {
    /// Sign a Permit2 allowance permit.
    pub fn sign_permit2_single(
        &self,
        params: Permit2SingleParams,
    ) -> Result<Signature, WalletError> {
        let message = params.to_message()?;
        let digest = message.eip712_signing_hash(&permit2_domain(self.chain_id()));
        Ok(self.signer().sign_hash_sync(&digest)?)
    }

    /// Sign a Permit2 signature-transfer permit.
    pub fn sign_permit2_transfer(
        &self,
        params: Permit2TransferParams,
    ) -> Result<Signature, WalletError> {
        let message = Permit2::PermitTransferFrom {
            permitted: Permit2::TokenPermissions { token: params.token, amount: params.amount },
            spender: params.spender,
            nonce: params.nonce,
            deadline: params.deadline,
        };
        let digest = message.eip712_signing_hash(&permit2_domain(self.chain_id()));
        Ok(self.signer().sign_hash_sync(&digest)?)
    }
}
