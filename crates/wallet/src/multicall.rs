use crate::{error::RpcError, wallet::Wallet};
use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolCall,
};
use oneinch_bindings::MulticallV2;
use oneinch_constants::multicall_address;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One call in a multicall batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticallRequest {
    /// The contract to call.
    pub to: Address,
    /// The calldata.
    pub data: Bytes,
}

impl Wallet {
    /// Execute the batch through the chain's Multicall v2 contract in a
    /// single `eth_call`, returning one result per request.
    ///
    /// The contract stops at the first reverting call, so the result list
    /// can be shorter than the request list; an entirely empty result is
    /// an error.
    #[instrument(skip_all, fields(calls = requests.len()))]
    pub async fn multicall(&self, requests: &[MulticallRequest]) -> Result<Vec<Bytes>, RpcError> {
        let contract = multicall_address(self.chain_id())?;

        let calls = requests
            .iter()
            .map(|request| MulticallV2::Call { to: request.to, data: request.data.clone() })
            .collect();
        let data = MulticallV2::multicallCall { calls }.abi_encode();

        let raw = self.call(contract, data.into()).await?;
        let decoded = MulticallV2::multicallCall::abi_decode_returns(&raw)?;
        if decoded.results.is_empty() {
            return Err(RpcError::EmptyResponse);
        }
        debug!(
            results = decoded.results.len(),
            last_success = %decoded.lastSuccessIndex,
            "multicall complete"
        );
        Ok(decoded.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use oneinch_bindings::IERC20;

    #[test]
    fn batch_encoding_round_trips() {
        let requests = [
            MulticallRequest {
                to: Address::repeat_byte(0x11),
                data: IERC20::nameCall {}.abi_encode().into(),
            },
            MulticallRequest {
                to: Address::repeat_byte(0x22),
                data: IERC20::noncesCall { owner: Address::repeat_byte(0x33) }.abi_encode().into(),
            },
        ];
        let calls: Vec<_> = requests
            .iter()
            .map(|request| MulticallV2::Call { to: request.to, data: request.data.clone() })
            .collect();
        let encoded = MulticallV2::multicallCall { calls: calls.clone() }.abi_encode();
        let decoded = MulticallV2::multicallCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.calls, calls);
    }

    #[test]
    fn decodes_the_result_set() {
        let ret = MulticallV2::multicallCall::abi_encode_returns(&MulticallV2::multicallReturn {
            results: vec![Bytes::from(vec![0xab; 32])],
            lastSuccessIndex: U256::ZERO,
        });
        let decoded = MulticallV2::multicallCall::abi_decode_returns(&ret).unwrap();
        assert_eq!(decoded.results.len(), 1);
        assert_eq!(decoded.lastSuccessIndex, U256::ZERO);
    }
}
