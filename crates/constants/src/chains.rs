//! Per-chain deployment tables.

use crate::ChainError;
use alloy::primitives::{address, Address};

/// Ethereum mainnet chain id.
pub const ETHEREUM: u64 = 1;
/// Optimism chain id.
pub const OPTIMISM: u64 = 10;
/// BNB Smart Chain chain id.
pub const BSC: u64 = 56;
/// Gnosis chain id.
pub const GNOSIS: u64 = 100;
/// Polygon chain id.
pub const POLYGON: u64 = 137;
/// Fantom chain id.
pub const FANTOM: u64 = 250;
/// zkSync Era chain id.
pub const ZKSYNC_ERA: u64 = 324;
/// Klaytn chain id.
pub const KLAYTN: u64 = 8217;
/// Base chain id.
pub const BASE: u64 = 8453;
/// Arbitrum One chain id.
pub const ARBITRUM: u64 = 42161;
/// Avalanche C-Chain chain id.
pub const AVALANCHE: u64 = 43114;
/// Aurora chain id.
pub const AURORA: u64 = 1313161554;

/// The Aggregation Router v6 is deployed at the same address on every
/// supported chain except zkSync Era.
const ROUTER_V6: Address = address!("0x111111125421ca6dc452d289314280a0f8842a65");
const ROUTER_V6_ZKSYNC_ERA: Address = address!("0x6fd4383cb451173d5f9304f041c7bcbf27d561ff");

/// Returns the Aggregation Router v6 address for a chain.
pub const fn router_address(chain_id: u64) -> Result<Address, ChainError> {
    match chain_id {
        ZKSYNC_ERA => Ok(ROUTER_V6_ZKSYNC_ERA),
        ETHEREUM | OPTIMISM | BSC | GNOSIS | POLYGON | FANTOM | KLAYTN | BASE | ARBITRUM
        | AVALANCHE | AURORA => Ok(ROUTER_V6),
        _ => Err(ChainError::UnsupportedChain(chain_id)),
    }
}

/// Returns the 1inch Multicall v2 helper address for a chain.
pub const fn multicall_address(chain_id: u64) -> Result<Address, ChainError> {
    match chain_id {
        ETHEREUM => Ok(address!("0x8d035edd8e09c3283463dade67cc0d49d6868063")),
        BSC => Ok(address!("0x804708de7af615085203fa2b18eae59c5738e2a9")),
        POLYGON => Ok(address!("0x0196e8a9455a90d392b46df8560c867e7df40b34")),
        OPTIMISM | GNOSIS => Ok(address!("0xe295ad71242373c37c5fda7b57f26f9ea1088afe")),
        ARBITRUM => Ok(address!("0x11dee30e710b8d4a8630392781cc3c0046365d4c")),
        AVALANCHE => Ok(address!("0xc4a8b7e29e3c8ec560cd4945c1cf3461a85a148d")),
        FANTOM | KLAYTN => Ok(address!("0xa31bb36c5164b165f9c36955ea4ccbab42b3b28e")),
        AURORA | BASE => Ok(address!("0xa0446d8804611944f1b527ecd37d7dcbe442caba")),
        ZKSYNC_ERA => Ok(address!("0xae1f66df155c611c15a23f31acf5a9bf1b87907e")),
        _ => Err(ChainError::UnsupportedChain(chain_id)),
    }
}

/// Returns the Series Nonce Manager address for a chain.
pub const fn series_nonce_manager_address(chain_id: u64) -> Result<Address, ChainError> {
    match chain_id {
        ETHEREUM => Ok(address!("0x303389f541ff2d620e42832f180a08e767b28e10")),
        OPTIMISM => Ok(address!("0x32d12a25f539e341089050e2d26794f041fc9df8")),
        BSC => Ok(address!("0x58ce0e6ef670c9a05622f4188faa03a9e12ee2e4")),
        GNOSIS => Ok(address!("0x11431a89893025d2a48dca4eddc396f8c8117187")),
        POLYGON => Ok(address!("0xa5eb255ef45dfb48b5d133d08833def69871691d")),
        FANTOM | KLAYTN => Ok(address!("0x7871769b3816b23db12e83a482aac35f1fd35d4b")),
        BASE => Ok(address!("0xd9cc0a957cac93135596f98c20fbaca8bf515909")),
        ARBITRUM => Ok(address!("0xd7936052d1e096d48c81ef3918f9fd6384108480")),
        AVALANCHE => Ok(address!("0x2ec255797fef7669fa243509b7a599121148ffba")),
        AURORA => Ok(address!("0x7f069df72b7a39bce9806e3afaf579e54d8cf2b9")),
        _ => Err(ChainError::UnsupportedChain(chain_id)),
    }
}

/// Whether dynamic-fee (EIP-1559) transactions are usable on a chain.
///
/// BSC, Aurora, zkSync Era and Fantom still require legacy transactions.
pub const fn is_eip1559_applicable(chain_id: u64) -> bool {
    !matches!(chain_id, BSC | AURORA | ZKSYNC_ERA | FANTOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_table() {
        assert_eq!(router_address(ETHEREUM).unwrap(), ROUTER_V6);
        assert_eq!(router_address(ZKSYNC_ERA).unwrap(), ROUTER_V6_ZKSYNC_ERA);
        assert_eq!(router_address(5), Err(ChainError::UnsupportedChain(5)));
    }

    #[test]
    fn legacy_chains() {
        assert!(is_eip1559_applicable(ETHEREUM));
        assert!(is_eip1559_applicable(POLYGON));
        assert!(!is_eip1559_applicable(BSC));
        assert!(!is_eip1559_applicable(AURORA));
        assert!(!is_eip1559_applicable(ZKSYNC_ERA));
        assert!(!is_eip1559_applicable(FANTOM));
    }

    #[test]
    fn multicall_unknown_chain() {
        assert_eq!(multicall_address(777), Err(ChainError::UnsupportedChain(777)));
    }
}
