#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]
use alloy::primitives::Address;

mod router {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        interface AggregationRouterV6 {
            /// A limit order as stored on the wire and hashed for EIP-712
            /// signing. Field order here is the hashing order.
            struct Order {
                uint256 salt;
                address maker;
                address receiver;
                address makerAsset;
                address takerAsset;
                uint256 makingAmount;
                uint256 takingAmount;
                uint256 makerTraits;
            }

            /// Fill a signed order with no extension or taker interaction.
            /// `r` and `vs` are the EIP-2098 compact signature halves.
            function fillOrder(Order calldata order, bytes32 r, bytes32 vs, uint256 amount, uint256 takerTraits)
                external
                payable
                returns (uint256 makingAmount, uint256 takingAmount, bytes32 orderHash);

            /// Fill a signed order, passing extension and interaction data
            /// through `args` as described by `takerTraits`.
            function fillOrderArgs(
                Order calldata order,
                bytes32 r,
                bytes32 vs,
                uint256 amount,
                uint256 takerTraits,
                bytes calldata args
            ) external payable returns (uint256 makingAmount, uint256 takingAmount, bytes32 orderHash);
        }
    );

    impl Copy for AggregationRouterV6::Order {}

    impl AggregationRouterV6::Order {
        /// The address that receives the taker asset. Defaults to the maker
        /// when no explicit receiver was set.
        pub fn effective_receiver(&self) -> super::Address {
            if self.receiver.is_zero() {
                self.maker
            } else {
                self.receiver
            }
        }
    }
}
pub use router::AggregationRouterV6;

mod erc20 {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        interface IERC20 {
            function name() external view returns (string);
            function version() external view returns (string);
            function nonces(address owner) external view returns (uint256);
            function approve(address spender, uint256 amount) external returns (bool);
            function allowance(address owner, address spender) external view returns (uint256);
        }
    );
}
pub use erc20::IERC20;

mod erc2612 {
    alloy::sol!(
        /// The EIP-2612 `Permit` typed-data struct.
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct Permit {
            address owner;
            address spender;
            uint256 value;
            uint256 nonce;
            uint256 deadline;
        }
    );
}
pub use erc2612::Permit as Erc2612Permit;

mod dai {
    alloy::sol!(
        /// DAI's non-standard permit struct. Approval is all-or-nothing via
        /// the `allowed` flag rather than a value.
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct Permit {
            address holder;
            address spender;
            uint256 nonce;
            uint256 expiry;
            bool allowed;
        }
    );
}
pub use dai::Permit as DaiPermit;

mod permit2 {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        interface Permit2 {
            /// A token and amount pair for a signature-based transfer.
            struct TokenPermissions {
                address token;
                uint256 amount;
            }

            /// The signed message for `permitTransferFrom`.
            struct PermitTransferFrom {
                TokenPermissions permitted;
                address spender;
                uint256 nonce;
                uint256 deadline;
            }

            /// The permitted allowance for a single token.
            struct PermitDetails {
                address token;
                uint160 amount;
                uint48 expiration;
                uint48 nonce;
            }

            /// The signed message for `permit`, granting `spender` an
            /// allowance managed by the Permit2 contract.
            struct PermitSingle {
                PermitDetails details;
                address spender;
                uint256 sigDeadline;
            }
        }
    );

    impl Copy for Permit2::TokenPermissions {}
    impl Copy for Permit2::PermitTransferFrom {}
    impl Copy for Permit2::PermitDetails {}
    impl Copy for Permit2::PermitSingle {}
}
pub use permit2::Permit2;

mod multicall {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        interface MulticallV2 {
            struct Call {
                address to;
                bytes data;
            }

            /// Execute the calls in order, stopping at the first failure.
            /// `lastSuccessIndex` is the index of the last call that ran.
            function multicall(Call[] calldata calls)
                external
                view
                returns (bytes[] memory results, uint256 lastSuccessIndex);
        }
    );
}
pub use multicall::MulticallV2;

mod series_nonce_manager {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        interface SeriesNonceManager {
            function nonce(uint256 series, address makerAddress) external view returns (uint256);
        }
    );
}
pub use series_nonce_manager::SeriesNonceManager;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_defaults_to_the_maker() {
        use alloy::primitives::U256;
        let mut order = AggregationRouterV6::Order {
            salt: U256::ZERO,
            maker: Address::repeat_byte(0x11),
            receiver: Address::ZERO,
            makerAsset: Address::repeat_byte(0x22),
            takerAsset: Address::repeat_byte(0x33),
            makingAmount: U256::from(1u64),
            takingAmount: U256::from(1u64),
            makerTraits: U256::ZERO,
        };
        assert_eq!(order.effective_receiver(), order.maker);

        order.receiver = Address::repeat_byte(0x44);
        assert_eq!(order.effective_receiver(), order.receiver);
    }
}
