use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use oneinch_types::OrderData;
use serde::{Deserialize, Serialize};

/// Body of an order submission: the typed-data hash, the maker's
/// signature over it, and the order fields in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    /// EIP-712 hash of the order.
    pub order_hash: String,
    /// 65-byte maker signature, hex encoded.
    pub signature: String,
    /// The order fields.
    pub data: OrderData,
}

/// Acknowledgement returned for a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrderResponse {
    /// Whether the service accepted the order.
    pub success: bool,
}

/// Sort key for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Most recently created first.
    CreateDateTime,
    /// By taker rate.
    TakerRate,
    /// By maker rate.
    MakerRate,
    /// By maker amount.
    MakerAmount,
    /// By taker amount.
    TakerAmount,
}

impl SortBy {
    /// The query-string value for this sort key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateDateTime => "createDateTime",
            Self::TakerRate => "takerRate",
            Self::MakerRate => "makerRate",
            Self::MakerAmount => "makerAmount",
            Self::TakerAmount => "takerAmount",
        }
    }
}

/// Validity filter for order listings. The service tracks three
/// buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Fillable orders.
    Valid,
    /// Orders that currently fail balance or allowance checks.
    TemporarilyInvalid,
    /// Expired or cancelled orders.
    Invalid,
}

impl OrderStatus {
    /// The numeric code the service uses for this status.
    pub const fn code(self) -> u8 {
        match self {
            Self::Valid => 1,
            Self::TemporarilyInvalid => 2,
            Self::Invalid => 3,
        }
    }
}

/// Filters for the order-listing endpoints. Unset fields are left out
/// of the query string and take the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdersQuery {
    /// Pagination step, 1-based.
    pub page: Option<u32>,
    /// Orders per page, at most 500.
    pub limit: Option<u32>,
    /// Keep only orders in these statuses.
    pub statuses: Option<Vec<OrderStatus>>,
    /// Sort key.
    pub sort_by: Option<SortBy>,
    /// Keep only orders selling into this asset.
    pub taker_asset: Option<Address>,
    /// Keep only orders selling this asset.
    pub maker_asset: Option<Address>,
}

impl OrdersQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(statuses) = &self.statuses {
            let joined =
                statuses.iter().map(|s| s.code().to_string()).collect::<Vec<_>>().join(",");
            pairs.push(("statuses", joined));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_str().to_owned()));
        }
        if let Some(taker_asset) = self.taker_asset {
            pairs.push(("takerAsset", taker_asset.to_string().to_lowercase()));
        }
        if let Some(maker_asset) = self.maker_asset {
            pairs.push(("makerAsset", maker_asset.to_string().to_lowercase()));
        }
        pairs
    }
}

/// An order as listed by the creator-address and all-orders endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// The maker's signature, hex encoded.
    pub signature: String,
    /// EIP-712 hash of the order.
    pub order_hash: String,
    /// When the order was submitted.
    pub create_date_time: DateTime<Utc>,
    /// Unfilled part of the making amount, decimal string.
    pub remaining_maker_amount: String,
    /// The maker's current token balance, decimal string.
    pub maker_balance: String,
    /// The maker's current router allowance, decimal string.
    pub maker_allowance: String,
    /// The order fields.
    pub data: OrderData,
    /// Price expressed as taking per making.
    pub maker_rate: String,
    /// Price expressed as making per taking.
    pub taker_rate: String,
    /// Whether the maker is a contract account.
    pub is_maker_contract: bool,
    /// Why the order is not fillable, when it is not.
    #[serde(default)]
    pub order_invalid_reason: Option<serde_json::Value>,
}

/// Full detail for a single order looked up by hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    /// Service-assigned row id.
    pub id: i64,
    /// EIP-712 hash of the order.
    pub order_hash: String,
    /// When the order was submitted.
    pub create_date_time: DateTime<Utc>,
    /// When the order last changed state.
    pub last_changed_date_time: DateTime<Utc>,
    /// Token the maker buys.
    pub taker_asset: String,
    /// Token the maker sells.
    pub maker_asset: String,
    /// The maker address.
    pub order_maker: String,
    /// Numeric status bucket.
    pub order_status: i64,
    /// Total making amount, decimal string.
    pub maker_amount: String,
    /// Unfilled part of the making amount, decimal string.
    pub remaining_maker_amount: String,
    /// The maker's current token balance, decimal string.
    pub maker_balance: String,
    /// The maker's current router allowance, decimal string.
    pub maker_allowance: String,
    /// Total taking amount, decimal string.
    pub taker_amount: String,
    /// The order fields.
    pub data: OrderData,
    /// Price expressed as taking per making.
    pub maker_rate: String,
    /// Price expressed as making per taking.
    pub taker_rate: String,
    /// Why the order is not fillable, when it is not.
    #[serde(default)]
    pub order_invalid_reason: Option<serde_json::Value>,
    /// Whether the maker is a contract account.
    pub is_maker_contract: bool,
}

/// Total number of orders matching a status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    /// The count.
    pub count: u64,
}

/// A fill or cancellation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    /// Service-assigned row id.
    pub id: i64,
    /// Chain id the event happened on.
    pub network: u64,
    /// Log identifier within the block.
    pub log_id: String,
    /// Protocol version the order was created under.
    pub version: u32,
    /// Event kind, `"fill"` or `"cancel"`.
    pub action: String,
    /// EIP-712 hash of the order.
    pub order_hash: String,
    /// Who filled the order.
    pub taker: String,
    /// Making amount still unfilled after the event, decimal string.
    pub remaining_maker_amount: String,
    /// Transaction the event was emitted in.
    pub transaction_hash: String,
    /// Block the event was emitted in.
    pub block_number: u64,
    /// When the service recorded the event.
    pub create_date_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn query_pairs_skip_unset_fields() {
        assert!(OrdersQuery::default().to_pairs().is_empty());

        let query = OrdersQuery {
            page: Some(2),
            limit: Some(100),
            statuses: Some(vec![OrderStatus::Valid, OrderStatus::TemporarilyInvalid]),
            sort_by: Some(SortBy::CreateDateTime),
            taker_asset: Some(address!("0x111111111117dc0aa78b770fa6a738034120c302")),
            maker_asset: None,
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "2".to_owned()),
                ("limit", "100".to_owned()),
                ("statuses", "1,2".to_owned()),
                ("sortBy", "createDateTime".to_owned()),
                ("takerAsset", "0x111111111117dc0aa78b770fa6a738034120c302".to_owned()),
            ]
        );
    }

    #[test]
    fn order_record_deserializes_service_payloads() {
        let raw = r#"{
            "signature": "0x1234",
            "orderHash": "0xabcd",
            "createDateTime": "2024-04-18T15:30:00.000Z",
            "remainingMakerAmount": "1000000000000000000",
            "makerBalance": "2000000000000000000",
            "makerAllowance": "3000000000000000000",
            "data": {
                "salt": "618054093254",
                "maker": "0xfb3c7eb936caa12b5a884d612393969a557d4307",
                "receiver": "0x0000000000000000000000000000000000000000",
                "makerAsset": "0xe9e7cea3dedca5984780bafc599bd69add087d56",
                "takerAsset": "0x111111111117dc0aa78b770fa6a738034120c302",
                "makingAmount": "1000000000000000000",
                "takingAmount": "1000000000000000000",
                "makerTraits": "0x0000000000000000000000000000000000000000000000000000000000000000",
                "extension": "0x"
            },
            "makerRate": "1.0",
            "takerRate": "1.0",
            "isMakerContract": false,
            "orderInvalidReason": null
        }"#;
        let record: OrderRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.order_hash, "0xabcd");
        assert_eq!(
            record.data.maker,
            address!("0xfb3c7eb936caa12b5a884d612393969a557d4307")
        );
        assert!(record.order_invalid_reason.is_none());
    }

    #[test]
    fn event_deserializes_service_payloads() {
        let raw = r#"{
            "id": 42,
            "network": 1,
            "logId": "log_10",
            "version": 4,
            "action": "fill",
            "orderHash": "0xabcd",
            "taker": "0x1111111254eeb25477b68fb85ed929f73a960582",
            "remainingMakerAmount": "0",
            "transactionHash": "0xdead",
            "blockNumber": 19000000,
            "createDateTime": "2024-04-18T15:30:00.000Z"
        }"#;
        let event: OrderEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.action, "fill");
        assert_eq!(event.block_number, 19000000);
    }
}
