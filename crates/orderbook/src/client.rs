use crate::{
    error::{OrderbookError, Result},
    types::{
        CountResponse, OrderDetail, OrderEvent, OrderRecord, OrderStatus, OrdersQuery,
        SubmitOrderRequest, SubmitOrderResponse,
    },
};
use alloy::primitives::{Address, B256};
use oneinch_types::{LimitOrder, OrderData};
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

/// Production base URL of the 1inch developer portal.
const API_BASE_URL: &str = "https://api.1inch.dev/";

/// Client for the 1inch limit-order-book REST service.
///
/// Orders are submitted and listed under the v4 routes; counts and fill
/// events still live under v3.
#[derive(Debug, Clone)]
pub struct OrderbookClient {
    /// Base URL of the service.
    url: reqwest::Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
    /// Bearer token for the developer portal.
    auth_key: Option<String>,
    /// Chain the client reads and writes orders for.
    chain_id: u64,
}

impl OrderbookClient {
    /// Create a client against the production service.
    pub fn new(chain_id: u64, auth_key: impl Into<String>) -> Result<Self> {
        let url = reqwest::Url::parse(API_BASE_URL)?;
        Ok(Self {
            url,
            client: reqwest::Client::new(),
            auth_key: Some(auth_key.into()),
            chain_id,
        })
    }

    /// Create a client against a custom base URL, without auth.
    pub fn new_with_url(url: reqwest::Url, chain_id: u64) -> Self {
        Self { url, client: reqwest::Client::new(), auth_key: None, chain_id }
    }

    /// Use a preconfigured [`reqwest::Client`].
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The chain this client operates on.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn v4(&self, suffix: &str) -> String {
        format!("orderbook/v4.0/{}{}", self.chain_id, suffix)
    }

    fn v3(&self, suffix: &str) -> String {
        format!("orderbook/v3.0/{}{}", self.chain_id, suffix)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn get_inner<T>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self
            .url
            .join(path)
            .inspect_err(|e| warn!(%e, "Failed to join URL. Not querying the order book."))?;

        self.authorize(self.client.get(url))
            .query(query)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach the order-book service"))?
            .error_for_status()?
            .json::<T>()
            .await
            .inspect_err(|e| warn!(%e, "Failed to parse order-book response"))
            .map_err(Into::into)
    }

    /// Submit a signed order to the book for this client's chain.
    ///
    /// The service rejects orders that restrict fills, so the traits
    /// are checked locally first.
    #[instrument(skip_all, fields(order_hash = %order.order_hash))]
    pub async fn submit_order(&self, order: &LimitOrder) -> Result<SubmitOrderResponse> {
        let traits = oneinch_types::MakerTraits::from_word(order.order.makerTraits);
        if !traits.allow_partial_fills() || !traits.allow_multiple_fills() {
            return Err(OrderbookError::RestrictedFills);
        }

        let body = SubmitOrderRequest {
            order_hash: hex::encode_prefixed(order.order_hash),
            signature: hex::encode_prefixed(order.signature.as_bytes()),
            data: OrderData::from_order(&order.order, order.extension.clone()),
        };

        let url = self
            .url
            .join(&self.v4(""))
            .inspect_err(|e| warn!(%e, "Failed to join URL. Not submitting the order."))?;

        self.authorize(self.client.post(url))
            .json(&body)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach the order-book service"))?
            .error_for_status()?
            .json::<SubmitOrderResponse>()
            .await
            .inspect_err(|e| warn!(%e, "Failed to parse order-book response"))
            .map_err(Into::into)
    }

    /// List orders created by `creator`.
    #[instrument(skip_all, fields(%creator))]
    pub async fn orders_by_creator(
        &self,
        creator: Address,
        query: &OrdersQuery,
    ) -> Result<Vec<OrderRecord>> {
        let path = self.v4(&format!("/address/{}", hex::encode_prefixed(creator)));
        self.get_inner(&path, &query.to_pairs()).await
    }

    /// Look up a single order by its EIP-712 hash.
    #[instrument(skip_all, fields(%order_hash))]
    pub async fn order_by_hash(&self, order_hash: B256) -> Result<OrderDetail> {
        let path = self.v4(&format!("/order/{}", hex::encode_prefixed(order_hash)));
        self.get_inner(&path, &[]).await
    }

    /// List every order on the book.
    #[instrument(skip_all)]
    pub async fn all_orders(&self, query: &OrdersQuery) -> Result<Vec<OrderRecord>> {
        self.get_inner(&self.v3("/all"), &query.to_pairs()).await
    }

    /// Count orders in the given statuses.
    #[instrument(skip_all)]
    pub async fn orders_count(&self, statuses: &[OrderStatus]) -> Result<u64> {
        let joined = statuses.iter().map(|s| s.code().to_string()).collect::<Vec<_>>().join(",");
        let query = [("statuses", joined)];
        let response: CountResponse = self.get_inner(&self.v3("/count"), &query).await?;
        Ok(response.count)
    }

    /// List recent fill and cancellation events.
    #[instrument(skip_all)]
    pub async fn events(&self, limit: u32) -> Result<Vec<OrderEvent>> {
        let query = [("limit", limit.to_string())];
        self.get_inner(&self.v3("/events"), &query).await
    }

    /// List the events for one order.
    #[instrument(skip_all, fields(%order_hash))]
    pub async fn order_events(&self, order_hash: B256) -> Result<Vec<OrderEvent>> {
        let path = self.v3(&format!("/events/{}", hex::encode_prefixed(order_hash)));
        self.get_inner(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::{address, U256},
        signers::local::PrivateKeySigner,
    };
    use oneinch_types::{create_order, CreateOrderParams, MakerTraitsParams};

    fn client() -> OrderbookClient {
        OrderbookClient::new_with_url(
            reqwest::Url::parse("http://localhost:8080/").unwrap(),
            1,
        )
    }

    fn signed_order(params: MakerTraitsParams) -> LimitOrder {
        let signer = PrivateKeySigner::random();
        let params = CreateOrderParams {
            chain_id: 1,
            maker: signer.address(),
            maker_asset: address!("0xe9e7cea3dedca5984780bafc599bd69add087d56"),
            taker_asset: address!("0x111111111117dc0aa78b770fa6a738034120c302"),
            making_amount: U256::from(1_000_000u64),
            taking_amount: U256::from(2_000_000u64),
            receiver: None,
            maker_traits: params,
            extension: Default::default(),
            salt: Default::default(),
        };
        create_order(&params, &signer).unwrap()
    }

    #[test]
    fn routes_are_versioned_per_endpoint() {
        let client = client();
        assert_eq!(client.v4(""), "orderbook/v4.0/1");
        assert_eq!(client.v4("/order/0xabc"), "orderbook/v4.0/1/order/0xabc");
        assert_eq!(client.v3("/count"), "orderbook/v3.0/1/count");
    }

    #[tokio::test]
    async fn restricted_fill_orders_are_rejected_locally() {
        let order = signed_order(MakerTraitsParams {
            allow_partial_fills: false,
            allow_multiple_fills: false,
            ..Default::default()
        });
        let err = client().submit_order(&order).await.unwrap_err();
        assert!(matches!(err, OrderbookError::RestrictedFills));
    }

    #[test]
    fn submission_body_matches_the_wire_format() {
        let order = signed_order(MakerTraitsParams::default());
        let body = SubmitOrderRequest {
            order_hash: hex::encode_prefixed(order.order_hash),
            signature: hex::encode_prefixed(order.signature.as_bytes()),
            data: OrderData::from_order(&order.order, order.extension.clone()),
        };
        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
        assert_eq!(json["orderHash"], hex::encode_prefixed(order.order_hash));
        assert_eq!(json["data"]["makingAmount"], "1000000");
        assert_eq!(json["data"]["extension"], "0x");
        assert_eq!(json["signature"].as_str().unwrap().len(), 2 + 130);
    }
}
