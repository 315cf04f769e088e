use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};

use interface::{ExchangeError, OrderRequest, OrderSide};

use super::request::{
    account_query, new_order_query, open_orders_query, order_query, ACCOUNT_ENDPOINT,
    OPEN_ORDERS_ENDPOINT, ORDER_ENDPOINT, TEST_ORDER_ENDPOINT,
};
use super::signer::SignedQuery;
use super::validator::validate_order;
use super::{get_timestamp, BinanceClient};
use crate::{OrderExchange, PlaceOrderOptions};

impl BinanceClient {
    /// 정규 쿼리에 서명하고 API 키를 함께 돌려준다.
    fn sign_query(&self, canonical: String) -> Result<(SignedQuery, &str), ExchangeError> {
        let credentials = self.credentials()?;
        let signed = SignedQuery::sign(canonical, credentials.secret_key())?;
        Ok((signed, credentials.api_key()))
    }

    pub async fn buy_limit(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError> {
        let order = OrderRequest::limit(symbol, OrderSide::Buy, quantity, price);
        self.place_order(&order, PlaceOrderOptions::default()).await
    }

    pub async fn buy_market(&self, symbol: &str, quantity: Decimal) -> Result<String, ExchangeError> {
        let order = OrderRequest::market(symbol, OrderSide::Buy, quantity);
        self.place_order(&order, PlaceOrderOptions::default()).await
    }

    pub async fn sell_limit(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError> {
        let order = OrderRequest::limit(symbol, OrderSide::Sell, quantity, price);
        self.place_order(&order, PlaceOrderOptions::default()).await
    }

    pub async fn sell_market(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<String, ExchangeError> {
        let order = OrderRequest::market(symbol, OrderSide::Sell, quantity);
        self.place_order(&order, PlaceOrderOptions::default()).await
    }
}

#[async_trait]
impl OrderExchange for BinanceClient {
    async fn place_order(
        &self,
        order: &OrderRequest,
        options: PlaceOrderOptions,
    ) -> Result<String, ExchangeError> {
        // 검증 실패한 주문은 서명도 전송도 하지 않는다.
        let valid = validate_order(order)?;

        let endpoint = if options.test {
            TEST_ORDER_ENDPOINT
        } else {
            ORDER_ENDPOINT
        };

        let canonical = new_order_query(valid, self.config.recv_window, get_timestamp());
        info!("place_order query_string: {}", canonical);

        let (signed, api_key) = self.sign_query(canonical)?;
        self.dispatcher
            .post(endpoint, &signed.to_query_string(), api_key)
            .await
    }

    async fn order_status(
        &self,
        symbol: &str,
        order_id: Option<u64>,
    ) -> Result<String, ExchangeError> {
        let canonical = order_query(symbol, order_id, self.config.recv_window, get_timestamp())?;
        debug!("order_status query_string: {}", canonical);

        let (signed, api_key) = self.sign_query(canonical)?;
        self.dispatcher
            .get(ORDER_ENDPOINT, Some(&signed.to_query_string()), Some(api_key))
            .await
    }

    async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
    ) -> Result<String, ExchangeError> {
        let canonical = order_query(symbol, order_id, self.config.recv_window, get_timestamp())?;
        info!("cancel_order query_string: {}", canonical);

        let (signed, api_key) = self.sign_query(canonical)?;
        self.dispatcher
            .delete(ORDER_ENDPOINT, &signed.to_query_string(), api_key)
            .await
    }

    async fn open_orders(&self, symbol: &str) -> Result<String, ExchangeError> {
        let canonical = open_orders_query(symbol, self.config.recv_window, get_timestamp())?;
        debug!("open_orders query_string: {}", canonical);

        let (signed, api_key) = self.sign_query(canonical)?;
        self.dispatcher
            .get(
                OPEN_ORDERS_ENDPOINT,
                Some(&signed.to_query_string()),
                Some(api_key),
            )
            .await
    }

    async fn current_positions(&self) -> Result<String, ExchangeError> {
        let canonical = account_query(self.config.recv_window, get_timestamp());
        debug!("current_positions query_string: {}", canonical);

        let (signed, api_key) = self.sign_query(canonical)?;
        self.dispatcher
            .get(ACCOUNT_ENDPOINT, Some(&signed.to_query_string()), Some(api_key))
            .await
    }
}
