use async_trait::async_trait;
use tracing::debug;

use interface::ExchangeError;

use super::request::{depth_query, latest_price_query, DEPTH_ENDPOINT, TICKER_24HR_ENDPOINT};
use super::BinanceClient;
use crate::MarketDataExchange;

// 시세 API는 서명과 API 키 헤더 없이 호출한다.
#[async_trait]
impl MarketDataExchange for BinanceClient {
    async fn latest_price(&self, symbol: &str) -> Result<String, ExchangeError> {
        let query = latest_price_query(symbol)?;
        debug!("latest_price query_string: {}", query);

        self.dispatcher
            .get(TICKER_24HR_ENDPOINT, Some(&query), None)
            .await
    }

    async fn depth(&self, symbol: &str, limit: Option<u32>) -> Result<String, ExchangeError> {
        let query = depth_query(symbol, limit)?;
        debug!("depth query_string: {}", query);

        self.dispatcher.get(DEPTH_ENDPOINT, Some(&query), None).await
    }
}
