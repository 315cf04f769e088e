use async_trait::async_trait;

use interface::{ExchangeError, OrderRequest};

pub mod binance;

pub use binance::{BinanceClient, BinanceConfig};

/// 주문 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceOrderOptions {
    /// true면 거래소의 테스트 주문 엔드포인트로 보내 검증만 하고 체결하지 않는다.
    /// (Binance: /api/v3/order/test)
    pub test: bool,
}

/// 인증이 필요 없는 시세 조회. 응답 본문은 파싱하지 않고 그대로 돌려준다.
#[async_trait]
pub trait MarketDataExchange: Send + Sync {
    /// 24시간 티커 조회
    /// symbol: 거래쌍 (예: "ETHBTC")
    async fn latest_price(&self, symbol: &str) -> Result<String, ExchangeError>;

    /// 오더북 깊이 조회. limit이 없으면 거래소 기본값을 쓴다.
    async fn depth(&self, symbol: &str, limit: Option<u32>) -> Result<String, ExchangeError>;
}

/// 서명이 필요한 계정/주문 API.
#[async_trait]
pub trait OrderExchange: Send + Sync {
    async fn place_order(
        &self,
        order: &OrderRequest,
        options: PlaceOrderOptions,
    ) -> Result<String, ExchangeError>;

    async fn order_status(
        &self,
        symbol: &str,
        order_id: Option<u64>,
    ) -> Result<String, ExchangeError>;

    async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
    ) -> Result<String, ExchangeError>;

    async fn open_orders(&self, symbol: &str) -> Result<String, ExchangeError>;

    /// 계정 잔고(포지션) 조회
    async fn current_positions(&self) -> Result<String, ExchangeError>;
}
