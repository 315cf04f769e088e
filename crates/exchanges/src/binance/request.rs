//! 엔드포인트별 정규 쿼리 문자열 생성.
//!
//! 파라미터 순서는 거래소 서명 검증과 맞아야 하므로 각 함수에 고정되어 있다.
//! 값은 퍼센트 인코딩하지 않는다 (심볼은 검증기에서 영숫자로 제한).

use interface::{OrderType, TimeInForce, ValidationError};

use super::validator::{validate_depth_limit, validate_symbol, ValidOrder};

pub const TICKER_24HR_ENDPOINT: &str = "/api/v3/ticker/24hr";
pub const DEPTH_ENDPOINT: &str = "/api/v3/depth";
pub const ORDER_ENDPOINT: &str = "/api/v3/order";
pub const TEST_ORDER_ENDPOINT: &str = "/api/v3/order/test";
pub const OPEN_ORDERS_ENDPOINT: &str = "/api/v3/openOrders";
pub const ACCOUNT_ENDPOINT: &str = "/api/v3/account";

/// 삽입 순서를 유지하는 `key=value` 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn push_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// 서명 대상 파라미터는 항상 recvWindow, timestamp 순으로 끝난다.
    pub fn with_timing(self, recv_window: u64, timestamp: u64) -> Self {
        self.push("recvWindow", recv_window)
            .push("timestamp", timestamp)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(k, _)| *k)
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// GET /api/v3/ticker/24hr (서명 없음)
pub fn latest_price_query(symbol: &str) -> Result<String, ValidationError> {
    validate_symbol(symbol)?;
    Ok(QueryParams::new().push("symbol", symbol).to_query_string())
}

/// GET /api/v3/depth (서명 없음)
pub fn depth_query(symbol: &str, limit: Option<u32>) -> Result<String, ValidationError> {
    validate_symbol(symbol)?;
    if let Some(limit) = limit {
        validate_depth_limit(limit)?;
    }
    Ok(QueryParams::new()
        .push("symbol", symbol)
        .push_opt("limit", limit)
        .to_query_string())
}

/// POST /api/v3/order
/// symbol, side, type, timeInForce, quantity, price, recvWindow, timestamp
/// MARKET 주문에는 timeInForce와 price가 들어가지 않는다.
pub fn new_order_params(order: ValidOrder<'_>, recv_window: u64, timestamp: u64) -> QueryParams {
    let order = order.order();
    let (time_in_force, price) = match order.order_type {
        OrderType::Limit => (
            Some(order.time_in_force.unwrap_or(TimeInForce::Gtc)),
            order.price,
        ),
        _ => (None, None),
    };

    QueryParams::new()
        .push("symbol", &order.symbol)
        .push("side", order.side)
        .push("type", order.order_type)
        .push_opt("timeInForce", time_in_force)
        .push("quantity", order.quantity)
        .push_opt("price", price)
        .with_timing(recv_window, timestamp)
}

pub fn new_order_query(order: ValidOrder<'_>, recv_window: u64, timestamp: u64) -> String {
    new_order_params(order, recv_window, timestamp).to_query_string()
}

/// GET/DELETE /api/v3/order
/// symbol, orderId, recvWindow, timestamp
pub fn order_query(
    symbol: &str,
    order_id: Option<u64>,
    recv_window: u64,
    timestamp: u64,
) -> Result<String, ValidationError> {
    validate_symbol(symbol)?;
    Ok(QueryParams::new()
        .push("symbol", symbol)
        .push_opt("orderId", order_id)
        .with_timing(recv_window, timestamp)
        .to_query_string())
}

/// GET /api/v3/openOrders
pub fn open_orders_query(
    symbol: &str,
    recv_window: u64,
    timestamp: u64,
) -> Result<String, ValidationError> {
    validate_symbol(symbol)?;
    Ok(QueryParams::new()
        .push("symbol", symbol)
        .with_timing(recv_window, timestamp)
        .to_query_string())
}

/// GET /api/v3/account
pub fn account_query(recv_window: u64, timestamp: u64) -> String {
    QueryParams::new()
        .with_timing(recv_window, timestamp)
        .to_query_string()
}
