use rust_decimal::Decimal;

use interface::{OrderRequest, OrderType, ValidationError};

/// depth API가 허용하는 limit 값
pub const DEPTH_LIMITS: [u32; 8] = [5, 10, 20, 50, 100, 500, 1000, 5000];

/// 검증을 통과한 주문. 요청 빌더는 이 타입만 받는다.
#[derive(Debug, Clone, Copy)]
pub struct ValidOrder<'a> {
    order: &'a OrderRequest,
}

impl<'a> ValidOrder<'a> {
    pub fn order(&self) -> &'a OrderRequest {
        self.order
    }
}

/// 주문 타입과 가격 조합 검증. 통과하지 못한 주문은 요청으로 만들어지지 않는다.
/// - LIMIT: price 필수
/// - MARKET: price, timeInForce 불가
/// - STOP: 아직 미지원
pub fn validate_order(order: &OrderRequest) -> Result<ValidOrder<'_>, ValidationError> {
    validate_symbol(&order.symbol)?;

    if order.quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(
            order.quantity.to_string(),
        ));
    }

    match (order.order_type, order.price) {
        (OrderType::Stop, _) => {
            return Err(ValidationError::UnsupportedOrderType(OrderType::Stop))
        }
        (OrderType::Limit, None) => return Err(ValidationError::MissingPrice),
        (OrderType::Limit, Some(price)) if price <= Decimal::ZERO => {
            return Err(ValidationError::NonPositivePrice(price.to_string()))
        }
        (OrderType::Market, Some(_)) => return Err(ValidationError::UnexpectedPrice),
        (OrderType::Market, None) if order.time_in_force.is_some() => {
            return Err(ValidationError::UnexpectedTimeInForce)
        }
        _ => {}
    }

    Ok(ValidOrder { order })
}

/// 심볼은 쿼리에 인코딩 없이 그대로 들어가므로 ASCII 영숫자만 허용한다.
pub fn validate_symbol(symbol: &str) -> Result<(), ValidationError> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidSymbol(symbol.to_string()));
    }
    Ok(())
}

pub fn validate_depth_limit(limit: u32) -> Result<(), ValidationError> {
    if DEPTH_LIMITS.contains(&limit) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDepthLimit(limit))
    }
}
