use thiserror::Error;

use crate::types::OrderType;

/// 네트워크로 나가기 전에 걸러지는 입력 오류. 호출자가 입력을 고치면 복구 가능하다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing price for LIMIT order")]
    MissingPrice,
    #[error("unexpected price for MARKET order")]
    UnexpectedPrice,
    #[error("unexpected timeInForce for MARKET order")]
    UnexpectedTimeInForce,
    #[error("{0} orders are not yet supported")]
    UnsupportedOrderType(OrderType),
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(String),
    #[error("price must be positive, got {0}")]
    NonPositivePrice(String),
    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),
    #[error("invalid depth limit {0}")]
    InvalidDepthLimit(u32),
    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// 오류 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 주문/파라미터 검증 실패 (네트워크 호출 전)
    Validation,
    /// 서명 실패 (치명적)
    Signing,
    /// 연결 실패, 타임아웃, 거래소 오류 본문이 없는 non-2xx
    Transport,
    /// 거래소가 정상 서명된 요청을 거절함 (잔고 부족 등)
    Protocol,
    /// 자격 증명/설정 누락
    Config,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {status}, response: {}", truncate(.body))]
    HttpStatus { status: u16, body: String },
    #[error("exchange rejected request (status {status}, code {code}): {msg}")]
    Api { status: u16, code: i64, msg: String },
    #[error("API credentials not set")]
    MissingCredentials,
    #[error("config error: {0}")]
    Config(String),
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExchangeError::Validation(_) => ErrorKind::Validation,
            ExchangeError::Signing(_) => ErrorKind::Signing,
            ExchangeError::Http(_) | ExchangeError::HttpStatus { .. } => ErrorKind::Transport,
            ExchangeError::Api { .. } => ErrorKind::Protocol,
            ExchangeError::MissingCredentials | ExchangeError::Config(_) => ErrorKind::Config,
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            ExchangeError::from(ValidationError::MissingPrice).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ExchangeError::Signing("empty secret".into()).kind(),
            ErrorKind::Signing
        );
        assert_eq!(
            ExchangeError::HttpStatus {
                status: 502,
                body: String::new()
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ExchangeError::Api {
                status: 400,
                code: -2010,
                msg: "Account has insufficient balance for requested action.".into()
            }
            .kind(),
            ErrorKind::Protocol
        );
        assert_eq!(ExchangeError::MissingCredentials.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingPrice.to_string(),
            "missing price for LIMIT order"
        );
        assert_eq!(
            ValidationError::UnexpectedPrice.to_string(),
            "unexpected price for MARKET order"
        );
        assert_eq!(
            ValidationError::UnsupportedOrderType(OrderType::Stop).to_string(),
            "STOP orders are not yet supported"
        );
    }

    #[test]
    fn test_http_status_display_truncates_body() {
        let err = ExchangeError::HttpStatus {
            status: 502,
            body: "x".repeat(500),
        };
        let text = err.to_string();
        assert!(text.starts_with("http status 502, response: "));
        assert_eq!(text.len(), "http status 502, response: ".len() + 200);
    }
}
