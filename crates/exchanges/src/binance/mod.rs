//! Binance Spot REST 클라이언트
//!
//! - `config`: base url, recvWindow, 타임아웃 설정
//! - `signer`: HMAC-SHA256 서명
//! - `validator`: 주문 타입/가격 조합 검증
//! - `request`: 엔드포인트별 정규 쿼리 문자열 생성
//! - `dispatcher`: HTTP 전송 (reqwest)
//! - `market`, `order`: 시세 조회와 계정/주문 API 구현

use std::env;
use std::sync::Arc;

use chrono::Utc;

use interface::{Credentials, ExchangeError};

pub mod config;
pub mod dispatcher;
pub mod market;
pub mod order;
pub mod request;
pub mod signer;
pub mod validator;

pub use config::{BinanceConfig, BASE_URL, DEFAULT_RECV_WINDOW};
pub use dispatcher::{Dispatcher, HttpDispatcher};
pub use signer::{generate_signature, SignedQuery};
pub use validator::{validate_order, ValidOrder};

/// Binance 통합 클라이언트 (시세, 주문, 계정)
#[derive(Clone)]
pub struct BinanceClient {
    pub(crate) dispatcher: Arc<dyn Dispatcher>,
    pub(crate) credentials: Option<Arc<Credentials>>,
    pub(crate) config: BinanceConfig,
}

impl BinanceClient {
    /// 공개 API만 사용하는 경우 (시세, 오더북)
    pub fn new(config: BinanceConfig) -> Result<Self, ExchangeError> {
        let dispatcher = HttpDispatcher::new(&config)?;
        Ok(Self::with_dispatcher(config, None, Arc::new(dispatcher)))
    }

    /// 인증이 필요한 API를 사용하는 경우.
    /// `Credentials` 또는 `(api_key, secret_key)` 쌍을 받는다.
    pub fn authenticated(
        config: BinanceConfig,
        credentials: impl Into<Credentials>,
    ) -> Result<Self, ExchangeError> {
        let dispatcher = HttpDispatcher::new(&config)?;
        Ok(Self::with_dispatcher(
            config,
            Some(credentials.into()),
            Arc::new(dispatcher),
        ))
    }

    /// 환경변수에서 설정과 API 키를 읽어 생성
    pub fn with_credentials() -> Result<Self, ExchangeError> {
        let config = BinanceConfig::from_env()?;
        let (api_key, api_secret) = get_api_credentials()?;
        Self::authenticated(config, (api_key, api_secret))
    }

    /// 전송 계층을 직접 주입 (테스트, 커스텀 transport)
    pub fn with_dispatcher(
        config: BinanceConfig,
        credentials: Option<Credentials>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            dispatcher,
            credentials: credentials.map(Arc::new),
            config,
        }
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub(crate) fn credentials(&self) -> Result<&Credentials, ExchangeError> {
        self.credentials
            .as_deref()
            .ok_or(ExchangeError::MissingCredentials)
    }
}

/// 타임스탬프 생성 (밀리초)
pub fn get_timestamp() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// 환경변수에서 API 키와 시크릿 가져오기
pub fn get_api_credentials() -> Result<(String, String), ExchangeError> {
    let api_key = env::var("BINANCE_API_KEY")
        .map_err(|e| ExchangeError::Config(format!("BINANCE_API_KEY not found: {}", e)))?;
    let api_secret = env::var("BINANCE_API_SECRET")
        .map_err(|e| ExchangeError::Config(format!("BINANCE_API_SECRET not found: {}", e)))?;
    Ok((api_key, api_secret))
}

/// 환경변수가 설정되어 있는지 확인
pub fn has_api_credentials() -> bool {
    env::var("BINANCE_API_KEY").is_ok() && env::var("BINANCE_API_SECRET").is_ok()
}
