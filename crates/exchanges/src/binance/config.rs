use std::env;
use std::time::Duration;

use interface::ExchangeError;

pub const BASE_URL: &str = "https://api.binance.com";

/// 기본 recvWindow (밀리초). 요청 timestamp 이후 거래소가 요청을 받아주는 허용 범위.
pub const DEFAULT_RECV_WINDOW: u64 = 6_000_000;

/// HTTP 요청 한 건에 적용하는 로컬 타임아웃
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 클라이언트 생성 시 주입하는 설정. 생성 후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceConfig {
    pub base_url: String,
    pub recv_window: u64,
    pub timeout: Duration,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BinanceConfig {
    /// 테스트넷이나 목 서버를 가리킬 때 사용
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 환경변수에서 설정 읽기
    /// - BINANCE_BASE_URL (기본값: https://api.binance.com)
    /// - BINANCE_RECV_WINDOW (밀리초)
    /// - BINANCE_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ExchangeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ExchangeError> {
        let mut config = match lookup("BINANCE_BASE_URL") {
            Some(url) => Self::new(url),
            None => Self::default(),
        };

        if let Some(raw) = lookup("BINANCE_RECV_WINDOW") {
            config.recv_window = raw.trim().parse().map_err(|e| {
                ExchangeError::Config(format!("invalid BINANCE_RECV_WINDOW {:?}: {}", raw, e))
            })?;
        }

        if let Some(raw) = lookup("BINANCE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                ExchangeError::Config(format!("invalid BINANCE_TIMEOUT_SECS {:?}: {}", raw, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ExchangeError::Config(format!(
                "base url must be http(s): {}",
                self.base_url
            )));
        }
        if self.recv_window == 0 {
            return Err(ExchangeError::Config(
                "recvWindow must be greater than zero".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ExchangeError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
