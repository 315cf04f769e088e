use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use interface::ExchangeError;

type HmacSha256 = Hmac<Sha256>;

/// Binance API 서명 생성
/// query_string: 서명할 정규 쿼리 문자열 (예: "symbol=BTCUSDT&recvWindow=5000&timestamp=1234567890")
/// api_secret: API Secret Key
///
/// 결과는 HMAC-SHA256 digest의 소문자 hex (항상 64자).
pub fn generate_signature(query_string: &str, api_secret: &str) -> Result<String, ExchangeError> {
    if api_secret.is_empty() {
        return Err(ExchangeError::Signing("secret key is empty".to_string()));
    }

    let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .map_err(|e| ExchangeError::Signing(format!("failed to key HMAC-SHA256: {}", e)))?;
    mac.update(query_string.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// 서명된 쿼리. `canonical`은 실제로 서명한 바이트열 그대로이고,
/// 전송 형태는 `canonical&signature=<hex>` 이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    canonical: String,
    signature: String,
}

impl SignedQuery {
    pub fn sign(canonical: String, api_secret: &str) -> Result<Self, ExchangeError> {
        let signature = generate_signature(&canonical, api_secret)?;
        Ok(Self {
            canonical,
            signature,
        })
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// 네트워크로 보내는 최종 문자열
    pub fn to_query_string(&self) -> String {
        format!("{}&signature={}", self.canonical, self.signature)
    }
}

impl fmt::Display for SignedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}&signature={}", self.canonical, self.signature)
    }
}
