use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{info, warn};

use interface::ExchangeError;

use super::config::BinanceConfig;

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP 전송 계층. 호출 한 번에 요청 한 번, 재시도하지 않고 응답 본문을 그대로 돌려준다.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<String, ExchangeError>;

    /// body는 `application/x-www-form-urlencoded` 로 전송된다.
    async fn post(&self, path: &str, body: &str, api_key: &str) -> Result<String, ExchangeError>;

    async fn delete(&self, path: &str, query: &str, api_key: &str)
        -> Result<String, ExchangeError>;
}

/// 거래소 오류 응답 본문 (예: {"code":-2010,"msg":"Account has insufficient balance..."})
#[derive(Debug, Deserialize)]
struct BinanceErrorResponse {
    code: i64,
    msg: String,
}

/// reqwest 기반 Dispatcher
#[derive(Clone)]
pub struct HttpDispatcher {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDispatcher {
    pub fn new(config: &BinanceConfig) -> Result<Self, ExchangeError> {
        config.validate()?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) if !query.is_empty() => format!("{}{}?{}", self.base_url, path, query),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    async fn execute(
        &self,
        method: &str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, ExchangeError> {
        let response = request.send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        info!("{} {} -> {}", method, path, status);

        if status.is_success() {
            return Ok(response_text);
        }

        Err(classify_error(status.as_u16(), response_text))
    }
}

/// non-2xx 응답 분류. 거래소 오류 객체면 Api, 아니면 HttpStatus.
fn classify_error(status: u16, body: String) -> ExchangeError {
    match serde_json::from_str::<BinanceErrorResponse>(&body) {
        Ok(err) => {
            warn!(
                "Binance rejected request: status {}, code {}, msg {}",
                status, err.code, err.msg
            );
            ExchangeError::Api {
                status,
                code: err.code,
                msg: err.msg,
            }
        }
        Err(_) => {
            warn!(
                "Binance API HTTP error: status {}, response: {}",
                status,
                body.chars().take(200).collect::<String>()
            );
            ExchangeError::HttpStatus { status, body }
        }
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn get(
        &self,
        path: &str,
        query: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<String, ExchangeError> {
        let mut request = self.http.get(self.url(path, query));
        if let Some(api_key) = api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        self.execute("GET", path, request).await
    }

    async fn post(&self, path: &str, body: &str, api_key: &str) -> Result<String, ExchangeError> {
        let request = self
            .http
            .post(self.url(path, None))
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.to_string());
        self.execute("POST", path, request).await
    }

    async fn delete(
        &self,
        path: &str,
        query: &str,
        api_key: &str,
    ) -> Result<String, ExchangeError> {
        let request = self
            .http
            .delete(self.url(path, Some(query)))
            .header(API_KEY_HEADER, api_key);
        self.execute("DELETE", path, request).await
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use interface::ErrorKind;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn dispatcher_for(server: &MockServer) -> HttpDispatcher {
        HttpDispatcher::new(&BinanceConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/24hr"))
            .and(query_param("symbol", "ETHBTC"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"symbol":"ETHBTC","lastPrice":"0.0578"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server);
        let body = dispatcher
            .get("/api/v3/ticker/24hr", Some("symbol=ETHBTC"), None)
            .await
            .unwrap();

        assert_eq!(body, r#"{"symbol":"ETHBTC","lastPrice":"0.0578"}"#);
    }

    #[tokio::test]
    async fn test_post_sends_form_body_and_api_key() {
        let server = MockServer::start().await;
        let form = "symbol=ETHBTC&side=BUY&type=MARKET&quantity=1&recvWindow=5000&timestamp=1&signature=abc";
        Mock::given(method("POST"))
            .and(path("/api/v3/order"))
            .and(header(API_KEY_HEADER, "my-api-key"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(body_string(form))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server);
        let body = dispatcher
            .post("/api/v3/order", form, "my-api-key")
            .await
            .unwrap();
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn test_delete_sends_query_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v3/order"))
            .and(query_param("symbol", "ETHBTC"))
            .and(query_param("orderId", "7610385"))
            .and(query_param("signature", "deadbeef"))
            .and(header(API_KEY_HEADER, "my-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"CANCELED"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server);
        let body = dispatcher
            .delete(
                "/api/v3/order",
                "symbol=ETHBTC&orderId=7610385&timestamp=1&signature=deadbeef",
                "my-api-key",
            )
            .await
            .unwrap();
        assert_eq!(body, r#"{"status":"CANCELED"}"#);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some("symbol=ETHBTC&orderId=7610385&timestamp=1&signature=deadbeef")
        );
    }

    #[tokio::test]
    async fn test_exchange_rejection_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/order"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"code":-2010,"msg":"Account has insufficient balance for requested action."}"#,
            ))
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server);
        let err = dispatcher
            .post("/api/v3/order", "timestamp=1&signature=abc", "my-api-key")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        match err {
            ExchangeError::Api { status, code, msg } => {
                assert_eq!(status, 400);
                assert_eq!(code, -2010);
                assert_eq!(msg, "Account has insufficient balance for requested action.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_exchange_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server);
        let err = dispatcher
            .get("/api/v3/depth", Some("symbol=ETHBTC"), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(
            err,
            ExchangeError::HttpStatus { status: 502, ref body } if body == "<html>Bad Gateway</html>"
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let config = BinanceConfig::new(server.uri()).with_timeout(Duration::from_millis(100));
        let dispatcher = HttpDispatcher::new(&config).unwrap();
        let err = dispatcher
            .get("/api/v3/ticker/24hr", Some("symbol=ETHBTC"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ExchangeError::Http(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = BinanceConfig::new("api.binance.com");
        assert!(matches!(
            HttpDispatcher::new(&config),
            Err(ExchangeError::Config(_))
        ));
    }
}
