use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// 거래소 API 자격 증명. 생성 후 변경되지 않는다.
///
/// `Debug` 출력에 시크릿은 포함되지 않는다.
pub struct Credentials {
    api_key: String,
    secret_key: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// 서명할 때만 사용한다. 로그나 오류 메시지에 넣지 말 것.
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl<K, S> From<(K, S)> for Credentials
where
    K: Into<String>,
    S: Into<String>,
{
    fn from((api_key, secret_key): (K, S)) -> Self {
        Self::new(api_key, secret_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
    const SECRET_KEY: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

    #[test]
    fn test_accessors() {
        let credentials = Credentials::new(API_KEY, SECRET_KEY);
        assert_eq!(credentials.api_key(), API_KEY);
        assert_eq!(credentials.secret_key(), SECRET_KEY);
    }

    #[test]
    fn test_from_key_pair() {
        let credentials: Credentials = (API_KEY.to_string(), SECRET_KEY).into();
        assert_eq!(credentials.api_key(), API_KEY);
        assert_eq!(credentials.secret_key(), SECRET_KEY);
    }

    #[test]
    fn test_debug_hides_secret() {
        let credentials = Credentials::new(API_KEY, SECRET_KEY);
        let printed = format!("{:?}", credentials);
        assert!(printed.contains(API_KEY));
        assert!(!printed.contains(SECRET_KEY));
        assert!(printed.contains("[REDACTED]"));
    }
}
