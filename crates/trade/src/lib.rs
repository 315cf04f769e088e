pub mod command;
pub mod logger;

use std::env;
use std::path::Path;
use std::sync::Once;

/// 기본 `.env` 대신 읽을 파일 경로
pub const ENV_FILE_VAR: &str = "TRADE_ENV_FILE";

static LOAD_ENV: Once = Once::new();

/// BINANCE_API_KEY 등 자격 증명을 env 파일에서 읽는다.
/// `TRADE_ENV_FILE`이 있으면 그 파일을, 없으면 현재 디렉터리부터 `.env`를 찾는다.
/// 이미 설정된 환경변수는 덮어쓰지 않는다.
pub fn load_env() {
    LOAD_ENV.call_once(|| match env::var_os(ENV_FILE_VAR) {
        Some(path) => {
            load_env_file(Path::new(&path));
        }
        None => {
            dotenv::dotenv().ok();
        }
    });
}

/// 파일이 없거나 형식이 잘못되었으면 false
pub fn load_env_file(path: &Path) -> bool {
    dotenv::from_path(path).is_ok()
}

// 바이너리와 테스트 모두 라이브러리 로드 시점에 env 파일을 읽는다.
#[ctor::ctor]
fn setup() {
    load_env();
}
