use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use chrono::Local;
use color_eyre::eyre;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_PREFIX: &str = "trade";

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: Option<WorkerGuard>,
    _stderr: WorkerGuard,
}

/// Tracing 초기화
/// stderr 로깅을 항상 설정하고, `log_dir`이 주어지면 파일 로깅도 추가합니다.
/// stdout은 API 응답 본문 출력용이므로 로그를 쓰지 않습니다.
pub fn init_tracing(log_dir: Option<&Path>) -> eyre::Result<TracingGuards> {
    // 1) 파일 appender (선택)
    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let (file_writer, guard) = custom_daily_file_appender(dir, LOG_PREFIX)?;
            // 파일 로깅: INFO 레벨 이상만 기록
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // 2) stderr도 non-blocking
    let (stderr_writer, stderr_guard) = non_blocking(std::io::stderr());

    // 3) EnvFilter (RUST_LOG 없으면 info)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 4) 레이어 조립
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(stderr_writer).with_ansi(true))
        .try_init()?;

    Ok(TracingGuards {
        _file: file_guard,
        _stderr: stderr_guard,
    })
}

fn log_file_path(base_dir: &Path, prefix: &str) -> PathBuf {
    // 날짜 문자열 생성: 2025-11-29
    let date = Local::now().format("%Y-%m-%d").to_string();
    base_dir.join(format!("{prefix}.{date}.log"))
}

/// 날짜별 로그 파일 생성
/// `<base_dir>/trade.2025-11-29.log` 형식으로 파일을 생성합니다
fn custom_daily_file_appender(
    base_dir: &Path,
    prefix: &str,
) -> eyre::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(base_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(base_dir, prefix))?;

    Ok(non_blocking(file))
}
