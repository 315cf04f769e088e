use color_eyre::eyre;
use structopt::StructOpt;
use tracing::info;

use exchanges::{BinanceClient, BinanceConfig};
use trade::command::{self, Opt};
use trade::logger;

// lib.rs에서 자동으로 dotenv가 로드됨

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    let opt = Opt::from_args();

    // init logging (stdout은 응답 본문 출력용으로 남겨둔다)
    let _guards = logger::init_tracing(opt.log_dir.as_deref())?;

    let client = if opt.command.needs_credentials() {
        BinanceClient::with_credentials()?
    } else {
        BinanceClient::new(BinanceConfig::from_env()?)?
    };
    info!("base url: {}", client.config().base_url);

    let body = command::run(opt.command, &client).await?;
    println!("{}", body);

    Ok(())
}
