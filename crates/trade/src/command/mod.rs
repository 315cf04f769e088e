use std::path::PathBuf;

use color_eyre::eyre;
use rust_decimal::Decimal;
use structopt::StructOpt;
use tracing::info;

use exchanges::{MarketDataExchange, OrderExchange, PlaceOrderOptions};
use interface::{OrderRequest, OrderSide, OrderType, TimeInForce};

#[derive(Debug, StructOpt)]
#[structopt(name = "trade", about = "Binance REST 시세 조회 및 주문 CLI")]
pub struct Opt {
    /// 로그 파일 디렉터리. 지정하면 <dir>/trade.<날짜>.log 에도 기록한다.
    #[structopt(long, parse(from_os_str))]
    pub log_dir: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq, StructOpt)]
pub enum Command {
    /// 24시간 티커 조회
    Price { symbol: String },
    /// 오더북 조회
    Depth {
        symbol: String,
        /// 5, 10, 20, 50, 100, 500, 1000, 5000
        #[structopt(long)]
        limit: Option<u32>,
    },
    /// 매수 주문
    Buy(OrderArgs),
    /// 매도 주문
    Sell(OrderArgs),
    /// 주문 상태 조회
    Status {
        symbol: String,
        #[structopt(long)]
        order_id: Option<u64>,
    },
    /// 주문 취소
    Cancel {
        symbol: String,
        #[structopt(long)]
        order_id: Option<u64>,
    },
    /// 미체결 주문 목록
    OpenOrders { symbol: String },
    /// 계정 잔고(포지션) 조회
    Positions,
}

#[derive(Debug, PartialEq, Eq, StructOpt)]
pub struct OrderArgs {
    pub symbol: String,
    pub quantity: Decimal,
    /// 지정가. 주면 기본 타입은 LIMIT, 없으면 MARKET
    #[structopt(long)]
    pub price: Option<Decimal>,
    /// 주문 타입을 명시 (MARKET, LIMIT)
    #[structopt(long = "type")]
    pub order_type: Option<OrderType>,
    #[structopt(long)]
    pub time_in_force: Option<TimeInForce>,
    /// /api/v3/order/test 로 보내 검증만 한다
    #[structopt(long)]
    pub test: bool,
}

impl OrderArgs {
    /// 타입과 가격이 맞지 않아도 여기서 고치지 않는다. 검증은 클라이언트가 한다.
    pub fn to_order(&self, side: OrderSide) -> OrderRequest {
        let order_type = self.order_type.unwrap_or(match self.price {
            Some(_) => OrderType::Limit,
            None => OrderType::Market,
        });

        // LIMIT은 OrderRequest::limit과 같이 GTC가 기본값
        let time_in_force = match (self.time_in_force, order_type) {
            (None, OrderType::Limit) => Some(TimeInForce::Gtc),
            (time_in_force, _) => time_in_force,
        };

        OrderRequest {
            symbol: self.symbol.to_uppercase(),
            side,
            order_type,
            quantity: self.quantity,
            price: self.price,
            time_in_force,
        }
    }

    pub fn options(&self) -> PlaceOrderOptions {
        PlaceOrderOptions { test: self.test }
    }
}

impl Command {
    /// 시세 조회를 제외한 모든 명령은 API 키가 필요하다.
    pub fn needs_credentials(&self) -> bool {
        !matches!(self, Command::Price { .. } | Command::Depth { .. })
    }
}

/// 명령 실행 후 응답 본문을 그대로 돌려준다.
pub async fn run<C>(command: Command, client: &C) -> eyre::Result<String>
where
    C: MarketDataExchange + OrderExchange,
{
    let body = match command {
        Command::Price { symbol } => client.latest_price(&symbol.to_uppercase()).await?,
        Command::Depth { symbol, limit } => client.depth(&symbol.to_uppercase(), limit).await?,
        Command::Buy(args) => place(client, &args, OrderSide::Buy).await?,
        Command::Sell(args) => place(client, &args, OrderSide::Sell).await?,
        Command::Status { symbol, order_id } => {
            client.order_status(&symbol.to_uppercase(), order_id).await?
        }
        Command::Cancel { symbol, order_id } => {
            client.cancel_order(&symbol.to_uppercase(), order_id).await?
        }
        Command::OpenOrders { symbol } => client.open_orders(&symbol.to_uppercase()).await?,
        Command::Positions => client.current_positions().await?,
    };

    Ok(body)
}

async fn place<C>(client: &C, args: &OrderArgs, side: OrderSide) -> eyre::Result<String>
where
    C: OrderExchange,
{
    let order = args.to_order(side);
    info!(
        "{} {} {} {} (price: {:?}, test: {})",
        order.side, order.order_type, order.quantity, order.symbol, order.price, args.test
    );
    Ok(client.place_order(&order, args.options()).await?)
}
