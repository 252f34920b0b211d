//! 선물 트레이딩 클라이언트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 심볼 유니버스 시세
//! tradebot market
//!
//! # 지정가 매수
//! tradebot order -s BTCUSDT --side BUY --type LIMIT -q 0.01 -p 60000
//!
//! # 1 BTC를 2분 동안 4번에 나누어 매수 (Ctrl-C로 중단)
//! tradebot twap -s BTCUSDT --side BUY -q 1 -n 4 -d 2
//! ```
//!
//! 자격증명은 `.env` 또는 환경 변수(`BINANCE_API_KEY`, `BINANCE_API_SECRET`)로 전달합니다.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tradebot_core::{init_logging, AppConfig, LogConfig, OrderType, Side};
use tradebot_exchange::FuturesClient;

mod commands;

#[derive(Parser)]
#[command(name = "tradebot")]
#[command(about = "USDT 무기한 선물 트레이딩 클라이언트", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/default.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 24시간 시세 조회 (심볼을 지정하지 않으면 기본 유니버스)
    Market {
        /// 심볼 (여러 번 지정 가능)
        #[arg(short, long = "symbol")]
        symbols: Vec<String>,
    },

    /// 최신 가격 조회
    Price {
        #[arg(short, long)]
        symbol: String,
    },

    /// 계좌 잔고와 포지션 조회
    Account,

    /// 거래 규칙과 심볼 정보 조회
    ExchangeInfo,

    /// 주문 제출
    Order {
        #[arg(short, long)]
        symbol: String,

        /// BUY 또는 SELL
        #[arg(long)]
        side: Side,

        /// MARKET, LIMIT, STOP, STOP_MARKET, TAKE_PROFIT, TAKE_PROFIT_MARKET
        #[arg(short = 't', long = "type", default_value = "MARKET")]
        order_type: OrderType,

        #[arg(short, long)]
        quantity: Decimal,

        /// 지정가
        #[arg(short, long)]
        price: Option<Decimal>,

        /// 스톱 가격
        #[arg(long)]
        stop_price: Option<Decimal>,

        /// 클라이언트 주문 ID
        #[arg(long)]
        client_id: Option<String>,
    },

    /// OCO 주문 제출
    Oco {
        #[arg(short, long)]
        symbol: String,

        #[arg(long)]
        side: Side,

        #[arg(short, long)]
        quantity: Decimal,

        /// 지정가 주문 가격
        #[arg(short, long)]
        price: Decimal,

        /// 스톱 발동 가격
        #[arg(long)]
        stop_price: Decimal,

        /// 스톱 발동 후 지정가
        #[arg(long)]
        stop_limit_price: Decimal,
    },

    /// 주문 취소 (주문 ID가 클라이언트 ID보다 우선)
    Cancel {
        #[arg(short, long)]
        symbol: String,

        #[arg(long)]
        order_id: Option<i64>,

        #[arg(long)]
        client_id: Option<String>,
    },

    /// 미체결 주문 조회
    OpenOrders {
        #[arg(short, long)]
        symbol: Option<String>,
    },

    /// 주문 내역 조회
    History {
        #[arg(short, long)]
        symbol: Option<String>,

        /// 조회 개수 (기본 50)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// TWAP 분할 시장가 주문
    Twap {
        #[arg(short, long)]
        symbol: String,

        #[arg(long)]
        side: Side,

        /// 전체 수량
        #[arg(short, long)]
        quantity: Decimal,

        /// 하위 주문 개수
        #[arg(short = 'n', long, default_value = "10")]
        num_orders: u32,

        /// 전체 실행 기간 (분)
        #[arg(short, long, default_value = "60")]
        duration: u64,

        /// 하위 주문 수량 소수점 자릿수
        #[arg(long)]
        precision: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let _log_guard = init_logging(&LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let client = FuturesClient::new(&config.exchange)?;

    commands::run(cli.command, &client).await
}
