//! CLI 명령어 구현 모듈.

pub mod market;
pub mod orders;
pub mod twap;

use crate::Commands;
use serde::Serialize;
use tradebot_core::{OcoOrderRequest, OrderRequest, TwapPlan};
use tradebot_exchange::FuturesClient;

/// 결과를 보기 좋은 JSON으로 stdout에 출력합니다.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 명령을 실행합니다.
pub(crate) async fn run(command: Commands, client: &FuturesClient) -> anyhow::Result<()> {
    match command {
        Commands::Market { symbols } => market::market_data(client, &symbols).await,
        Commands::Price { symbol } => market::price(client, &symbol).await,
        Commands::Account => market::account(client).await,
        Commands::ExchangeInfo => market::exchange_info(client).await,
        Commands::Order {
            symbol,
            side,
            order_type,
            quantity,
            price,
            stop_price,
            client_id,
        } => {
            let mut req = OrderRequest::new(symbol, side, order_type, quantity);
            req.price = price;
            req.stop_price = stop_price;
            req.client_order_id = client_id;
            orders::place(client, &req).await
        }
        Commands::Oco {
            symbol,
            side,
            quantity,
            price,
            stop_price,
            stop_limit_price,
        } => {
            let req = OcoOrderRequest {
                symbol,
                side,
                quantity,
                price,
                stop_price,
                stop_limit_price,
            };
            orders::place_oco(client, &req).await
        }
        Commands::Cancel {
            symbol,
            order_id,
            client_id,
        } => orders::cancel(client, &symbol, order_id, client_id.as_deref()).await,
        Commands::OpenOrders { symbol } => orders::open_orders(client, symbol.as_deref()).await,
        Commands::History { symbol, limit } => {
            orders::history(client, symbol.as_deref(), limit).await
        }
        Commands::Twap {
            symbol,
            side,
            quantity,
            num_orders,
            duration,
            precision,
        } => {
            let mut plan = TwapPlan::new(symbol, side, quantity, num_orders, duration);
            if let Some(dp) = precision {
                plan = plan.with_quantity_precision(dp);
            }
            twap::run(client, plan).await
        }
    }
}
