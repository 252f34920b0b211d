//! 주문 명령.

use super::print_json;
use tracing::info;
use tradebot_core::{OcoOrderRequest, OrderRequest};
use tradebot_exchange::FuturesClient;

pub async fn place(client: &FuturesClient, req: &OrderRequest) -> anyhow::Result<()> {
    let result = client.place_order(req).await?;
    info!(order_id = result.order_id, "Order accepted");
    print_json(&result)
}

pub async fn place_oco(client: &FuturesClient, req: &OcoOrderRequest) -> anyhow::Result<()> {
    let result = client.place_oco_order(req).await?;
    print_json(&result)
}

pub async fn cancel(
    client: &FuturesClient,
    symbol: &str,
    order_id: Option<i64>,
    client_id: Option<&str>,
) -> anyhow::Result<()> {
    let result = client.cancel_order(symbol, order_id, client_id).await?;
    print_json(&result)
}

pub async fn open_orders(client: &FuturesClient, symbol: Option<&str>) -> anyhow::Result<()> {
    let orders = client.get_open_orders(symbol).await?;
    print_json(&orders)
}

pub async fn history(
    client: &FuturesClient,
    symbol: Option<&str>,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let orders = client.get_order_history(symbol, limit).await?;
    print_json(&orders)
}
