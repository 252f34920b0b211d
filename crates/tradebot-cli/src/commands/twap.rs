//! TWAP 명령. Ctrl-C를 누르면 다음 하위 주문부터 중단합니다.

use super::print_json;
use serde_json::json;
use tracing::warn;
use tradebot_core::TwapPlan;
use tradebot_exchange::FuturesClient;
use tradebot_execution::{ExecutionError, TwapScheduler};

pub async fn run(client: &FuturesClient, plan: TwapPlan) -> anyhow::Result<()> {
    let scheduler = TwapScheduler::new(client.orders().clone());
    let handle = scheduler.spawn(plan);

    let token = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling remaining TWAP slices");
            token.cancel();
        }
    });

    match handle.wait().await {
        Ok(placed) => print_json(&json!({
            "status": "completed",
            "completed_orders": placed.len(),
            "orders": placed,
        })),
        Err(err @ ExecutionError::Cancelled { .. }) => print_json(&json!({
            "status": "cancelled",
            "completed_orders": err.completed_orders(),
            "orders": err.placed_orders(),
        })),
        Err(err) => {
            print_json(&json!({
                "status": "failed",
                "completed_orders": err.completed_orders(),
                "orders": err.placed_orders(),
                "error": err.to_string(),
            }))?;
            Err(err.into())
        }
    }
}
