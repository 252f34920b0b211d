//! TWAP(시간 가중 평균 가격) 실행기.
//!
//! 큰 주문을 동일한 크기의 시장가 주문 여러 개로 나누어 일정한 간격으로 제출합니다.
//! 대기 중에는 취소 토큰을 함께 기다리므로 남은 주문 없이 즉시 중단할 수 있습니다.

use crate::error::ExecutionError;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tradebot_core::{OrderRequest, OrderResult, OrderType, TwapPlan};
use tradebot_exchange::OrderService;
use uuid::Uuid;

/// TWAP 실행 결과.
pub type TwapResult = Result<Vec<OrderResult>, ExecutionError>;

/// TWAP 스케줄러.
#[derive(Clone)]
pub struct TwapScheduler {
    orders: OrderService,
}

impl TwapScheduler {
    pub fn new(orders: OrderService) -> Self {
        Self { orders }
    }

    /// 계획을 현재 태스크에서 실행합니다.
    ///
    /// 하위 주문은 순서대로 제출되며 마지막 주문 뒤에는 대기하지 않습니다.
    /// 하위 주문이 실패하면 그때까지 제출된 주문과 함께 `ExecutionError::Twap`을 반환하고,
    /// 이미 제출된 주문은 되돌리지 않습니다.
    pub async fn execute(&self, plan: &TwapPlan, cancel: &CancellationToken) -> TwapResult {
        plan.validate()?;
        if !self.orders.supported_types().contains(&OrderType::Market) {
            return Err(ExecutionError::Validation(
                "TWAP requires MARKET orders, which are not enabled".to_string(),
            ));
        }

        let total = plan.num_orders as usize;
        let child_quantity = plan.child_quantity();
        let interval = plan.interval();
        let run_id = Uuid::new_v4().simple().to_string()[..8].to_string();

        info!(
            run_id = %run_id,
            symbol = %plan.symbol,
            side = %plan.side,
            total_quantity = %plan.total_quantity,
            num_orders = total,
            child_quantity = %child_quantity,
            interval_ms = interval.as_millis() as u64,
            "Starting TWAP execution"
        );

        let mut placed: Vec<OrderResult> = Vec::with_capacity(total);

        for index in 0..total {
            if cancel.is_cancelled() {
                return Err(cancelled(&run_id, placed));
            }

            let req = OrderRequest::market(plan.symbol.clone(), plan.side, child_quantity)
                .with_client_order_id(format!("twap-{}-{}", run_id, index + 1));

            match self.orders.place_order(&req).await {
                Ok(result) => {
                    info!(
                        run_id = %run_id,
                        slice = index + 1,
                        of = total,
                        order_id = result.order_id,
                        "TWAP slice placed"
                    );
                    placed.push(result);
                }
                Err(source) => {
                    error!(
                        run_id = %run_id,
                        slice = index + 1,
                        completed = placed.len(),
                        error = %source,
                        "TWAP slice failed, aborting"
                    );
                    return Err(ExecutionError::Twap {
                        completed_orders: placed.len(),
                        placed,
                        source,
                    });
                }
            }

            if index + 1 < total && !wait_or_cancel(interval, cancel).await {
                return Err(cancelled(&run_id, placed));
            }
        }

        info!(run_id = %run_id, placed = placed.len(), "TWAP execution completed");
        Ok(placed)
    }

    /// 계획을 별도 태스크에서 실행합니다.
    pub fn spawn(&self, plan: TwapPlan) -> TwapHandle {
        let cancel = CancellationToken::new();
        let scheduler = self.clone();
        let token = cancel.clone();

        let join = tokio::spawn(async move { scheduler.execute(&plan, &token).await });

        TwapHandle { cancel, join }
    }
}

/// 간격만큼 기다립니다. 그 전에 취소되면 `false`.
async fn wait_or_cancel(interval: Duration, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if interval.is_zero() {
        return true;
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(interval) => true,
    }
}

fn cancelled(run_id: &str, placed: Vec<OrderResult>) -> ExecutionError {
    warn!(run_id, completed = placed.len(), "TWAP execution cancelled");
    ExecutionError::Cancelled {
        completed_orders: placed.len(),
        placed,
    }
}

/// 백그라운드에서 실행 중인 TWAP.
pub struct TwapHandle {
    cancel: CancellationToken,
    join: JoinHandle<TwapResult>,
}

impl TwapHandle {
    /// 남은 하위 주문을 취소합니다. 진행 중인 요청은 완료될 때까지 기다립니다.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 외부에서 취소할 수 있도록 토큰을 복제해 반환합니다.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// 실행이 끝날 때까지 기다립니다.
    pub async fn wait(self) -> TwapResult {
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(ExecutionError::Aborted(e.to_string())),
        }
    }
}
