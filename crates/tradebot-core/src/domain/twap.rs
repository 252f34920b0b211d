//! TWAP(시간 가중 평균 가격) 실행 계획.
//!
//! 하나의 큰 주문을 `num_orders`개의 동일한 시장가 주문으로 나누고
//! `duration_minutes` 동안 균등한 간격으로 제출하기 위한 파생 값을 계산합니다.

use crate::domain::order::Side;
use crate::error::{TraderError, TraderResult};
use crate::types::{DecimalExt, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// TWAP 실행 계획. 호출마다 생성되어 즉시 소비됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwapPlan {
    pub symbol: String,
    pub side: Side,
    /// 전체 주문 수량
    pub total_quantity: Quantity,
    /// 하위 주문 개수 (1 이상)
    pub num_orders: u32,
    /// 전체 실행 기간 (분)
    pub duration_minutes: u64,
    /// 하위 주문 수량을 버림할 소수점 자릿수 (거래소 수량 스텝)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_precision: Option<u32>,
}

impl TwapPlan {
    /// 새 계획을 생성합니다. 검증은 [`TwapPlan::validate`]에서 수행합니다.
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        total_quantity: Quantity,
        num_orders: u32,
        duration_minutes: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            total_quantity,
            num_orders,
            duration_minutes,
            quantity_precision: None,
        }
    }

    /// 하위 주문 수량의 소수점 자릿수를 설정합니다.
    pub fn with_quantity_precision(mut self, dp: u32) -> Self {
        self.quantity_precision = Some(dp);
        self
    }

    /// 계획을 검증합니다.
    ///
    /// `num_orders == 0`은 0으로 나누기가 되므로 거부합니다.
    /// `duration_minutes == 0`은 지연 없는 연속 실행으로 유효합니다.
    pub fn validate(&self) -> TraderResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(TraderError::Validation("TWAP symbol is empty".to_string()));
        }
        if self.num_orders == 0 {
            return Err(TraderError::Validation(
                "TWAP num_orders must be at least 1".to_string(),
            ));
        }
        if !self.total_quantity.is_strictly_positive() {
            return Err(TraderError::Validation(format!(
                "TWAP total_quantity must be positive, got {}",
                self.total_quantity
            )));
        }
        if !self.child_quantity().is_strictly_positive() {
            return Err(TraderError::Validation(format!(
                "TWAP child quantity rounds to zero ({} / {})",
                self.total_quantity, self.num_orders
            )));
        }
        Ok(())
    }

    /// 하위 주문 수량 (`total_quantity / num_orders`).
    ///
    /// 정밀도가 지정되면 버림하므로 하위 주문 합계가 전체보다 작을 수 있습니다.
    pub fn child_quantity(&self) -> Quantity {
        if self.num_orders == 0 {
            return Decimal::ZERO;
        }
        let child = self.total_quantity / Decimal::from(self.num_orders);
        match self.quantity_precision {
            Some(dp) => child.truncate_dp(dp),
            None => child,
        }
    }

    /// 하위 주문 사이의 대기 시간 (`duration_minutes * 60 / num_orders` 초).
    pub fn interval(&self) -> Duration {
        if self.num_orders == 0 {
            return Duration::ZERO;
        }
        let total_ms = self.duration_minutes.saturating_mul(60_000);
        Duration::from_millis(total_ms / u64::from(self.num_orders))
    }
}
