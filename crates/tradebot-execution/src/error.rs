//! 실행 에러 타입.

use thiserror::Error;
use tradebot_core::{OrderResult, TraderError};
use tradebot_exchange::ExchangeError;

/// 실행 오류 유형.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// 계획 검증 실패 (주문 제출 전)
    #[error("Invalid plan: {0}")]
    Validation(String),

    /// 하위 주문 실패. 이미 제출된 주문은 되돌리지 않습니다.
    #[error("TWAP aborted after {completed_orders} orders: {source}")]
    Twap {
        completed_orders: usize,
        placed: Vec<OrderResult>,
        #[source]
        source: ExchangeError,
    },

    /// 취소 토큰에 의해 중단됨
    #[error("TWAP cancelled after {completed_orders} orders")]
    Cancelled {
        completed_orders: usize,
        placed: Vec<OrderResult>,
    },

    /// 실행 태스크가 비정상 종료됨 (panic 등)
    #[error("Execution task aborted: {0}")]
    Aborted(String),
}

impl ExecutionError {
    /// 중단 전까지 제출된 하위 주문 수.
    pub fn completed_orders(&self) -> usize {
        match self {
            ExecutionError::Twap {
                completed_orders, ..
            }
            | ExecutionError::Cancelled {
                completed_orders, ..
            } => *completed_orders,
            _ => 0,
        }
    }

    /// 중단 전까지 제출된 하위 주문.
    pub fn placed_orders(&self) -> &[OrderResult] {
        match self {
            ExecutionError::Twap { placed, .. } | ExecutionError::Cancelled { placed, .. } => {
                placed
            }
            _ => &[],
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExecutionError::Cancelled { .. })
    }
}

impl From<TraderError> for ExecutionError {
    fn from(err: TraderError) -> Self {
        ExecutionError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_orders_accessor() {
        let err = ExecutionError::Cancelled {
            completed_orders: 2,
            placed: vec![],
        };
        assert_eq!(err.completed_orders(), 2);
        assert!(err.is_cancelled());

        let err = ExecutionError::Twap {
            completed_orders: 1,
            placed: vec![],
            source: ExchangeError::Transport("reset".into()),
        };
        assert_eq!(err.completed_orders(), 1);
        assert!(err.to_string().contains("after 1 orders"));
        assert!(std::error::Error::source(&err).is_some());

        assert_eq!(ExecutionError::Validation("x".into()).completed_orders(), 0);
    }
}
