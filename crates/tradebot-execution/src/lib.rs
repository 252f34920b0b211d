//! 주문 실행 알고리즘.
//!
//! 현재는 TWAP 분할 주문을 제공합니다.

pub mod error;
pub mod twap;

pub use error::ExecutionError;
pub use twap::{TwapHandle, TwapResult, TwapScheduler};
