//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 수량과 가격은 항상 `Decimal`로 다루고, 거래소로 보낼 때는
//! 이진 부동소수점을 거치지 않은 10진 문자열로 직렬화합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 주문 수량을 위한 타입.
pub type Quantity = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다.
    fn is_strictly_positive(&self) -> bool;

    /// 거래소 전송용 문자열로 변환합니다 (뒤따르는 0 제거, 예: "0.2500" -> "0.25").
    fn to_wire_string(&self) -> String;

    /// 지정된 소수점 자릿수에서 버림합니다 (수량 스텝 맞춤용).
    fn truncate_dp(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn is_strictly_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn to_wire_string(&self) -> String {
        self.normalize().to_string()
    }

    fn truncate_dp(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::ToZero)
    }
}
