//! 시장 데이터 스냅샷.

use crate::types::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 심볼의 24시간 시세 스냅샷.
///
/// 심볼과 조회 시각 외에는 식별자가 없는 읽기 전용 값입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTicker {
    /// 거래 심볼
    pub symbol: String,
    /// 최종 체결가
    pub last_price: Price,
    /// 24시간 거래량 (기준 자산)
    pub volume: Decimal,
    /// 24시간 가격 변동률 (%)
    pub price_change_percent: Decimal,
    /// 조회 시각
    pub fetched_at: DateTime<Utc>,
}

impl MarketTicker {
    /// 24시간 기준 상승(또는 보합) 여부.
    pub fn is_up(&self) -> bool {
        self.price_change_percent >= Decimal::ZERO
    }
}

/// 심볼의 최신 가격.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPrice {
    pub symbol: String,
    pub price: Price,
}
