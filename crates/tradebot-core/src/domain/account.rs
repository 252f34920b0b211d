//! 계좌 스냅샷 타입.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 자산별 잔고.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    /// 자산 이름 (예: "USDT")
    pub asset: String,
    /// 지갑 잔고
    pub wallet_balance: Decimal,
    /// 미실현 손익
    pub unrealized_profit: Decimal,
    /// 주문 가능 잔고
    pub available_balance: Decimal,
}

/// 심볼별 포지션.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionInfo {
    pub symbol: String,
    /// 포지션 수량 (숏이면 음수)
    pub position_amt: Decimal,
    pub entry_price: Decimal,
    pub unrealized_profit: Decimal,
    pub leverage: Decimal,
    /// BOTH / LONG / SHORT
    pub position_side: String,
}

impl PositionInfo {
    /// 포지션이 열려 있는지 여부.
    pub fn is_open(&self) -> bool {
        !self.position_amt.is_zero()
    }
}

/// 계좌/포지션/잔고 스냅샷.
///
/// 잔고가 0인 자산과 수량이 0인 포지션은 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub total_wallet_balance: Decimal,
    pub total_unrealized_profit: Decimal,
    pub total_margin_balance: Decimal,
    pub available_balance: Decimal,
    /// 거래 가능 여부
    pub can_trade: bool,
    pub assets: Vec<AssetBalance>,
    pub positions: Vec<PositionInfo>,
}
