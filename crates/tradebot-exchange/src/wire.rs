//! 거래소 REST 응답 타입.
//!
//! 거래소는 숫자를 문자열로 보내므로 모든 수치 필드는 `Decimal`로 바로 역직렬화합니다.
//! 도메인 타입으로의 변환은 여기서만 수행합니다.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tradebot_core::{
    AccountSnapshot, AssetBalance, MarketTicker, OrderResult, OrderStatusType, PositionInfo,
    SymbolPrice,
};

/// 에러 응답 본문 (`{"code": -1121, "msg": "Invalid symbol."}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesOrderResponse {
    order_id: i64,
    #[serde(default)]
    client_order_id: Option<String>,
    symbol: String,
    #[serde(default)]
    side: String,
    #[serde(default, rename = "type")]
    order_type: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    price: Decimal,
    #[serde(default)]
    stop_price: Option<Decimal>,
    #[serde(default)]
    orig_qty: Decimal,
    #[serde(default)]
    executed_qty: Decimal,
    #[serde(default)]
    avg_price: Option<Decimal>,
    #[serde(default)]
    update_time: Option<i64>,
}

impl FuturesOrderResponse {
    /// 도메인 주문 결과로 변환합니다. 알 수 없는 방향/유형은 `None`이 됩니다.
    pub fn into_result(self) -> OrderResult {
        OrderResult {
            order_id: self.order_id,
            client_order_id: self.client_order_id.filter(|id| !id.is_empty()),
            symbol: self.symbol,
            side: self.side.parse().ok(),
            order_type: self.order_type.parse().ok(),
            status: OrderStatusType::from_exchange(&self.status),
            price: self.price,
            stop_price: non_zero(self.stop_price),
            orig_qty: self.orig_qty,
            executed_qty: self.executed_qty,
            avg_price: non_zero(self.avg_price),
            update_time: self.update_time.and_then(millis_to_datetime),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24hResponse {
    symbol: String,
    last_price: Decimal,
    volume: Decimal,
    price_change_percent: Decimal,
}

impl Ticker24hResponse {
    pub fn into_ticker(self, fetched_at: DateTime<Utc>) -> MarketTicker {
        MarketTicker {
            symbol: self.symbol,
            last_price: self.last_price,
            volume: self.volume,
            price_change_percent: self.price_change_percent,
            fetched_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceResponse {
    symbol: String,
    price: Decimal,
}

impl From<PriceResponse> for SymbolPrice {
    fn from(resp: PriceResponse) -> Self {
        SymbolPrice {
            symbol: resp.symbol,
            price: resp.price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetResponse {
    asset: String,
    #[serde(default)]
    wallet_balance: Decimal,
    #[serde(default)]
    unrealized_profit: Decimal,
    #[serde(default)]
    available_balance: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionResponse {
    symbol: String,
    #[serde(default)]
    position_amt: Decimal,
    #[serde(default)]
    entry_price: Decimal,
    #[serde(default)]
    unrealized_profit: Decimal,
    #[serde(default)]
    leverage: Decimal,
    #[serde(default)]
    position_side: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[serde(default)]
    total_wallet_balance: Decimal,
    #[serde(default)]
    total_unrealized_profit: Decimal,
    #[serde(default)]
    total_margin_balance: Decimal,
    #[serde(default)]
    available_balance: Decimal,
    #[serde(default)]
    can_trade: bool,
    #[serde(default)]
    assets: Vec<AssetResponse>,
    #[serde(default)]
    positions: Vec<PositionResponse>,
}

impl From<AccountResponse> for AccountSnapshot {
    fn from(resp: AccountResponse) -> Self {
        let assets = resp
            .assets
            .into_iter()
            .filter(|a| !a.wallet_balance.is_zero() || !a.unrealized_profit.is_zero())
            .map(|a| AssetBalance {
                asset: a.asset,
                wallet_balance: a.wallet_balance,
                unrealized_profit: a.unrealized_profit,
                available_balance: a.available_balance,
            })
            .collect();

        let positions = resp
            .positions
            .into_iter()
            .filter(|p| !p.position_amt.is_zero())
            .map(|p| PositionInfo {
                symbol: p.symbol,
                position_amt: p.position_amt,
                entry_price: p.entry_price,
                unrealized_profit: p.unrealized_profit,
                leverage: p.leverage,
                position_side: p.position_side,
            })
            .collect();

        AccountSnapshot {
            total_wallet_balance: resp.total_wallet_balance,
            total_unrealized_profit: resp.total_unrealized_profit,
            total_margin_balance: resp.total_margin_balance,
            available_balance: resp.available_balance,
            can_trade: resp.can_trade,
            assets,
            positions,
        }
    }
}

fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn millis_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tradebot_core::{OrderType, Side};

    #[test]
    fn test_order_response_mapping() {
        let json = r#"{
            "orderId": 22542179,
            "clientOrderId": "twap-1",
            "symbol": "BTCUSDT",
            "side": "BUY",
            "type": "STOP_MARKET",
            "status": "NEW",
            "price": "0",
            "stopPrice": "9300",
            "origQty": "10",
            "executedQty": "0",
            "avgPrice": "0.00000",
            "updateTime": 1566818724722,
            "positionSide": "BOTH",
            "reduceOnly": false
        }"#;

        let result = serde_json::from_str::<FuturesOrderResponse>(json)
            .unwrap()
            .into_result();

        assert_eq!(result.order_id, 22542179);
        assert_eq!(result.client_order_id.as_deref(), Some("twap-1"));
        assert_eq!(result.side, Some(Side::Buy));
        assert_eq!(result.order_type, Some(OrderType::StopMarket));
        assert_eq!(result.status, OrderStatusType::Open);
        assert_eq!(result.stop_price, Some(dec!(9300)));
        assert_eq!(result.orig_qty, dec!(10));
        assert_eq!(result.avg_price, None);
        assert!(result.update_time.is_some());
    }

    #[test]
    fn test_unknown_enums_do_not_fail() {
        let json = r#"{
            "orderId": 1,
            "symbol": "BTCUSDT",
            "side": "SIDEWAYS",
            "type": "TRAILING_STOP_MARKET",
            "status": "NEW_INSURANCE"
        }"#;

        let result = serde_json::from_str::<FuturesOrderResponse>(json)
            .unwrap()
            .into_result();

        assert_eq!(result.side, None);
        assert_eq!(result.order_type, None);
        assert_eq!(result.status, OrderStatusType::Unknown);
        assert_eq!(result.client_order_id, None);
    }

    #[test]
    fn test_account_filters_empty_rows() {
        let json = r#"{
            "totalWalletBalance": "1000.5",
            "totalUnrealizedProfit": "12.3",
            "totalMarginBalance": "1012.8",
            "availableBalance": "900",
            "canTrade": true,
            "assets": [
                {"asset": "USDT", "walletBalance": "1000.5", "unrealizedProfit": "12.3", "availableBalance": "900"},
                {"asset": "BNB", "walletBalance": "0.00000000", "unrealizedProfit": "0.00000000", "availableBalance": "0"}
            ],
            "positions": [
                {"symbol": "BTCUSDT", "positionAmt": "0.010", "entryPrice": "60000", "unrealizedProfit": "12.3", "leverage": "20", "positionSide": "BOTH"},
                {"symbol": "ETHUSDT", "positionAmt": "0.000", "entryPrice": "0.0", "unrealizedProfit": "0", "leverage": "20", "positionSide": "BOTH"}
            ]
        }"#;

        let snapshot: AccountSnapshot = serde_json::from_str::<AccountResponse>(json)
            .unwrap()
            .into();

        assert_eq!(snapshot.total_wallet_balance, dec!(1000.5));
        assert!(snapshot.can_trade);
        assert_eq!(snapshot.assets.len(), 1);
        assert_eq!(snapshot.assets[0].asset, "USDT");
        assert_eq!(snapshot.positions.len(), 1);
        assert!(snapshot.positions[0].is_open());
    }
}
