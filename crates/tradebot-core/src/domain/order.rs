//! 주문 타입.
//!
//! 이 모듈은 클라이언트의 주문 관련 타입을 정의합니다:
//! - `Side` - 주문 방향 (매수/매도)
//! - `OrderType` - 주문 유형 (시장가, 지정가, 스톱 등)
//! - `OrderStatusType` - 거래소 주문 상태
//! - `OrderRequest` - 단일 주문 요청
//! - `OcoOrderRequest` - OCO 복합 주문 요청
//! - `OrderRef` - 취소 대상 식별자
//! - `OrderResult` - 거래소가 반환한 주문 정보

use crate::error::{TraderError, TraderResult};
use crate::types::{Price, Quantity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 주문 방향 (매수 또는 매도).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl Side {
    /// 거래소 전송용 이름.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(TraderError::Validation(format!("unknown order side: {}", s))),
        }
    }
}

/// 주문 유형.
///
/// 유형마다 필수 필드가 다릅니다 ([`OrderType::requires_price`], [`OrderType::requires_stop_price`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// 시장가 주문
    Market,
    /// 지정가 주문
    Limit,
    /// 지정가 스톱 주문 (stop-limit)
    Stop,
    /// 시장가 스톱 주문
    StopMarket,
    /// 지정가 익절 주문
    TakeProfit,
    /// 시장가 익절 주문
    TakeProfitMarket,
}

impl OrderType {
    /// 지원되는 모든 주문 유형.
    pub const ALL: [OrderType; 6] = [
        OrderType::Market,
        OrderType::Limit,
        OrderType::Stop,
        OrderType::StopMarket,
        OrderType::TakeProfit,
        OrderType::TakeProfitMarket,
    ];

    /// 거래소 전송용 이름.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
            OrderType::StopMarket => "STOP_MARKET",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitMarket => "TAKE_PROFIT_MARKET",
        }
    }

    /// 지정가(`price`)가 필수인지 여부. 이 유형만 `price`와 `timeInForce=GTC`를 전송합니다.
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::Stop)
    }

    /// 스톱 가격(`stopPrice`)이 필수인지 여부.
    pub fn requires_stop_price(&self) -> bool {
        matches!(
            self,
            OrderType::Stop
                | OrderType::StopMarket
                | OrderType::TakeProfit
                | OrderType::TakeProfitMarket
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = TraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        OrderType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| TraderError::Validation(format!("unknown order type: {}", s)))
    }
}

/// 주문 상태 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatusType {
    /// 거래소에 접수됨 (대기 중)
    Open,
    /// 부분 체결됨
    PartiallyFilled,
    /// 전량 체결됨
    Filled,
    /// 취소됨
    Cancelled,
    /// 거래소에서 거부됨
    Rejected,
    /// 유효 기간 만료
    Expired,
    /// 알 수 없는 상태 문자열
    Unknown,
}

impl OrderStatusType {
    /// 거래소 상태 문자열을 변환합니다. 모르는 값은 `Unknown`.
    pub fn from_exchange(status: &str) -> Self {
        match status {
            "NEW" => OrderStatusType::Open,
            "PARTIALLY_FILLED" => OrderStatusType::PartiallyFilled,
            "FILLED" => OrderStatusType::Filled,
            "CANCELED" => OrderStatusType::Cancelled,
            "REJECTED" => OrderStatusType::Rejected,
            "EXPIRED" | "EXPIRED_IN_MATCH" => OrderStatusType::Expired,
            _ => OrderStatusType::Unknown,
        }
    }

    /// 주문이 최종 상태인지 확인합니다.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            OrderStatusType::Filled
                | OrderStatusType::Cancelled
                | OrderStatusType::Rejected
                | OrderStatusType::Expired
        )
    }
}

/// 단일 주문 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// 거래 심볼 (예: "BTCUSDT")
    pub symbol: String,
    /// 주문 방향
    pub side: Side,
    /// 주문 유형
    pub order_type: OrderType,
    /// 거래 수량 (양수)
    pub quantity: Quantity,
    /// 지정가 (LIMIT, STOP에 필수)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// 스톱 가격 (STOP 계열, TAKE_PROFIT 계열에 필수)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Price>,
    /// 클라이언트 주문 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
}

impl OrderRequest {
    /// 가격 필드가 비어 있는 주문 요청을 생성합니다.
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Quantity,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            client_order_id: None,
        }
    }

    /// 시장가 주문을 생성합니다.
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Quantity) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    /// 지정가 주문을 생성합니다.
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Quantity, price: Price) -> Self {
        Self::new(symbol, side, OrderType::Limit, quantity).with_price(price)
    }

    /// 지정가를 설정합니다.
    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// 스톱 가격을 설정합니다.
    pub fn with_stop_price(mut self, stop_price: Price) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// 클라이언트 주문 ID를 설정합니다.
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }
}

/// OCO(One-Cancels-the-Other) 복합 주문 요청.
///
/// 지정가 주문과 스톱 지정가 주문을 한 번에 제출하며, 한쪽이 체결되면
/// 다른 쪽은 거래소에서 취소됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcoOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub quantity: Quantity,
    /// 지정가 주문 가격
    pub price: Price,
    /// 스톱 발동 가격
    pub stop_price: Price,
    /// 스톱 발동 후 지정가
    pub stop_limit_price: Price,
}

/// 취소 대상 주문 식별자.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// 거래소 주문 ID
    Id(i64),
    /// 원래 클라이언트 주문 ID
    ClientId(String),
}

impl OrderRef {
    /// 두 식별자 중 하나로 참조를 만듭니다.
    ///
    /// 둘 다 없으면 검증 에러, 둘 다 있으면 거래소 주문 ID가 우선합니다.
    pub fn from_parts(order_id: Option<i64>, client_order_id: Option<&str>) -> TraderResult<Self> {
        let client_order_id = client_order_id.map(str::trim).filter(|id| !id.is_empty());
        match (order_id, client_order_id) {
            (Some(id), _) => Ok(OrderRef::Id(id)),
            (None, Some(client_id)) => Ok(OrderRef::ClientId(client_id.to_string())),
            (None, None) => Err(TraderError::Validation(
                "either order_id or client_order_id must be provided".to_string(),
            )),
        }
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderRef::Id(id) => write!(f, "orderId={}", id),
            OrderRef::ClientId(id) => write!(f, "origClientOrderId={}", id),
        }
    }
}

/// 거래소가 반환한 주문 정보 (주문, 취소, 조회 응답 공통).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    /// 거래소 주문 ID
    pub order_id: i64,
    /// 클라이언트 주문 ID
    pub client_order_id: Option<String>,
    pub symbol: String,
    /// 알 수 없는 값이면 `None`
    pub side: Option<Side>,
    /// 알 수 없는 값이면 `None`
    pub order_type: Option<OrderType>,
    pub status: OrderStatusType,
    pub price: Price,
    pub stop_price: Option<Price>,
    /// 주문 수량
    pub orig_qty: Quantity,
    /// 체결 수량
    pub executed_qty: Quantity,
    /// 평균 체결가 (체결이 있는 경우)
    pub avg_price: Option<Price>,
    pub update_time: Option<DateTime<Utc>>,
}
