//! 주문 서비스.
//!
//! 주문 유형별 필수 필드를 로컬에서 검증한 뒤에만 요청을 보냅니다.
//!
//! | 유형 | 필수 | 자동 추가 |
//! |---|---|---|
//! | MARKET | quantity | - |
//! | LIMIT | quantity, price | timeInForce=GTC |
//! | STOP | quantity, price, stopPrice | timeInForce=GTC |
//! | STOP_MARKET / TAKE_PROFIT / TAKE_PROFIT_MARKET | quantity, stopPrice | - |

use crate::error::{ExchangeError, ExchangeResult};
use crate::transport::{Method, Params, Transport};
use crate::wire::FuturesOrderResponse;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use tradebot_core::{
    DecimalExt, OcoOrderRequest, OrderRef, OrderRequest, OrderResult, OrderType,
};

/// 주문 내역 조회 기본 개수.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

const ORDER_PATH: &str = "/fapi/v1/order";
const OCO_ORDER_PATH: &str = "/fapi/v1/order/oco";
const OPEN_ORDERS_PATH: &str = "/fapi/v1/openOrders";
const ALL_ORDERS_PATH: &str = "/fapi/v1/allOrders";

/// 주문 제출/취소/조회.
#[derive(Clone)]
pub struct OrderService {
    transport: Arc<dyn Transport>,
    supported_types: Vec<OrderType>,
}

impl OrderService {
    pub fn new(transport: Arc<dyn Transport>, supported_types: Vec<OrderType>) -> Self {
        Self {
            transport,
            supported_types,
        }
    }

    /// 설정에서 허용된 주문 유형.
    pub fn supported_types(&self) -> &[OrderType] {
        &self.supported_types
    }

    /// 주문 요청을 검증하고 전송 파라미터를 만듭니다.
    ///
    /// 순서: `symbol, side, type, quantity, [price], [stopPrice], [timeInForce], [newClientOrderId]`
    pub fn build_order_params(&self, req: &OrderRequest) -> ExchangeResult<Params> {
        let symbol = req.symbol.trim();
        if symbol.is_empty() {
            return Err(ExchangeError::Validation("symbol is required".to_string()));
        }
        if !req.quantity.is_strictly_positive() {
            return Err(ExchangeError::Validation(format!(
                "quantity must be positive for {} order, got {}",
                req.order_type, req.quantity
            )));
        }
        if !self.supported_types.contains(&req.order_type) {
            return Err(ExchangeError::Validation(format!(
                "order type {} is not enabled (supported: {})",
                req.order_type,
                self.supported_types
                    .iter()
                    .map(OrderType::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        if req.order_type.requires_price() && req.price.is_none() {
            return Err(ExchangeError::Validation(format!(
                "price is required for {} order",
                req.order_type
            )));
        }
        if req.order_type.requires_stop_price() && req.stop_price.is_none() {
            return Err(ExchangeError::Validation(format!(
                "stop_price is required for {} order",
                req.order_type
            )));
        }

        let mut params: Params = vec![
            ("symbol", symbol.to_string()),
            ("side", req.side.as_str().to_string()),
            ("type", req.order_type.as_str().to_string()),
            ("quantity", req.quantity.to_wire_string()),
        ];

        // LIMIT/STOP 외의 유형은 가격이 있어도 보내지 않음
        let price = req.price.filter(|_| req.order_type.requires_price());
        if let Some(price) = price {
            params.push(("price", price.to_wire_string()));
        }
        if req.order_type.requires_stop_price() {
            if let Some(stop_price) = req.stop_price {
                params.push(("stopPrice", stop_price.to_wire_string()));
            }
        }
        if price.is_some() {
            params.push(("timeInForce", "GTC".to_string()));
        }
        if let Some(client_id) = req
            .client_order_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            params.push(("newClientOrderId", client_id.to_string()));
        }

        Ok(params)
    }

    /// 단일 주문을 제출합니다.
    pub async fn place_order(&self, req: &OrderRequest) -> ExchangeResult<OrderResult> {
        let params = self.build_order_params(req)?;

        info!(
            symbol = %req.symbol,
            side = %req.side,
            order_type = %req.order_type,
            quantity = %req.quantity,
            price = ?req.price,
            stop_price = ?req.stop_price,
            "Placing order"
        );

        let value = self.transport.request(Method::Post, ORDER_PATH, params).await?;
        let result = parse_order(value)?;

        info!(order_id = result.order_id, status = ?result.status, "Order placed");
        Ok(result)
    }

    /// OCO 복합 주문을 제출합니다. 응답 구조가 복합적이므로 JSON 그대로 반환합니다.
    pub async fn place_oco_order(&self, req: &OcoOrderRequest) -> ExchangeResult<Value> {
        let symbol = req.symbol.trim();
        if symbol.is_empty() {
            return Err(ExchangeError::Validation("symbol is required".to_string()));
        }
        if !req.quantity.is_strictly_positive() {
            return Err(ExchangeError::Validation(format!(
                "quantity must be positive for OCO order, got {}",
                req.quantity
            )));
        }
        for (field, value) in [
            ("price", req.price),
            ("stop_price", req.stop_price),
            ("stop_limit_price", req.stop_limit_price),
        ] {
            if !value.is_strictly_positive() {
                return Err(ExchangeError::Validation(format!(
                    "{} must be positive for OCO order, got {}",
                    field, value
                )));
            }
        }

        let params: Params = vec![
            ("symbol", symbol.to_string()),
            ("side", req.side.as_str().to_string()),
            ("quantity", req.quantity.to_wire_string()),
            ("price", req.price.to_wire_string()),
            ("stopPrice", req.stop_price.to_wire_string()),
            ("stopLimitPrice", req.stop_limit_price.to_wire_string()),
            ("stopLimitTimeInForce", "GTC".to_string()),
        ];

        info!(
            symbol = %req.symbol,
            side = %req.side,
            quantity = %req.quantity,
            "Placing OCO order"
        );

        self.transport
            .request(Method::Post, OCO_ORDER_PATH, params)
            .await
    }

    /// 주문을 취소합니다.
    ///
    /// 거래소 주문 ID와 클라이언트 주문 ID 중 하나가 필요하며, 둘 다 있으면 주문 ID를 사용합니다.
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<i64>,
        client_order_id: Option<&str>,
    ) -> ExchangeResult<OrderResult> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ExchangeError::Validation("symbol is required".to_string()));
        }
        let order_ref = OrderRef::from_parts(order_id, client_order_id)?;

        let mut params: Params = vec![("symbol", symbol.to_string())];
        match &order_ref {
            OrderRef::Id(id) => params.push(("orderId", id.to_string())),
            OrderRef::ClientId(id) => params.push(("origClientOrderId", id.clone())),
        }

        let value = self
            .transport
            .request(Method::Delete, ORDER_PATH, params)
            .await?;
        let result = parse_order(value)?;

        info!(symbol, %order_ref, status = ?result.status, "Order cancelled");
        Ok(result)
    }

    /// 미체결 주문 목록을 조회합니다.
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> ExchangeResult<Vec<OrderResult>> {
        let params = symbol_param(symbol);
        let value = self
            .transport
            .request(Method::Get, OPEN_ORDERS_PATH, params)
            .await?;
        parse_orders(value)
    }

    /// 주문 내역을 조회합니다. `limit`이 없으면 [`DEFAULT_HISTORY_LIMIT`].
    ///
    /// 거래소 상한은 거래소가 검증합니다.
    pub async fn get_order_history(
        &self,
        symbol: Option<&str>,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<OrderResult>> {
        let mut params = symbol_param(symbol);
        params.push((
            "limit",
            limit.unwrap_or(DEFAULT_HISTORY_LIMIT).to_string(),
        ));
        let value = self
            .transport
            .request(Method::Get, ALL_ORDERS_PATH, params)
            .await?;
        parse_orders(value)
    }
}

fn symbol_param(symbol: Option<&str>) -> Params {
    match symbol.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => vec![("symbol", s.to_string())],
        None => vec![],
    }
}

fn parse_order(value: Value) -> ExchangeResult<OrderResult> {
    let resp: FuturesOrderResponse = serde_json::from_value(value)?;
    Ok(resp.into_result())
}

fn parse_orders(value: Value) -> ExchangeResult<Vec<OrderResult>> {
    let resp: Vec<FuturesOrderResponse> = serde_json::from_value(value)?;
    Ok(resp.into_iter().map(FuturesOrderResponse::into_result).collect())
}
