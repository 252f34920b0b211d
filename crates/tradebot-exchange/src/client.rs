//! 선물 REST 클라이언트.
//!
//! 설정에서 자격증명과 전송 계층을 한 번 만들고, 모든 서비스가 같은 전송 계층
//! (즉 같은 HTTP 커넥션 풀)을 공유합니다. 전역 인스턴스는 없습니다.

use crate::account::AccountService;
use crate::error::ExchangeResult;
use crate::market::MarketDataService;
use crate::order::OrderService;
use crate::transport::{HttpTransport, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use tradebot_core::{
    AccountSnapshot, ExchangeSettings, MarketTicker, OcoOrderRequest, OrderRequest, OrderResult,
    OrderType, SymbolPrice,
};

/// 시세/계좌/주문 서비스를 묶은 클라이언트. 복제 비용이 낮습니다.
#[derive(Clone)]
pub struct FuturesClient {
    market: MarketDataService,
    account: AccountService,
    orders: OrderService,
}

impl FuturesClient {
    /// 설정으로 클라이언트를 생성합니다.
    ///
    /// # Errors
    /// 자격증명이 비어 있거나 HTTP 클라이언트를 만들 수 없으면 `ExchangeError::Config`.
    pub fn new(settings: &ExchangeSettings) -> ExchangeResult<Self> {
        settings.validate()?;
        let transport = HttpTransport::from_settings(settings)?;

        info!(
            base_url = transport.base_url(),
            testnet = settings.testnet,
            symbols = settings.symbols.len(),
            "Futures client initialized"
        );

        Ok(Self::with_transport(
            Arc::new(transport),
            settings.symbols.clone(),
            settings.order_types.clone(),
        ))
    }

    /// 주어진 전송 계층으로 클라이언트를 생성합니다.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        symbols: Vec<String>,
        order_types: Vec<OrderType>,
    ) -> Self {
        Self {
            market: MarketDataService::new(transport.clone(), symbols),
            account: AccountService::new(transport.clone()),
            orders: OrderService::new(transport, order_types),
        }
    }

    pub fn market(&self) -> &MarketDataService {
        &self.market
    }

    pub fn account(&self) -> &AccountService {
        &self.account
    }

    /// 주문 서비스 (TWAP 스케줄러에 넘길 때 복제해서 사용).
    pub fn orders(&self) -> &OrderService {
        &self.orders
    }

    pub async fn get_market_data(
        &self,
        symbols: Option<&[String]>,
    ) -> ExchangeResult<Vec<MarketTicker>> {
        self.market.get_market_data(symbols).await
    }

    pub async fn get_market_price(&self, symbol: &str) -> ExchangeResult<SymbolPrice> {
        self.market.get_market_price(symbol).await
    }

    pub async fn get_account_info(&self) -> ExchangeResult<AccountSnapshot> {
        self.account.get_account_info().await
    }

    pub async fn get_exchange_info(&self) -> ExchangeResult<Value> {
        self.account.get_exchange_info().await
    }

    pub async fn place_order(&self, req: &OrderRequest) -> ExchangeResult<OrderResult> {
        self.orders.place_order(req).await
    }

    pub async fn place_oco_order(&self, req: &OcoOrderRequest) -> ExchangeResult<Value> {
        self.orders.place_oco_order(req).await
    }

    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<i64>,
        client_order_id: Option<&str>,
    ) -> ExchangeResult<OrderResult> {
        self.orders
            .cancel_order(symbol, order_id, client_order_id)
            .await
    }

    pub async fn get_open_orders(&self, symbol: Option<&str>) -> ExchangeResult<Vec<OrderResult>> {
        self.orders.get_open_orders(symbol).await
    }

    pub async fn get_order_history(
        &self,
        symbol: Option<&str>,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<OrderResult>> {
        self.orders.get_order_history(symbol, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;
    use secrecy::SecretString;

    #[test]
    fn test_missing_credentials_rejected() {
        let settings = ExchangeSettings::default();
        let err = FuturesClient::new(&settings).err().unwrap();
        assert!(matches!(err, ExchangeError::Config(_)));

        let settings = ExchangeSettings {
            api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            FuturesClient::new(&settings),
            Err(ExchangeError::Config(_))
        ));
    }

    #[test]
    fn test_new_with_credentials() {
        let settings = ExchangeSettings {
            api_key: "key".to_string(),
            api_secret: SecretString::new("secret".to_string().into_boxed_str()),
            ..Default::default()
        };
        let client = FuturesClient::new(&settings).unwrap();
        assert_eq!(client.market().symbols().len(), 10);
        assert_eq!(client.orders().supported_types().len(), 6);
    }
}
