//! 시세 조회 서비스.

use crate::error::{ExchangeError, ExchangeResult};
use crate::transport::{Method, Transport};
use crate::wire::{PriceResponse, Ticker24hResponse};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use tradebot_core::{MarketTicker, SymbolPrice};

const TICKER_24H_PATH: &str = "/fapi/v1/ticker/24hr";
const TICKER_PRICE_PATH: &str = "/fapi/v1/ticker/price";

/// 24시간 시세와 최신 가격 조회.
#[derive(Clone)]
pub struct MarketDataService {
    transport: Arc<dyn Transport>,
    symbols: Vec<String>,
}

impl MarketDataService {
    /// `symbols`는 심볼을 지정하지 않은 조회에 쓰는 기본 유니버스입니다.
    pub fn new(transport: Arc<dyn Transport>, symbols: Vec<String>) -> Self {
        Self { transport, symbols }
    }

    /// 기본 심볼 유니버스.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// 여러 심볼의 24시간 시세를 요청 순서대로 조회합니다.
    ///
    /// `symbols`가 없거나 비어 있으면 기본 유니버스를 사용합니다.
    /// 하나라도 실패하면 전체가 실패합니다.
    pub async fn get_market_data(
        &self,
        symbols: Option<&[String]>,
    ) -> ExchangeResult<Vec<MarketTicker>> {
        let symbols = match symbols {
            Some(list) if !list.is_empty() => list,
            _ => self.symbols.as_slice(),
        };

        let mut tickers = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            tickers.push(self.get_ticker(symbol).await?);
        }

        debug!(count = tickers.len(), "Fetched market data");
        Ok(tickers)
    }

    /// 단일 심볼의 24시간 시세.
    pub async fn get_ticker(&self, symbol: &str) -> ExchangeResult<MarketTicker> {
        let symbol = require_symbol(symbol)?;
        let value = self
            .transport
            .request(Method::Get, TICKER_24H_PATH, vec![("symbol", symbol)])
            .await?;
        let resp: Ticker24hResponse = serde_json::from_value(value)?;
        Ok(resp.into_ticker(Utc::now()))
    }

    /// 심볼의 최신 가격.
    pub async fn get_market_price(&self, symbol: &str) -> ExchangeResult<SymbolPrice> {
        let symbol = require_symbol(symbol)?;
        let value = self
            .transport
            .request(Method::Get, TICKER_PRICE_PATH, vec![("symbol", symbol)])
            .await?;
        let resp: PriceResponse = serde_json::from_value(value)?;
        Ok(resp.into())
    }
}

fn require_symbol(symbol: &str) -> ExchangeResult<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ExchangeError::Validation("symbol is required".to_string()));
    }
    Ok(symbol.to_uppercase())
}
