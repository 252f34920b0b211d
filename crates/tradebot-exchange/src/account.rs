//! 계좌 및 거래소 정보 조회.

use crate::error::ExchangeResult;
use crate::transport::{Method, Transport};
use crate::wire::AccountResponse;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use tradebot_core::AccountSnapshot;

const ACCOUNT_PATH: &str = "/fapi/v2/account";
const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";

#[derive(Clone)]
pub struct AccountService {
    transport: Arc<dyn Transport>,
}

impl AccountService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 잔고와 포지션 스냅샷을 조회합니다. 빈 잔고와 청산된 포지션은 제외됩니다.
    pub async fn get_account_info(&self) -> ExchangeResult<AccountSnapshot> {
        let value = self
            .transport
            .request(Method::Get, ACCOUNT_PATH, vec![])
            .await?;
        let resp: AccountResponse = serde_json::from_value(value)?;
        let snapshot = AccountSnapshot::from(resp);

        debug!(
            assets = snapshot.assets.len(),
            positions = snapshot.positions.len(),
            "Fetched account snapshot"
        );
        Ok(snapshot)
    }

    /// 거래 규칙과 심볼 정보 (원본 JSON).
    pub async fn get_exchange_info(&self) -> ExchangeResult<Value> {
        self.transport
            .request(Method::Get, EXCHANGE_INFO_PATH, vec![])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;
    use crate::mock::RecordingTransport;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_account_info() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(Ok(json!({
            "totalWalletBalance": "250.5",
            "totalUnrealizedProfit": "0",
            "totalMarginBalance": "250.5",
            "availableBalance": "250.5",
            "canTrade": true,
            "assets": [{"asset": "USDT", "walletBalance": "250.5", "unrealizedProfit": "0", "availableBalance": "250.5"}],
            "positions": []
        })));

        let service = AccountService::new(transport.clone());
        let snapshot = service.get_account_info().await.unwrap();
        assert_eq!(snapshot.available_balance, dec!(250.5));
        assert_eq!(snapshot.assets.len(), 1);

        let calls = transport.calls();
        assert_eq!(calls[0].path, "/fapi/v2/account");
        assert!(calls[0].params.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_account_is_parse_error() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(Ok(json!({"assets": "not-a-list"})));

        let err = AccountService::new(transport)
            .get_account_info()
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Parse(_)));
    }

    #[tokio::test]
    async fn test_exchange_info_is_raw() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(Ok(json!({"timezone": "UTC", "symbols": []})));

        let info = AccountService::new(transport.clone())
            .get_exchange_info()
            .await
            .unwrap();
        assert_eq!(info["timezone"], "UTC");
        assert_eq!(transport.calls()[0].path, "/fapi/v1/exchangeInfo");
    }
}
