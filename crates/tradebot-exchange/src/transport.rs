//! 서명된 HTTP 전송 계층.
//!
//! 모든 요청에 `timestamp`(와 설정된 경우 `recvWindow`)를 주입하고 서명한 뒤
//! `X-MBX-APIKEY` 헤더와 함께 전송합니다. GET/DELETE는 쿼리 문자열,
//! POST는 form 본문으로 파라미터를 보냅니다.

use crate::error::{truncate_body, ExchangeError, ExchangeResult};
use crate::signer::{encode_query, Signer};
use crate::wire::ApiErrorBody;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use tradebot_core::{Credentials, ExchangeSettings};

/// 요청 파라미터. 순서가 그대로 전송/서명 순서가 됩니다.
pub type Params = Vec<(&'static str, String)>;

/// HTTP 메서드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 인증된 요청 전송 인터페이스.
///
/// 서비스들은 이 트레이트에만 의존하므로 테스트에서 가짜 구현으로 대체할 수 있습니다.
#[async_trait]
pub trait Transport: Send + Sync {
    /// 서명된 요청을 보내고 JSON 응답을 반환합니다.
    ///
    /// `params`에는 `timestamp`, `recvWindow`, `signature`를 넣지 않습니다.
    async fn request(&self, method: Method, path: &str, params: Params) -> ExchangeResult<Value>;
}

/// reqwest 기반 전송 구현.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
    signer: Signer,
    recv_window: Option<u64>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &tradebot_core::credentials::mask_key(&self.api_key))
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

impl HttpTransport {
    /// 새 전송 계층을 생성합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::Config`를 반환합니다.
    pub fn new(
        credentials: &Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
        recv_window: Option<u64>,
    ) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExchangeError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: credentials.api_key().to_string(),
            signer: Signer::from_credentials(credentials),
            recv_window,
        })
    }

    /// 거래소 설정에서 생성합니다.
    ///
    /// # Errors
    /// 자격증명이 비어 있으면 `ExchangeError::Config`를 반환합니다.
    pub fn from_settings(settings: &ExchangeSettings) -> ExchangeResult<Self> {
        let secret = settings.api_secret.expose_secret().to_string();
        let credentials = Credentials::new(
            settings.api_key.clone(),
            SecretString::new(secret.into_boxed_str()),
        )?;

        Self::new(
            &credentials,
            settings.rest_base_url(),
            Duration::from_secs(settings.request_timeout_secs),
            settings.recv_window,
        )
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 현재 타임스탬프(밀리초) 반환.
    fn timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// 응답 처리. 2xx가 아니면 잘린 본문과 거래소 에러 코드를 담아 반환합니다.
    async fn handle_response(
        method: Method,
        path: &str,
        response: reqwest::Response,
    ) -> ExchangeResult<Value> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let err = ExchangeError::from(e);
            warn!(method = %method, path, error = %err, "Failed to read response body");
            err
        })?;

        if !status.is_success() {
            let truncated = truncate_body(&body);
            warn!(
                method = %method,
                path,
                status = status.as_u16(),
                body = %truncated,
                "Request failed"
            );
            let code = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .map(|e| e.code);
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                code,
                body: truncated,
            });
        }

        debug!(method = %method, path, status = status.as_u16(), "Request succeeded");

        serde_json::from_str(&body).map_err(|e| {
            ExchangeError::Parse(format!("{} - body: {}", e, truncate_body(&body)))
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, path: &str, params: Params) -> ExchangeResult<Value> {
        let mut all_params = params;
        all_params.push(("timestamp", Self::timestamp_ms().to_string()));
        if let Some(recv_window) = self.recv_window {
            all_params.push(("recvWindow", recv_window.to_string()));
        }

        let query = encode_query(&all_params);
        info!(method = %method, path, params = %query, "Sending signed request");

        let signed = self.signer.append_signature(&query);
        let url = format!("{}{}", self.base_url, path);

        let request = match method {
            Method::Get => self.client.get(format!("{}?{}", url, signed)),
            Method::Delete => self.client.delete(format!("{}?{}", url, signed)),
            Method::Post => self
                .client
                .post(&url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(signed),
        };

        let response = request
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                let err = ExchangeError::from(e);
                warn!(method = %method, path, error = %err, "Request failed");
                err
            })?;

        Self::handle_response(method, path, response).await
    }
}
