//! 거래소 에러 타입.

use thiserror::Error;
use tradebot_core::TraderError;

/// 에러 메시지와 로그에 포함할 응답 본문의 최대 길이 (문자 수).
pub const MAX_BODY_LEN: usize = 512;

/// 거래소 관련 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 요청 전 로컬 검증 실패 (네트워크 호출 없음)
    #[error("Validation error: {0}")]
    Validation(String),

    /// 연결/타임아웃/본문 읽기 실패
    #[error("Transport error: {0}")]
    Transport(String),

    /// 거래소가 2xx가 아닌 상태로 응답
    #[error("API error (HTTP {status}, code {code:?}): {body}")]
    Api {
        status: u16,
        /// 거래소 `{code, msg}` 본문의 에러 코드
        code: Option<i64>,
        /// 잘린 응답 본문
        body: String,
    },

    /// 성공 응답 본문 파싱 실패
    #[error("Parse error: {0}")]
    Parse(String),

    /// 클라이언트 설정 에러
    #[error("Config error: {0}")]
    Config(String),
}

/// 거래소 작업 결과 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

impl ExchangeError {
    /// 로컬 검증 에러인지 확인.
    pub fn is_validation(&self) -> bool {
        matches!(self, ExchangeError::Validation(_))
    }

    /// 재시도 가능한 에러인지 확인 (전송 실패, 5xx, 429).
    ///
    /// 클라이언트는 스스로 재시도하지 않으며 판단은 호출자에게 맡깁니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExchangeError::Transport(_) => true,
            ExchangeError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP 상태 코드 (API 에러인 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 거래소 에러 코드 (API 에러 본문에 있는 경우).
    pub fn code(&self) -> Option<i64> {
        match self {
            ExchangeError::Api { code, .. } => *code,
            _ => None,
        }
    }
}

/// 응답 본문을 [`MAX_BODY_LEN`] 문자로 자릅니다.
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_LEN {
        body.to_string()
    } else {
        let mut truncated: String = body.chars().take(MAX_BODY_LEN).collect();
        truncated.push_str("...");
        truncated
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        // URL에는 서명이 포함되므로 메시지에서 제거
        let err = err.without_url();
        if err.is_timeout() {
            ExchangeError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            ExchangeError::Transport(format!("connection failed: {}", err))
        } else {
            ExchangeError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Parse(err.to_string())
    }
}

impl From<TraderError> for ExchangeError {
    fn from(err: TraderError) -> Self {
        match err {
            TraderError::Config(msg) => ExchangeError::Config(msg),
            TraderError::Validation(msg) => ExchangeError::Validation(msg),
        }
    }
}
