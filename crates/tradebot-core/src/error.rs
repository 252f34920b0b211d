//! 트레이딩 클라이언트의 핵심 에러 타입.

use thiserror::Error;

/// 핵심 트레이딩 에러.
#[derive(Debug, Error)]
pub enum TraderError {
    /// 설정 에러 (자격증명 누락 등)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력 (필수 필드 누락, 범위 위반)
    #[error("검증 에러: {0}")]
    Validation(String),
}

/// 트레이딩 작업을 위한 Result 타입.
pub type TraderResult<T> = Result<T, TraderError>;

impl TraderError {
    /// 설정 에러인지 확인합니다.
    pub fn is_config(&self) -> bool {
        matches!(self, TraderError::Config(_))
    }

    /// 검증 에러인지 확인합니다.
    pub fn is_validation(&self) -> bool {
        matches!(self, TraderError::Validation(_))
    }
}

impl From<config::ConfigError> for TraderError {
    fn from(err: config::ConfigError) -> Self {
        TraderError::Config(err.to_string())
    }
}
