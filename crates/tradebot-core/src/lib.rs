//! # Tradebot Core
//!
//! 선물 트레이딩 클라이언트의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다른 크레이트 전반에서 사용되는 기본 타입을 제공합니다:
//! - 주문 요청/결과 및 주문 유형
//! - 시세 및 계좌 스냅샷
//! - TWAP 실행 계획
//! - API 자격증명
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use credentials::Credentials;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
