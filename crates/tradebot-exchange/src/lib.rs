//! USDT 무기한 선물 REST API 커넥터.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `Signer`: HMAC-SHA256 요청 서명
//! - `Transport` trait와 reqwest 기반 `HttpTransport`
//! - 시세, 계좌, 주문 서비스
//! - 서비스를 묶은 `FuturesClient`

pub mod account;
pub mod client;
pub mod error;
pub mod market;
pub mod order;
pub mod signer;
pub mod transport;
mod wire;

#[cfg(test)]
mod mock;

pub use account::AccountService;
pub use client::FuturesClient;
pub use error::*;
pub use market::MarketDataService;
pub use order::{OrderService, DEFAULT_HISTORY_LIMIT};
pub use signer::{encode_query, Signer};
pub use transport::{HttpTransport, Method, Params, Transport};
