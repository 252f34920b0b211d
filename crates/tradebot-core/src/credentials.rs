//! API 자격증명.
//!
//! # 보안
//! - 시크릿은 `SecretString`으로 보관하며 서명 시점에만 노출합니다.
//! - `Debug` 구현은 API 키를 마스킹하고 시크릿을 출력하지 않습니다.

use crate::error::{TraderError, TraderResult};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// 클라이언트 수명 동안 변하지 않는 API 키/시크릿 쌍.
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// 자격증명을 생성합니다.
    ///
    /// # Errors
    /// 키 또는 시크릿이 비어 있으면 `TraderError::Config`를 반환합니다.
    pub fn new(api_key: impl Into<String>, api_secret: SecretString) -> TraderResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(TraderError::Config("API key is required".to_string()));
        }
        if api_secret.expose_secret().trim().is_empty() {
            return Err(TraderError::Config("API secret is required".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// API 키 (`X-MBX-APIKEY` 헤더 값).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API 시크릿.
    pub fn api_secret(&self) -> &SecretString {
        &self.api_secret
    }
}

/// API 키를 앞뒤 4자만 남기고 가립니다.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***REDACTED***".to_string()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &mask_key(&self.api_key))
            .field("api_secret", &"***REDACTED***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string().into_boxed_str())
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let err = Credentials::new("", secret("secret")).unwrap_err();
        assert!(err.is_config());

        let err = Credentials::new("key", secret("   ")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_debug_masks_credentials() {
        let creds = Credentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            secret("NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j"),
        )
        .unwrap();

        let debug = format!("{:?}", creds);
        assert!(debug.contains("vmPU...Eh8A"));
        assert!(!debug.contains("NhqPtmdSJYdKjVHjA7PZj4Mge3R5"));
        assert_eq!(creds.api_key().len(), 64);
    }

    #[test]
    fn test_mask_short_key() {
        assert_eq!(mask_key("abc"), "***REDACTED***");
    }
}
