//! 요청 서명.
//!
//! 파라미터를 전송되는 순서 그대로 `application/x-www-form-urlencoded` 문자열로
//! 직렬화하고, 계정 시크릿을 키로 한 HMAC-SHA256 다이제스트를 소문자 hex로 반환합니다.
//!
//! # 보안
//! 시크릿과 서명은 어떤 로그에도 남기지 않습니다.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::fmt;
use tradebot_core::Credentials;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// 파라미터 목록을 순서를 유지한 쿼리 문자열로 직렬화합니다.
pub fn encode_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// HMAC-SHA256 요청 서명기.
pub struct Signer {
    secret: SecretString,
}

impl Signer {
    /// 시크릿으로 서명기를 생성합니다.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// 자격증명의 시크릿으로 서명기를 생성합니다.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        let secret = credentials.api_secret().expose_secret().to_string();
        Self::new(SecretString::new(secret.into_boxed_str()))
    }

    /// 파라미터 목록에 서명합니다.
    pub fn sign<K, V>(&self, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.sign_query(&encode_query(params))
    }

    /// 이미 직렬화된 쿼리 문자열에 서명합니다.
    pub fn sign_query(&self, query: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// `query&signature=...` 형태의 서명된 문자열을 반환합니다.
    ///
    /// `signature`는 항상 마지막 파라미터입니다.
    pub fn signed_query<K, V>(&self, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.append_signature(&encode_query(params))
    }

    /// 직렬화된 쿼리 문자열 끝에 `signature`를 붙입니다.
    pub fn append_signature(&self, query: &str) -> String {
        let signature = self.sign_query(query);
        if query.is_empty() {
            format!("signature={}", signature)
        } else {
            format!("{}&signature={}", query, signature)
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &"***REDACTED***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

    fn signer() -> Signer {
        Signer::new(SecretString::new(SECRET.to_string().into_boxed_str()))
    }

    #[test]
    fn test_sign() {
        // 거래소 문서의 예제 벡터
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            signer().sign_query(query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_sign_params_matches_query() {
        let params = [
            ("symbol", "LTCBTC"),
            ("side", "BUY"),
            ("type", "LIMIT"),
            ("timeInForce", "GTC"),
            ("quantity", "1"),
            ("price", "0.1"),
            ("recvWindow", "5000"),
            ("timestamp", "1499827319559"),
        ];
        assert_eq!(
            signer().sign(&params),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_encode_query_keeps_order_and_escapes() {
        let params = [("symbol", "BTCUSDT"), ("newClientOrderId", "a b&c")];
        assert_eq!(
            encode_query(&params),
            "symbol=BTCUSDT&newClientOrderId=a+b%26c"
        );
    }

    #[test]
    fn test_signed_query_appends_signature_last() {
        let signed = signer().signed_query(&[("symbol", "BTCUSDT"), ("timestamp", "1")]);
        let (query, signature) = signed.rsplit_once("&signature=").unwrap();
        assert_eq!(query, "symbol=BTCUSDT&timestamp=1");
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn test_append_signature_matches_signed_query() {
        let params = [("symbol", "BTCUSDT"), ("timestamp", "1")];
        let query = encode_query(&params);
        assert_eq!(signer().append_signature(&query), signer().signed_query(&params));

        let bare = signer().append_signature("");
        assert!(bare.starts_with("signature="));
        assert_eq!(bare.len(), "signature=".len() + 64);
    }

    #[test]
    fn test_debug_hides_secret() {
        assert!(!format!("{:?}", signer()).contains(SECRET));
    }

    proptest! {
        #[test]
        fn prop_sign_is_deterministic(symbol in "[A-Z]{3,10}", ts in 0u64..u64::MAX) {
            let params = [("symbol", symbol), ("timestamp", ts.to_string())];
            prop_assert_eq!(signer().sign(&params), signer().sign(&params));
        }

        #[test]
        fn prop_changed_value_changes_signature(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            prop_assume!(a != b);
            let first = signer().sign(&[("quantity", a.to_string())]);
            let second = signer().sign(&[("quantity", b.to_string())]);
            prop_assert_ne!(first, second);
        }
    }
}
