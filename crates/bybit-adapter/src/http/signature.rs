/*
[INPUT]:  Timestamp, request descriptor and API credentials
[OUTPUT]: HMAC-SHA256 request signatures (hex or base64)
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;

use crate::http::client::Credentials;
use crate::http::{BybitError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Composition of the signed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureScheme {
    /// `timestamp + api_key + recv_window + payload`, hex digest (Bybit V5)
    #[default]
    KeyRecvWindow,
    /// `timestamp + METHOD + endpoint + payload`, base64 digest.
    /// GET payloads are signed as `?query`.
    MethodPath,
}

/// Signs request payloads with the account secret
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    recv_window_ms: u64,
    scheme: SignatureScheme,
}

impl RequestSigner {
    pub fn new(credentials: Credentials, recv_window_ms: u64, scheme: SignatureScheme) -> Self {
        Self {
            credentials,
            recv_window_ms,
            scheme,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn recv_window_ms(&self) -> u64 {
        self.recv_window_ms
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Exact byte sequence that gets hashed
    pub fn canonical_message(
        &self,
        timestamp: i64,
        method: &Method,
        endpoint: &str,
        payload: &str,
    ) -> String {
        match self.scheme {
            SignatureScheme::KeyRecvWindow => format!(
                "{timestamp}{}{}{payload}",
                self.credentials.api_key(),
                self.recv_window_ms
            ),
            SignatureScheme::MethodPath => {
                if *method == Method::GET && !payload.is_empty() {
                    format!("{timestamp}{}{endpoint}?{payload}", method.as_str())
                } else {
                    format!("{timestamp}{}{endpoint}{payload}", method.as_str())
                }
            }
        }
    }

    /// Sign a request according to the configured scheme
    pub fn sign_request(
        &self,
        timestamp: i64,
        method: &Method,
        endpoint: &str,
        payload: &str,
    ) -> Result<String> {
        let message = self.canonical_message(timestamp, method, endpoint, payload);
        let digest = self.digest(message.as_bytes())?;

        Ok(match self.scheme {
            SignatureScheme::KeyRecvWindow => hex::encode(digest),
            SignatureScheme::MethodPath => BASE64.encode(digest),
        })
    }

    fn digest(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key().as_bytes())
            .map_err(|e| BybitError::Config(format!("Invalid HMAC key: {e}")))?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(scheme: SignatureScheme) -> RequestSigner {
        RequestSigner::new(Credentials::new("XXXXXXXXXX", "secret"), 5000, scheme)
    }

    #[test]
    fn test_sign_known_vector() {
        let signer = signer(SignatureScheme::KeyRecvWindow);

        let signature = signer
            .sign_request(
                1_658_384_314_791,
                &Method::GET,
                "/v5/market/tickers",
                "category=option&symbol=BTC-29JUL22-25000-C",
            )
            .unwrap();

        assert_eq!(
            signature,
            "02e9182e346177050f199ce1e0703d738589e3763805ed71590ced65539a73a7"
        );
    }

    #[test]
    fn test_method_path_known_vectors() {
        let signer = signer(SignatureScheme::MethodPath);

        let post = signer
            .sign_request(
                1_700_000_000_000,
                &Method::POST,
                "/v5/order/create",
                r#"{"category":"spot","symbol":"BTCUSDT"}"#,
            )
            .unwrap();
        assert_eq!(post, "t1Bq2yHMDuKsYWundwMa9cbWJICCzjAUbnTkyjAYXgw=");

        let get = signer
            .sign_request(1_700_000_000_000, &Method::GET, "/v5/market/tickers", "category=spot")
            .unwrap();
        assert_eq!(get, "a7a3bJOVd1EkjFPPTjDsgMgVJZvpeBcI0IVyp1k5Crs=");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let signer = signer(SignatureScheme::KeyRecvWindow);
        let body = r#"{"category":"spot","symbol":"BTCUSDT"}"#;

        let first = signer
            .sign_request(1_700_000_000_000, &Method::POST, "/v5/order/create", body)
            .unwrap();
        let second = signer
            .sign_request(1_700_000_000_000, &Method::POST, "/v5/order/create", body)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_reordered_body_changes_signature() {
        for scheme in [SignatureScheme::KeyRecvWindow, SignatureScheme::MethodPath] {
            let signer = signer(scheme);
            let ordered = signer
                .sign_request(
                    1_700_000_000_000,
                    &Method::POST,
                    "/v5/order/create",
                    r#"{"category":"spot","symbol":"BTCUSDT"}"#,
                )
                .unwrap();
            let reordered = signer
                .sign_request(
                    1_700_000_000_000,
                    &Method::POST,
                    "/v5/order/create",
                    r#"{"symbol":"BTCUSDT","category":"spot"}"#,
                )
                .unwrap();

            assert_ne!(ordered, reordered);
        }
    }

    #[test]
    fn test_timestamp_change_changes_signature() {
        let signer = signer(SignatureScheme::KeyRecvWindow);
        let a = signer
            .sign_request(1_700_000_000_000, &Method::GET, "/v5/market/time", "")
            .unwrap();
        let b = signer
            .sign_request(1_700_000_000_001, &Method::GET, "/v5/market/time", "")
            .unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_canonical_message_layout() {
        let two_legged = signer(SignatureScheme::KeyRecvWindow);
        assert_eq!(
            two_legged.canonical_message(1, &Method::GET, "/v5/market/time", "a=b"),
            "1XXXXXXXXXX5000a=b"
        );

        let three_legged = signer(SignatureScheme::MethodPath);
        assert_eq!(
            three_legged.canonical_message(1, &Method::GET, "/v5/market/time", ""),
            "1GET/v5/market/time"
        );
        assert_eq!(
            three_legged.canonical_message(1, &Method::POST, "/v5/order/create", "{}"),
            "1POST/v5/order/create{}"
        );
    }
}
