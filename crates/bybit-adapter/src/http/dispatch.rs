/*
[INPUT]:  Method, endpoint and the exact payload string to sign
[OUTPUT]: Signed requests on the wire; envelope-checked `result` payloads
[POS]:    HTTP layer - shared primitive behind every public operation
[UPDATE]: When header names, timestamp handling or envelope rules change
*/

use chrono::Utc;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::http::transport::{HttpRequest, RawResponse};
use crate::http::{BybitClient, BybitError, Result};
use crate::types::ApiEnvelope;

pub const HEADER_API_KEY: &str = "X-BAPI-API-KEY";
pub const HEADER_TIMESTAMP: &str = "X-BAPI-TIMESTAMP";
pub const HEADER_SIGN: &str = "X-BAPI-SIGN";
pub const HEADER_RECV_WINDOW: &str = "X-BAPI-RECV-WINDOW";
pub const HEADER_PASSPHRASE: &str = "X-BAPI-PASSPHRASE";

impl BybitClient {
    /// Current epoch milliseconds shifted by the configured offset
    pub(crate) fn timestamp_ms(&self) -> i64 {
        Utc::now().timestamp_millis() + self.config().time_offset_ms
    }

    /// Build a signed request for a fixed timestamp.
    ///
    /// GET payloads become the query string verbatim; anything else is sent as the body.
    /// Either way the transmitted bytes are the signed bytes.
    pub(crate) fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        payload: &str,
        timestamp: i64,
    ) -> Result<HttpRequest> {
        let signer = self.signer();
        let signature = signer.sign_request(timestamp, &method, endpoint, payload)?;
        let credentials = signer.credentials();

        let mut headers = vec![
            (HEADER_API_KEY, credentials.api_key().to_string()),
            (HEADER_TIMESTAMP, timestamp.to_string()),
            (HEADER_SIGN, signature),
            (HEADER_RECV_WINDOW, signer.recv_window_ms().to_string()),
            ("Content-Type", "application/json".to_string()),
        ];
        if let Some(passphrase) = credentials.passphrase() {
            headers.push((HEADER_PASSPHRASE, passphrase.to_string()));
        }

        let (url, body) = if method == Method::GET {
            (self.url(endpoint, payload), None)
        } else {
            (self.url(endpoint, ""), Some(payload.to_string()))
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Sign and dispatch one request, returning the raw response
    pub(crate) async fn send_signed_request(
        &self,
        method: Method,
        endpoint: &str,
        payload: &str,
    ) -> Result<RawResponse> {
        let request = self.build_request(method, endpoint, payload, self.timestamp_ms())?;
        debug!(method = %request.method, url = %request.url, "Bybit request");

        let response = self.transport().execute(request).await?;
        debug!(
            endpoint,
            status = response.status,
            body = %response.body,
            "Bybit response"
        );
        Ok(response)
    }

    /// Dispatch and unwrap the envelope into `T`
    pub(crate) async fn request_result<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        payload: &str,
    ) -> Result<T> {
        let response = self.send_signed_request(method, endpoint, payload).await?;
        let envelope = parse_envelope(&response)?;
        decode_result(envelope)
    }
}

/// Check transport status and `retCode`, returning the envelope on success
pub(crate) fn parse_envelope(response: &RawResponse) -> Result<ApiEnvelope> {
    if !response.is_success() {
        warn!(status = response.status, "Bybit returned non-success status");
        let message = if response.body.trim().is_empty() {
            format!("HTTP {}", response.status)
        } else {
            response.body.clone()
        };
        return Err(BybitError::Api {
            status: response.status,
            message,
        });
    }

    let envelope: ApiEnvelope = serde_json::from_str(&response.body)?;
    if envelope.ret_code != 0 {
        warn!(
            ret_code = envelope.ret_code,
            ret_msg = %envelope.ret_msg,
            "Bybit rejected request"
        );
        return Err(BybitError::Exchange {
            code: envelope.ret_code,
            message: envelope.ret_msg,
        });
    }

    Ok(envelope)
}

pub(crate) fn decode_result<T: DeserializeOwned>(envelope: ApiEnvelope) -> Result<T> {
    serde_json::from_value(envelope.result)
        .map_err(|e| BybitError::InvalidResponse(format!("unexpected result shape: {e}")))
}
