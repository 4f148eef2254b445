/*
[INPUT]:  Fully built HTTP requests (method, URL, headers, body)
[OUTPUT]: Raw HTTP responses (status + decoded body)
[POS]:    HTTP layer - pluggable transport (async or blocking reqwest)
[UPDATE]: When adding transport options or a new execution mode
*/

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Method;

use crate::http::client::ClientConfig;
use crate::http::{BybitError, Result};

/// Request ready for the wire
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response as received, before any envelope handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP request
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse>;
}

/// Pooled async reqwest client
#[derive(Debug, Clone)]
pub struct AsyncTransport {
    client: reqwest::Client,
}

impl AsyncTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);
        if let Some(proxy) = config.proxy_url() {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for AsyncTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Pooled blocking reqwest client.
///
/// `execute` blocks the calling thread for the whole round trip, so it must not be
/// driven from inside an async runtime. Only `BlockingBybitClient` constructs one.
#[derive(Debug, Clone)]
pub(crate) struct BlockingTransport {
    client: reqwest::blocking::Client,
}

impl BlockingTransport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);
        if let Some(proxy) = config.proxy_url() {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for BlockingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(BybitError::from)?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}
