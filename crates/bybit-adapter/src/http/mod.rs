/*
[INPUT]:  Client configuration, credentials and operation arguments
[OUTPUT]: Signed Bybit V5 requests and typed results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod blocking;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod market;
pub mod signature;
pub mod trade;
pub mod transport;

pub use error::{BybitError, Result, Status};
pub use signature::{RequestSigner, SignatureScheme};

pub use blocking::BlockingBybitClient;
pub use client::{BYBIT_BASE_URL, BybitClient, ClientConfig, Credentials, DEFAULT_RECV_WINDOW_MS};
pub use trade::{FillTotals, aggregate_executions, group_executions};
pub use transport::{AsyncTransport, HttpRequest, RawResponse, Transport};
