/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Bybit adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    BlockingBybitClient,
    BybitClient,
    BybitError,
    ClientConfig,
    Credentials,
    RequestSigner,
    Result,
    SignatureScheme,
    Status,
    Transport,
};

// Re-export all types
pub use types::*;
