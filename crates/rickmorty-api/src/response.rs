//! Response body decoding
//!
//! The catalog API reports failures as a JSON envelope `{"error": "..."}`,
//! sometimes with a 2xx status and sometimes without, so decoding never keys
//! off the HTTP status. A body that fails to decode as the expected type is
//! re-tried as an envelope; only when that also fails does the original
//! decode error propagate.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use rickmorty_core::{Error, Result};

/// Server-reported structured error.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Decode a response body as `T`, falling back to the error envelope.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    match serde_json::from_slice::<T>(body) {
        Ok(value) => Ok(value),
        Err(decode_err) => match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => Err(Error::remote(envelope.error)),
            Err(_) => Err(Error::Decode(decode_err)),
        },
    }
}
