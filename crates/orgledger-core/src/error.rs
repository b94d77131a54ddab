//! Error types for the core crate.

use thiserror::Error;

/// Errors from encoding or decoding record envelopes.
///
/// Decode failures are fatal for single-record reads but degrade a single
/// entry during a history scan.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The record could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The bytes could not be deserialized into a record.
    #[error("decode error: {0}")]
    Decode(String),
}
