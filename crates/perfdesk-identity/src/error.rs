//! Error types for the identity layer.

/// Errors that can occur while encoding, decoding, or parsing identity data.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Serializing a value (usually an [`Identity`](crate::Identity) about
    /// to be persisted) failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserializing a value failed: malformed JSON, missing fields, or a
    /// role string outside the known set.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A role name that is not one of the [`Role`](crate::Role) variants.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
}
