//! Codec trait and implementations for persisted values.
//!
//! Local storage only holds strings, so anything richer than a token (the
//! signed-in [`Identity`](crate::Identity), for one) has to be encoded on the
//! way in and decoded on the way out. The session manager is handed a
//! [`Codec`] and never sees the format.

use serde::{Serialize, de::DeserializeOwned};

use crate::IdentityError;

/// Encodes Rust values to strings and decodes them back.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a string.
    ///
    /// # Errors
    /// Returns `IdentityError::Encode` if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, IdentityError>;

    /// Deserializes a string back into a value.
    ///
    /// # Errors
    /// Returns `IdentityError::Decode` if the text is malformed or doesn't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, IdentityError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON matches what the web client wrote into browser local storage, so a
/// persisted `user` entry stays readable by hand.
///
/// ## Example
///
/// ```rust
/// use perfdesk_identity::{Codec, Identity, JsonCodec, Role, UserId};
///
/// let codec = JsonCodec;
/// let identity = Identity {
///     id: UserId::new("u-1"),
///     name: "Ada".into(),
///     role: Role::Manager,
///     email: None,
/// };
///
/// let text = codec.encode(&identity).unwrap();
/// let decoded: Identity = codec.decode(&text).unwrap();
/// assert_eq!(identity, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, IdentityError> {
        serde_json::to_string(value).map_err(IdentityError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, IdentityError> {
        serde_json::from_str(data).map_err(IdentityError::Decode)
    }
}
