/**
 * Record Identifiers
 *
 * Every record in the store is keyed by a 24-character lowercase hex id.
 * Ids arriving over the wire are validated here before any lookup; a string
 * that does not parse is rejected without touching the store.
 */

use std::fmt;
use thiserror::Error;

/// Length of a record id in hex characters (12 bytes).
pub const OBJECT_ID_LEN: usize = 24;

/// Error returned when a string is not a well-formed record id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identifier is not a valid 24-character hex id")]
pub struct InvalidObjectId;

/// A validated 24-hex-character record identifier.
///
/// `ObjectId` is the boundary type: handlers parse incoming path and body
/// ids into it, and the store binds it as plain text. Stored records keep
/// their ids as `String` since they are trusted once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an id from client input.
    ///
    /// Leading and trailing whitespace is ignored and hex digits are
    /// normalized to lowercase.
    pub fn parse(input: &str) -> Result<Self, InvalidObjectId> {
        let input = input.trim();
        if input.len() == OBJECT_ID_LEN && input.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(input.to_ascii_lowercase()))
        } else {
            Err(InvalidObjectId)
        }
    }

    /// Generate a fresh id: 4-byte unix timestamp followed by 8 random bytes.
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp() as u32;
        let random = uuid::Uuid::new_v4();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, yielding the owned hex string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = ObjectId::parse("65a1b2c3d4e5f60718293a4b").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let id = ObjectId::parse("  65A1B2C3D4E5F60718293A4B ").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(ObjectId::parse("xyz"), Err(InvalidObjectId));
        assert_eq!(ObjectId::parse("65a1b2c3d4e5f60718293a4"), Err(InvalidObjectId));
        assert_eq!(ObjectId::parse("65a1b2c3d4e5f60718293a4b0"), Err(InvalidObjectId));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert_eq!(ObjectId::parse("65a1b2c3d4e5f60718293a4g"), Err(InvalidObjectId));
        assert_eq!(ObjectId::parse("65a1b2c3-4e5f60718293a4b"), Err(InvalidObjectId));
    }

    #[test]
    fn test_generate_is_valid() {
        let id = ObjectId::generate();
        assert_eq!(id.as_str().len(), OBJECT_ID_LEN);
        assert!(ObjectId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_unique() {
        let a = ObjectId::generate();
        let b = ObjectId::generate();
        assert_ne!(a, b);
    }
}
