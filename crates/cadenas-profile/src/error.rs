//! Error types for `cadenas-profile`.

use thiserror::Error;

/// Errors produced by profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The persisted document could not be parsed — invalid JSON, a
    /// non-object document, a wrong-typed field, undecodable base64 salt,
    /// or an unparseable timestamp. No partially-initialized profile is
    /// ever returned.
    #[error("malformed profile document: {0}")]
    Parse(String),

    /// Serialization to the persisted document form failed.
    #[error("profile serialization failed: {0}")]
    Serialize(String),
}
