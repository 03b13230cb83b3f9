//! Persisted document form of a [`DomainProfile`].
//!
//! The on-disk shape is a flat JSON object whose key strings are an external
//! format contract — stored data outlives releases, so the keys below must
//! never change. Loading is schema-evolving: any field a document predates
//! is filled from the default table (the v3-era fields — extras, template,
//! group, expiry date, tags — most commonly), and unknown keys are ignored.
//! Malformed input is a [`ProfileError::Parse`]; a half-built profile is
//! never handed back.

use data_encoding::BASE64;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use cadenas_strength::{DEFAULT_EXTRA_CHARACTERS, DIGITS, LOWERCASE, UPPERCASE};

use crate::error::ProfileError;
use crate::profile::{
    DomainProfile, DEFAULT_ITERATIONS, DEFAULT_PASSWORD_LENGTH, DEFAULT_SALT_BASE64,
    GROUP_SEPARATOR, TAG_SEPARATOR,
};
use crate::time;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// The flat persisted document.
///
/// Every `rename` below is a stable key of the storage format. Defaults are
/// applied per field on load, never reported as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Key `"domain"`.
    #[serde(rename = "domain", default)]
    pub domain: String,

    /// Key `"url"`.
    #[serde(rename = "url", default)]
    pub url: String,

    /// Key `"username"`.
    #[serde(rename = "username", default)]
    pub user_name: String,

    /// Key `"legacyPassword"`.
    #[serde(rename = "legacyPassword", default)]
    pub legacy_password: String,

    /// Key `"notes"`.
    #[serde(rename = "notes", default)]
    pub notes: String,

    /// Key `"salt"` — base64-encoded bytes.
    #[serde(rename = "salt", default = "default_salt_base64")]
    pub salt_base64: String,

    /// Key `"iterations"`.
    #[serde(rename = "iterations", default = "default_iterations")]
    pub iterations: u32,

    /// Key `"length"`.
    #[serde(rename = "length", default = "default_password_length")]
    pub password_length: u32,

    /// Key `"usedCharacters"`.
    #[serde(rename = "usedCharacters", default = "default_used_characters")]
    pub used_characters: String,

    /// Key `"cDate"` — ISO 8601 UTC.
    #[serde(rename = "cDate", default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Key `"mDate"` — ISO 8601 UTC.
    #[serde(rename = "mDate", default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,

    /// Key `"deleted"` — tombstone flag.
    #[serde(rename = "deleted", default)]
    pub deleted: bool,

    // ── v3 fields — absent in older documents, silently defaulted ──
    /// Key `"extras"` (v3).
    #[serde(rename = "extras", default = "default_extra_characters")]
    pub extra_characters: String,

    /// Key `"passwordTemplate"` (v3).
    #[serde(rename = "passwordTemplate", default)]
    pub password_template: String,

    /// Key `"group"` (v3) — path segments joined on [`GROUP_SEPARATOR`].
    #[serde(rename = "group", default)]
    pub group: String,

    /// Key `"expiryDate"` (v3) — ISO 8601 UTC.
    #[serde(rename = "expiryDate", default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,

    /// Key `"tags"` (v3) — joined on [`TAG_SEPARATOR`].
    #[serde(rename = "tags", default)]
    pub tags: String,
}

fn default_salt_base64() -> String {
    DEFAULT_SALT_BASE64.to_string()
}

const fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

const fn default_password_length() -> u32 {
    DEFAULT_PASSWORD_LENGTH
}

pub(crate) fn default_used_characters() -> String {
    format!("{LOWERCASE}{UPPERCASE}{DIGITS}{DEFAULT_EXTRA_CHARACTERS}")
}

fn default_extra_characters() -> String {
    DEFAULT_EXTRA_CHARACTERS.to_string()
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<&DomainProfile> for ProfileRecord {
    fn from(profile: &DomainProfile) -> Self {
        Self {
            domain: profile.domain_name.clone(),
            url: profile.url.clone(),
            user_name: profile.user_name.clone(),
            legacy_password: profile.legacy_password.clone(),
            notes: profile.notes.clone(),
            salt_base64: BASE64.encode(&profile.salt),
            iterations: profile.iterations,
            password_length: profile.password_length,
            used_characters: profile.used_characters.clone(),
            created: profile.created.clone(),
            modified: profile.modified.clone(),
            deleted: profile.deleted,
            extra_characters: profile.extra_characters.clone(),
            password_template: profile.password_template.clone(),
            group: profile.group_hierarchy.join(&GROUP_SEPARATOR.to_string()),
            expiry: profile.expiry.clone(),
            tags: profile.tags.join(&TAG_SEPARATOR.to_string()),
        }
    }
}

impl TryFrom<ProfileRecord> for DomainProfile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let salt = BASE64
            .decode(record.salt_base64.as_bytes())
            .map_err(|e| ProfileError::Parse(format!("invalid base64 salt: {e}")))?;

        validate_timestamp("cDate", record.created.as_deref())?;
        validate_timestamp("mDate", record.modified.as_deref())?;
        validate_timestamp("expiryDate", record.expiry.as_deref())?;

        Ok(Self {
            domain_name: record.domain,
            url: record.url,
            user_name: record.user_name,
            legacy_password: record.legacy_password,
            notes: record.notes,
            salt,
            iterations: record.iterations,
            password_length: record.password_length,
            used_characters: record.used_characters,
            extra_characters: record.extra_characters,
            password_template: record.password_template,
            group_hierarchy: split_joined(&record.group, GROUP_SEPARATOR),
            tags: split_joined(&record.tags, TAG_SEPARATOR),
            created: record.created,
            modified: record.modified,
            expiry: record.expiry,
            deleted: record.deleted,
        })
    }
}

/// Reject a present-but-unparseable timestamp. Absent is fine.
fn validate_timestamp(key: &str, value: Option<&str>) -> Result<(), ProfileError> {
    match value {
        Some(raw) if time::parse_iso8601(raw).is_none() => Err(ProfileError::Parse(format!(
            "invalid timestamp in \"{key}\": {raw}"
        ))),
        _ => Ok(()),
    }
}

/// Split a separator-joined string, dropping empty segments (an empty
/// string round-trips to an empty list).
fn split_joined(joined: &str, separator: char) -> Vec<String> {
    joined
        .split(separator)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Serialization surface
// ---------------------------------------------------------------------------

impl DomainProfile {
    /// Serialize to the flat key/value document.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Serialize`] if JSON conversion fails.
    pub fn to_map(&self) -> Result<Map<String, Value>, ProfileError> {
        match serde_json::to_value(ProfileRecord::from(self)) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ProfileError::Serialize(format!(
                "expected an object, produced {other:?}"
            ))),
            Err(e) => Err(ProfileError::Serialize(e.to_string())),
        }
    }

    /// Serialize to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Serialize`] if JSON conversion fails.
    pub fn to_json(&self) -> Result<Vec<u8>, ProfileError> {
        serde_json::to_vec(&ProfileRecord::from(self))
            .map_err(|e| ProfileError::Serialize(e.to_string()))
    }

    /// Deserialize from a flat key/value document.
    ///
    /// Missing fields are defaulted (older documents load cleanly); unknown
    /// keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] for wrong-typed fields, undecodable
    /// salt, or unparseable timestamps.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ProfileError> {
        let record: ProfileRecord = serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| ProfileError::Parse(e.to_string()))?;
        record.try_into()
    }

    /// Deserialize from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] for invalid JSON, a non-object
    /// document, or any field-level problem (see [`Self::from_map`]).
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProfileError> {
        let record: ProfileRecord =
            serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse(e.to_string()))?;
        record.try_into()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DEFAULT_SALT;

    fn sample() -> DomainProfile {
        let mut profile = DomainProfile::new("example.com");
        profile.url = "https://example.com".into();
        profile.user_name = "alice".into();
        profile.legacy_password = "old-secret".into();
        profile.notes = "primary account".into();
        profile.salt = vec![0x01, 0x02, 0xfe, 0xff];
        profile.iterations = 8192;
        profile.password_length = 24;
        profile.password_template = "xxxaAnno".into();
        profile.group_hierarchy = vec!["work".into(), "mail".into()];
        profile.tags = vec!["email".into(), "important".into()];
        profile.expiry = Some("2027-01-01T00:00:00Z".into());
        profile
    }

    #[test]
    fn default_salt_base64_matches_default_salt() {
        assert_eq!(BASE64.encode(DEFAULT_SALT), DEFAULT_SALT_BASE64);
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let original = sample();
        let loaded = DomainProfile::from_json(&original.to_json().expect("serialize"))
            .expect("deserialize");

        assert_eq!(loaded.domain_name, original.domain_name);
        assert_eq!(loaded.url, original.url);
        assert_eq!(loaded.user_name, original.user_name);
        assert_eq!(loaded.legacy_password, original.legacy_password);
        assert_eq!(loaded.notes, original.notes);
        assert_eq!(loaded.salt, original.salt);
        assert_eq!(loaded.iterations, original.iterations);
        assert_eq!(loaded.password_length, original.password_length);
        assert_eq!(loaded.used_characters, original.used_characters);
        assert_eq!(loaded.extra_characters, original.extra_characters);
        assert_eq!(loaded.password_template, original.password_template);
        assert_eq!(loaded.group_hierarchy, original.group_hierarchy);
        assert_eq!(loaded.tags, original.tags);
        assert_eq!(loaded.created, original.created);
        assert_eq!(loaded.modified, original.modified);
        assert_eq!(loaded.expiry, original.expiry);
        assert_eq!(loaded.deleted, original.deleted);
        assert_eq!(loaded.unique_name(), original.unique_name());
    }

    #[test]
    fn map_roundtrip_matches_json_roundtrip() {
        let original = sample();
        let map = original.to_map().expect("to_map");
        let loaded = DomainProfile::from_map(&map).expect("from_map");
        assert_eq!(loaded.unique_name(), original.unique_name());
        assert_eq!(loaded.salt, original.salt);
    }

    #[test]
    fn stable_keys_appear_in_the_document() {
        let map = sample().to_map().expect("to_map");
        for key in [
            "domain",
            "url",
            "username",
            "legacyPassword",
            "notes",
            "salt",
            "iterations",
            "length",
            "usedCharacters",
            "cDate",
            "mDate",
            "deleted",
            "extras",
            "passwordTemplate",
            "group",
            "expiryDate",
            "tags",
        ] {
            assert!(map.contains_key(key), "missing stable key {key}");
        }
    }

    #[test]
    fn salt_is_stored_base64() {
        let map = sample().to_map().expect("to_map");
        assert_eq!(
            map.get("salt").and_then(Value::as_str),
            Some(BASE64.encode(&sample().salt).as_str())
        );
    }

    #[test]
    fn group_and_tags_are_stored_joined() {
        let map = sample().to_map().expect("to_map");
        assert_eq!(map.get("group").and_then(Value::as_str), Some("work/mail"));
        assert_eq!(
            map.get("tags").and_then(Value::as_str),
            Some("email;important")
        );
    }

    #[test]
    fn pre_v3_document_loads_with_defaults() {
        // No extras, template, group, expiry date, or tags — an older
        // document must load without error.
        let json = br#"{
            "domain": "legacy.example.com",
            "username": "bob",
            "salt": "AAECAw==",
            "iterations": 2048,
            "length": 12,
            "usedCharacters": "abc123"
        }"#;
        let profile = DomainProfile::from_json(json).expect("older document loads");

        assert_eq!(profile.domain_name, "legacy.example.com");
        assert_eq!(profile.salt, vec![0, 1, 2, 3]);
        assert_eq!(profile.iterations, 2048);
        assert_eq!(profile.password_length, 12);
        assert_eq!(profile.extra_characters, DEFAULT_EXTRA_CHARACTERS);
        assert!(profile.password_template.is_empty());
        assert!(profile.group_hierarchy.is_empty());
        assert!(profile.tags.is_empty());
        assert!(profile.expiry.is_none());
        assert!(!profile.deleted);
    }

    #[test]
    fn minimal_document_gets_the_full_default_table() {
        let profile = DomainProfile::from_json(b"{}").expect("empty object loads");
        assert_eq!(profile.salt, DEFAULT_SALT);
        assert_eq!(profile.iterations, DEFAULT_ITERATIONS);
        assert_eq!(profile.password_length, DEFAULT_PASSWORD_LENGTH);
        assert_eq!(profile.used_characters, default_used_characters());
        assert!(profile.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let json = br#"{"domain": "x.org", "futureField": [1, 2, 3]}"#;
        let profile = DomainProfile::from_json(json).expect("unknown keys ignored");
        assert_eq!(profile.domain_name, "x.org");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = DomainProfile::from_json(b"{ not json }}").unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn non_object_document_is_a_parse_error() {
        assert!(DomainProfile::from_json(b"[1, 2, 3]").is_err());
        assert!(DomainProfile::from_json(b"42").is_err());
    }

    #[test]
    fn wrong_typed_field_is_a_parse_error() {
        let err = DomainProfile::from_json(br#"{"iterations": "lots"}"#).unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn undecodable_salt_is_a_parse_error() {
        let err = DomainProfile::from_json(br#"{"salt": "!!not base64!!"}"#).unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn unparseable_expiry_is_a_parse_error() {
        let err =
            DomainProfile::from_json(br#"{"expiryDate": "next tuesday"}"#).unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn empty_group_and_tags_roundtrip_to_empty_lists() {
        let profile = DomainProfile::from_json(br#"{"group": "", "tags": ""}"#).expect("loads");
        assert!(profile.group_hierarchy.is_empty());
        assert!(profile.tags.is_empty());
    }
}
