//! The per-domain credential profile.
//!
//! A profile records how one site's credential is generated and tracked:
//! derivation parameters (salt, iterations, length, character sets, the
//! per-position template), display metadata, hierarchical grouping, tags,
//! and lifecycle timestamps. Profiles are never destroyed in place —
//! deletion flips the tombstone flag and leaves everything else for the
//! sync layer to merge on `modified` timestamps.

use std::fmt;
use std::hash::{Hash, Hasher};

use zeroize::Zeroize;

use crate::time;

// ---------------------------------------------------------------------------
// Defaults and separators
// ---------------------------------------------------------------------------

/// Salt applied to records that predate a stored salt.
pub const DEFAULT_SALT: &[u8] = b"pepper";

/// Base64 form of [`DEFAULT_SALT`] as it appears in persisted documents.
pub const DEFAULT_SALT_BASE64: &str = "cGVwcGVy";

/// Derivation iteration count applied to records without one.
pub const DEFAULT_ITERATIONS: u32 = 4096;

/// Generated password length applied to records without one.
pub const DEFAULT_PASSWORD_LENGTH: u32 = 16;

/// Length in bytes of freshly generated salts.
pub const DEFAULT_SALT_LENGTH: u32 = 16;

/// Joins and splits group hierarchy path segments in persisted documents.
/// Reserved: not legal inside a group name.
pub const GROUP_SEPARATOR: char = '/';

/// Joins and splits tags in persisted documents. Reserved: not legal
/// inside a tag.
pub const TAG_SEPARATOR: char = ';';

// ---------------------------------------------------------------------------
// Domain model
// ---------------------------------------------------------------------------

/// Credential profile for a single domain.
///
/// Identity for deduplication and merge is [`unique_name`](Self::unique_name)
/// — equality and hashing use it exclusively, not full field equality.
#[derive(Clone)]
pub struct DomainProfile {
    /// Domain the credential belongs to (e.g. "example.com").
    pub domain_name: String,
    /// Site URL, if distinct from the domain.
    pub url: String,
    /// Login name at the site.
    pub user_name: String,
    /// Pre-existing password imported from before generated credentials.
    /// Opaque to this layer; zeroized on drop and masked in `Debug`.
    pub legacy_password: String,
    /// Free-form notes.
    pub notes: String,
    /// Derivation salt (raw bytes; stored base64-encoded).
    pub salt: Vec<u8>,
    /// Derivation iteration count.
    pub iterations: u32,
    /// Generated password length.
    pub password_length: u32,
    /// Characters eligible for generation.
    pub used_characters: String,
    /// Caller-supplied extra characters extending the eligible set.
    pub extra_characters: String,
    /// Per-position character-class constraints (opaque ASCII template).
    pub password_template: String,
    /// Ordered group path segments, root first.
    pub group_hierarchy: Vec<String>,
    /// Tags attached to this profile.
    pub tags: Vec<String>,
    /// Creation timestamp (ISO 8601 UTC).
    pub created: Option<String>,
    /// Last-modification timestamp (ISO 8601 UTC). Callers bump this on
    /// every edit; the sync layer merges on it.
    pub modified: Option<String>,
    /// Expiry timestamp (ISO 8601 UTC), if the credential expires.
    pub expiry: Option<String>,
    /// Tombstone flag — logically gone, physically retained for sync.
    pub deleted: bool,
}

impl DomainProfile {
    /// A profile for a newly configured domain, stamped with the current
    /// time and carrying all defaults.
    #[must_use]
    pub fn new(domain_name: impl Into<String>) -> Self {
        let now = time::now_iso8601();
        let mut profile = Self::default();
        profile.domain_name = domain_name.into();
        profile.created = Some(now.clone());
        profile.modified = Some(now);
        profile
    }

    /// The deduplication identity: the group path and the domain name
    /// joined on [`GROUP_SEPARATOR`].
    ///
    /// Pure and deterministic — stable across serialization round trips.
    #[must_use]
    pub fn unique_name(&self) -> String {
        if self.group_hierarchy.is_empty() {
            return self.domain_name.clone();
        }
        let mut name = self.group_hierarchy.join(&GROUP_SEPARATOR.to_string());
        name.push(GROUP_SEPARATOR);
        name.push_str(&self.domain_name);
        name
    }

    /// Whether the credential's expiry lies strictly in the past.
    ///
    /// False when no expiry is set; an unparseable stored expiry never
    /// counts as expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expiry
            .as_deref()
            .and_then(time::parse_iso8601)
            .is_some_and(|expiry_secs| expiry_secs < time::current_epoch_secs())
    }

    /// Whether no meaningful field carries data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain_name.is_empty()
            && self.url.is_empty()
            && self.user_name.is_empty()
            && self.legacy_password.is_empty()
            && self.notes.is_empty()
    }

    /// Reset to the empty default state (a freshly constructed profile).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Refresh the modification timestamp to now.
    pub fn touch(&mut self) {
        self.modified = Some(time::now_iso8601());
    }

    /// Tombstone transition: mark the profile deleted.
    ///
    /// Flips only the `deleted` flag — every other field is left for the
    /// sync layer. Idempotent.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Rewrite every group path segment equal to `old` to `new`.
    ///
    /// Other segments and all other fields are untouched; a no-op when
    /// `old` does not occur.
    pub fn replace_group_name(&mut self, old: &str, new: &str) {
        for segment in &mut self.group_hierarchy {
            if segment == old {
                new.clone_into(segment);
            }
        }
    }
}

impl Default for DomainProfile {
    fn default() -> Self {
        Self {
            domain_name: String::new(),
            url: String::new(),
            user_name: String::new(),
            legacy_password: String::new(),
            notes: String::new(),
            salt: DEFAULT_SALT.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            password_length: DEFAULT_PASSWORD_LENGTH,
            used_characters: crate::record::default_used_characters(),
            extra_characters: cadenas_strength::DEFAULT_EXTRA_CHARACTERS.to_string(),
            password_template: String::new(),
            group_hierarchy: Vec::new(),
            tags: Vec::new(),
            created: None,
            modified: None,
            expiry: None,
            deleted: false,
        }
    }
}

/// Deduplication identity only — two profiles are equal iff their
/// [`unique_name`](Self::unique_name)s match.
impl PartialEq for DomainProfile {
    fn eq(&self, other: &Self) -> bool {
        self.unique_name() == other.unique_name()
    }
}

impl Eq for DomainProfile {}

impl Hash for DomainProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique_name().hash(state);
    }
}

/// The legacy secret never reaches logs or debug output.
impl fmt::Debug for DomainProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainProfile")
            .field("domain_name", &self.domain_name)
            .field("url", &self.url)
            .field("user_name", &self.user_name)
            .field("legacy_password", &"***")
            .field("notes", &self.notes)
            .field("iterations", &self.iterations)
            .field("password_length", &self.password_length)
            .field("used_characters", &self.used_characters)
            .field("extra_characters", &self.extra_characters)
            .field("password_template", &self.password_template)
            .field("group_hierarchy", &self.group_hierarchy)
            .field("tags", &self.tags)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .field("expiry", &self.expiry)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}

impl Drop for DomainProfile {
    fn drop(&mut self) {
        self.legacy_password.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomainProfile {
        let mut profile = DomainProfile::new("example.com");
        profile.user_name = "alice".into();
        profile.url = "https://example.com/login".into();
        profile.group_hierarchy = vec!["work".into(), "a".into(), "mail".into()];
        profile.tags = vec!["email".into(), "important".into()];
        profile
    }

    #[test]
    fn unique_name_without_group_is_the_domain() {
        let profile = DomainProfile::new("example.com");
        assert_eq!(profile.unique_name(), "example.com");
    }

    #[test]
    fn unique_name_joins_group_path_and_domain() {
        let profile = sample();
        assert_eq!(profile.unique_name(), "work/a/mail/example.com");
    }

    #[test]
    fn unique_name_is_deterministic() {
        let profile = sample();
        assert_eq!(profile.unique_name(), profile.unique_name());
    }

    #[test]
    fn equality_is_by_unique_name_only() {
        let mut a = sample();
        let mut b = sample();
        b.user_name = "bob".into();
        b.iterations = 9999;
        assert_eq!(a, b, "differing non-identity fields must not matter");

        a.domain_name = "other.org".into();
        assert_ne!(a, b);
    }

    #[test]
    fn tombstone_changes_nothing_else_and_is_idempotent() {
        let mut profile = sample();
        let before = profile.clone();

        profile.mark_deleted();
        assert!(profile.deleted);
        assert_eq!(profile.domain_name, before.domain_name);
        assert_eq!(profile.url, before.url);
        assert_eq!(profile.user_name, before.user_name);
        assert_eq!(profile.notes, before.notes);
        assert_eq!(profile.salt, before.salt);
        assert_eq!(profile.iterations, before.iterations);
        assert_eq!(profile.password_length, before.password_length);
        assert_eq!(profile.used_characters, before.used_characters);
        assert_eq!(profile.extra_characters, before.extra_characters);
        assert_eq!(profile.password_template, before.password_template);
        assert_eq!(profile.group_hierarchy, before.group_hierarchy);
        assert_eq!(profile.tags, before.tags);
        assert_eq!(profile.created, before.created);
        assert_eq!(profile.modified, before.modified);
        assert_eq!(profile.expiry, before.expiry);

        profile.mark_deleted();
        assert!(profile.deleted);
    }

    #[test]
    fn replace_group_name_rewrites_matching_segments() {
        let mut profile = sample();
        profile.replace_group_name("a", "b");
        assert_eq!(profile.group_hierarchy, vec!["work", "b", "mail"]);

        // Absent old name: no-op.
        profile.replace_group_name("absent", "x");
        assert_eq!(profile.group_hierarchy, vec!["work", "b", "mail"]);
    }

    #[test]
    fn expired_with_yesterday_expiry() {
        let mut profile = sample();
        profile.expiry = Some(crate::time::epoch_to_iso8601(
            crate::time::current_epoch_secs() - 86_400,
        ));
        assert!(profile.expired());
    }

    #[test]
    fn not_expired_without_expiry() {
        assert!(!sample().expired());
    }

    #[test]
    fn not_expired_with_future_expiry() {
        let mut profile = sample();
        profile.expiry = Some(crate::time::epoch_to_iso8601(
            crate::time::current_epoch_secs() + 86_400,
        ));
        assert!(!profile.expired());
    }

    #[test]
    fn unparseable_expiry_is_not_expired() {
        let mut profile = sample();
        profile.expiry = Some("garbage".into());
        assert!(!profile.expired());
    }

    #[test]
    fn fresh_profile_is_not_empty_empty_default_is() {
        assert!(!sample().is_empty());
        assert!(DomainProfile::default().is_empty());
    }

    #[test]
    fn clear_resets_to_default() {
        let mut profile = sample();
        profile.clear();
        assert!(profile.is_empty());
        assert_eq!(profile.salt, DEFAULT_SALT);
        assert_eq!(profile.iterations, DEFAULT_ITERATIONS);
        assert!(profile.group_hierarchy.is_empty());
        assert!(profile.created.is_none());
    }

    #[test]
    fn new_stamps_created_and_modified() {
        let profile = DomainProfile::new("example.com");
        assert!(profile.created.is_some());
        assert_eq!(profile.created, profile.modified);
    }

    #[test]
    fn debug_masks_the_legacy_password() {
        let mut profile = sample();
        profile.legacy_password = "hunter2".into();
        let rendered = format!("{profile:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
