//! Collection of domain profiles keyed by unique name.
//!
//! The list is what the editing context holds in memory: one profile per
//! `(group path, domain)` identity, tombstones included. Sync/merge and
//! physical compaction happen elsewhere — this layer only guarantees the
//! dedup identity and keeps vocabularies (groups, tags) queryable.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::error::ProfileError;
use crate::profile::DomainProfile;
use crate::record::ProfileRecord;

/// Profiles keyed by [`DomainProfile::unique_name`].
///
/// Iteration order is the key order, so serialized output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DomainProfileList {
    profiles: BTreeMap<String, DomainProfile>,
}

impl DomainProfileList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// Number of profiles, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the list holds no profiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Insert a profile, replacing any existing profile with the same
    /// unique name. Returns the replaced profile, if any.
    pub fn upsert(&mut self, profile: DomainProfile) -> Option<DomainProfile> {
        self.profiles.insert(profile.unique_name(), profile)
    }

    /// Look up a profile by its unique name.
    #[must_use]
    pub fn get(&self, unique_name: &str) -> Option<&DomainProfile> {
        self.profiles.get(unique_name)
    }

    /// Whether a profile with this unique name exists.
    #[must_use]
    pub fn contains(&self, unique_name: &str) -> bool {
        self.profiles.contains_key(unique_name)
    }

    /// All profiles, tombstones included.
    pub fn iter(&self) -> impl Iterator<Item = &DomainProfile> {
        self.profiles.values()
    }

    /// Only the profiles that are not tombstoned.
    pub fn active(&self) -> impl Iterator<Item = &DomainProfile> {
        self.profiles.values().filter(|profile| !profile.deleted)
    }

    /// Rename a group across the whole list.
    ///
    /// Every profile's matching path segments are rewritten; unique names
    /// change accordingly, so the keying is rebuilt. A rename onto an
    /// existing identity keeps the renamed profile (last write wins).
    pub fn replace_group_name(&mut self, old: &str, new: &str) {
        let profiles = std::mem::take(&mut self.profiles);
        for (_, mut profile) in profiles {
            profile.replace_group_name(old, new);
            self.upsert(profile);
        }
    }

    /// Sorted, deduplicated tag vocabulary across all profiles.
    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        self.profiles
            .values()
            .flat_map(|profile| profile.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted, deduplicated group-segment vocabulary across all profiles.
    #[must_use]
    pub fn all_groups(&self) -> Vec<String> {
        self.profiles
            .values()
            .flat_map(|profile| profile.group_hierarchy.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Serialize the whole list as a JSON array of profile documents.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Serialize`] if JSON conversion fails.
    pub fn to_json(&self) -> Result<Vec<u8>, ProfileError> {
        let records: Vec<ProfileRecord> = self.profiles.values().map(ProfileRecord::from).collect();
        serde_json::to_vec(&records).map_err(|e| ProfileError::Serialize(e.to_string()))
    }

    /// Deserialize a JSON array of profile documents.
    ///
    /// Later array entries with a duplicate unique name replace earlier
    /// ones, matching [`upsert`](Self::upsert) semantics.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] for invalid JSON, a non-array
    /// document, or any entry-level problem.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProfileError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse(e.to_string()))?;
        let Value::Array(entries) = value else {
            return Err(ProfileError::Parse("expected a JSON array".to_string()));
        };

        let mut list = Self::new();
        for entry in entries {
            let record: ProfileRecord =
                serde_json::from_value(entry).map_err(|e| ProfileError::Parse(e.to_string()))?;
            list.upsert(record.try_into()?);
        }
        Ok(list)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
