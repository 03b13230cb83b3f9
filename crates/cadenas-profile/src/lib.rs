//! `cadenas-profile` — Versioned domain-credential profiles for CADENAS.
//!
//! The persisted record of how each site's credential is generated and
//! tracked: derivation parameters, grouping, tags, expiry, and soft-delete
//! tombstones. Storage is a flat JSON document with stable keys; loading is
//! schema-evolving (missing fields default, unknown keys are ignored), so
//! documents written by older releases keep working.
//!
//! Secret *values* are out of scope — this crate handles generation
//! parameters only. The character-set constants come from
//! [`cadenas_strength`], the same parameters the crack-time estimator
//! reasons about.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod profile;

pub mod record;

pub mod list;

mod time;

pub use error::ProfileError;
pub use list::DomainProfileList;
pub use profile::{
    DomainProfile, DEFAULT_ITERATIONS, DEFAULT_PASSWORD_LENGTH, DEFAULT_SALT,
    DEFAULT_SALT_BASE64, DEFAULT_SALT_LENGTH, GROUP_SEPARATOR, TAG_SEPARATOR,
};
pub use record::ProfileRecord;
