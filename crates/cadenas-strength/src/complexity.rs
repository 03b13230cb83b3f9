//! Character-class complexity levels.
//!
//! A complexity level selects which character classes are eligible for
//! password generation. Levels are cumulative: each level keeps every class
//! enabled by the levels below it, so the alphabet size never shrinks as the
//! level rises. The `extra` class has no fixed size — its character set is
//! supplied by the caller at runtime.

use serde::{Deserialize, Serialize};

use crate::error::StrengthError;

// ---------------------------------------------------------------------------
// Canonical character sets
// ---------------------------------------------------------------------------

/// Decimal digits.
pub const DIGITS: &str = "0123456789";

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default extra (punctuation) characters offered to new profiles.
pub const DEFAULT_EXTRA_CHARACTERS: &str = "#!\"$%&/()[]{}=-_+*<>;:.";

// ---------------------------------------------------------------------------
// Complexity level
// ---------------------------------------------------------------------------

/// A validated complexity level in `0..=MAX`.
///
/// Construction is the single validation gate: a level that exists is a
/// level in range, so downstream code never re-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ComplexityLevel(u8);

impl ComplexityLevel {
    /// The highest valid level (all four classes active).
    pub const MAX: u8 = 3;

    /// The level new selections start at (digits + both letter cases).
    pub const DEFAULT: Self = Self(2);

    /// Validate and wrap a raw level.
    ///
    /// # Errors
    ///
    /// Returns [`StrengthError::ComplexityOutOfRange`] for values above
    /// [`Self::MAX`]. Out-of-range levels are rejected, never clamped.
    pub const fn new(value: u8) -> Result<Self, StrengthError> {
        if value > Self::MAX {
            return Err(StrengthError::ComplexityOutOfRange {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// The raw level value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Resolve this level into its active character classes.
    ///
    /// The ladder is cumulative — every step is a superset of the one below:
    ///
    /// | level | classes |
    /// |-------|---------|
    /// | 0 | digits |
    /// | 1 | digits, lowercase |
    /// | 2 | digits, lowercase, uppercase |
    /// | 3 | digits, lowercase, uppercase, extra |
    #[must_use]
    pub const fn classes(self) -> CharacterClasses {
        CharacterClasses {
            digits: true,
            lowercase: self.0 >= 1,
            uppercase: self.0 >= 2,
            extra: self.0 >= 3,
        }
    }

    /// Alphabet size at this level given the runtime extra-character count.
    ///
    /// Never zero: level 0 keeps the digits class active.
    #[must_use]
    pub const fn alphabet_size(self, extra_char_count: usize) -> usize {
        self.classes().alphabet_size(extra_char_count)
    }
}

impl Default for ComplexityLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for ComplexityLevel {
    type Error = StrengthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComplexityLevel> for u8 {
    fn from(level: ComplexityLevel) -> Self {
        level.value()
    }
}

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// The set of character classes active at a complexity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterClasses {
    /// Decimal digits (0-9).
    pub digits: bool,
    /// Lowercase letters (a-z).
    pub lowercase: bool,
    /// Uppercase letters (A-Z).
    pub uppercase: bool,
    /// Caller-supplied extra characters.
    pub extra: bool,
}

impl CharacterClasses {
    /// Sum of the sizes of the active classes.
    ///
    /// `extra_char_count` is the number of extra characters configured at
    /// runtime; it only contributes when the extra class is active.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // class sizes sum well below usize::MAX
    pub const fn alphabet_size(self, extra_char_count: usize) -> usize {
        let mut size = 0;
        if self.digits {
            size += DIGITS.len();
        }
        if self.lowercase {
            size += LOWERCASE.len();
        }
        if self.uppercase {
            size += UPPERCASE.len();
        }
        if self.extra {
            size += extra_char_count;
        }
        size
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
