//! Binding policy.
//!
//! [`Policy`] decides what populating a record does when an option has no
//! matching field, the field cannot be assigned, or the value does not parse:
//!
//! - [`Policy::Strict`] stops at the first mismatch and returns it;
//! - [`Policy::Lenient`] skips the mismatch and carries on.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::Policy;
//!
//! assert_eq!(Policy::default(), Policy::Strict);
//! assert_eq!(Policy::from(false), Policy::Lenient);
//! assert!(Policy::Strict.is_strict());
//! ```

/// How binding treats name and type mismatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Every mismatch is an error.
    #[default]
    Strict,
    /// Mismatches are skipped; the affected field keeps its current value.
    Lenient,
}

impl Policy {
    /// Returns `true` for [`Policy::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Policy::Strict)
    }
}

impl From<bool> for Policy {
    /// `true` selects [`Policy::Strict`].
    fn from(strict: bool) -> Self {
        if strict {
            Policy::Strict
        } else {
            Policy::Lenient
        }
    }
}
