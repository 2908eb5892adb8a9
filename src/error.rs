//! Error types for parsing, writing and record binding.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is the flat [`Error`] enum. The variants fall into four families:
//!
//! - **Parse errors**: [`Error::NoSection`] and [`Error::CouldNotParse`] carry the
//!   offending line (and its 1-based number). Parsing stops at the first one.
//! - **Section errors**: [`Error::NonexistentSection`] and [`Error::SectionExists`]
//!   are raised by binding operations that need a section to exist, or not to.
//! - **Record errors**: [`Error::NonexistentField`], [`Error::FieldIsNotStruct`],
//!   [`Error::CannotSet`] and [`Error::UnsupportedType`] name the field that did
//!   not fit.
//! - **Format errors**: [`Error::Format`] wraps a [`ValueError`] raised while
//!   coercing a string value into a field's kind.
//!
//! Store mutations never fail; they report whether anything changed with a
//! `bool` instead.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::{Config, Error};
//!
//! let err = "option=value\n".parse::<Config>().unwrap_err();
//! assert!(matches!(err, Error::NoSection { number: 1, .. }));
//! assert_eq!(err.line(), Some("option=value"));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents every failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An option line appeared before any section header.
    #[error("no section present before line {number}: {line:?}")]
    NoSection { number: usize, line: String },

    /// A line is neither a comment, a header nor an `option=value` pair.
    #[error("could not parse line {number}: {line:?}")]
    CouldNotParse { number: usize, line: String },

    /// The requested section is not in the configuration.
    #[error("section {section:?} does not exist")]
    NonexistentSection { section: String },

    /// The section to generate is already in the configuration.
    #[error("section {section:?} already exists")]
    SectionExists { section: String },

    /// The record has no field matching an option or section name.
    #[error("field {field:?} does not exist")]
    NonexistentField { field: String },

    /// A section maps onto a field that is not itself a record.
    #[error("field {field:?} is not a record")]
    FieldIsNotStruct { field: String },

    /// The field exists but cannot be assigned.
    #[error("cannot set field {field:?}")]
    CannotSet { field: String },

    /// The field's kind has no textual representation.
    #[error("type of {field:?} is unsupported")]
    UnsupportedType { field: String },

    /// A value could not be coerced into the field's kind.
    #[error("value {value:?} for option {field:?} is malformed: {source}")]
    Format {
        field: String,
        value: String,
        #[source]
        source: ValueError,
    },

    /// Reading or writing the underlying stream failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Custom error raised through serde.
    #[error("{0}")]
    Custom(String),
}

/// Why a string value could not be coerced into a field's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The text is not a valid literal of the target kind.
    #[error("invalid syntax")]
    Syntax,
    /// The literal does not fit in the target width.
    #[error("value out of range")]
    Range,
}

impl Error {
    pub(crate) fn no_section(number: usize, line: &str) -> Self {
        Error::NoSection {
            number,
            line: line.to_string(),
        }
    }

    pub(crate) fn could_not_parse(number: usize, line: &str) -> Self {
        Error::CouldNotParse {
            number,
            line: line.to_string(),
        }
    }

    pub(crate) fn nonexistent_section(section: &str) -> Self {
        Error::NonexistentSection {
            section: section.to_string(),
        }
    }

    pub(crate) fn section_exists(section: &str) -> Self {
        Error::SectionExists {
            section: section.to_string(),
        }
    }

    pub(crate) fn nonexistent_field(field: &str) -> Self {
        Error::NonexistentField {
            field: field.to_string(),
        }
    }

    pub(crate) fn field_is_not_struct(field: &str) -> Self {
        Error::FieldIsNotStruct {
            field: field.to_string(),
        }
    }

    pub(crate) fn cannot_set(field: &str) -> Self {
        Error::CannotSet {
            field: field.to_string(),
        }
    }

    pub(crate) fn unsupported_type(field: &str) -> Self {
        Error::UnsupportedType {
            field: field.to_string(),
        }
    }

    pub(crate) fn format(field: &str, value: &str, source: ValueError) -> Self {
        Error::Format {
            field: field.to_string(),
            value: value.to_string(),
            source,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingot::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert_eq!(err.to_string(), "something went wrong");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the offending line of a parse error.
    #[must_use]
    pub fn line(&self) -> Option<&str> {
        match self {
            Error::NoSection { line, .. } | Error::CouldNotParse { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Returns the field or option name a record or format error refers to.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::NonexistentField { field }
            | Error::FieldIsNotStruct { field }
            | Error::CannotSet { field }
            | Error::UnsupportedType { field }
            | Error::Format { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Returns `true` for errors raised while parsing text.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::NoSection { .. } | Error::CouldNotParse { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = Error::no_section(1, "option=value");
        assert_eq!(
            err.to_string(),
            "no section present before line 1: \"option=value\""
        );
        assert!(err.is_parse());

        let err = Error::could_not_parse(2, "badline");
        assert_eq!(err.to_string(), "could not parse line 2: \"badline\"");
        assert_eq!(err.line(), Some("badline"));
    }

    #[test]
    fn test_format_error_names_option_and_value() {
        let err = Error::format("Int8", "300", ValueError::Range);
        assert_eq!(
            err.to_string(),
            "value \"300\" for option \"Int8\" is malformed: value out of range"
        );
        assert_eq!(err.field(), Some("Int8"));
        assert!(!err.is_parse());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.line(), None);
    }
}
