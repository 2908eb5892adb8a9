//! Binding between a [`Config`] and typed [`Record`]s.
//!
//! Two directions are supported:
//!
//! - **Populate** ([`Config::populate_section`], [`Config::populate`]) copies
//!   option values into record fields, coercing each string into the field's
//!   kind. The [`Policy`] decides whether mismatches are errors or are skipped.
//! - **Generate** ([`Config::generate_section`], [`Config::generate`],
//!   [`Config::from_record`]) adds sections built from record fields, in field
//!   declaration order. Generating never merges into an existing section.
//!
//! Field names are matched against option and section names after
//! normalization, so a field `max_history` binds to the option `max_history`
//! (stored as `Max_history`).
//!
//! ## Examples
//!
//! ```rust
//! use ingot::{record, Config, Policy};
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Types {
//!         pub flag: bool,
//!         pub count: i32,
//!         pub name: String,
//!     }
//! }
//!
//! let original = Types { flag: true, count: -1, name: "test".to_string() };
//! let mut config = Config::new();
//! config.generate_section("types", &original).unwrap();
//! assert_eq!(config.to_string(), "[types]\nflag=true\ncount=-1\nname=test\n");
//!
//! let mut copy = Types::default();
//! config.populate_section("types", &mut copy, Policy::Strict).unwrap();
//! assert_eq!(copy, original);
//! ```

use crate::map::Section;
use crate::name::normalize;
use crate::{Config, Error, Field, FieldMut, Policy, Record, Result, ValueError};
use std::num::IntErrorKind;
use tracing::{debug, trace};

impl Config {
    /// Populates `record` from the options of `section`.
    ///
    /// Each option is assigned to the field with the same (normalized) name.
    /// Fields of unsupported kinds, nested records included, are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonexistentSection`] if the section is missing. Under
    /// [`Policy::Strict`] also returns [`Error::NonexistentField`],
    /// [`Error::CannotSet`] or [`Error::Format`] for the first option that does
    /// not fit; under [`Policy::Lenient`] those options are skipped.
    pub fn populate_section(
        &self,
        section: &str,
        record: &mut dyn Record,
        policy: Policy,
    ) -> Result<()> {
        let options = self
            .section(section)
            .ok_or_else(|| Error::nonexistent_section(section))?;
        populate_record(section, options, record, policy)
    }

    /// Populates every nested record of `record` from the section of the same name.
    ///
    /// # Errors
    ///
    /// Under [`Policy::Strict`] returns [`Error::NonexistentField`] for a section
    /// with no matching field, [`Error::FieldIsNotStruct`] when that field is
    /// not a record, and any error [`Config::populate_section`] would return for
    /// its options. Under [`Policy::Lenient`] such sections and options are
    /// skipped.
    pub fn populate(&self, record: &mut dyn Record, policy: Policy) -> Result<()> {
        for (section, options) in self.sections() {
            match field_slot(record, section) {
                Some(FieldMut::Record(nested)) => {
                    populate_record(section, options, nested, policy)?;
                }
                Some(FieldMut::Locked) => reject(policy, section, Error::cannot_set(section))?,
                Some(_) => reject(policy, section, Error::field_is_not_struct(section))?,
                None => reject(policy, section, Error::nonexistent_field(section))?,
            }
        }
        Ok(())
    }

    /// Adds `section` with one option per field of `record`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionExists`] if the section is already present, and
    /// [`Error::UnsupportedType`] for the first field with no textual form. The
    /// options added before that field stay in place.
    pub fn generate_section(&mut self, section: &str, record: &dyn Record) -> Result<()> {
        if !self.add_section(section) {
            return Err(Error::section_exists(section));
        }
        for &name in record.field_names() {
            let value = record
                .field(name)
                .and_then(format_field)
                .ok_or_else(|| Error::unsupported_type(name))?;
            self.add_option(section, name, value);
        }
        trace!(section, fields = record.field_names().len(), "generated section");
        Ok(())
    }

    /// Adds one section per top-level field of `record`, each generated from the
    /// nested record held by that field.
    ///
    /// There is no rollback: sections added before a failure remain. Generate
    /// into a scratch configuration, or use [`Config::from_record`], when the
    /// result must be all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldIsNotStruct`] for a top-level field that is not a
    /// record, before any section is added. Otherwise returns any error of
    /// [`Config::generate_section`].
    pub fn generate(&mut self, record: &dyn Record) -> Result<()> {
        let scalar = record
            .field_names()
            .iter()
            .find(|&&name| !matches!(record.field(name), Some(Field::Record(_))));
        if let Some(&name) = scalar {
            return Err(Error::field_is_not_struct(name));
        }

        for &name in record.field_names() {
            match record.field(name) {
                Some(Field::Record(nested)) => self.generate_section(name, nested)?,
                _ => return Err(Error::field_is_not_struct(name)),
            }
        }
        debug!(sections = self.len(), "generated configuration from record");
        Ok(())
    }

    /// Builds a new configuration from `record`, as [`Config::generate`] would.
    ///
    /// # Errors
    ///
    /// See [`Config::generate`].
    pub fn from_record(record: &dyn Record) -> Result<Self> {
        let mut config = Config::new();
        config.generate(record)?;
        Ok(config)
    }
}

fn populate_record(
    section: &str,
    options: &Section,
    record: &mut dyn Record,
    policy: Policy,
) -> Result<()> {
    for (option, value) in options.iter() {
        let Some(slot) = field_slot(record, option) else {
            reject(policy, option, Error::nonexistent_field(option))?;
            continue;
        };
        assign(slot, option, value, policy)?;
    }
    trace!(section, options = options.len(), "populated record");
    Ok(())
}

/// Returns `err` under the strict policy; logs and swallows it otherwise.
fn reject(policy: Policy, name: &str, err: Error) -> Result<()> {
    if policy.is_strict() {
        return Err(err);
    }
    debug!(name, error = %err, "skipping mismatch");
    Ok(())
}

/// Returns the write view of the field whose normalized name is `wanted`.
fn field_slot<'r>(record: &'r mut dyn Record, wanted: &str) -> Option<FieldMut<'r>> {
    let name = find_field(record.field_names(), wanted)?;
    record.field_mut(name)
}

fn find_field(fields: &'static [&'static str], wanted: &str) -> Option<&'static str> {
    fields.iter().copied().find(|field| normalize(field) == wanted)
}

fn assign(slot: FieldMut<'_>, option: &str, value: &str, policy: Policy) -> Result<()> {
    let outcome = match slot {
        FieldMut::Bool(f) => parse_bool(value).map(|v| *f = v),
        FieldMut::I8(f) => parse_signed::<i8>(value).map(|v| *f = v),
        FieldMut::I16(f) => parse_signed::<i16>(value).map(|v| *f = v),
        FieldMut::I32(f) => parse_signed::<i32>(value).map(|v| *f = v),
        FieldMut::I64(f) => parse_signed::<i64>(value).map(|v| *f = v),
        FieldMut::Isize(f) => parse_signed::<isize>(value).map(|v| *f = v),
        FieldMut::U8(f) => parse_unsigned::<u8>(value).map(|v| *f = v),
        FieldMut::U16(f) => parse_unsigned::<u16>(value).map(|v| *f = v),
        FieldMut::U32(f) => parse_unsigned::<u32>(value).map(|v| *f = v),
        FieldMut::U64(f) => parse_unsigned::<u64>(value).map(|v| *f = v),
        FieldMut::Usize(f) => parse_unsigned::<usize>(value).map(|v| *f = v),
        FieldMut::F32(f) => parse_f32(value).map(|v| *f = v),
        FieldMut::F64(f) => parse_f64(value).map(|v| *f = v),
        FieldMut::Str(f) => {
            *f = value.to_string();
            Ok(())
        }
        FieldMut::Locked => return reject(policy, option, Error::cannot_set(option)),
        FieldMut::Record(_) | FieldMut::Unsupported => {
            trace!(option, "leaving field of unsupported kind untouched");
            return Ok(());
        }
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(source) => reject(policy, option, Error::format(option, value, source)),
    }
}

/// Renders a scalar field as option text; `None` for kinds with no textual form.
pub(crate) fn format_field(field: Field<'_>) -> Option<String> {
    let text = match field {
        Field::Bool(v) => v.to_string(),
        Field::I8(v) => v.to_string(),
        Field::I16(v) => v.to_string(),
        Field::I32(v) => v.to_string(),
        Field::I64(v) => v.to_string(),
        Field::Isize(v) => v.to_string(),
        Field::U8(v) => v.to_string(),
        Field::U16(v) => v.to_string(),
        Field::U32(v) => v.to_string(),
        Field::U64(v) => v.to_string(),
        Field::Usize(v) => v.to_string(),
        Field::F32(v) => v.to_string(),
        Field::F64(v) => v.to_string(),
        Field::Str(v) => v.to_string(),
        Field::Record(_) | Field::Unsupported => return None,
    };
    Some(text)
}

pub(crate) fn parse_bool(text: &str) -> std::result::Result<bool, ValueError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::Syntax),
    }
}

pub(crate) fn parse_signed<T: TryFrom<i128>>(text: &str) -> std::result::Result<T, ValueError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = parse_magnitude(digits)?;
    let value = if negative {
        if magnitude > i128::MAX as u128 + 1 {
            return Err(ValueError::Range);
        }
        (magnitude as i128).wrapping_neg()
    } else {
        i128::try_from(magnitude).map_err(|_| ValueError::Range)?
    };
    T::try_from(value).map_err(|_| ValueError::Range)
}

pub(crate) fn parse_unsigned<T: TryFrom<u128>>(text: &str) -> std::result::Result<T, ValueError> {
    T::try_from(parse_magnitude(text)?).map_err(|_| ValueError::Range)
}

/// Parses an unsigned literal with an optional `0x`, `0o`, `0b` or leading-`0`
/// radix prefix and `_` digit separators.
fn parse_magnitude(text: &str) -> std::result::Result<u128, ValueError> {
    let bytes = text.as_bytes();
    let (radix, body) = match bytes {
        [] => return Err(ValueError::Syntax),
        [b'0', p, _, ..] if matches!(p.to_ascii_lowercase(), b'b' | b'o' | b'x') => {
            let radix = match p.to_ascii_lowercase() {
                b'b' => 2,
                b'o' => 8,
                _ => 16,
            };
            (radix, &text[2..])
        }
        [b'0', ..] => (8, &text[1..]),
        _ => (10, text),
    };

    if body.contains('_') && !underscores_ok(body, radix, radix != 10) {
        return Err(ValueError::Syntax);
    }
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        // a lone "0"
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ValueError::Syntax);
    }

    u128::from_str_radix(&digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ValueError::Range,
        _ => ValueError::Syntax,
    })
}

/// Underscores may only separate digits, or follow a radix prefix.
///
/// `body` is the literal with its prefix already removed; `prefixed` says
/// whether one was.
fn underscores_ok(body: &str, radix: u32, prefixed: bool) -> bool {
    let mut saw = if prefixed { b'0' } else { b'^' };

    for c in body.bytes() {
        if c.is_ascii_digit() || (radix == 16 && c.is_ascii_hexdigit()) {
            saw = b'0';
        } else if c == b'_' {
            if saw != b'0' {
                return false;
            }
            saw = b'_';
        } else {
            if saw == b'_' {
                return false;
            }
            saw = b'!';
        }
    }
    saw != b'_'
}

pub(crate) fn parse_f32(text: &str) -> std::result::Result<f32, ValueError> {
    let value: f32 = text.parse().map_err(|_| ValueError::Syntax)?;
    check_finite(text, value.is_infinite()).map(|()| value)
}

pub(crate) fn parse_f64(text: &str) -> std::result::Result<f64, ValueError> {
    let value: f64 = text.parse().map_err(|_| ValueError::Syntax)?;
    check_finite(text, value.is_infinite()).map(|()| value)
}

/// A finite literal that rounds to infinity is out of range; `inf` itself is not.
fn check_finite(text: &str, infinite: bool) -> std::result::Result<(), ValueError> {
    let spelled = text
        .trim_start_matches(|c: char| c == '+' || c == '-')
        .to_ascii_lowercase();
    if infinite && spelled != "inf" && spelled != "infinity" {
        return Err(ValueError::Range);
    }
    Ok(())
}
