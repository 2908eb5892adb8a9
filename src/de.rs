//! Reading any `T: Deserialize` out of a [`Config`].
//!
//! The target is viewed as a struct (or map) of sections, each a struct (or
//! map) of options. Section and option names are matched to the target's
//! field names the way [`Config::populate`] matches them: a field matches when
//! its normalized name equals the stored name. Names with no matching field
//! are presented to the target with their first character lower-cased, so
//! maps receive the names as they appear in the text.
//!
//! Option values are coerced with the same rules as the binder (`1`, `t`,
//! `TRUE` for booleans, `0x`/`0o`/`0b` prefixes for integers and so on).
//!
//! Unknown names are ignored unless the target opts into
//! `#[serde(deny_unknown_fields)]`, which makes every unmatched name an error.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::{from_config, Config};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Document { server: Server }
//!
//! let config: Config = "[server]\nhost=localhost\nport=0x1F90\n".parse().unwrap();
//! let doc: Document = from_config(&config).unwrap();
//! assert_eq!(doc.server, Server { host: "localhost".to_string(), port: 8080 });
//! ```

use crate::bind::{parse_bool, parse_f32, parse_f64, parse_signed, parse_unsigned};
use crate::map::Section;
use crate::name::{denormalize, normalize};
use crate::{Config, Error, Result, ValueError};
use serde::de::{self, Deserialize, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializes a `T` from the sections of `config`.
///
/// Strings in `T` may borrow from `config`.
///
/// # Errors
///
/// Returns [`Error::Format`] when an option value does not parse as the field's
/// type, [`Error::FieldIsNotStruct`] when a section is bound to a scalar field,
/// [`Error::UnsupportedType`] when an option is bound to a compound field, and
/// [`Error::Custom`] for anything the target itself rejects (missing or
/// unknown fields).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_config<'de, T>(config: &'de Config) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(DocumentDeserializer { config })
}

/// Picks the name under which a stored key is presented to the visitor.
fn key_for(stored: &str, fields: Option<&'static [&'static str]>) -> String {
    fields
        .and_then(|fields| fields.iter().find(|field| normalize(field) == stored))
        .map_or_else(|| denormalize(stored), |field| (*field).to_string())
}

fn size_hint<I: Iterator>(iter: &I) -> Option<usize> {
    match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(upper),
        _ => None,
    }
}

/// Deserializes the whole configuration as a map of sections.
struct DocumentDeserializer<'de> {
    config: &'de Config,
}

impl<'de> de::Deserializer<'de> for DocumentDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(SectionsAccess::new(self.config, None))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(SectionsAccess::new(self.config, Some(fields)))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map enum identifier
    }
}

struct SectionsAccess<'de> {
    iter: indexmap::map::Iter<'de, String, Section>,
    fields: Option<&'static [&'static str]>,
    pending: Option<(&'de str, &'de Section)>,
}

impl<'de> SectionsAccess<'de> {
    fn new(config: &'de Config, fields: Option<&'static [&'static str]>) -> Self {
        SectionsAccess {
            iter: config.into_iter(),
            fields,
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionsAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((name, section)) => {
                self.pending = Some((name.as_str(), section));
                seed.deserialize(key_for(name, self.fields).into_deserializer())
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((name, section)) => seed.deserialize(SectionDeserializer { name, section }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        size_hint(&self.iter)
    }
}

/// Methods of a section deserializer that cannot produce a section.
macro_rules! reject_scalars {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(Error::field_is_not_struct(self.name))
            }
        )*
    };
}

/// Deserializes one section as a map of options.
struct SectionDeserializer<'de> {
    name: &'de str,
    section: &'de Section,
}

impl<'de> de::Deserializer<'de> for SectionDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(OptionsAccess::new(self.section, None))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(OptionsAccess::new(self.section, Some(fields)))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    reject_scalars! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_unit
        deserialize_seq deserialize_identifier
    }

    forward_to_deserialize_any! {
        unit_struct tuple tuple_struct map enum
    }
}

struct OptionsAccess<'de> {
    iter: indexmap::map::Iter<'de, String, String>,
    fields: Option<&'static [&'static str]>,
    pending: Option<(&'de str, &'de str)>,
}

impl<'de> OptionsAccess<'de> {
    fn new(section: &'de Section, fields: Option<&'static [&'static str]>) -> Self {
        OptionsAccess {
            iter: section.into_iter(),
            fields,
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for OptionsAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((option, value)) => {
                self.pending = Some((option.as_str(), value.as_str()));
                seed.deserialize(key_for(option, self.fields).into_deserializer())
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((option, value)) => seed.deserialize(ValueDeserializer { option, value }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        size_hint(&self.iter)
    }
}

/// Coercing methods: parse the text, then hand the result to the visitor.
macro_rules! coerce {
    ($($method:ident => $parse:expr, $visit:ident;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let parsed = $parse(self.value).map_err(|e| self.error(e))?;
                visitor.$visit(parsed)
            }
        )*
    };
}

/// Deserializes one option value, coercing its text to the requested type.
struct ValueDeserializer<'de> {
    option: &'de str,
    value: &'de str,
}

impl ValueDeserializer<'_> {
    fn error(&self, source: ValueError) -> Error {
        Error::format(self.option, self.value, source)
    }

    fn unsupported(&self) -> Error {
        Error::unsupported_type(self.option)
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    coerce! {
        deserialize_bool => parse_bool, visit_bool;
        deserialize_i8 => parse_signed::<i8>, visit_i8;
        deserialize_i16 => parse_signed::<i16>, visit_i16;
        deserialize_i32 => parse_signed::<i32>, visit_i32;
        deserialize_i64 => parse_signed::<i64>, visit_i64;
        deserialize_i128 => parse_signed::<i128>, visit_i128;
        deserialize_u8 => parse_unsigned::<u8>, visit_u8;
        deserialize_u16 => parse_unsigned::<u16>, visit_u16;
        deserialize_u32 => parse_unsigned::<u32>, visit_u32;
        deserialize_u64 => parse_unsigned::<u64>, visit_u64;
        deserialize_u128 => parse_unsigned::<u128>, visit_u128;
        deserialize_f32 => parse_f32, visit_f32;
        deserialize_f64 => parse_f64, visit_f64;
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(self.error(ValueError::Syntax)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.value.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.value.as_bytes())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported())
    }

    /// Unit variants only, named by the option text.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.value.into_deserializer())
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Limits {
        max_conn: u8,
        ratio: f32,
        verbose: bool,
        label: String,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Document {
        limits: Limits,
    }

    fn config(text: &str) -> Config {
        text.parse().unwrap()
    }

    #[test]
    fn test_struct_fields_match_normalized_names() {
        let config = config("[Limits]\nMax_conn=0b11\nratio=0.5\nverbose=T\nlabel=x y\n");
        let doc: Document = from_config(&config).unwrap();
        assert_eq!(
            doc.limits,
            Limits {
                max_conn: 3,
                ratio: 0.5,
                verbose: true,
                label: "x y".to_string(),
            }
        );
    }

    #[test]
    fn test_maps_see_lower_first_names() {
        let config = config("[Server]\nHost=a\n");
        let doc: BTreeMap<String, BTreeMap<String, String>> = from_config(&config).unwrap();
        assert_eq!(doc["server"]["host"], "a");
    }

    #[test]
    fn test_value_errors_carry_option_and_value() {
        let config = config("[limits]\nmax_conn=300\nratio=1\nverbose=1\nlabel=\n");
        let err = from_config::<Document>(&config).unwrap_err();
        match err {
            Error::Format {
                field,
                value,
                source,
            } => {
                assert_eq!(field, "Max_conn");
                assert_eq!(value, "300");
                assert_eq!(source, ValueError::Range);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_section_bound_to_scalar() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Flat {
            limits: String,
        }

        let err = from_config::<Flat>(&config("[limits]\na=1\n")).unwrap_err();
        assert!(matches!(err, Error::FieldIsNotStruct { ref field } if field == "Limits"));
    }

    #[test]
    fn test_option_bound_to_compound() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Tags {
            list: Vec<String>,
        }

        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Doc {
            tags: Tags,
        }

        let err = from_config::<Doc>(&config("[tags]\nlist=a\n")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { ref field } if field == "List"));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let config = config("[limits]\nmax_conn=1\nratio=2\nverbose=0\nlabel=l\nextra=x\n[other]\nk=v\n");
        let doc: Document = from_config(&config).unwrap();
        assert_eq!(doc.limits.max_conn, 1);
    }

    #[test]
    fn test_deny_unknown_fields_is_strict() {
        #[derive(Deserialize, Debug)]
        #[serde(deny_unknown_fields)]
        #[allow(dead_code)]
        struct Only {
            a: Inner,
        }

        #[derive(Deserialize, Debug)]
        #[serde(deny_unknown_fields)]
        #[allow(dead_code)]
        struct Inner {
            x: i32,
        }

        let err = from_config::<Only>(&config("[a]\nx=1\ny=2\n")).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn test_unit_enum_and_borrowed_str() {
        #[derive(Deserialize, Debug, PartialEq)]
        #[serde(rename_all = "lowercase")]
        enum Level {
            Debug,
            Info,
        }

        #[derive(Deserialize, Debug)]
        struct Log<'a> {
            level: Level,
            target: &'a str,
        }

        #[derive(Deserialize, Debug)]
        struct Doc<'a> {
            #[serde(borrow)]
            log: Log<'a>,
        }

        let config = config("[log]\nlevel=info\ntarget=app\n");
        let doc: Doc<'_> = from_config(&config).unwrap();
        assert_eq!(doc.log.level, Level::Info);
        assert_eq!(doc.log.target, "app");
        assert_ne!(doc.log.level, Level::Debug);
    }
}
