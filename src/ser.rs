//! Building a [`Config`] from any `T: Serialize`.
//!
//! The value must be a struct (or map) of sections, each of which is a struct
//! (or map) of scalar options. This mirrors [`Config::generate`]:
//!
//! - every top-level field becomes a section, in field order;
//! - every section field becomes an option, rendered as text;
//! - `None` sections and options are left out;
//! - unit enum variants are written as their variant name.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::to_config;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Serialize)]
//! struct Document { server: Server }
//!
//! let doc = Document { server: Server { host: "localhost".to_string(), port: 8080 } };
//! let config = to_config(&doc).unwrap();
//! assert_eq!(config.to_string(), "[server]\nhost=localhost\nport=8080\n");
//! ```

use crate::{Config, Error, Result};
use serde::ser::{self, Impossible, Serialize};

/// Serializes `value` into a new [`Config`].
///
/// # Errors
///
/// Returns [`Error::FieldIsNotStruct`] for a section that is not a struct or
/// map, [`Error::UnsupportedType`] for an option that is not a scalar,
/// [`Error::SectionExists`] when two sections share a (normalized) name, and
/// [`Error::Custom`] if the value itself is not a struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_config<T>(value: &T) -> Result<Config>
where
    T: ?Sized + Serialize,
{
    let mut config = Config::new();
    value.serialize(DocumentSerializer {
        config: &mut config,
    })?;
    Ok(config)
}

/// Renders a serializable map key as text.
fn key_text<T>(key: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    key.serialize(ValueSerializer { field: "map key" })?
        .ok_or_else(|| Error::custom("map keys must not be None"))
}

/// Rejection methods shared by the document and section serializers: anything
/// that is not a struct, map, option or newtype wrapper.
macro_rules! reject_non_struct {
    ($reject:ident) => {
        fn serialize_bool(self, _v: bool) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_i8(self, _v: i8) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_i16(self, _v: i16) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_i32(self, _v: i32) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_i64(self, _v: i64) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_u8(self, _v: u8) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_u16(self, _v: u16) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_u32(self, _v: u32) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_u64(self, _v: u64) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_f32(self, _v: f32) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_f64(self, _v: f64) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_char(self, _v: char) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_str(self, _v: &str) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_unit(self) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_unit_variant(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
        ) -> Result<()> {
            Err(self.$reject())
        }

        fn serialize_newtype_variant<T>(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
            _value: &T,
        ) -> Result<()>
        where
            T: ?Sized + Serialize,
        {
            Err(self.$reject())
        }

        fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
            Err(self.$reject())
        }

        fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
            Err(self.$reject())
        }

        fn serialize_tuple_struct(
            self,
            _name: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleStruct> {
            Err(self.$reject())
        }

        fn serialize_tuple_variant(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleVariant> {
            Err(self.$reject())
        }

        fn serialize_struct_variant(
            self,
            _name: &'static str,
            _variant_index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeStructVariant> {
            Err(self.$reject())
        }
    };
}

/// Serializes the top-level value: a struct or map of sections.
struct DocumentSerializer<'c> {
    config: &'c mut Config,
}

impl DocumentSerializer<'_> {
    fn not_a_document(&self) -> Error {
        Error::custom("top-level value must be a struct or map of sections")
    }
}

impl<'c> ser::Serializer for DocumentSerializer<'c> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = SectionsSerializer<'c>;
    type SerializeStruct = SectionsSerializer<'c>;
    type SerializeStructVariant = Impossible<(), Error>;

    reject_non_struct!(not_a_document);

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SectionsSerializer {
            config: self.config,
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(SectionsSerializer {
            config: self.config,
            key: None,
        })
    }
}

/// Collects the fields (or entries) of the top-level value as sections.
struct SectionsSerializer<'c> {
    config: &'c mut Config,
    key: Option<String>,
}

impl SectionsSerializer<'_> {
    fn section<T>(&mut self, name: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(SectionSerializer {
            config: &mut *self.config,
            section: name,
        })
    }
}

impl ser::SerializeStruct for SectionsSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.section(key.to_string(), value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeMap for SectionsSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key_text(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let name = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.section(name, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes one section: a struct or map of scalar options.
struct SectionSerializer<'c> {
    config: &'c mut Config,
    section: String,
}

impl<'c> SectionSerializer<'c> {
    fn not_a_section(&self) -> Error {
        Error::field_is_not_struct(&self.section)
    }

    fn open(self) -> Result<OptionsSerializer<'c>> {
        if !self.config.add_section(&self.section) {
            return Err(Error::section_exists(&self.section));
        }
        Ok(OptionsSerializer {
            config: self.config,
            section: self.section,
            key: None,
        })
    }
}

impl<'c> ser::Serializer for SectionSerializer<'c> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = OptionsSerializer<'c>;
    type SerializeStruct = OptionsSerializer<'c>;
    type SerializeStructVariant = Impossible<(), Error>;

    reject_non_struct!(not_a_section);

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.open()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.open()
    }
}

/// Adds the fields (or entries) of one section as options.
struct OptionsSerializer<'c> {
    config: &'c mut Config,
    section: String,
    key: Option<String>,
}

impl OptionsSerializer<'_> {
    fn option<T>(&mut self, name: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(text) = value.serialize(ValueSerializer { field: name })? {
            self.config.add_option(&self.section, name, text);
        }
        Ok(())
    }
}

impl ser::SerializeStruct for OptionsSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.option(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeMap for OptionsSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key_text(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let name = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.option(&name, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Renders one scalar option value; `Ok(None)` means the option is left out.
struct ValueSerializer<'f> {
    field: &'f str,
}

impl ValueSerializer<'_> {
    fn unsupported(&self) -> Error {
        Error::unsupported_type(self.field)
    }
}

impl ser::Serializer for ValueSerializer<'_> {
    type Ok = Option<String>;
    type Error = Error;

    type SerializeSeq = Impossible<Option<String>, Error>;
    type SerializeTuple = Impossible<Option<String>, Error>;
    type SerializeTupleStruct = Impossible<Option<String>, Error>;
    type SerializeTupleVariant = Impossible<Option<String>, Error>;
    type SerializeMap = Impossible<Option<String>, Error>;
    type SerializeStruct = Impossible<Option<String>, Error>;
    type SerializeStructVariant = Impossible<Option<String>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    // f32 keeps its own shortest form; widening first would print the f64 digits
    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(self.unsupported())
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(self.unsupported())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(self.unsupported())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(self.unsupported())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.unsupported())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.unsupported())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.unsupported())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.unsupported())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.unsupported())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(self.unsupported())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.unsupported())
    }
}
