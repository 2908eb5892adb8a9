//! Typed records as binding targets.
//!
//! A record is any type implementing [`Record`]: it lists its field names in
//! declaration order and hands out kind-tagged views of each field by name.
//! The binder in [`Config`](crate::Config) consults this table instead of
//! inspecting types at runtime.
//!
//! Records are usually declared with the [`record!`](crate::record) macro,
//! which writes the table from the struct definition:
//!
//! ```rust
//! use ingot::{record, Field, Record};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Server {
//!         pub host: String,
//!         pub port: u16,
//!     }
//! }
//!
//! let server = Server { host: "localhost".to_string(), port: 8080 };
//! assert_eq!(server.field_names(), &["host", "port"]);
//! assert!(matches!(server.field("port"), Some(Field::U16(8080))));
//! ```
//!
//! ## Field kinds
//!
//! | Rust type | View |
//! |---|---|
//! | `bool` | [`Field::Bool`] |
//! | `i8`, `i16`, `i32`, `i64`, `isize` | [`Field::I8`] .. [`Field::Isize`] |
//! | `u8`, `u16`, `u32`, `u64`, `usize` | [`Field::U8`] .. [`Field::Usize`] |
//! | `f32`, `f64` | [`Field::F32`], [`Field::F64`] |
//! | `String` | [`Field::Str`] |
//! | another record | [`Field::Record`] |
//! | `char`, `Option<T>`, `Vec<T>` | [`Field::Unsupported`] |
//!
//! [`ReadOnly<T>`] reads like `T` but refuses assignment.

use std::ops::{Deref, DerefMut};

/// A statically described aggregate with named fields.
///
/// Implementations must return the same names from [`Record::field_names`] that
/// [`Record::field`] and [`Record::field_mut`] accept.
pub trait Record {
    /// Field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Returns a read view of the named field.
    fn field(&self, name: &str) -> Option<Field<'_>>;

    /// Returns a write view of the named field.
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;
}

/// A read view of one record field, tagged with its kind.
#[derive(Clone, Copy)]
pub enum Field<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Record(&'a dyn Record),
    Unsupported,
}

/// A write view of one record field, tagged with its kind.
pub enum FieldMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    Record(&'a mut dyn Record),
    /// The field exists but may not be assigned.
    Locked,
    Unsupported,
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Bool(v) => write!(f, "Bool({v})"),
            Field::I8(v) => write!(f, "I8({v})"),
            Field::I16(v) => write!(f, "I16({v})"),
            Field::I32(v) => write!(f, "I32({v})"),
            Field::I64(v) => write!(f, "I64({v})"),
            Field::Isize(v) => write!(f, "Isize({v})"),
            Field::U8(v) => write!(f, "U8({v})"),
            Field::U16(v) => write!(f, "U16({v})"),
            Field::U32(v) => write!(f, "U32({v})"),
            Field::U64(v) => write!(f, "U64({v})"),
            Field::Usize(v) => write!(f, "Usize({v})"),
            Field::F32(v) => write!(f, "F32({v})"),
            Field::F64(v) => write!(f, "F64({v})"),
            Field::Str(v) => write!(f, "Str({v:?})"),
            Field::Record(_) => f.write_str("Record(..)"),
            Field::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Types that can appear as a record field.
///
/// Implemented for the supported scalars, for `String`, for every type
/// declared with [`record!`](crate::record), and, as unsupported, for a few
/// common compound types.
pub trait FieldType {
    fn as_field(&self) -> Field<'_>;
    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

macro_rules! impl_scalar_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn as_field(&self) -> Field<'_> {
                    Field::$variant(*self)
                }

                fn as_field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::$variant(self)
                }
            }
        )*
    };
}

impl_scalar_field! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl FieldType for String {
    fn as_field(&self) -> Field<'_> {
        Field::Str(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Str(self)
    }
}

impl<T> FieldType for Option<T> {
    fn as_field(&self) -> Field<'_> {
        Field::Unsupported
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Unsupported
    }
}

impl<T> FieldType for Vec<T> {
    fn as_field(&self) -> Field<'_> {
        Field::Unsupported
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Unsupported
    }
}

impl FieldType for char {
    fn as_field(&self) -> Field<'_> {
        Field::Unsupported
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Unsupported
    }
}

/// A field that is written out when generating but never assigned when
/// populating.
///
/// # Examples
///
/// ```rust
/// use ingot::{record, Config, Error, Policy, ReadOnly};
///
/// record! {
///     #[derive(Default)]
///     pub struct Build {
///         pub version: ReadOnly<String>,
///     }
/// }
///
/// let config: Config = "[build]\nversion=2\n".parse().unwrap();
/// let mut build = Build::default();
/// let err = config.populate_section("build", &mut build, Policy::Strict).unwrap_err();
/// assert!(matches!(err, Error::CannotSet { .. }));
/// assert!(config.populate_section("build", &mut build, Policy::Lenient).is_ok());
/// assert_eq!(*build.version, "");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadOnly<T>(pub T);

impl<T> ReadOnly<T> {
    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ReadOnly<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for ReadOnly<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for ReadOnly<T> {
    fn from(value: T) -> Self {
        ReadOnly(value)
    }
}

impl<T: FieldType> FieldType for ReadOnly<T> {
    fn as_field(&self) -> Field<'_> {
        self.0.as_field()
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Locked
    }
}
