/// Declares a struct and registers it as a [`Record`](crate::Record).
///
/// The struct is emitted unchanged. Alongside it the macro implements
/// [`Record`](crate::Record), listing the fields in declaration order, and
/// [`FieldType`](crate::FieldType), so the struct can itself be a field of an
/// enclosing record (one section per nested record).
///
/// Every field type must implement [`FieldType`](crate::FieldType).
///
/// # Examples
///
/// ```rust
/// use ingot::{record, Config, Policy};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct SectionOne {
///         pub one: bool,
///         pub two: bool,
///     }
/// }
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Document {
///         pub section_one: SectionOne,
///     }
/// }
///
/// let config: Config = "[section_one]\none=true\ntwo=false\n".parse().unwrap();
/// let mut doc = Document::default();
/// config.populate(&mut doc, Policy::Strict).unwrap();
/// assert_eq!(doc.section_one, SectionOne { one: true, two: false });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn field_names(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::Field<'_>> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::FieldType::as_field(&self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<$crate::FieldMut<'_>> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::FieldType::as_field_mut(&mut self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::FieldType for $name {
            fn as_field(&self) -> $crate::Field<'_> {
                $crate::Field::Record(self)
            }

            fn as_field_mut(&mut self) -> $crate::FieldMut<'_> {
                $crate::FieldMut::Record(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Field, FieldMut, Record};

    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Inner {
            flag: bool,
        }
    }

    record! {
        #[derive(Debug, Default)]
        struct Outer {
            /// documented field
            inner: Inner,
            pub(crate) name: String,
        }
    }

    record! {
        struct Empty {}
    }

    #[test]
    fn test_field_names_in_declaration_order() {
        let outer = Outer::default();
        assert_eq!(outer.field_names(), &["inner", "name"]);
        assert!(Empty {}.field_names().is_empty());
        assert!(Empty {}.field("anything").is_none());
    }

    #[test]
    fn test_nested_record_views() {
        let mut outer = Outer::default();
        match outer.field("inner") {
            Some(Field::Record(inner)) => assert_eq!(inner.field_names(), &["flag"]),
            other => panic!("unexpected view: {other:?}"),
        }

        if let Some(FieldMut::Record(inner)) = outer.field_mut("inner") {
            if let Some(FieldMut::Bool(flag)) = inner.field_mut("flag") {
                *flag = true;
            }
        }
        assert_eq!(outer.inner, Inner { flag: true });
    }
}
