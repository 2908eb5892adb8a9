//! Section and option name casing.
//!
//! Names are stored with their first character upper-cased and written with it
//! lower-cased. Only the first character is touched: `sectionOne` and
//! `SectionOne` address the same section, while `SECTIONONE` does not.
//! A first character whose case mapping is not a single character, such as
//! `ß`, is kept as it is.

/// Upper-cases the first character of `name`, leaving the rest unchanged.
///
/// # Examples
///
/// ```rust
/// use ingot::normalize;
///
/// assert_eq!(normalize("sectionOne"), "SectionOne");
/// assert_eq!(normalize("max_history"), "Max_history");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    recase(name, char::to_uppercase)
}

/// Lower-cases the first character of `name`; the inverse used on output.
#[must_use]
pub fn denormalize(name: &str) -> String {
    recase(name, char::to_lowercase)
}

fn recase<I>(name: &str, convert: fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut mapped = convert(first);
            let single = match (mapped.next(), mapped.next()) {
                (Some(c), None) => c,
                _ => first,
            };
            let mut out = String::with_capacity(name.len());
            out.push(single);
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
