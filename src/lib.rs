//! # ingot
//!
//! An order-preserving INI configuration store with a text codec and typed
//! record binding.
//!
//! ## What it does
//!
//! A [`Config`] is an ordered collection of named sections, each an ordered
//! collection of `option=value` pairs. Sections and options keep the order in
//! which they were first added, so reading a file and writing it back yields
//! the same layout.
//!
//! ## Key Features
//!
//! - **Ordered**: sections and options are stored in insertion order; removal
//!   keeps the order of what remains
//! - **Forgiving names**: the first character of every name is case-folded, so
//!   `[main]` and `[Main]` are the same section
//! - **Line-oriented codec**: `[section]` headers, `option=value` pairs, `#` and
//!   `;` comments, with line numbers in parse errors
//! - **Typed binding**: copy sections into [`Record`]s and back, with strict or
//!   lenient handling of mismatches
//! - **Serde compatible**: read and write any `#[derive(Serialize, Deserialize)]`
//!   struct of structs
//!
//! ## Quick Start
//!
//! ```rust
//! use ingot::Config;
//!
//! let mut config: Config = "[main]\nname=demo\n\n# comment\n[net]\nport=80\n"
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(config.get("main", "name"), Some("demo"));
//! config.add_option("net", "host", "localhost");
//! assert_eq!(
//!     config.to_string(),
//!     "[main]\nname=demo\n[net]\nport=80\nhost=localhost\n"
//! );
//! ```
//!
//! ### Binding records
//!
//! ```rust
//! use ingot::{record, Config, Policy};
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Net {
//!         pub host: String,
//!         pub port: u16,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Settings {
//!         pub net: Net,
//!     }
//! }
//!
//! let config: Config = "[net]\nhost=example.org\nport=443\n".parse().unwrap();
//! let mut settings = Settings::default();
//! config.populate(&mut settings, Policy::Strict).unwrap();
//! assert_eq!(settings.net.port, 443);
//!
//! let copy = Config::from_record(&settings).unwrap();
//! assert_eq!(copy, config);
//! ```
//!
//! ### With serde
//!
//! ```rust
//! use ingot::{from_str, to_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Net { host: String, port: u16 }
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Settings { net: Net }
//!
//! let settings = Settings { net: Net { host: "example.org".to_string(), port: 443 } };
//! let text = to_string(&settings).unwrap();
//! assert_eq!(text, "[net]\nhost=example.org\nport=443\n");
//!
//! let back: Settings = from_str(&text).unwrap();
//! assert_eq!(back, settings);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (`debug` for
//! completed operations and skipped mismatches, `trace` for per-line detail).
//! Install a subscriber in the application to see them.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API; every failure is an [`Error`]
//!
//! ## Format
//!
//! See the [`format`] module for the accepted and emitted text.
//!
//! ## Examples
//!
//! `demos/simple.rs` walks through the store, the codec and both binding
//! flavours. Run it with: `cargo run --example simple`

mod bind;
pub mod config;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod name;
pub mod options;
mod parse;
pub mod record;
pub mod ser;
mod write;

pub use config::Config;
pub use de::from_config;
pub use error::{Error, Result, ValueError};
pub use map::Section;
pub use name::{denormalize, normalize};
pub use options::Policy;
pub use record::{Field, FieldMut, FieldType, ReadOnly, Record};
pub use ser::to_config;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to INI text.
///
/// `T` must be a struct (or map) of sections; see [`to_config`].
///
/// # Examples
///
/// ```rust
/// use ingot::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Window { width: u32, height: u32 }
///
/// #[derive(Serialize)]
/// struct Settings { window: Window }
///
/// let settings = Settings { window: Window { width: 640, height: 480 } };
/// assert_eq!(to_string(&settings).unwrap(), "[window]\nwidth=640\nheight=480\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` does not have the shape of a configuration.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_config(value)?.to_string())
}

/// Serialize any `T: Serialize` to INI text as bytes.
///
/// # Errors
///
/// Returns an error if `T` does not have the shape of a configuration.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    Ok(to_config(value)?.to_bytes())
}

/// Serialize any `T: Serialize` as INI text into a writer.
///
/// # Examples
///
/// ```rust
/// use ingot::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut section = BTreeMap::new();
/// section.insert("debug", true);
/// let mut settings = BTreeMap::new();
/// settings.insert("main", section);
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &settings).unwrap();
/// assert_eq!(buffer, b"[main]\ndebug=true\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` does not have the shape of a configuration or the
/// writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_config(value)?.write(writer)
}

/// Deserialize an instance of type `T` from INI text.
///
/// # Examples
///
/// ```rust
/// use ingot::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Window { width: u32, height: u32 }
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Settings { window: Window }
///
/// let settings: Settings = from_str("[window]\nwidth=640\nheight=0x1E0\n").unwrap();
/// assert_eq!(settings.window, Window { width: 640, height: 480 });
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse or cannot be deserialized to
/// type `T`. Parse errors carry the offending line and its number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let config: Config = s.parse()?;
    from_config(&config)
}

/// Deserialize an instance of type `T` from a buffered stream of INI text.
///
/// # Examples
///
/// ```rust
/// use ingot::from_reader;
/// use std::collections::BTreeMap;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"[main]\nname=demo\n");
/// let settings: BTreeMap<String, BTreeMap<String, String>> = from_reader(cursor).unwrap();
/// assert_eq!(settings["main"]["name"], "demo");
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the text does not parse, or it cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::BufRead,
    T: DeserializeOwned,
{
    let config = Config::from_reader(reader)?;
    from_config(&config)
}

/// Deserialize an instance of type `T` from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, do not parse, or cannot
/// be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let config = Config::from_slice(v)?;
    from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Window {
        width: u32,
        title: Option<String>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        window: Window,
    }

    #[test]
    fn test_round_trip_through_text() {
        let settings = Settings {
            window: Window {
                width: 800,
                title: Some("Main".to_string()),
            },
        };
        let text = to_string(&settings).unwrap();
        assert_eq!(text, "[window]\nwidth=800\ntitle=Main\n");
        assert_eq!(from_str::<Settings>(&text).unwrap(), settings);
    }

    #[test]
    fn test_none_is_left_out_and_read_back_as_none() {
        let settings = Settings {
            window: Window {
                width: 1,
                title: None,
            },
        };
        let bytes = to_vec(&settings).unwrap();
        assert_eq!(bytes, b"[window]\nwidth=1\n");
        assert_eq!(from_slice::<Settings>(&bytes).unwrap(), settings);
    }

    #[test]
    fn test_parse_error_passes_through() {
        let err = from_str::<Settings>("width=1\n").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.line(), Some("width=1"));
    }

    #[test]
    fn test_to_writer_matches_to_string() {
        let settings = Settings {
            window: Window {
                width: 2,
                title: None,
            },
        };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &settings).unwrap();
        assert_eq!(buffer, to_string(&settings).unwrap().into_bytes());
    }

    #[test]
    fn test_from_reader() {
        let settings: Settings = from_reader(&b"[Window]\nWidth=3\n"[..]).unwrap();
        assert_eq!(settings.window.width, 3);
        assert_eq!(settings.window.title, None);
    }
}
