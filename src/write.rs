//! Serialization of a [`Config`] back to INI-style text.
//!
//! Sections are written in insertion order as `[name]` lines, each followed by
//! its options as `option=value` lines. Every name is written with its first
//! character lower-cased, and every line ends with `\n`. Comments and blank
//! lines are never emitted.
//!
//! Text produced here parses back into an equal configuration, and text that
//! already follows this convention is reproduced byte for byte.

use crate::name::denormalize;
use crate::{Config, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

impl Config {
    /// Yields every output line, newline included, in output order.
    fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.sections().flat_map(|(name, section)| {
            std::iter::once(format!("[{}]\n", denormalize(name))).chain(
                section
                    .iter()
                    .map(|(option, value)| format!("{}={}\n", denormalize(option), value)),
            )
        })
    }

    /// Writes the configuration to `writer`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingot::Config;
    ///
    /// let mut config = Config::new();
    /// config.add_option("Server", "Port", "8080");
    ///
    /// let mut buffer = Vec::new();
    /// config.write(&mut buffer).unwrap();
    /// assert_eq!(buffer, b"[server]\nport=8080\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) as soon as a write fails.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        for line in self.lines() {
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// Writes the configuration to a byte buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Creates (or truncates) the file at `path` and writes the configuration to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be created,
    /// written or flushed.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), sections = self.len(), "writing configuration file");
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            f.write_str(&line)?;
        }
        Ok(())
    }
}
