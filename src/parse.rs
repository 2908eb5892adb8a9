//! Line-oriented parsing of INI-style text into a [`Config`].
//!
//! Each line is trimmed and then classified:
//!
//! - blank lines and lines starting with `#` or `;` are skipped;
//! - `[name]` starts a new current section (an empty `[]` is ignored);
//! - anything else must be `option=value` inside a section.
//!
//! Parsing stops at the first malformed line. An empty input is an empty
//! configuration, not an error.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::Config;
//!
//! let config: Config = "[sectionOne]\none=true\n".parse().unwrap();
//! assert_eq!(config.get("SectionOne", "One"), Some("true"));
//! ```

use crate::{Config, Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace};

/// One trimmed input line, classified.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Skip,
    Header(&'a str),
    Pair(&'a str, &'a str),
    Invalid,
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        return Line::Skip;
    }
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Line::Header(line[1..line.len() - 1].trim());
    }
    match line.find('=') {
        Some(i) if i > 0 => Line::Pair(line[..i].trim(), line[i + 1..].trim()),
        _ => Line::Invalid,
    }
}

/// Feeds lines into a configuration while tracking the current section.
struct Parser<'c> {
    config: &'c mut Config,
    section: Option<String>,
    number: usize,
}

impl<'c> Parser<'c> {
    fn new(config: &'c mut Config) -> Self {
        Parser {
            config,
            section: None,
            number: 0,
        }
    }

    fn feed(&mut self, raw: &str) -> Result<()> {
        self.number += 1;
        let line = raw.trim();

        match classify(line) {
            Line::Skip => {}
            Line::Header("") => {
                trace!(number = self.number, "ignoring empty section header");
            }
            Line::Header(name) => {
                trace!(number = self.number, section = name, "section header");
                self.config.add_section(name);
                self.section = Some(name.to_string());
            }
            _ if self.section.is_none() => return Err(Error::no_section(self.number, line)),
            Line::Pair(option, value) => {
                if let Some(section) = &self.section {
                    self.config.add_option(section, option, value);
                }
            }
            Line::Invalid => return Err(Error::could_not_parse(self.number, line)),
        }

        Ok(())
    }
}

impl Config {
    /// Reads INI-style text from `reader` into this configuration.
    ///
    /// Sections and options are merged into whatever the configuration already
    /// holds. On error the configuration keeps the lines read before the
    /// failing one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSection`] or [`Error::CouldNotParse`] for the first
    /// malformed line, and [`Error::Io`] if reading fails or the input is not
    /// valid UTF-8.
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut parser = Parser::new(self);
        for line in reader.lines() {
            parser.feed(&line?)?;
        }
        let lines = parser.number;
        debug!(lines, sections = self.len(), "parsed configuration");
        Ok(())
    }

    /// Parses a new configuration from a buffered reader.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingot::Config;
    /// use std::io::Cursor;
    ///
    /// let config = Config::from_reader(Cursor::new("[a]\nb=c\n")).unwrap();
    /// assert_eq!(config.get("a", "b"), Some("c"));
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Config::read`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut config = Config::new();
        config.read(reader)?;
        Ok(config)
    }

    /// Parses a new configuration from a byte buffer.
    ///
    /// # Errors
    ///
    /// See [`Config::read`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Config::from_reader(bytes)
    }

    /// Parses a new configuration from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read, otherwise see
    /// [`Config::read`].
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading configuration file");
        let file = File::open(path)?;
        Config::from_reader(BufReader::new(file))
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Config::from_reader(s.as_bytes())
    }
}
