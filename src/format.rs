//! The INI text format
//!
//! This module documents the text accepted by [`Config::read`](crate::Config::read)
//! and produced by [`Config::write`](crate::Config::write).
//!
//! # Overview
//!
//! A file is a sequence of lines. Each line is trimmed of surrounding
//! whitespace (a trailing `\r` included) and then read as one of three things:
//! a comment or blank line, a section header, or an option.
//!
//! ```text
//! # comment
//! ; also a comment
//!
//! [server]
//! host = example.org
//! port=8080
//! ```
//!
//! # Lines
//!
//! ## Comments and blank lines
//!
//! Lines that are empty after trimming, or whose first character is `#` or `;`,
//! are skipped. Comments are not kept and never written back.
//!
//! ## Section headers
//!
//! A line that starts with `[` and ends with `]` is a header. The text between
//! the brackets, trimmed, becomes the current section:
//!
//! ```text
//! [server]
//! [ server ]     same section, the interior is trimmed
//! []             ignored, the current section does not change
//! ```
//!
//! A repeated header is not an error; options that follow it are merged into the
//! existing section.
//!
//! ## Options
//!
//! Any other line must contain `=` after at least one character. The name is
//! everything before the first `=`, the value everything after it, both
//! trimmed:
//!
//! ```text
//! path = /usr/bin=local      name "path", value "/usr/bin=local"
//! empty=                     name "empty", value ""
//! ```
//!
//! An option line before the first header fails with
//! [`Error::NoSection`](crate::Error::NoSection). A line with no `=`, or with
//! `=` as its first character, fails with
//! [`Error::CouldNotParse`](crate::Error::CouldNotParse). Both carry the
//! trimmed line and its 1-based number, and parsing stops there.
//!
//! # Names
//!
//! Section and option names are stored with their first character upper-cased
//! and are written back with it lower-cased. Only the first character is
//! affected:
//!
//! | Input | Stored | Written |
//! |---|---|---|
//! | `main` | `Main` | `main` |
//! | `Main` | `Main` | `main` |
//! | `maxHistory` | `MaxHistory` | `maxHistory` |
//! | `MAX` | `MAX` | `mAX` |
//!
//! So `[main]` and `[Main]` name the same section, while `max` and `mAX` are
//! different options.
//!
//! # Output
//!
//! Output is one line per header and per option, each ending in `\n`, with no
//! spaces around `=`. Sections appear in the order they were first added, and
//! options in the order they were first added to their section:
//!
//! ```text
//! [server]
//! host=example.org
//! port=8080
//! ```
//!
//! Text already in this form (lower-case first letters, no comments, no extra
//! whitespace) is reproduced byte for byte by a read followed by a write.
//!
//! # Values
//!
//! Values are stored as text. Binding to typed fields interprets them:
//!
//! | Kind | Accepted text | Written as |
//! |---|---|---|
//! | boolean | `1 t T TRUE true True`, `0 f F FALSE false False` | `true`, `false` |
//! | signed integer | optional sign, `0x` / `0o` / `0` / `0b` prefixes, `_` between digits | decimal |
//! | unsigned integer | as above, without a sign | decimal |
//! | float | decimal or exponent form, `inf`, `infinity`, `nan` | shortest text that reads back to the same value |
//! | string | anything | verbatim |
//!
//! Integers that do not fit the field's width and finite floats that overflow
//! it fail with [`ValueError::Range`](crate::ValueError::Range); anything else
//! that does not parse fails with [`ValueError::Syntax`](crate::ValueError::Syntax).
