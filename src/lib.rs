//! # tblparse
//!
//! A parser for a small self-describing, hierarchical, human-editable text
//! format for tables.
//!
//! ## The Format
//!
//! A file is a sequence of blocks. Each block is a run of whitespace-separated
//! tokens matched positionally against the field names of a schema, followed
//! by its child blocks. Top-level blocks always use the fields `table name`,
//! `version` and `schema`; the `schema` field then declares, inside the data,
//! the field names of every nested level:
//!
//! ```text
//! ; comments run to the end of the line
//! "crew roster" 3 "ship : name role"
//! ## Endeavour
//!    Cook captain
//!    Banks botanist
//! ## Resolution
//!    Cook captain
//! ```
//!
//! - a leading run of `#` declares a block's level (`##` is level 2)
//! - without a marker, a block sits one level below the block before it
//! - `'...'` and `"..."` quote tokens, with `\` escaping inside quotes
//! - fields with no token left are simply absent from the header
//!
//! ## Quick Start
//!
//! ```rust
//! use tblparse::from_str;
//!
//! let input = r#"
//! "crew roster" 3 "ship : name role"
//! ### Endeavour
//!    Cook captain
//!    Banks botanist
//! ### Resolution
//!    Cook captain
//! "#;
//!
//! let tables = from_str(input).unwrap();
//! let roster = &tables[0];
//! assert_eq!(roster.get("table name"), Some("crew roster"));
//! assert_eq!(roster.children().len(), 2);
//!
//! let banks = &roster.children()[0].children()[1];
//! assert_eq!(banks.get("name"), Some("Banks"));
//! assert_eq!(banks.get("role"), Some("botanist"));
//! ```
//!
//! ## Layers
//!
//! - [`stream`]: character cursor with peek, tell and seek
//! - [`token`]: comment-, quote- and escape-aware tokenizer
//! - [`schema`]: colon-separated field-group schemas
//! - [`parser`]: recursive block parser with backtracking
//! - [`block`] / [`value`]: the parsed tree and its nested-map form
//!
//! ## Logging
//!
//! Tokens and level decisions are logged with [`tracing`] at `trace`,
//! finished blocks and schema hand-offs at `debug`.

pub mod block;
pub mod error;
pub mod map;
pub mod options;
pub mod parser;
pub mod schema;
pub mod stream;
pub mod token;
pub mod value;

pub use block::Block;
pub use error::{Error, Result};
pub use map::{Header, TableMap};
pub use options::ParseOptions;
pub use parser::{Blocks, Parser};
pub use schema::Schema;
pub use stream::{CharStream, Location, StrStream};
pub use token::Tokens;
pub use value::Value;

use std::io;

/// Parses every table in a string.
///
/// # Examples
///
/// ```rust
/// use tblparse::from_str;
///
/// let tables = from_str("fruit 1 'name colour'\n  apple red\n  lime green").unwrap();
/// assert_eq!(tables[0].children().len(), 2);
/// ```
///
/// # Errors
///
/// Returns an error on unterminated quoted tokens or invalid embedded schemas.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Vec<Block>> {
    from_str_with_options(s, ParseOptions::default())
}

/// Parses every top-level block in a string with custom options.
///
/// # Errors
///
/// See [`from_str`]; additionally fails when nesting exceeds
/// [`ParseOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ParseOptions) -> Result<Vec<Block>> {
    let mut stream = StrStream::new(s);
    Parser::new(&mut stream, options).parse_all()
}

/// Parses every table in a byte slice of UTF-8 text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or do not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Vec<Block>> {
    let s = std::str::from_utf8(v)?;
    from_str(s)
}

/// Parses every table read from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use tblparse::from_reader;
/// use std::io::Cursor;
///
/// let tables = from_reader(Cursor::new(b"empty 0")).unwrap();
/// assert_eq!(tables[0].get("version"), Some("0"));
/// assert_eq!(tables[0].get("schema"), None);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Vec<Block>>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Materializes parsed blocks as nested maps, one per block.
#[must_use]
pub fn to_values(blocks: &[Block]) -> Vec<Value> {
    blocks.iter().map(Block::to_value).collect()
}
