//! Configuration options for block parsing.
//!
//! ```rust
//! use tblparse::{from_str_with_options, ParseOptions, Schema};
//!
//! // Use '*' as the level marker and a custom top-level schema.
//! let options = ParseOptions::new()
//!     .with_marker('*')
//!     .with_root_schema(Schema::parse("title : item").unwrap().unwrap());
//!
//! let blocks = from_str_with_options("* groceries\n** milk", options).unwrap();
//! assert_eq!(blocks[0].get("title"), Some("groceries"));
//! assert_eq!(blocks[0].children()[0].get("item"), Some("milk"));
//! ```

use crate::Schema;

/// Default level-marker character.
pub const DEFAULT_MARKER: char = '#';

/// Default limit on nested block recursion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for the block parser.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Character whose runs declare a block's level (`###` is level 3).
    pub marker: char,
    /// Schema applied to top-level blocks.
    pub root_schema: Schema,
    /// Maximum number of nested blocks below a top-level block.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            marker: DEFAULT_MARKER,
            root_schema: Schema::table(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options: `#` marker, table root schema, depth limit 256.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tblparse::{ParseOptions, Schema};
    ///
    /// let options = ParseOptions::new();
    /// assert_eq!(options.marker, '#');
    /// assert_eq!(options.root_schema, Schema::table());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level-marker character.
    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Replaces the schema used for top-level blocks.
    #[must_use]
    pub fn with_root_schema(mut self, schema: Schema) -> Self {
        self.root_schema = schema;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
