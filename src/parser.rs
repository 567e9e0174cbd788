//! Recursive block parser.
//!
//! The parser pulls tokens from a [`CharStream`] and groups them into
//! [`Block`]s according to a [`Schema`]. Each block's nesting level is either
//! declared by a leading marker token (`###` is level 3) or inferred as one
//! deeper than the enclosing block. A candidate block whose level is not
//! deeper than the current one belongs to an enclosing scope: the parser
//! rewinds the stream to just before it and stops, leaving the token for the
//! caller.
//!
//! Top-level blocks are read against the root schema. Their children use the
//! schema spelled out in their own `schema` header field; every deeper level
//! inherits the next level of its parent's schema.
//!
//! ```rust
//! use tblparse::{ParseOptions, Parser, StrStream};
//!
//! let input = r#"
//! ; a recipe table
//! recipes 2 "dish : ingredient amount"
//! ### pancakes
//!    flour 200g
//!    milk 300ml
//! ### omelette
//!    eggs 3
//! "#;
//!
//! let mut stream = StrStream::new(input);
//! let mut parser = Parser::new(&mut stream, ParseOptions::default());
//! let tables = parser.parse_all().unwrap();
//! assert_eq!(tables.len(), 1);
//!
//! let recipes = &tables[0];
//! assert_eq!(recipes.get("table name"), Some("recipes"));
//!
//! let dishes: Vec<_> = recipes.children().iter().map(|d| d.get("dish")).collect();
//! assert_eq!(dishes, vec![Some("pancakes"), Some("omelette")]);
//!
//! let flour = &recipes.children()[0].children()[0];
//! assert_eq!(flour.get("ingredient"), Some("flour"));
//! assert_eq!(flour.get("amount"), Some("200g"));
//! ```

use crate::map::Header;
use crate::stream::CharStream;
use crate::token::next_token;
use crate::{Block, Error, ParseOptions, Result, Schema};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Header field of top-level blocks holding the schema of their children.
pub const SCHEMA_FIELD: &str = "schema";

/// Block parser over a borrowed character stream.
pub struct Parser<'s, S: CharStream + ?Sized> {
    stream: &'s mut S,
    options: ParseOptions,
    depth: usize,
}

impl<'s, S: CharStream + ?Sized> Parser<'s, S> {
    /// Creates a parser reading from the current position of `stream`.
    pub fn new(stream: &'s mut S, options: ParseOptions) -> Self {
        Parser {
            stream,
            options,
            depth: 0,
        }
    }

    /// Current position of the underlying stream.
    #[must_use]
    pub fn position(&self) -> usize {
        self.stream.tell()
    }

    fn is_marker(&self, token: &str) -> bool {
        !token.is_empty() && token.chars().all(|c| c == self.options.marker)
    }

    /// Reads one block deeper than `level`, with its whole subtree.
    ///
    /// Returns `Ok(None)` without consuming anything when `schema` is absent,
    /// when only whitespace and comments remain, when the next block is
    /// declared at `level` or above, or when the block would consume no
    /// input at all.
    ///
    /// # Errors
    ///
    /// Fails on unterminated quoted tokens, on a `schema` header field that
    /// cannot be tokenized, and when nesting exceeds
    /// [`ParseOptions::max_depth`].
    pub fn read(&mut self, schema: Option<&Schema>, level: usize) -> Result<Option<Block>> {
        let Some(schema) = schema else {
            return Ok(None);
        };

        let start = self.stream.tell();
        let Some(first) = next_token(self.stream, &[])? else {
            return Ok(None);
        };

        let block_level = if self.is_marker(&first) {
            first.chars().count()
        } else {
            self.stream.seek(start);
            level + 1
        };

        if block_level <= level {
            trace!(block_level, level, "block belongs to an enclosing scope");
            self.stream.seek(start);
            return Ok(None);
        }

        if self.depth >= self.options.max_depth {
            let loc = self.stream.location(start);
            return Err(Error::depth_limit(self.options.max_depth, loc.line, loc.col));
        }

        let mut header = Header::with_capacity(schema.fields().len());
        for field in schema.fields() {
            match next_token(self.stream, &[])? {
                Some(token) => {
                    header.insert(field.clone(), token);
                }
                None => break,
            }
        }
        trace!(block_level, ?header, "header");

        let handed_off = match header.get(SCHEMA_FIELD) {
            Some(spec) if level == 0 => {
                let parsed = Schema::parse(spec).map_err(|e| Error::invalid_schema(spec, e))?;
                debug!(
                    spec = %spec,
                    levels = parsed.as_ref().map_or(0, Schema::depth),
                    "schema hand-off"
                );
                Some(parsed)
            }
            _ => None,
        };
        let child_schema = match &handed_off {
            Some(parsed) => parsed.as_ref(),
            None => schema.child(),
        };

        self.depth += 1;
        let children = self.read_children(child_schema, block_level);
        self.depth -= 1;
        let children = children?;

        // Every yielded block consumes input.
        if self.stream.tell() == start {
            trace!(block_level, "empty block without input");
            return Ok(None);
        }

        debug!(
            block_level,
            fields = header.len(),
            children = children.len(),
            "block"
        );
        Ok(Some(Block::new(header, children)))
    }

    fn read_children(&mut self, schema: Option<&Schema>, level: usize) -> Result<Vec<Block>> {
        let mut children = Vec::new();
        while let Some(child) = self.read(schema, level)? {
            children.push(child);
        }
        Ok(children)
    }

    /// Lazily reads every block deeper than `level`, stopping at the first
    /// block that belongs to an enclosing scope.
    pub fn read_all<'p>(
        &'p mut self,
        schema: Option<&'p Schema>,
        level: usize,
    ) -> Blocks<'p, 's, S> {
        Blocks {
            parser: self,
            schema: schema.map(Cow::Borrowed),
            level,
            done: false,
        }
    }

    /// Lazily reads the top-level blocks against the configured root schema.
    pub fn tables(&mut self) -> Blocks<'_, 's, S> {
        let root = self.options.root_schema.clone();
        Blocks {
            parser: self,
            schema: Some(Cow::Owned(root)),
            level: 0,
            done: false,
        }
    }

    /// Reads every top-level block.
    ///
    /// # Errors
    ///
    /// See [`Parser::read`].
    pub fn parse_all(&mut self) -> Result<Vec<Block>> {
        self.tables().collect()
    }
}

/// Lazy sequence of sibling blocks produced by [`Parser::read_all`] and
/// [`Parser::tables`].
///
/// Fused after the last block or the first error.
pub struct Blocks<'p, 's, S: CharStream + ?Sized> {
    parser: &'p mut Parser<'s, S>,
    schema: Option<Cow<'p, Schema>>,
    level: usize,
    done: bool,
}

impl<S: CharStream + ?Sized> Iterator for Blocks<'_, '_, S> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.read(self.schema.as_deref(), self.level) {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
