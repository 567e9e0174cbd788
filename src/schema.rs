//! Field schemas for nested table blocks.
//!
//! A schema lists the header field names of one nesting level and,
//! optionally, the schema of the level below. It is written as
//! colon-separated groups of field names:
//!
//! ```text
//! name version : step duration : note
//! ```
//!
//! Field names follow the usual tokenizer rules, so names containing spaces
//! are quoted (`"table name"`).
//!
//! ```rust
//! use tblparse::Schema;
//!
//! let schema = Schema::parse("name version : step duration : note")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(schema.fields(), ["name", "version"]);
//! assert_eq!(schema.child().unwrap().fields(), ["step", "duration"]);
//! assert_eq!(schema.depth(), 3);
//! ```

use crate::token::{tokenize_with, COMMENT, QUOTES};
use crate::Result;
use std::fmt;

/// Separates the field groups of consecutive levels.
pub const SEPARATOR: char = ':';

/// Spec string of the schema every table file's top-level blocks use.
pub const TABLE_SCHEMA: &str = r#""table name" version schema"#;

/// One level of field names plus the schema of the level below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
    child: Option<Box<Schema>>,
}

impl Schema {
    /// Creates a schema level from field names and an optional child level.
    pub fn new<I, T>(fields: I, child: Option<Schema>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Schema {
            fields: fields.into_iter().map(Into::into).collect(),
            child: child.map(Box::new),
        }
    }

    /// The fixed root schema: `table name`, `version`, `schema`.
    #[must_use]
    pub fn table() -> Self {
        Schema::new(["table name", "version", "schema"], None)
    }

    /// Parses a schema from its spec string.
    ///
    /// Returns `Ok(None)` when `spec` names no fields at all, including specs
    /// made only of separators such as `":"`.
    ///
    /// # Errors
    ///
    /// Fails only when `spec` has an unterminated quoted field name.
    pub fn parse(spec: &str) -> Result<Option<Self>> {
        let tokens = tokenize_with(spec, &[SEPARATOR])?;
        Ok(Self::from_tokens(&tokens))
    }

    /// Builds a schema from an already tokenized spec.
    ///
    /// Tokens up to the first separator token form this level; the rest
    /// forms the child levels. A separator token is any non-empty run of
    /// [`SEPARATOR`]. A level with no fields and nothing below it is no
    /// level at all.
    pub fn from_tokens<T: AsRef<str>>(tokens: &[T]) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }

        let split = tokens.iter().position(|t| is_separator(t.as_ref()));
        let (fields, rest) = match split {
            Some(i) => (&tokens[..i], &tokens[i + 1..]),
            None => (tokens, &tokens[tokens.len()..]),
        };

        let child = Self::from_tokens(rest).map(Box::new);
        if fields.is_empty() && child.is_none() {
            return None;
        }
        Some(Schema {
            fields: fields.iter().map(|t| t.as_ref().to_string()).collect(),
            child,
        })
    }

    /// Field names of this level, in header order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Schema of the level below, if any.
    #[must_use]
    pub fn child(&self) -> Option<&Schema> {
        self.child.as_deref()
    }

    /// Number of levels in the chain, this one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels().count()
    }

    /// Iterates over this level and every level below it.
    pub fn levels(&self) -> Levels<'_> {
        Levels { next: Some(self) }
    }
}

fn is_separator(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c == SEPARATOR)
}

/// Iterator over the levels of a [`Schema`], outermost first.
pub struct Levels<'a> {
    next: Option<&'a Schema>,
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a Schema;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.child();
        Some(current)
    }
}

fn needs_quotes(field: &str) -> bool {
    field.is_empty()
        || field.chars().any(|c| {
            c.is_whitespace() || c == SEPARATOR || c == COMMENT || QUOTES.contains(&c) || c == '\\'
        })
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    if !needs_quotes(field) {
        return f.write_str(field);
    }
    f.write_str("\"")?;
    for c in field.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

/// Renders the spec string, quoting field names where the tokenizer requires it.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, level) in self.levels().enumerate() {
            if depth > 0 {
                write!(f, " {} ", SEPARATOR)?;
            }
            for (i, field) in level.fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write_field(f, field)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_schema_literal() {
        let parsed = Schema::parse(TABLE_SCHEMA).unwrap().unwrap();
        assert_eq!(parsed, Schema::table());
        assert_eq!(parsed.fields(), ["table name", "version", "schema"]);
        assert!(parsed.child().is_none());
    }

    #[test]
    fn test_empty_spec_is_no_schema() {
        assert_eq!(Schema::parse("").unwrap(), None);
        assert_eq!(Schema::parse("   ; nothing here").unwrap(), None);
    }

    #[test]
    fn test_nested_levels() {
        let schema = Schema::parse("x : y").unwrap().unwrap();
        assert_eq!(schema.fields(), ["x"]);
        let child = schema.child().unwrap();
        assert_eq!(child.fields(), ["y"]);
        assert!(child.child().is_none());
    }

    #[test]
    fn test_separator_without_spaces() {
        let schema = Schema::parse("a b:c:d").unwrap().unwrap();
        let levels: Vec<_> = schema.levels().map(|l| l.fields().to_vec()).collect();
        assert_eq!(levels, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn test_empty_group_before_separator() {
        let schema = Schema::parse(": value").unwrap().unwrap();
        assert!(schema.fields().is_empty());
        assert_eq!(schema.child().unwrap().fields(), ["value"]);
    }

    #[test]
    fn test_trailing_separator_has_no_child() {
        let schema = Schema::parse("a :").unwrap().unwrap();
        assert_eq!(schema.fields(), ["a"]);
        assert!(schema.child().is_none());
    }

    #[test]
    fn test_separators_alone_are_no_schema() {
        assert_eq!(Schema::parse(":").unwrap(), None);
        assert_eq!(Schema::parse(": :").unwrap(), None);
        assert_eq!(Schema::parse(":::").unwrap(), None);
        assert_eq!(Schema::from_tokens(&[":", ":"]), None);
    }

    #[test]
    fn test_trailing_empty_groups_are_dropped() {
        let schema = Schema::parse("a : :").unwrap().unwrap();
        assert_eq!(schema.fields(), ["a"]);
        assert!(schema.child().is_none());
    }

    #[test]
    fn test_display_reparses() {
        let schema = Schema::parse(r#""table name" 'it"s' : x\y : z"#).unwrap().unwrap();
        let rendered = schema.to_string();
        assert_eq!(Schema::parse(&rendered).unwrap().unwrap(), schema);
    }

    #[test]
    fn test_unterminated_field_name() {
        assert!(Schema::parse("a 'b").is_err());
    }
}
