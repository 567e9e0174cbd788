//! Parsed table blocks.
//!
//! A [`Block`] is a header (field name to token, in schema order) plus the
//! blocks nested one level below it. Blocks are built once by the
//! [`Parser`](crate::Parser) and not mutated afterwards.

use crate::map::Header;
use crate::parser::Parser;
use crate::stream::StrStream;
use crate::{Error, ParseOptions, Result, Schema, TableMap, Value};
use serde::{Serialize, Serializer};

/// Key under which materialized blocks list their children.
pub const CHILDREN: &str = "children";

/// A parsed node: header fields plus child blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    header: Header,
    children: Vec<Block>,
}

impl Block {
    pub fn new(header: Header, children: Vec<Block>) -> Self {
        Block { header, children }
    }

    /// Parses the first block of `input` against `schema`.
    ///
    /// Returns `Ok(None)` when `input` holds no tokens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tblparse::{Block, Schema};
    ///
    /// let schema = Schema::parse("name : value").unwrap().unwrap();
    /// let block = Block::parse("a\n  x\n  y", &schema).unwrap().unwrap();
    /// assert_eq!(block.get("name"), Some("a"));
    /// assert_eq!(block.children().len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Parser::read`].
    pub fn parse(input: &str, schema: &Schema) -> Result<Option<Block>> {
        let mut stream = StrStream::new(input);
        let mut parser = Parser::new(&mut stream, ParseOptions::default());
        parser.read(Some(schema), 0)
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the token stored under `field`, if the header has it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.header.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn children(&self) -> &[Block] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts every block below this one.
    #[must_use]
    pub fn descendants(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendants())
            .sum()
    }

    pub fn into_parts(self) -> (Header, Vec<Block>) {
        (self.header, self.children)
    }

    /// Materializes this block and its subtree as nested maps.
    ///
    /// The map holds every header field followed by `"children"`. A header
    /// field literally named `children` is shadowed by the child list.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = TableMap::with_capacity(self.header.len() + 1);
        for (field, token) in &self.header {
            map.insert(field.clone(), Value::String(token.clone()));
        }
        map.insert(
            CHILDREN.to_string(),
            Value::List(self.children.iter().map(Block::to_value).collect()),
        );
        Value::Map(map)
    }
}

/// Rebuilds a block tree from its materialized form.
impl TryFrom<&Value> for Block {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::invalid_tree(format!("expected a map, found {}", value)))?;

        let mut header = Header::with_capacity(map.len());
        let mut children = Vec::new();

        for (key, entry) in map.iter() {
            match entry {
                Value::String(token) if key != CHILDREN => {
                    header.insert(key.clone(), token.clone());
                }
                Value::List(items) if key == CHILDREN => {
                    children = items
                        .iter()
                        .map(|item| Block::try_from(item))
                        .collect::<Result<_>>()?;
                }
                other => {
                    return Err(Error::invalid_tree(format!(
                        "unexpected value for {:?}: {}",
                        key, other
                    )))
                }
            }
        }

        Ok(Block { header, children })
    }
}

impl TryFrom<Value> for Block {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Block::try_from(&value)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(field: &str, token: &str) -> Block {
        let mut header = Header::new();
        header.insert(field.to_string(), token.to_string());
        Block::new(header, vec![])
    }

    #[test]
    fn test_to_value_shape() {
        let mut header = Header::new();
        header.insert("name".to_string(), "a".to_string());
        let block = Block::new(header, vec![leaf("value", "x")]);

        let value = block.to_value();
        let map = value.as_map().unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "children"]);

        let children = map.get(CHILDREN).and_then(Value::as_list).unwrap();
        let child = children[0].as_map().unwrap();
        assert_eq!(child.get("value"), Some(&Value::from("x")));
        assert_eq!(child.get(CHILDREN), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_materialization_is_lossless() {
        let block = Block::new(
            leaf("name", "root").into_parts().0,
            vec![leaf("value", "x"), Block::new(Header::new(), vec![leaf("v", "deep")])],
        );
        assert_eq!(Block::try_from(block.to_value()).unwrap(), block);
    }

    #[test]
    fn test_try_from_rejects_non_block() {
        assert!(Block::try_from(Value::from("x")).is_err());

        let mut map = TableMap::new();
        map.insert(CHILDREN.to_string(), Value::from("oops"));
        assert!(matches!(
            Block::try_from(Value::Map(map)),
            Err(Error::InvalidTree(_))
        ));
    }

    #[test]
    fn test_descendants() {
        let block = Block::new(
            Header::new(),
            vec![
                Block::new(Header::new(), vec![leaf("a", "1"), leaf("a", "2")]),
                leaf("b", "3"),
            ],
        );
        assert_eq!(block.descendants(), 4);
        assert!(!block.is_leaf());
        assert!(block.children()[1].is_leaf());
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let block = Block::new(leaf("name", "a").into_parts().0, vec![leaf("value", "x")]);
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"name":"a","children":[{"value":"x","children":[]}]}"#);
    }
}
