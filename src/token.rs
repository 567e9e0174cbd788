//! Tokenizer for the table format.
//!
//! Tokens are plain strings. The rules, applied at each token boundary:
//!
//! - `;` starts a comment that runs to (but not including) the end of the line
//! - whitespace, newlines included, separates tokens
//! - a *discrete* character forms a token on its own, together with any
//!   immediately repeated copies of itself (`:`, `###`)
//! - `'` and `"` delimit quoted segments; inside them `\` takes the next
//!   character literally, and the quotes themselves are dropped
//! - anything else accumulates into a plain token until whitespace or a
//!   discrete character, with quoted segments spliced in whole
//!
//! ```rust
//! use tblparse::token::{tokenize, tokenize_with};
//!
//! let tokens = tokenize(r#"name "first last" ; a comment
//!     x'y z'"#).unwrap();
//! assert_eq!(tokens, vec!["name", "first last", "xy z"]);
//!
//! let tokens = tokenize_with("a b:c", &[':']).unwrap();
//! assert_eq!(tokens, vec!["a", "b", ":", "c"]);
//! ```

use crate::stream::{CharStream, StrStream};
use crate::{Error, Result};
use tracing::trace;

/// Character that introduces a comment running to the end of the line.
pub const COMMENT: char = ';';

/// Characters that open and close a delimited token.
pub const QUOTES: [char; 2] = ['\'', '"'];

/// Escape introducer inside delimited tokens.
pub const ESCAPE: char = '\\';

fn skip_comments<S: CharStream + ?Sized>(stream: &mut S) {
    while stream.peek() == Some(COMMENT) {
        while matches!(stream.peek(), Some(c) if c != '\n') {
            stream.bump();
        }
    }
}

fn skip_whitespace<S: CharStream + ?Sized>(stream: &mut S) {
    loop {
        skip_comments(stream);
        match stream.peek() {
            Some(c) if c.is_whitespace() => {
                stream.bump();
            }
            _ => break,
        }
    }
}

/// Reads a quoted segment, appending its unescaped contents to `out`.
///
/// The stream must be positioned on the opening quote.
fn read_delimited<S: CharStream + ?Sized>(stream: &mut S, out: &mut String) -> Result<()> {
    let start = stream.tell();
    let Some(delimiter) = stream.bump() else {
        return Ok(());
    };

    loop {
        match stream.bump() {
            Some(c) if c == delimiter => return Ok(()),
            Some(ESCAPE) => match stream.bump() {
                Some(escaped) => out.push(escaped),
                None => {
                    let loc = stream.location(stream.tell());
                    return Err(Error::dangling_escape(loc.line, loc.col));
                }
            },
            Some(c) => out.push(c),
            None => {
                let loc = stream.location(start);
                return Err(Error::unterminated_quote(delimiter, loc.line, loc.col));
            }
        }
    }
}

/// Consumes and returns the next token from `stream`.
///
/// Returns `Ok(None)` exactly when only whitespace and comments remain.
/// Characters in `discrete` always form tokens of their own.
///
/// # Errors
///
/// Returns [`Error::UnterminatedQuote`] when a quoted segment is never
/// closed and [`Error::DanglingEscape`] when the input ends right after an
/// escape inside quotes.
pub fn next_token<S: CharStream + ?Sized>(
    stream: &mut S,
    discrete: &[char],
) -> Result<Option<String>> {
    skip_whitespace(stream);

    let Some(first) = stream.peek() else {
        return Ok(None);
    };

    let mut token = String::new();

    if discrete.contains(&first) {
        while stream.peek() == Some(first) {
            stream.bump();
            token.push(first);
        }
        trace!(token = %token, "discrete token");
        return Ok(Some(token));
    }

    loop {
        skip_comments(stream);
        match stream.peek() {
            Some(c) if QUOTES.contains(&c) => read_delimited(stream, &mut token)?,
            Some(c) if !c.is_whitespace() && !discrete.contains(&c) => {
                stream.bump();
                token.push(c);
            }
            _ => break,
        }
    }

    trace!(token = %token, "token");
    Ok(Some(token))
}

/// A lazy sequence of tokens read from a borrowed stream.
///
/// The iterator is fused at end of stream or after the first error. Callers
/// can save [`position`](Tokens::position) before pulling tokens and
/// [`rewind`](Tokens::rewind) to make those tokens available again.
///
/// ```rust
/// use tblparse::{StrStream, Tokens};
///
/// let mut stream = StrStream::new("alpha beta");
/// let mut tokens = Tokens::new(&mut stream);
/// let saved = tokens.position();
/// assert_eq!(tokens.next().unwrap().unwrap(), "alpha");
/// tokens.rewind(saved);
/// assert_eq!(tokens.next().unwrap().unwrap(), "alpha");
/// assert_eq!(tokens.next().unwrap().unwrap(), "beta");
/// assert!(tokens.next().is_none());
/// ```
pub struct Tokens<'s, S: CharStream + ?Sized> {
    stream: &'s mut S,
    discrete: Vec<char>,
    done: bool,
}

impl<'s, S: CharStream + ?Sized> Tokens<'s, S> {
    /// Creates a token sequence with no discrete characters.
    pub fn new(stream: &'s mut S) -> Self {
        Tokens {
            stream,
            discrete: Vec::new(),
            done: false,
        }
    }

    /// Registers characters that always form standalone tokens.
    #[must_use]
    pub fn with_discrete(mut self, discrete: &[char]) -> Self {
        self.discrete = discrete.to_vec();
        self
    }

    /// Current position of the underlying stream.
    pub fn position(&self) -> usize {
        self.stream.tell()
    }

    /// Restores a position from [`position`](Tokens::position), un-fusing the iterator.
    pub fn rewind(&mut self, pos: usize) {
        self.stream.seek(pos);
        self.done = false;
    }
}

impl<S: CharStream + ?Sized> Iterator for Tokens<'_, S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_token(self.stream, &self.discrete) {
            Ok(Some(token)) => Some(Ok(token)),
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

/// Tokenizes a whole string.
///
/// # Errors
///
/// Fails on unterminated quotes, see [`next_token`].
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    tokenize_with(input, &[])
}

/// Tokenizes a whole string with the given discrete characters.
///
/// # Errors
///
/// Fails on unterminated quotes, see [`next_token`].
pub fn tokenize_with(input: &str, discrete: &[char]) -> Result<Vec<String>> {
    let mut stream = StrStream::new(input);
    Tokens::new(&mut stream).with_discrete(discrete).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tokens() {
        assert_eq!(
            tokenize("  one\ttwo\n\nthree  ").unwrap(),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t ").unwrap().is_empty());
        assert!(tokenize("; only a comment").unwrap().is_empty());
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(tokenize(r#""a\"b""#).unwrap(), vec!["a\"b"]);
        assert_eq!(tokenize(r"'x\\y'").unwrap(), vec!["x\\y"]);
    }

    #[test]
    fn test_backslash_outside_quotes_is_literal() {
        assert_eq!(tokenize(r"C:\path\to").unwrap(), vec![r"C:\path\to"]);
    }

    #[test]
    fn test_other_quote_inside_delimited() {
        assert_eq!(tokenize(r#""it's""#).unwrap(), vec!["it's"]);
        assert_eq!(tokenize(r#"'say "hi"'"#).unwrap(), vec!["say \"hi\""]);
    }

    #[test]
    fn test_comment_stripping() {
        assert_eq!(tokenize("foo ; bar\nbaz").unwrap(), vec!["foo", "baz"]);
        assert_eq!(tokenize(";a\n;b\n;c\nx").unwrap(), vec!["x"]);
    }

    #[test]
    fn test_comment_ends_plain_token() {
        assert_eq!(tokenize("foo;bar\nbaz").unwrap(), vec!["foo", "baz"]);
    }

    #[test]
    fn test_comment_char_inside_quotes() {
        assert_eq!(tokenize("'a;b' c").unwrap(), vec!["a;b", "c"]);
    }

    #[test]
    fn test_quoted_segment_inside_plain_token() {
        assert_eq!(tokenize(r#"foo"a b"bar baz"#).unwrap(), vec!["fooa bbar", "baz"]);
    }

    #[test]
    fn test_empty_quoted_token_does_not_end_sequence() {
        assert_eq!(tokenize(r#""" after"#).unwrap(), vec!["", "after"]);
    }

    #[test]
    fn test_discrete_runs() {
        assert_eq!(
            tokenize_with("a::b : c", &[':']).unwrap(),
            vec!["a", "::", "b", ":", "c"]
        );
        assert_eq!(
            tokenize_with("###title", &['#']).unwrap(),
            vec!["###", "title"]
        );
    }

    #[test]
    fn test_discrete_after_whitespace_and_comment() {
        assert_eq!(
            tokenize_with("x ; note\n : y", &[':']).unwrap(),
            vec!["x", ":", "y"]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let err = tokenize("ok\n  \"open").unwrap_err();
        assert_eq!(err, Error::unterminated_quote('"', 2, 3));
    }

    #[test]
    fn test_dangling_escape() {
        let err = tokenize("'abc\\").unwrap_err();
        assert!(matches!(err, Error::DanglingEscape { line: 1, .. }));
    }

    #[test]
    fn test_tokens_fuse_after_error() {
        let mut stream = StrStream::new("a 'b");
        let mut tokens = Tokens::new(&mut stream);
        assert_eq!(tokens.next().unwrap().unwrap(), "a");
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_next_token_leaves_trailing_whitespace() {
        let mut stream = StrStream::new("a   b");
        assert_eq!(next_token(&mut stream, &[]).unwrap().as_deref(), Some("a"));
        assert_eq!(stream.remaining(), "   b");
    }
}
