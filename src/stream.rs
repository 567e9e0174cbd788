//! Character stream cursor.
//!
//! Every other component reads input through the [`CharStream`] trait. It
//! offers one-character lookahead, consuming reads and absolute position
//! save/restore, which is all the tokenizer and the block parser need to
//! try a read and undo it.
//!
//! ```rust
//! use tblparse::{CharStream, StrStream};
//!
//! let mut stream = StrStream::new("héllo");
//! let start = stream.tell();
//! assert_eq!(stream.peek(), Some('h'));
//! assert_eq!(stream.read(2), "hé");
//! stream.seek(start);
//! assert_eq!(stream.read(10), "héllo");
//! assert_eq!(stream.read(1), "");
//! ```

/// A line/column location in the source, both 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

/// A readable character source with lookahead and rewind.
///
/// Positions returned by [`tell`](CharStream::tell) are opaque offsets; the
/// only valid arguments to [`seek`](CharStream::seek) are values previously
/// returned by `tell` on the same stream.
pub trait CharStream {
    /// Returns the next character without consuming it, or `None` at end of stream.
    fn peek(&self) -> Option<char>;

    /// Consumes up to `count` characters and returns them.
    ///
    /// Returns fewer characters (possibly none) when the stream ends first.
    fn read(&mut self, count: usize) -> String;

    /// Returns the current absolute position.
    fn tell(&self) -> usize;

    /// Restores a position previously obtained from [`tell`](CharStream::tell).
    fn seek(&mut self, pos: usize);

    /// Maps a position to a line and column for error reporting.
    fn location(&self, pos: usize) -> Location;

    /// Consumes a single character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.read(1);
        Some(c)
    }
}

/// An in-memory [`CharStream`] over a borrowed UTF-8 string.
///
/// Positions are byte offsets into the string and always fall on character
/// boundaries.
#[derive(Clone, Debug)]
pub struct StrStream<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> StrStream<'src> {
    /// Creates a stream positioned at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        StrStream { source, pos: 0 }
    }

    /// Returns the not-yet-consumed part of the source.
    #[inline]
    pub fn remaining(&self) -> &'src str {
        &self.source[self.pos..]
    }
}

impl CharStream for StrStream<'_> {
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn read(&mut self, count: usize) -> String {
        let rest = self.remaining();
        let end = rest
            .char_indices()
            .nth(count)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    #[inline]
    fn tell(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, pos: usize) {
        debug_assert!(self.source.is_char_boundary(pos));
        self.pos = pos.min(self.source.len());
    }

    fn location(&self, pos: usize) -> Location {
        let before = &self.source[..pos.min(self.source.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count() + 1;
        Location { line, col }
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}
