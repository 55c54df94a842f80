//! # Stream Component
//!
//! The Stream component provides the position-tracked input view that every
//! parser in the system consumes. It owns an addressable token buffer, a
//! cursor, and a history of pre-take cursor positions that makes backtracking
//! possible.
//!
//! ## Design Principles
//!
//! * **Bounded Consumption**: [`Stream::take`] hands out at most the requested
//!   number of tokens and never fails; callers compare the returned slice
//!   length against what they asked for.
//! * **Replayable History**: every `take` records the cursor it started from,
//!   so [`Stream::undo`] can walk consumption back step by step.
//! * **Cheap Rewind**: composite combinators capture a [`Checkpoint`] on entry
//!   and restore it on failure instead of guessing how many undo steps their
//!   children performed.
//! * **Codepoint Tokens**: [`Stream::from_source`] decomposes a source string
//!   into Unicode scalar values, so a multi-byte character is one token.
//!
//! ## Position in the Pipeline
//!
//! ```text
//! Source Text → Stream → Parser Combinators → ParseResult
//! ```
//!
//! A stream is created once per parse attempt, threaded through the parser as
//! its single mutable resource, and discarded when a result has been produced.

/// A saved stream position, captured by [`Stream::checkpoint`].
///
/// A checkpoint remembers the cursor and the history depth at capture time.
/// Restoring it rewinds the cursor and drops every history entry recorded
/// after the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    cursor: usize,
    depth: usize,
}

/// A position-tracked, rewindable view over a buffer of tokens.
///
/// The cursor is 0-based and counts already-consumed tokens, so it always
/// satisfies `0 <= cursor <= len`. The stream is the only mutable state in a
/// parse run; parsers receive it by `&mut` reference, which makes sharing a
/// stream across concurrent parser invocations impossible by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream<T> {
    buffer: Vec<T>,
    cursor: usize,
    history: Vec<usize>,
}

impl<T> Stream<T> {
    /// Creates a stream positioned at the start of `buffer`.
    pub fn new(buffer: Vec<T>) -> Self {
        Self {
            buffer,
            cursor: 0,
            history: Vec::new(),
        }
    }

    /// Walks consumption back by up to `count` recorded take steps.
    ///
    /// Pops up to `count` history entries and moves the cursor to the oldest
    /// popped position. If the history holds fewer entries than requested, it
    /// is drained and the cursor returns to the start of the stream.
    pub fn undo(&mut self, count: usize) -> &mut Self {
        let count = count.max(1);
        if count > self.history.len() {
            self.history.clear();
            self.cursor = 0;
        } else {
            let split = self.history.len() - count;
            self.cursor = self.history[split];
            self.history.truncate(split);
        }
        self
    }

    /// True when every token has been consumed.
    pub fn at_end(&self) -> bool {
        self.cursor == self.buffer.len()
    }

    /// The current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of tokens in the underlying buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when the underlying buffer holds no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of tokens left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Captures the current cursor and history depth.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            depth: self.history.len(),
        }
    }

    /// Rewinds the stream to a previously captured checkpoint.
    ///
    /// The cursor returns to the captured position and every history entry
    /// recorded after the capture is dropped.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.history.truncate(checkpoint.depth);
    }
}

impl<T: Clone> Stream<T> {
    /// Consumes up to `count` tokens starting at the cursor.
    ///
    /// The requested count is normalized to at least 1; there is no way to
    /// peek zero tokens through this primitive. The returned slice is shorter
    /// than requested when the buffer runs out, and callers that need an exact
    /// length must check for themselves.
    ///
    /// Every call pushes exactly one history entry holding the pre-take
    /// cursor, including calls made at the end of the buffer.
    pub fn take(&mut self, count: usize) -> Vec<T> {
        let count = count.max(1);
        let end = (self.cursor + count).min(self.buffer.len());
        let slice = self.buffer[self.cursor..end].to_vec();
        self.history.push(self.cursor);
        self.cursor = end;
        slice
    }
}

impl Stream<char> {
    /// Builds a character stream from source text.
    ///
    /// The source is decomposed into Unicode scalar values, so a character
    /// outside the basic multilingual plane is still a single token.
    pub fn from_source(source: &str) -> Self {
        Self::new(source.chars().collect())
    }
}
