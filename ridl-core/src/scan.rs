//! Backtracking scanner over the IDL source string.
//!
//! The scanner is the only component that touches raw text: the parser
//! is built purely from the primitives here. A stack of saved cursor
//! offsets makes speculative matching cheap; every `try_*` combinator
//! is save + match + restore, so a failed attempt never moves the
//! cursor.

use crate::error::ScanError;

/// Sentinel returned by `current`/`advance`/`peek` past the end of input.
pub const EOF_CHAR: char = '\0';

/// An immutable capture of a half-open byte range `[start, end)` in the
/// source, together with its text. Produced by `mark`/`capture`
/// bracketing around scanner advancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Cursor over an immutable source string.
///
/// Offsets are byte offsets, but the cursor only ever rests on UTF-8
/// character boundaries: `advance` steps by whole characters and
/// `try_skip_literal` steps by whole literals.
pub struct Scanner<'src> {
    src: &'src str,
    off: usize,
    start: usize,
    saved: Vec<usize>,
}

impl<'src> Scanner<'src> {
    pub fn new(src: &'src str) -> Self {
        Scanner {
            src,
            off: 0,
            start: 0,
            saved: Vec::new(),
        }
    }

    /// Current byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.off
    }

    /// The character under the cursor, or [`EOF_CHAR`] past the end.
    pub fn current(&self) -> char {
        self.src[self.off..].chars().next().unwrap_or(EOF_CHAR)
    }

    /// Step over the current character and return the new current one.
    pub fn advance(&mut self) -> char {
        if let Some(ch) = self.src[self.off..].chars().next() {
            self.off += ch.len_utf8();
        }
        self.current()
    }

    /// Look ahead `k` characters without moving the cursor. `peek(0)` is
    /// `current()`.
    pub fn peek(&self, k: usize) -> char {
        self.src[self.off..].chars().nth(k).unwrap_or(EOF_CHAR)
    }

    pub fn at_end(&self) -> bool {
        self.off >= self.src.len()
    }

    /// If the remaining input starts with `lit`, advance past it and
    /// return true; otherwise leave the cursor untouched.
    pub fn try_skip_literal(&mut self, lit: &str) -> bool {
        if self.src[self.off..].starts_with(lit) {
            self.off += lit.len();
            true
        } else {
            false
        }
    }

    /// Non-consuming [`Scanner::try_skip_literal`].
    pub fn check_literal(&mut self, lit: &str) -> bool {
        self.save();
        let matched = self.try_skip_literal(lit);
        self.restore();
        matched
    }

    /// Push the current cursor offset onto the save stack.
    pub fn save(&mut self) {
        self.saved.push(self.off);
    }

    /// Pop the save stack and reset the cursor to the popped offset.
    ///
    /// Every `restore` (or [`Scanner::commit`]) must pair with an
    /// earlier `save`; an unbalanced stack is a combinator bug, not an
    /// input condition.
    pub fn restore(&mut self) {
        self.off = self.saved.pop().expect("restore without a matching save");
    }

    /// Pop the save stack without moving the cursor; accepts the
    /// speculative match made since the matching `save`.
    pub fn commit(&mut self) {
        self.saved.pop().expect("commit without a matching save");
    }

    /// Begin a token capture at the current cursor position.
    pub fn mark(&mut self) {
        self.start = self.off;
    }

    /// Finish a capture started by [`Scanner::mark`].
    pub fn capture(&self) -> Token {
        Token {
            start: self.start,
            end: self.off,
            text: self.src[self.start..self.off].to_string(),
        }
    }

    /// Advance over a run of whitespace; returns whether any was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while !self.at_end() && self.current().is_whitespace() {
            self.advance();
            skipped = true;
        }
        skipped
    }

    /// Skip whitespace, the separator literal, then whitespace again, as
    /// one atomic attempt; on failure the cursor does not move.
    pub fn try_skip_separator(&mut self, sep: &str) -> bool {
        self.save();
        self.skip_whitespace();
        if self.try_skip_literal(sep) {
            self.skip_whitespace();
            self.commit();
            true
        } else {
            self.restore();
            false
        }
    }

    /// Non-consuming [`Scanner::try_skip_separator`].
    pub fn check_separator(&mut self, sep: &str) -> bool {
        self.save();
        self.skip_whitespace();
        let matched = self.try_skip_literal(sep);
        self.restore();
        matched
    }

    pub fn expect_separator(&mut self, sep: &str) -> Result<(), ScanError> {
        if self.try_skip_separator(sep) {
            Ok(())
        } else {
            Err(self.error(format!("expected separator '{sep}'")))
        }
    }

    /// Like separator matching, but the character after the matched
    /// literal must not be alphanumeric, so `module` does not match
    /// inside `modulename`.
    pub fn try_skip_keyword(&mut self, keyword: &str) -> bool {
        self.save();
        self.skip_whitespace();
        if self.try_skip_literal(keyword) && !self.current().is_alphanumeric() {
            self.skip_whitespace();
            self.commit();
            true
        } else {
            self.restore();
            false
        }
    }

    /// Non-consuming [`Scanner::try_skip_keyword`].
    pub fn check_keyword(&mut self, keyword: &str) -> bool {
        self.save();
        self.skip_whitespace();
        let matched = self.try_skip_literal(keyword) && !self.current().is_alphanumeric();
        self.restore();
        matched
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<(), ScanError> {
        if self.try_skip_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(format!("expected keyword '{keyword}'")))
        }
    }

    /// Build a scan error at the current cursor offset. This is the sole
    /// error-reporting path for the whole pipeline.
    pub fn error(&self, message: impl Into<String>) -> ScanError {
        ScanError {
            position: self.off,
            message: message.into(),
        }
    }
}
