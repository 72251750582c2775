// SPDX: CC0-1.0

use crate::stdlib;
use core::{fmt, iter::Peekable, str::CharIndices};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubStr {
    // yes, silly, but atomic operations are cheap for this use case
    src: Arc<String>,
    start: usize,
    len: usize,
}

impl SubStr {
    #[inline]
    pub const fn new(src: Arc<String>, start: usize, len: usize) -> Self {
        Self { src, start, len }
    }

    #[inline]
    pub fn all(src: Arc<String>) -> Self {
        let len = src.len();
        Self::new(src, 0, len)
    }

    pub fn src(&self) -> Arc<String> {
        Arc::clone(&self.src)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self) -> &str {
        &self.src[self.start..self.start + self.len]
    }

    /// Byte range `start..start + len` relative to this substring.
    pub fn sub(&self, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= self.len);
        Self::new(self.src(), self.start + start, len)
    }

    pub fn split_at(self, idx: usize) -> (Self, Self) {
        let mut l = self.clone();
        let mut r = self;
        l.len = idx;
        r.len -= idx;
        r.start += idx;
        (l, r)
    }

    pub fn find(&self, pat: &str) -> Option<usize> {
        self.get().find(pat)
    }

    pub fn contains(&self, pat: char) -> bool {
        self.get().contains(pat)
    }

    pub fn strip_prefix(&self, prefix: &str) -> Option<Self> {
        self.get()
            .starts_with(prefix)
            .then(|| self.sub(prefix.len(), self.len - prefix.len()))
    }

    pub fn strip_suffix(&self, suffix: &str) -> Option<Self> {
        self.get()
            .ends_with(suffix)
            .then(|| self.sub(0, self.len - suffix.len()))
    }

    /// Split around the first `pat`, dropping it.
    pub fn split_once(&self, pat: char) -> Option<(Self, Self)> {
        let idx = self.get().find(pat)?;
        let after = idx + pat.len_utf8();
        Some((self.sub(0, idx), self.sub(after, self.len - after)))
    }

    /// Every piece between occurrences of `pat`, empty pieces included.
    pub fn split(&self, pat: char) -> Vec<Self> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for (idx, _) in self.get().match_indices(pat) {
            pieces.push(self.sub(start, idx - start));
            start = idx + pat.len_utf8();
        }
        pieces.push(self.sub(start, self.len - start));
        pieces
    }
}

impl fmt::Display for SubStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

/// Remove every whitespace character.
pub fn clean(text: &str) -> Arc<String> {
    Arc::new(text.chars().filter(|chr| !chr.is_whitespace()).collect())
}

/// Replace `pi` and `π` with the digits of π. A preceding digit or `.` turns
/// the replacement into a product, so `2pi` becomes `2*3.141592653589793`.
pub fn expand_pi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(chr) = rest.chars().next() {
        let word = if rest.starts_with(stdlib::PI_WORD) {
            Some(stdlib::PI_WORD.len())
        } else if chr == stdlib::PI_SYMBOL {
            Some(chr.len_utf8())
        } else {
            None
        };
        match word {
            Some(len) => {
                if out.ends_with(|prev: char| prev.is_ascii_digit() || prev == '.') {
                    out.push('*');
                }
                out.push_str(&stdlib::PI.to_string());
                rest = &rest[len..];
            }
            None => {
                out.push(chr);
                rest = &rest[chr.len_utf8()..];
            }
        }
    }
    out
}

/// Signed terms of a polynomial body. A new term begins right before every
/// `+` or `-` that is not the first character, so `3x^2-2x+1` yields `3x^2`,
/// `-2x` and `+1`.
#[derive(Debug)]
pub struct Terms<'src> {
    body: &'src SubStr,
    cur: Peekable<CharIndices<'src>>,
}

impl<'src> Terms<'src> {
    pub fn new(body: &'src SubStr) -> Self {
        Self {
            body,
            cur: body.get().char_indices().peekable(),
        }
    }
}

impl Iterator for Terms<'_> {
    type Item = SubStr;

    fn next(&mut self) -> Option<Self::Item> {
        // the first character always belongs to the term, sign or not
        let (start, first) = self.cur.next()?;
        let mut end = start + first.len_utf8();
        while let Some((idx, chr)) = self.cur.peek().copied() {
            if chr == '+' || chr == '-' {
                break;
            }
            end = idx + chr.len_utf8();
            self.cur.next();
        }
        Some(self.body.sub(start, end - start))
    }
}
