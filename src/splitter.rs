//! Line splitting by literal separator or regular expression.
//!
//! Splitting follows `str::split` / `Regex::split` exactly: no separator yields
//! the whole line as one field, consecutive separators yield empty fields in
//! between. `remove_empty` filters the result afterwards, so indices always
//! address the filtered sequence.

use std::collections::VecDeque;

use regex::Regex;

use crate::error::{Error, ErrorKind, Result};

/// Byte range of one field inside the line it was split from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// How a line is cut into columns.
#[derive(Debug, Clone)]
pub enum Splitter {
    Literal(String),
    Pattern(Regex),
}

impl Splitter {
    /// A literal separator. Empty separators are rejected.
    pub fn literal(sep: impl Into<String>) -> Result<Self> {
        let sep = sep.into();
        if sep.is_empty() {
            return Err(Error::new(ErrorKind::EmptyDelimiter));
        }
        Ok(Splitter::Literal(sep))
    }

    /// A regular expression separator.
    pub fn pattern(pattern: &str) -> Result<Self> {
        compile(pattern).map(Splitter::Pattern)
    }

    /// Split `line` into its fields.
    pub fn split<'a>(&self, line: &'a str, remove_empty: bool) -> Vec<&'a str> {
        let fields: Vec<&str> = match self {
            Splitter::Literal(sep) => line.split(sep.as_str()).collect(),
            Splitter::Pattern(re) => re.split(line).collect(),
        };
        if remove_empty {
            self::remove_empty(fields)
        } else {
            fields
        }
    }

    /// Append the spans of every field of `line` to `out`.
    pub(crate) fn push_spans(&self, line: &str, remove_empty: bool, out: &mut VecDeque<Span>) {
        let mut last = 0;
        let mut push = |span: Span| {
            if !(remove_empty && span.is_empty()) {
                out.push_back(span);
            }
        };
        match self {
            Splitter::Literal(sep) => {
                for (at, _) in line.match_indices(sep.as_str()) {
                    push(Span::new(last, at));
                    last = at + sep.len();
                }
            }
            Splitter::Pattern(re) => {
                for m in re.find_iter(line) {
                    push(Span::new(last, m.start()));
                    last = m.end();
                }
            }
        }
        push(Span::new(last, line.len()));
    }
}

/// Drop zero-length fields.
pub fn remove_empty(fields: Vec<&str>) -> Vec<&str> {
    fields.into_iter().filter(|f| !f.is_empty()).collect()
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| {
        Error::new(ErrorKind::Regex {
            pattern: pattern.to_string(),
            source,
        })
    })
}

/// Whether occurrences of `sep` can overlap each other ("aa" in "aaa").
///
/// Splitting from the back with `rfind` only agrees with splitting from the
/// front when they cannot.
pub(crate) fn self_overlapping(sep: &str) -> bool {
    (1..sep.len()).any(|k| {
        sep.is_char_boundary(k)
            && sep.is_char_boundary(sep.len() - k)
            && sep[..k] == sep[sep.len() - k..]
    })
}
