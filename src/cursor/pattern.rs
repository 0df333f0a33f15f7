use regex::Regex;

use crate::cursor::{Columns, FieldBuffer, Splitting};
use crate::error::Result;
use crate::splitter::{self, Span};

/// Splits on a regular expression only as far as forward lookups require.
///
/// Regexes cannot be searched from the right, so a negative index splits the
/// rest of the line in one go.
#[derive(Debug)]
pub struct PatternColumns {
    buf: FieldBuffer,
    re: Regex,
    remove_empty: bool,
    search_at: usize,
    last_match_end: Option<usize>,
}

impl PatternColumns {
    pub fn new(pattern: &str, remove_empty: bool) -> Result<Self> {
        let mut columns = Self {
            buf: FieldBuffer::with_capacity(16),
            re: splitter::compile(pattern)?,
            remove_empty,
            search_at: 0,
            last_match_end: None,
        };
        columns.reset("");
        Ok(columns)
    }

    /// The next separator match, with the same empty-match rules as
    /// `Regex::find_iter`.
    fn next_match(&mut self) -> Option<(usize, usize)> {
        let text = &self.buf.text;
        loop {
            let m = self.re.find_at(text, self.search_at)?;
            if m.start() == m.end() && Some(m.end()) == self.last_match_end {
                let c = text[m.end()..].chars().next()?;
                self.search_at = m.end() + c.len_utf8();
                continue;
            }
            self.search_at = m.end();
            self.last_match_end = Some(m.end());
            return Some((m.start(), m.end()));
        }
    }
}

impl Splitting for PatternColumns {
    fn buffer(&self) -> &FieldBuffer {
        &self.buf
    }

    fn buffer_mut(&mut self) -> &mut FieldBuffer {
        &mut self.buf
    }

    fn remove_empty(&self) -> bool {
        self.remove_empty
    }

    fn start(&mut self) {
        self.search_at = 0;
        self.last_match_end = None;
    }

    fn grow_front(&mut self) -> bool {
        if self.buf.done {
            return false;
        }
        loop {
            let rest = self.buf.rest;
            let field = match self.next_match() {
                Some((start, end)) => {
                    self.buf.rest.start = end;
                    Span::new(rest.start, start)
                }
                None => {
                    self.buf.done = true;
                    self.buf.rest = Span::new(rest.end, rest.end);
                    rest
                }
            };
            if !(self.remove_empty && field.is_empty()) {
                self.buf.push_front_split(field);
                return true;
            }
            if self.buf.done {
                return true;
            }
        }
    }

    fn grow_back(&mut self) -> bool {
        if self.buf.done {
            return false;
        }
        self.finish();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_lookup_is_lazy() {
        let mut cols = PatternColumns::new(r"\s+", false).unwrap();
        cols.reset("a  b\tc d");
        assert_eq!(cols.element_at(2).unwrap(), "b");
        assert_eq!(cols.buf.spans.len(), 2);
        assert!(!cols.buf.done);
    }

    #[test]
    fn negative_lookup_splits_the_rest() {
        let mut cols = PatternColumns::new(r"\s+", false).unwrap();
        cols.reset("a  b\tc d");
        assert_eq!(cols.element_at(-1).unwrap(), "d");
        assert!(cols.buf.done);
        assert_eq!(cols.element_at(-4).unwrap(), "a");
    }

    #[test]
    fn matches_regex_split() {
        let re = Regex::new("[,;]").unwrap();
        for line in ["", ";", "a;b,,c", ",a;", "abc"] {
            for remove_empty in [false, true] {
                let mut cols = PatternColumns::new("[,;]", remove_empty).unwrap();
                cols.reset(line);
                let mut want: Vec<&str> = re.split(line).collect();
                if remove_empty {
                    want.retain(|f| !f.is_empty());
                }
                assert_eq!(cols.to_array().to_vec(), want, "line={line:?}");
            }
        }
    }

    #[test]
    fn invalid_pattern() {
        assert!(PatternColumns::new("[", false).is_err());
    }
}
