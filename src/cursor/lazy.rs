use crate::cursor::{Columns, FieldBuffer, Splitting};
use crate::error::{Error, ErrorKind, Result};
use crate::splitter::{self, Span};

/// Splits on a literal separator only as far as lookups require.
///
/// Positive indices split from the front, negative ones from the back, so
/// `1` and `-1` are both cheap on long lines.
#[derive(Debug)]
pub struct LazyColumns {
    buf: FieldBuffer,
    sep: String,
    remove_empty: bool,
    /// `rfind` from the back agrees with `find` from the front.
    back_safe: bool,
}

impl LazyColumns {
    pub fn new(sep: impl Into<String>, remove_empty: bool) -> Result<Self> {
        let sep = sep.into();
        if sep.is_empty() {
            return Err(Error::new(ErrorKind::EmptyDelimiter));
        }
        let back_safe = !splitter::self_overlapping(&sep);
        let mut columns = Self {
            buf: FieldBuffer::with_capacity(16),
            sep,
            remove_empty,
            back_safe,
        };
        columns.reset("");
        Ok(columns)
    }
}

impl Splitting for LazyColumns {
    fn buffer(&self) -> &FieldBuffer {
        &self.buf
    }

    fn buffer_mut(&mut self) -> &mut FieldBuffer {
        &mut self.buf
    }

    fn remove_empty(&self) -> bool {
        self.remove_empty
    }

    fn grow_front(&mut self) -> bool {
        if self.buf.done {
            return false;
        }
        loop {
            let rest = self.buf.rest;
            let found = self.buf.text[rest.start..rest.end].find(&self.sep);
            let field = match found {
                Some(at) => {
                    self.buf.rest.start = rest.start + at + self.sep.len();
                    Span::new(rest.start, rest.start + at)
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
        if !self.back_safe {
            self.finish();
            return true;
        }
        loop {
            let rest = self.buf.rest;
            let found = self.buf.text[rest.start..rest.end].rfind(&self.sep);
            let field = match found {
                Some(at) => {
                    let at = rest.start + at;
                    self.buf.rest.end = at;
                    Span::new(at + self.sep.len(), rest.end)
                }
                None => {
                    self.buf.done = true;
                    self.buf.rest = Span::new(rest.start, rest.start);
                    rest
                }
            };
            if !(self.remove_empty && field.is_empty()) {
                self.buf.push_back_split(field);
                return true;
            }
            if self.buf.done {
                return true;
            }
        }
    }
}
