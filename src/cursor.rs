//! Position-addressable views over one line's columns.
//!
//! A cursor is created once and [`Columns::reset`] for every line. Columns are
//! addressed 1-based from the front (`1` is the first column) or negatively
//! from the back (`-1` is the last column); `0` is never a valid address.
//!
//! Three strategies share one storage layout, a gap buffer of field spans:
//!
//! ```text
//!   spans: [ f1 f2 f3 | b3 b2 b1 ]     rest: the unsplit middle of the line
//!            ^ head     ^ tail
//! ```
//!
//! Columns split from the front are inserted at `head` and advance it; columns
//! split from the back are also inserted at `head`, ahead of the previously
//! split back columns. Once the rest is consumed the spans are the complete
//! row, in order.

mod eager;
mod lazy;
mod pattern;

use std::collections::VecDeque;

pub use eager::EagerColumns;
pub use lazy::LazyColumns;
pub use pattern::PatternColumns;

use crate::error::{Error, Result};
use crate::splitter::{Span, Splitter};

/// The addressable view over one line's columns.
pub trait Columns {
    /// Discard everything known about the previous line and start on `line`.
    fn reset(&mut self, line: &str);

    /// Start on a record that was already split elsewhere (CSV/TSV).
    fn reset_from_fields(&mut self, fields: &mut dyn Iterator<Item = &str>);

    /// The column at `idx`: 1-based from the front, or negative from the back.
    fn element_at(&mut self, idx: i64) -> Result<&str>;

    /// The next column from the front not yet handed out by `next_column`
    /// or `last_column`.
    fn next_column(&mut self) -> Option<&str>;

    /// The next column from the back not yet handed out by `next_column`
    /// or `last_column`.
    fn last_column(&mut self) -> Option<&str>;

    /// Every column of the line. Computed once per line.
    fn to_array(&mut self) -> Row<'_>;
}

/// A materialised row: the line text plus the span of every column.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    text: &'a str,
    spans: &'a [Span],
}

impl<'a> Row<'a> {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The column at a 0-based position.
    pub fn get(&self, i: usize) -> Option<&'a str> {
        self.spans.get(i).map(|s| &self.text[s.start..s.end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        let text = self.text;
        self.spans.iter().map(move |s| &text[s.start..s.end])
    }

    /// Columns in `[from, to)`, 0-based.
    pub fn slice(&self, from: usize, to: usize) -> impl Iterator<Item = &'a str> + '_ {
        let text = self.text;
        self.spans[from..to].iter().map(move |s| &text[s.start..s.end])
    }

    pub fn to_vec(&self) -> Vec<&'a str> {
        self.iter().collect()
    }
}

/// Gap buffer shared by every strategy.
#[derive(Debug, Default)]
pub(crate) struct FieldBuffer {
    pub(crate) text: String,
    pub(crate) spans: VecDeque<Span>,
    /// Number of columns split from the front.
    pub(crate) head: usize,
    /// The part of `text` not split yet.
    pub(crate) rest: Span,
    /// Set once `rest` is consumed; `spans` is then the whole row.
    pub(crate) done: bool,
    /// Columns handed out by `next_column` / `last_column`.
    front_read: usize,
    back_read: usize,
}

impl FieldBuffer {
    pub(crate) fn with_capacity(columns: usize) -> Self {
        Self {
            spans: VecDeque::with_capacity(columns),
            ..Self::default()
        }
    }

    pub(crate) fn reset(&mut self, line: &str) {
        self.text.clear();
        self.text.push_str(line);
        self.spans.clear();
        self.head = 0;
        self.rest = Span::new(0, self.text.len());
        self.done = false;
        self.front_read = 0;
        self.back_read = 0;
    }

    pub(crate) fn reset_from_fields(
        &mut self,
        fields: &mut dyn Iterator<Item = &str>,
        remove_empty: bool,
    ) {
        self.reset("");
        for field in fields {
            if remove_empty && field.is_empty() {
                continue;
            }
            let start = self.text.len();
            self.text.push_str(field);
            self.spans.push_back(Span::new(start, self.text.len()));
        }
        self.head = self.spans.len();
        self.rest = Span::new(self.text.len(), self.text.len());
        self.done = true;
    }

    /// Split the whole line in one pass.
    pub(crate) fn split_all(&mut self, splitter: &Splitter, remove_empty: bool) {
        self.spans.clear();
        splitter.push_spans(&self.text, remove_empty, &mut self.spans);
        self.head = self.spans.len();
        self.rest = Span::new(self.text.len(), self.text.len());
        self.done = true;
    }

    pub(crate) fn tail(&self) -> usize {
        self.spans.len() - self.head
    }

    pub(crate) fn field(&self, span: Span) -> &str {
        &self.text[span.start..span.end]
    }

    /// Record a column split off the front of `rest`.
    pub(crate) fn push_front_split(&mut self, span: Span) {
        self.spans.insert(self.head, span);
        self.head += 1;
    }

    /// Record a column split off the back of `rest`.
    pub(crate) fn push_back_split(&mut self, span: Span) {
        self.spans.insert(self.head, span);
    }

    /// The `n`-th column from the front (1-based), if already known.
    fn front(&self, n: usize) -> Option<Span> {
        if n <= self.head || (self.done && n <= self.spans.len()) {
            Some(self.spans[n - 1])
        } else {
            None
        }
    }

    /// The `n`-th column from the back (1-based), if already known.
    fn back(&self, n: usize) -> Option<Span> {
        if n <= self.tail() || (self.done && n <= self.spans.len()) {
            Some(self.spans[self.spans.len() - n])
        } else {
            None
        }
    }

    pub(crate) fn row(&mut self) -> Row<'_> {
        let spans = self.spans.make_contiguous();
        Row {
            text: &self.text,
            spans,
        }
    }
}

/// How a strategy grows its buffer. Everything else is shared.
pub(crate) trait Splitting {
    fn buffer(&self) -> &FieldBuffer;
    fn buffer_mut(&mut self) -> &mut FieldBuffer;
    fn remove_empty(&self) -> bool;

    /// Called after the buffer has been reset to a new line.
    fn start(&mut self) {}

    /// Consume more of the line from the front. `false` only if the line
    /// was already fully split.
    fn grow_front(&mut self) -> bool;

    /// Consume more of the line from the back. `false` only if the line
    /// was already fully split.
    fn grow_back(&mut self) -> bool;

    fn finish(&mut self) {
        while self.grow_front() {}
    }

    fn locate_front(&mut self, n: usize) -> Option<Span> {
        loop {
            if let Some(span) = self.buffer().front(n) {
                return Some(span);
            }
            if !self.grow_front() {
                return self.buffer().front(n);
            }
        }
    }

    fn locate_back(&mut self, n: usize) -> Option<Span> {
        loop {
            if let Some(span) = self.buffer().back(n) {
                return Some(span);
            }
            if !self.grow_back() {
                return self.buffer().back(n);
            }
        }
    }
}

#[allow(private_bounds)]
impl<T: Splitting> Columns for T {
    fn reset(&mut self, line: &str) {
        self.buffer_mut().reset(line);
        self.start();
    }

    fn reset_from_fields(&mut self, fields: &mut dyn Iterator<Item = &str>) {
        let remove_empty = self.remove_empty();
        self.buffer_mut().reset_from_fields(fields, remove_empty);
    }

    fn element_at(&mut self, idx: i64) -> Result<&str> {
        let n = idx.unsigned_abs() as usize;
        let span = match idx {
            0 => None,
            i if i > 0 => self.locate_front(n),
            _ => self.locate_back(n),
        };
        match span {
            Some(span) => Ok(self.buffer().field(span)),
            None => Err(Error::index_out_of_range()),
        }
    }

    fn next_column(&mut self) -> Option<&str> {
        let n = self.buffer().front_read + 1;
        let span = self.locate_front(n)?;
        let buf = self.buffer_mut();
        // A column already handed out from the back ends the walk.
        if buf.done && n + buf.back_read > buf.spans.len() {
            return None;
        }
        buf.front_read = n;
        Some(self.buffer().field(span))
    }

    fn last_column(&mut self) -> Option<&str> {
        let n = self.buffer().back_read + 1;
        let span = self.locate_back(n)?;
        let buf = self.buffer_mut();
        if buf.done && n + buf.front_read > buf.spans.len() {
            return None;
        }
        buf.back_read = n;
        Some(self.buffer().field(span))
    }

    fn to_array(&mut self) -> Row<'_> {
        if !self.buffer().done {
            self.finish();
        }
        self.buffer_mut().row()
    }
}
