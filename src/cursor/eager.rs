use crate::cursor::{Columns, FieldBuffer, Splitting};
use crate::splitter::Splitter;

/// Splits the whole line on reset.
///
/// Every lookup afterwards is O(1). The better choice when late columns,
/// negative indices or whole-row selectors dominate.
#[derive(Debug)]
pub struct EagerColumns {
    buf: FieldBuffer,
    splitter: Splitter,
    remove_empty: bool,
}

impl EagerColumns {
    pub fn new(splitter: Splitter, remove_empty: bool) -> Self {
        let mut columns = Self {
            buf: FieldBuffer::with_capacity(16),
            splitter,
            remove_empty,
        };
        columns.reset("");
        columns
    }
}

impl Splitting for EagerColumns {
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
        self.buf.split_all(&self.splitter, self.remove_empty);
    }

    fn grow_front(&mut self) -> bool {
        false
    }

    fn grow_back(&mut self) -> bool {
        false
    }
}
