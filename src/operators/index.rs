use crate::ast::IndexSelector;
use crate::cursor::Columns;
use crate::error::Result;
use crate::operators::{Emit, Select};

impl Select for IndexSelector {
    fn select(&self, columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()> {
        if self.index == 0 {
            let row = columns.to_array();
            return out.emit(&row.to_vec());
        }
        let column = columns.element_at(self.index)?;
        out.emit(&[column])
    }
}
