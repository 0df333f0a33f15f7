use crate::ast::{Address, EndAddress, SwitchSelector};
use crate::cursor::Columns;
use crate::error::{Error, Result};
use crate::operators::{Emit, Select};

/// Fixed positions must exist in the row.
fn check_position(address: &Address, len: usize) -> Result<()> {
    match address {
        Address::Position(n) if *n == 0 || *n > len => Err(Error::index_out_of_range()),
        _ => Ok(()),
    }
}

fn clamp(i: i64, len: i64) -> usize {
    i.clamp(0, len) as usize
}

impl Select for SwitchSelector {
    fn select(&self, columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()> {
        let row = columns.to_array();
        let len = row.len();
        check_position(&self.begin, len)?;

        let mut picked = Vec::new();
        match &self.end {
            EndAddress::Around(n) => {
                let n = *n;
                for (i, column) in row.iter().enumerate() {
                    if !self.begin.matches(column, i) {
                        continue;
                    }
                    let i = i as i64;
                    let (from, to) = if n < 0 {
                        (i.saturating_add(n), i + 1)
                    } else {
                        (i, i.saturating_add(n).saturating_add(1))
                    };
                    let len = len as i64;
                    picked.extend(row.slice(clamp(from, len), clamp(to, len)));
                }
            }
            EndAddress::Address(end) => {
                check_position(end, len)?;
                let mut on = false;
                for (i, column) in row.iter().enumerate() {
                    if on {
                        picked.push(column);
                        if end.matches(column, i) {
                            on = false;
                        }
                    } else if self.begin.matches(column, i) {
                        on = true;
                        picked.push(column);
                    }
                }
            }
        }
        out.emit(&picked)
    }
}
