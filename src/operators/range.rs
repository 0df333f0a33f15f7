use crate::ast::RangeSelector;
use crate::cursor::{Columns, Row};
use crate::error::{Error, ErrorKind, Result};
use crate::operators::{Emit, Select};

impl RangeSelector {
    /// Start and stop resolved against a row of `len` columns, 1-based.
    fn bounds(&self, len: i64) -> Result<(i64, i64)> {
        if self.start.unsigned_abs() > len.unsigned_abs() {
            return Err(Error::index_out_of_range());
        }
        let start = if self.start < 0 {
            len + self.start + 1
        } else {
            self.start
        };
        let stop = if self.infinite_stop || self.stop >= len {
            len
        } else if self.stop < 0 {
            len.saturating_add(self.stop).saturating_add(1)
        } else {
            self.stop
        };
        Ok((start, stop))
    }
}

impl Select for RangeSelector {
    fn select(&self, columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()> {
        let row = columns.to_array();
        let len = row.len() as i64;
        let (start, stop) = self.bounds(len)?;
        let step = self.step;

        let mut picked = Vec::new();
        if start == stop {
            if start < 1 || start > len {
                return Err(Error::index_out_of_range());
            }
            pick(&row, start, &mut picked)?;
        } else if start < stop {
            if step <= 0 {
                return Err(Error::new(ErrorKind::AscendingStep { start, step, stop }));
            }
            let mut i = start;
            while i <= stop {
                pick(&row, i, &mut picked)?;
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        } else {
            if step >= 0 {
                return Err(Error::new(ErrorKind::DescendingStep { start, step, stop }));
            }
            let mut i = start;
            while i >= stop {
                pick(&row, i, &mut picked)?;
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        }
        out.emit(&picked)
    }
}

/// Column `i` (1-based); `0` splices in the whole row.
fn pick<'a>(row: &Row<'a>, i: i64, picked: &mut Vec<&'a str>) -> Result<()> {
    if i == 0 {
        picked.extend(row.iter());
        return Ok(());
    }
    let column = usize::try_from(i)
        .ok()
        .and_then(|i| row.get(i - 1))
        .ok_or_else(Error::index_out_of_range)?;
    picked.push(column);
    Ok(())
}
