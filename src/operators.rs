//! Selector evaluation.
//!
//! Each selector kind lives in its own module and implements [`Select`]:
//! given the current line's columns it emits the columns it picks, in order.

mod index;
mod range;
mod switch;

use crate::ast::{Query, Selector};
use crate::cursor::Columns;
use crate::error::Result;

/// Receives selected columns.
pub trait Emit {
    fn emit(&mut self, columns: &[&str]) -> Result<()>;
}

impl Emit for Vec<String> {
    fn emit(&mut self, columns: &[&str]) -> Result<()> {
        self.extend(columns.iter().map(|c| c.to_string()));
        Ok(())
    }
}

/// A selector evaluator.
pub trait Select {
    /// Emit the columns this selector picks from the current line.
    fn select(&self, columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()>;
}

impl Select for Selector {
    fn select(&self, columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()> {
        match self {
            Selector::Index(s) => s.select(columns, out),
            Selector::Range(s) => s.select(columns, out),
            Selector::Switch(s) => s.select(columns, out),
        }
    }
}

impl Select for Query {
    fn select(&self, columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()> {
        self.selector
            .select(columns, out)
            .map_err(|e| e.with_query(&self.text))
    }
}

/// Run every query against the current line, concatenating their output.
pub fn select_all(queries: &[Query], columns: &mut dyn Columns, out: &mut dyn Emit) -> Result<()> {
    for query in queries {
        query.select(columns, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::LazyColumns;
    use crate::parser::parse_queries;

    fn run(queries: &[&str], line: &str) -> Result<Vec<String>> {
        let queries = parse_queries(queries).unwrap();
        let mut columns = LazyColumns::new(" ", false).unwrap();
        columns.reset(line);
        let mut out = Vec::new();
        select_all(&queries, &mut columns, &mut out)?;
        Ok(out)
    }

    #[test]
    fn selectors_concatenate_in_order() {
        let out = run(&["3", "1:2", "-1"], "a b c d").unwrap();
        assert_eq!(out, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn selectors_may_overlap_and_repeat() {
        let out = run(&["1", "1", "0"], "a b").unwrap();
        assert_eq!(out, vec!["a", "a", "a", "b"]);
    }

    #[test]
    fn reverse_then_forward() {
        let out = run(&["4:1:-1", "1:4"], "1 2 3 4").unwrap();
        assert_eq!(out, vec!["4", "3", "2", "1", "1", "2", "3", "4"]);
    }

    #[test]
    fn failing_selector_names_its_query() {
        let err = run(&["1", "9"], "a b c").unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(err.to_string(), "index out of range (in query '9')");
    }

    #[test]
    fn switch_after_index() {
        let out = run(&["1", "/b/:/c/"], "a b c d").unwrap();
        assert_eq!(out, vec!["a", "b", "c"]);
    }
}
