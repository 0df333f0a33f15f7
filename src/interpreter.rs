//! Line driver.
//!
//! The interpreter owns the parsed queries and one column cursor, reused for
//! every record: reset the cursor, run each query against it, end the output
//! line.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use crate::ast::Query;
use crate::config::{InputFormat, Options};
use crate::cursor::Columns;
use crate::error::Result;
use crate::operators::{Emit, select_all};
use crate::output::Writer;

pub struct Interpreter {
    queries: Vec<Query>,
    columns: Box<dyn Columns>,
    input: InputFormat,
}

impl Interpreter {
    pub fn new(queries: Vec<Query>, columns: Box<dyn Columns>, input: InputFormat) -> Self {
        Self {
            queries,
            columns,
            input,
        }
    }

    pub fn from_options(queries: Vec<Query>, options: &Options) -> Result<Self> {
        Ok(Self::new(queries, options.columns()?, options.input))
    }

    /// Run every query against one line of text.
    pub fn process_line(&mut self, line: &str, out: &mut dyn Emit) -> Result<()> {
        self.columns.reset(line);
        select_all(&self.queries, self.columns.as_mut(), out)
    }

    /// Run every query against one already-split record. Fields that are not
    /// UTF-8 are converted lossily.
    pub fn process_record(&mut self, record: &csv::ByteRecord, out: &mut dyn Emit) -> Result<()> {
        let fields: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
        self.columns
            .reset_from_fields(&mut fields.iter().map(|f| &**f));
        select_all(&self.queries, self.columns.as_mut(), out)
    }

    /// Process a whole input stream, one output line per record.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, out: &mut Writer<W>) -> Result<()> {
        match self.input {
            InputFormat::Lines => self.run_lines(reader, out),
            InputFormat::Delimited(delimiter) => self.run_records(reader, delimiter, out),
        }
    }

    /// Lines are split as text; bytes that are not UTF-8 become U+FFFD.
    pub fn run_lines<R: BufRead, W: Write>(&mut self, mut reader: R, out: &mut Writer<W>) -> Result<()> {
        let mut buf = Vec::new();
        let mut number = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            number += 1;
            let line = String::from_utf8_lossy(strip_newline(&buf));
            tracing::trace!(number, line = %line, "line");
            let result = self
                .process_line(&line, out)
                .and_then(|()| out.end_line());
            if let Err(e) = result {
                out.discard_line();
                return Err(e.with_input_line(number));
            }
        }
        out.flush()
    }

    pub fn run_records<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        delimiter: u8,
        out: &mut Writer<W>,
    ) -> Result<()> {
        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);
        let mut record = csv::ByteRecord::new();
        let mut count = 0;
        while records.read_byte_record(&mut record)? {
            count += 1;
            let number = record
                .position()
                .map_or(count, |p| p.line() as usize);
            tracing::trace!(number, fields = record.len(), "record");
            let result = self
                .process_record(&record, out)
                .and_then(|()| out.end_line());
            if let Err(e) = result {
                out.discard_line();
                return Err(e.with_input_line(number));
            }
        }
        out.flush()
    }
}

fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::LazyColumns;
    use crate::output::Format;
    use crate::parser::parse_queries;

    fn interpreter(queries: &[&str], input: InputFormat) -> Interpreter {
        let columns: Box<dyn Columns> = Box::new(LazyColumns::new(" ", false).unwrap());
        Interpreter::new(parse_queries(queries).unwrap(), columns, input)
    }

    fn run(queries: &[&str], input: InputFormat, text: &str) -> Result<String> {
        let mut out = Writer::new(Vec::new(), Format::Delimited(",".to_string()));
        interpreter(queries, input).run(text.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out.into_inner()?).unwrap())
    }

    #[test]
    fn one_output_line_per_input_line() {
        let out = run(&["2", "1"], InputFormat::Lines, "a b\nc d\n").unwrap();
        assert_eq!(out, "b,a\nd,c\n");
    }

    #[test]
    fn last_line_without_newline() {
        let out = run(&["-1"], InputFormat::Lines, "a b\r\nc d").unwrap();
        assert_eq!(out, "b\nd\n");
    }

    #[test]
    fn empty_line_is_one_empty_column() {
        let out = run(&["1"], InputFormat::Lines, "\nx\n").unwrap();
        assert_eq!(out, "\nx\n");
    }

    #[test]
    fn error_names_query_and_line() {
        let err = run(&["1", "3"], InputFormat::Lines, "a b c\nd e\n").unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(err.position.input_line, Some(2));
        assert_eq!(
            err.to_string(),
            "index out of range (in query '3', at input line 2)"
        );
    }

    #[test]
    fn csv_records_bypass_the_splitter() {
        let out = run(
            &["2", "1"],
            InputFormat::Delimited(b','),
            "\"x y\",1\n\"a,b\",2,extra\n",
        )
        .unwrap();
        assert_eq!(out, "1,x y\n2,a,b\n");
    }

    #[test]
    fn tsv_records() {
        let out = run(&["-1"], InputFormat::Delimited(b'\t'), "a\tb\nc\td\te\n").unwrap();
        assert_eq!(out, "b\ne\n");
    }

    #[test]
    fn csv_error_names_record_line() {
        let err = run(&["3"], InputFormat::Delimited(b','), "a,b,c\nd,e\n").unwrap_err();
        assert_eq!(err.position.input_line, Some(2));
    }

    #[test]
    fn line_that_is_not_utf8_is_still_selected() {
        let mut out = Writer::new(Vec::new(), Format::Delimited(",".to_string()));
        interpreter(&["2", "1"], InputFormat::Lines)
            .run(&b"caf\xe9 ok\nnext line\n"[..], &mut out)
            .unwrap();
        let out = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert_eq!(out, "ok,caf\u{fffd}\nline,next\n");
    }

    #[test]
    fn record_that_is_not_utf8_is_still_selected() {
        let mut out = Writer::new(Vec::new(), Format::Delimited(",".to_string()));
        interpreter(&["-1"], InputFormat::Delimited(b','))
            .run(&b"caf\xe9,ok\n"[..], &mut out)
            .unwrap();
        assert_eq!(out.into_inner().unwrap(), b"ok\n");
    }

    #[test]
    fn failed_line_leaves_nothing_in_the_writer() {
        let mut out = Writer::new(Vec::new(), Format::Delimited(",".to_string()));
        let mut lines = interpreter(&["1", "3"], InputFormat::Lines);
        assert!(lines.run("a b\n".as_bytes(), &mut out).is_err());
        lines.run("x y z\n".as_bytes(), &mut out).unwrap();
        assert_eq!(out.into_inner().unwrap(), b"x,z\n");

        let mut out = Writer::new(Vec::new(), Format::Delimited(",".to_string()));
        let mut records = interpreter(&["1", "3"], InputFormat::Delimited(b','));
        assert!(records.run("a,b\n".as_bytes(), &mut out).is_err());
        records.run("x,y,z\n".as_bytes(), &mut out).unwrap();
        assert_eq!(out.into_inner().unwrap(), b"x,z\n");
    }

    #[test]
    fn process_line_feeds_any_sink() {
        let mut interpreter = interpreter(&["2:"], InputFormat::Lines);
        let mut out = Vec::new();
        interpreter.process_line("a b c", &mut out).unwrap();
        interpreter.process_line("d e", &mut out).unwrap();
        assert_eq!(out, vec!["b", "c", "e"]);
    }
}
