//! Writing selected columns.
//!
//! A line's selection is collected as the queries emit it and written out by
//! [`Writer::end_line`], so a query failing halfway through a line leaves no
//! partial output behind.

use std::io::{BufWriter, Write};

use crate::error::{Error, ErrorKind, Result};
use crate::operators::Emit;

/// How a line's selection is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// Columns joined by a delimiter.
    Delimited(String),
    /// Columns substituted into `{}` markers.
    Template(Template),
    /// One JSON array of strings per line.
    Json,
}

/// An output template, split on its `{}` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Literal text around the markers; one more piece than markers.
    pieces: Vec<String>,
}

impl Template {
    pub fn parse(text: &str) -> Self {
        Self {
            pieces: text.split("{}").map(String::from).collect(),
        }
    }

    /// Number of `{}` markers.
    pub fn markers(&self) -> usize {
        self.pieces.len() - 1
    }

    fn render<W: Write>(&self, out: &mut W, columns: &[String]) -> Result<()> {
        if columns.len() < self.markers() {
            return Err(Error::new(ErrorKind::Template {
                index: columns.len() + 1,
                available: columns.len(),
            }));
        }
        out.write_all(self.pieces[0].as_bytes())?;
        for (column, piece) in columns.iter().zip(&self.pieces[1..]) {
            out.write_all(column.as_bytes())?;
            out.write_all(piece.as_bytes())?;
        }
        Ok(())
    }
}

/// Buffered line writer.
pub struct Writer<W: Write> {
    out: BufWriter<W>,
    format: Format,
    /// Delimited output for the current line.
    line: String,
    /// Columns of the current line, for template and JSON output.
    fields: Vec<String>,
    /// Whether the current line has any delimited output yet.
    started: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W, format: Format) -> Self {
        tracing::debug!(?format, "output format");
        Self {
            out: BufWriter::new(out),
            format,
            line: String::new(),
            fields: Vec::new(),
            started: false,
        }
    }

    /// Write out the current line and start the next one.
    pub fn end_line(&mut self) -> Result<()> {
        match &self.format {
            Format::Delimited(_) => {
                self.out.write_all(self.line.as_bytes())?;
            }
            Format::Template(template) => {
                template.render(&mut self.out, &self.fields)?;
            }
            Format::Json => {
                serde_json::to_writer(&mut self.out, &self.fields)?;
            }
        }
        self.out.write_all(b"\n")?;
        self.discard_line();
        Ok(())
    }

    /// Drop whatever the current line has collected so far.
    pub fn discard_line(&mut self) {
        self.line.clear();
        self.fields.clear();
        self.started = false;
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| Error::from(e.into_error()))
    }
}

impl<W: Write> Emit for Writer<W> {
    fn emit(&mut self, columns: &[&str]) -> Result<()> {
        match &self.format {
            Format::Delimited(delimiter) => {
                for column in columns {
                    if self.started {
                        self.line.push_str(delimiter);
                    }
                    self.line.push_str(column);
                    self.started = true;
                }
            }
            Format::Template(_) | Format::Json => {
                self.fields.extend(columns.iter().map(|c| c.to_string()));
            }
        }
        Ok(())
    }
}
