//! Run options, resolved from the command line.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::cursor::{Columns, EagerColumns, LazyColumns, PatternColumns};
use crate::error::{Error, ErrorKind, Result};
use crate::output::{Format, Template};
use crate::splitter::{self, Splitter};

/// Whitespace runs, for `-a`.
const FIELD_SPLIT: &str = r"\s+";

/// How input is broken into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One record per line, split by the input delimiter.
    Lines,
    /// CSV-style records with the given field delimiter.
    Delimited(u8),
}

#[derive(Debug, Clone)]
pub struct Options {
    pub delimiter: String,
    pub use_regex: bool,
    pub remove_empty: bool,
    pub split_before: bool,
    pub input: InputFormat,
    pub format: Format,
    pub files: Vec<PathBuf>,
    pub in_place: bool,
    pub backup: bool,
}

impl Options {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (delimiter, use_regex) = if cli.field_split {
            (FIELD_SPLIT.to_string(), true)
        } else {
            (cli.input_delimiter.clone(), cli.use_regexp)
        };

        let input = if cli.csv {
            InputFormat::Delimited(b',')
        } else if cli.tsv {
            InputFormat::Delimited(b'\t')
        } else {
            InputFormat::Lines
        };

        if input == InputFormat::Lines {
            if delimiter.is_empty() {
                return Err(Error::new(ErrorKind::EmptyDelimiter));
            }
            if use_regex {
                splitter::compile(&delimiter)?;
            }
        }

        let format = match (&cli.template, cli.json) {
            (Some(template), _) => Format::Template(Template::parse(template)),
            (None, true) => Format::Json,
            (None, false) => Format::Delimited(cli.output_delimiter.clone()),
        };

        Ok(Self {
            delimiter,
            use_regex,
            remove_empty: cli.remove_empty,
            split_before: cli.split_before,
            input,
            format,
            files: cli.input_files.clone(),
            in_place: cli.in_place,
            backup: cli.backup,
        })
    }

    /// The cursor strategy for these options.
    pub fn columns(&self) -> Result<Box<dyn Columns>> {
        let remove_empty = self.remove_empty;
        let (name, columns): (&str, Box<dyn Columns>) = match self.input {
            InputFormat::Delimited(_) => (
                "eager (pre-split records)",
                // Records arrive already split; the splitter is never used.
                Box::new(EagerColumns::new(Splitter::literal(",")?, remove_empty)),
            ),
            InputFormat::Lines if self.use_regex && self.split_before => (
                "eager regex",
                Box::new(EagerColumns::new(
                    Splitter::pattern(&self.delimiter)?,
                    remove_empty,
                )),
            ),
            InputFormat::Lines if self.use_regex => (
                "lazy regex",
                Box::new(PatternColumns::new(&self.delimiter, remove_empty)?),
            ),
            InputFormat::Lines if self.split_before => (
                "eager literal",
                Box::new(EagerColumns::new(
                    Splitter::literal(self.delimiter.as_str())?,
                    remove_empty,
                )),
            ),
            InputFormat::Lines => (
                "lazy literal",
                Box::new(LazyColumns::new(self.delimiter.as_str(), remove_empty)?),
            ),
        };
        tracing::debug!(strategy = name, delimiter = %self.delimiter, remove_empty, "column cursor");
        Ok(columns)
    }
}
