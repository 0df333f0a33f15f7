//! Error types for query parsing and column selection.

use std::fmt;
use std::io;

/// Where an error happened: which query, which input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    /// The query text the error belongs to.
    pub query: Option<String>,
    /// Line number in the input (1-based).
    pub input_line: Option<usize>,
}

/// The closed set of things that can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Query grammar error, already rendered with a caret under the offending offset.
    #[error("{0}")]
    Syntax(String),

    #[error("step cannot be zero")]
    ZeroStep,

    #[error("invalid regex /{pattern}/")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("index out of range")]
    IndexOutOfRange,

    #[error("step must be bigger than 0(start:step:stop={start}:{step}:{stop})")]
    AscendingStep { start: i64, step: i64, stop: i64 },

    #[error("step must be less than 0(start:step:stop={start}:{step}:{stop})")]
    DescendingStep { start: i64, step: i64, stop: i64 },

    #[error("input delimiter cannot be empty")]
    EmptyDelimiter,

    #[error("{path}: not a regular file")]
    NotAFile { path: std::path::PathBuf },

    #[error("invalid file pattern '{pattern}'")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no files (path/glob is wrong?)")]
    NoFiles,

    #[error("template needs column {index} but only {available} were selected")]
    Template { index: usize, available: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An error together with its position.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub position: Position,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            position: Position::default(),
        }
    }

    pub fn index_out_of_range() -> Self {
        Self::new(ErrorKind::IndexOutOfRange)
    }

    /// Attach the query text, unless an inner layer already did.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        if self.position.query.is_none() {
            self.position.query = Some(query.into());
        }
        self
    }

    /// Attach the input line, unless an inner layer already did.
    pub fn with_input_line(mut self, line: usize) -> Self {
        if self.position.input_line.is_none() {
            self.position.input_line = Some(line);
        }
        self
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::IndexOutOfRange)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::new(ErrorKind::Csv(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Json(err))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        // Syntax messages already quote the query under a caret.
        let query = match self.kind {
            ErrorKind::Syntax(_) => None,
            _ => self.position.query.as_deref(),
        };

        match (query, self.position.input_line) {
            (Some(q), Some(line)) => write!(f, " (in query '{}', at input line {})", q, line),
            (Some(q), None) => write!(f, " (in query '{}')", q),
            (None, Some(line)) => write!(f, " (at input line {})", line),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, Error>;
