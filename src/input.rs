//! Input sources.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};

/// Where lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        Ok(match self {
            Source::Stdin => Box::new(io::stdin().lock()),
            Source::File(path) => Box::new(BufReader::new(fs::File::open(path)?)),
        })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Check that `path` names a regular file.
pub fn validate(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    if !metadata.is_file() {
        return Err(Error::new(ErrorKind::NotAFile {
            path: path.to_path_buf(),
        }));
    }
    Ok(())
}

/// The sources to read, in order: the given files, or stdin when there are none.
///
/// Each path is expanded as a glob pattern; matches of one pattern come in
/// sorted order. A plain path that does not exist is reported by name.
pub fn sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    if paths.is_empty() {
        return Ok(vec![Source::Stdin]);
    }
    let mut sources = Vec::new();
    for path in paths {
        let matches = expand(path)?;
        tracing::debug!(pattern = %path.display(), matches = matches.len(), "expanded input");
        for path in matches {
            validate(&path)?;
            sources.push(Source::File(path));
        }
    }
    if sources.is_empty() {
        return Err(Error::new(ErrorKind::NoFiles));
    }
    Ok(sources)
}

fn expand(path: &Path) -> Result<Vec<PathBuf>> {
    let Some(pattern) = path.to_str() else {
        return Ok(vec![path.to_path_buf()]);
    };
    let matches = glob::glob(pattern)
        .map_err(|source| {
            Error::new(ErrorKind::Glob {
                pattern: pattern.to_string(),
                source,
            })
        })?
        .map(|entry| entry.map_err(|e| Error::from(e.into_error())))
        .collect::<Result<Vec<_>>>()?;
    if matches.is_empty() && glob::Pattern::escape(pattern) == pattern {
        validate(path)?;
    }
    Ok(matches)
}
