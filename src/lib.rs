//! `sel`: select columns from delimited text.
//!
//! Queries are parsed once into [`ast::Selector`]s. Each input line is loaded
//! into a reusable [`cursor::Columns`] cursor, which splits only as much of the
//! line as the selectors ask for, and every selector emits its columns to an
//! [`output::Writer`] in order.

pub mod ast;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod operators;
pub mod output;
pub mod parser;
pub mod rewrite;
pub mod splitter;

pub use error::{Error, ErrorKind, Result};
