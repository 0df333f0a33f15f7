//! Query grammar.
//!
//! ```text
//! query       := index_query | switch_query
//! index_query := int | int? ":" int? (":" int?)?
//! switch_query:= address ":" end_address
//! address     := digits | "/" regex "/"
//! end_address := address | "+" digits | "-" digits
//! ```
//!
//! Index queries win whenever they consume the whole query, so `3:-2` is a
//! range and `/x/:-2` is a switch with a backward window.

use winnow::ModalResult;
use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, eof, opt, preceded, terminated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_till};

use crate::ast::{
    Address, EndAddress, IndexSelector, Query, RangeSelector, Selector, SwitchSelector,
};
use crate::error::{Error, ErrorKind, Result};
use crate::splitter;

/// A query as the grammar sees it, before semantic checks.
#[derive(Debug, PartialEq)]
enum RawQuery {
    Index(i64),
    Range {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },
    Switch {
        begin: RawAddress,
        end: RawEnd,
    },
}

#[derive(Debug, PartialEq)]
enum RawAddress {
    Position(usize),
    Pattern(String),
}

#[derive(Debug, PartialEq)]
enum RawEnd {
    Address(RawAddress),
    Around(i64),
}

/// Parse every query, in order. The first bad query aborts.
pub fn parse_queries<S: AsRef<str>>(queries: &[S]) -> Result<Vec<Query>> {
    queries
        .iter()
        .map(|q| {
            let text = q.as_ref();
            let selector = parse_query(text).map_err(|e| e.with_query(text))?;
            tracing::debug!(query = text, ?selector, "parsed query");
            Ok(Query {
                text: text.to_string(),
                selector,
            })
        })
        .collect()
}

/// Parse a single query into a selector.
pub fn parse_query(input: &str) -> Result<Selector> {
    let raw = query.parse(input).map_err(|e| {
        let offset = e.offset();
        let message = match e.inner().context().next() {
            Some(StrContext::Label(label)) => format!("parse error: expected {}", label),
            Some(StrContext::Expected(StrContextValue::Description(desc))) => {
                format!("parse error: expected {}", desc)
            }
            Some(StrContext::Expected(StrContextValue::CharLiteral(c))) => {
                format!("parse error: expected '{}'", c)
            }
            _ => "parse error: unexpected character".to_string(),
        };
        Error::new(ErrorKind::Syntax(format!(
            "{}\n  {}\n  {}^",
            message,
            input,
            " ".repeat(offset)
        )))
    })?;
    build(raw)
}

/// Turn the raw grammar output into a selector, checking what the grammar can't.
fn build(raw: RawQuery) -> Result<Selector> {
    match raw {
        RawQuery::Index(index) => Ok(Selector::Index(IndexSelector::new(index))),
        RawQuery::Range { start, stop, step } => {
            let step = step.unwrap_or(1);
            if step == 0 {
                return Err(Error::new(ErrorKind::ZeroStep));
            }
            Ok(Selector::Range(RangeSelector::new(
                start.unwrap_or(1),
                step,
                stop.unwrap_or(0),
                stop.is_none(),
            )))
        }
        RawQuery::Switch { begin, end } => {
            let begin = build_address(begin)?;
            let end = match end {
                RawEnd::Around(n) => EndAddress::Around(n),
                RawEnd::Address(a) => EndAddress::Address(build_address(a)?),
            };
            Ok(Selector::Switch(SwitchSelector::new(begin, end)))
        }
    }
}

fn build_address(raw: RawAddress) -> Result<Address> {
    match raw {
        RawAddress::Position(n) => Ok(Address::Position(n)),
        RawAddress::Pattern(p) => splitter::compile(&p).map(Address::Pattern),
    }
}

fn query(input: &mut &str) -> ModalResult<RawQuery> {
    alt((terminated(index_query, eof), switch_query)).parse_next(input)
}

fn index_query(input: &mut &str) -> ModalResult<RawQuery> {
    alt((range_query, integer.map(RawQuery::Index))).parse_next(input)
}

/// `start:stop:step` with every part optional; at least one ':'.
fn range_query(input: &mut &str) -> ModalResult<RawQuery> {
    let start = opt(integer).parse_next(input)?;
    ':'.parse_next(input)?;
    let stop = opt(integer).parse_next(input)?;
    let step = opt(preceded(':', opt(integer)))
        .parse_next(input)?
        .flatten();
    Ok(RawQuery::Range { start, stop, step })
}

fn switch_query(input: &mut &str) -> ModalResult<RawQuery> {
    let begin = address
        .context(StrContext::Expected(StrContextValue::Description(
            "index, range or /regex/",
        )))
        .parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::Description("':'")))
        .parse_next(input)?;
    let end = cut_err(end_address)
        .context(StrContext::Expected(StrContextValue::Description(
            "<end address>",
        )))
        .parse_next(input)?;
    Ok(RawQuery::Switch { begin, end })
}

fn address(input: &mut &str) -> ModalResult<RawAddress> {
    alt((
        position.map(RawAddress::Position),
        pattern.map(RawAddress::Pattern),
    ))
    .parse_next(input)
}

fn end_address(input: &mut &str) -> ModalResult<RawEnd> {
    alt((
        preceded('+', cut_err(offset)).map(RawEnd::Around),
        preceded('-', cut_err(offset)).map(|n| RawEnd::Around(-n)),
        address.map(RawEnd::Address),
    ))
    .parse_next(input)
}

/// `/<regex>/`. A `\/` inside the body stands for a literal slash.
fn pattern(input: &mut &str) -> ModalResult<String> {
    '/'.parse_next(input)?;
    let mut body = String::new();
    loop {
        let chunk: &str = take_till(0.., ('\\', '/')).parse_next(input)?;
        body.push_str(chunk);

        if input.starts_with('/') {
            break;
        } else if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            match opt(any).parse_next(input)? {
                Some('/') => body.push('/'),
                Some(c) => {
                    body.push('\\');
                    body.push(c);
                }
                None => body.push('\\'),
            }
        } else {
            return cut_err('/')
                .context(StrContext::Expected(StrContextValue::Description(
                    "closing '/'",
                )))
                .parse_next(input)
                .map(|_| body);
        }
    }
    if body.is_empty() {
        return cut_err(winnow::combinator::fail)
            .context(StrContext::Expected(StrContextValue::Description(
                "<pattern>",
            )))
            .parse_next(input);
    }
    '/'.parse_next(input)?;
    Ok(body)
}

/// Unsigned column position.
fn position(input: &mut &str) -> ModalResult<usize> {
    digit1.try_map(str::parse::<usize>).parse_next(input)
}

/// Unsigned window width for `+N` / `-N`.
fn offset(input: &mut &str) -> ModalResult<i64> {
    digit1.try_map(str::parse::<i64>).parse_next(input)
}

/// Signed integer.
fn integer(input: &mut &str) -> ModalResult<i64> {
    (opt('-'), digit1)
        .try_map(|(neg, digits): (Option<char>, &str)| {
            digits
                .parse::<i64>()
                .map(|value| if neg.is_some() { -value } else { value })
        })
        .parse_next(input)
}
