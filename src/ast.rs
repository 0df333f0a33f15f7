use regex::Regex;

/// A query as typed on the command line, with the selector it parsed into.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub selector: Selector,
}

/// A parsed selector. Immutable once built; evaluated once per line.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `N` - one column, `0` for the whole row
    Index(IndexSelector),
    /// `start:stop:step` and its abbreviations
    Range(RangeSelector),
    /// `begin:end` - sed-style 2-address selection
    Switch(SwitchSelector),
}

/// A single column by position: 1-based, negative from the end, `0` for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSelector {
    pub index: i64,
}

impl IndexSelector {
    pub fn new(index: i64) -> Self {
        Self { index }
    }
}

/// An arithmetic range of columns.
///
/// `infinite_stop` means the range runs to the last column, whatever `stop` says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelector {
    pub start: i64,
    pub step: i64,
    pub stop: i64,
    pub infinite_stop: bool,
}

impl RangeSelector {
    pub fn new(start: i64, step: i64, stop: i64, infinite_stop: bool) -> Self {
        Self {
            start,
            step,
            stop,
            infinite_stop,
        }
    }
}

/// One end of a switch selection.
#[derive(Debug, Clone)]
pub enum Address {
    /// A fixed 1-based column position
    Position(usize),
    /// Any column whose text matches
    Pattern(Regex),
}

impl Address {
    /// Whether the column `text` at 0-based position `i` matches.
    pub fn matches(&self, text: &str, i: usize) -> bool {
        match self {
            Address::Position(num) => *num == i + 1,
            Address::Pattern(re) => re.is_match(text),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Address::Position(a), Address::Position(b)) => a == b,
            (Address::Pattern(a), Address::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Where a switch selection stops.
#[derive(Debug, Clone, PartialEq)]
pub enum EndAddress {
    /// Scan until this address matches
    Address(Address),
    /// `+N` / `-N` - a fixed window after or before each begin match
    Around(i64),
}

/// Selects blocks of columns delimited by two addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSelector {
    pub begin: Address,
    pub end: EndAddress,
}

impl SwitchSelector {
    pub fn new(begin: Address, end: EndAddress) -> Self {
        Self { begin, end }
    }
}
