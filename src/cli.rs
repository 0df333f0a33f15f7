//! Command-line arguments.

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "sel", version)]
#[command(
    about = "Select columns from delimited text by index, range, or regex-bounded blocks.",
    after_help = "Queries:\n  N              column N (1-based, negative from the end, 0 for all)\n  start:stop:step  a range; any part may be left out\n  A:B            from address A to address B, where an address is N or /regex/\n  A:+N / A:-N    N columns after / before each match of A\n\nQueries starting with '-' other than plain negative numbers go after '--'."
)]
pub struct Cli {
    /// Queries to run on every line, in order
    #[arg(required_unless_present = "completion", allow_negative_numbers = true)]
    pub queries: Vec<String>,

    /// Input files (comma separated or repeated); stdin when absent
    #[arg(short = 'f', long = "input-files", value_delimiter = ',')]
    pub input_files: Vec<PathBuf>,

    /// Input delimiter
    #[arg(short = 'd', long = "input-delimiter", default_value = " ")]
    pub input_delimiter: String,

    /// Output delimiter
    #[arg(short = 'D', long = "output-delimiter", default_value = " ")]
    pub output_delimiter: String,

    /// Remove empty fields after splitting
    #[arg(short = 'r', long = "remove-empty")]
    pub remove_empty: bool,

    /// Treat the input delimiter as a regular expression
    #[arg(short = 'g', long = "use-regexp")]
    pub use_regexp: bool,

    /// Split the whole line before selecting
    #[arg(short = 'S', long = "split-before")]
    pub split_before: bool,

    /// Split on runs of whitespace, like awk (same as -g -d '\s+')
    #[arg(short = 'a', long = "field-split", conflicts_with_all = ["input_delimiter", "use_regexp"])]
    pub field_split: bool,

    /// Read input as CSV
    #[arg(long = "csv", conflicts_with = "tsv")]
    pub csv: bool,

    /// Read input as TSV
    #[arg(long = "tsv")]
    pub tsv: bool,

    /// Output template; each {} is replaced by the next selected column
    #[arg(short = 't', long = "template")]
    pub template: Option<String>,

    /// Output each line as a JSON array
    #[arg(short = 'j', long = "json", conflicts_with = "template")]
    pub json: bool,

    /// Rewrite the input files in place
    #[arg(short = 'i', long = "in-place", requires = "input_files")]
    pub in_place: bool,

    /// Keep the original of each rewritten file as <file>.bak
    #[arg(long = "backup", requires = "in_place")]
    pub backup: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print a completion script for SHELL and exit
    #[arg(long = "completion", value_enum, value_name = "SHELL")]
    pub completion: Option<Shell>,
}

/// Write the completion script for `shell` to `out`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Cli::command(), "sel", out);
}
