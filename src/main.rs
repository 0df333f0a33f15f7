use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sel::cli::{self, Cli};
use sel::config::Options;
use sel::input::{self, Source};
use sel::interpreter::Interpreter;
use sel::output::Writer;
use sel::parser;
use sel::rewrite;

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        cli::write_completion(shell, &mut io::stdout());
        return;
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("sel: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = Options::from_cli(cli)?;
    let queries = parser::parse_queries(&cli.queries)?;
    let sources = input::sources(&options.files)?;
    let mut interpreter = Interpreter::from_options(queries, &options)?;

    if options.in_place {
        for source in &sources {
            let Source::File(path) = source else {
                continue;
            };
            rewrite::rewrite_in_place(path, options.backup, |reader, file| {
                let mut writer = Writer::new(file, options.format.clone());
                interpreter.run(reader, &mut writer)?;
                writer.into_inner().map(drop)
            })
            .with_context(|| format!("failed to rewrite {}", path.display()))?;
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut writer = Writer::new(stdout.lock(), options.format.clone());
    for source in &sources {
        tracing::info!(%source, "processing");
        let reader = source
            .open()
            .with_context(|| format!("failed to open {source}"))?;
        interpreter
            .run(reader, &mut writer)
            .with_context(|| format!("failed to process {source}"))?;
    }
    writer.flush()?;
    Ok(())
}
