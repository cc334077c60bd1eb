mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Format};
use imeji_syntax::{
    DefaultCatalog, Element, Links, ParseOptions, Query, parse_query_with, parse_url_query_with,
    render_pretty, render_query, render_url_encoded,
};
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut options = ParseOptions::default();
    if cli.no_fulltext {
        options = options.without_fulltext();
    }
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Some(query) = &cli.query {
        let parsed = parse(&cli, &options, query)?;
        return print(&mut out, cli.format, &parsed);
    }

    let mut failures = 0usize;
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse(&cli, &options, &line) {
            Ok(parsed) => print(&mut out, cli.format, &parsed)?,
            Err(e) => {
                failures += 1;
                eprintln!("{e:#}");
            }
        }
    }
    if failures > 0 {
        bail!("{failures} queries failed to parse");
    }
    Ok(())
}

fn parse(cli: &Cli, options: &ParseOptions, input: &str) -> Result<Query> {
    let parsed = if cli.decode {
        parse_url_query_with(input, options, &DefaultCatalog)
    } else {
        parse_query_with(input, options, &DefaultCatalog)
    };
    parsed.with_context(|| format!("failed to parse {input:?}"))
}

fn print(out: &mut impl Write, format: Format, query: &Query) -> Result<()> {
    match format {
        Format::Canonical => writeln!(out, "{}", render_query(query))?,
        Format::Url => writeln!(out, "{}", render_url_encoded(query))?,
        Format::Pretty => writeln!(out, "{}", render_pretty(query))?,
        Format::Tree => write_tree(out, query.links(), 0)?,
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(query)?)?,
    }
    Ok(())
}

fn write_tree(out: &mut impl Write, links: Links<'_>, indent: usize) -> std::io::Result<()> {
    let pad = "  ".repeat(indent);
    for (relation, element) in links {
        let relation = relation.map(|r| format!("{r} ")).unwrap_or_default();
        match element {
            Element::Group(group) => {
                let not = if group.negated { "NOT " } else { "" };
                writeln!(out, "{pad}{relation}{not}group")?;
                write_tree(out, group.links(), indent + 1)?;
            }
            leaf => writeln!(out, "{pad}{relation}{leaf}")?,
        }
    }
    Ok(())
}
