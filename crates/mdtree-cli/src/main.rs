//! md2ast: Convert Markdown to pandoc's JSON document tree

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use mdtree_cli::config::Config;
use mdtree_cli::input::select_input;
use mdtree_cli::init_logging;
use mdtree_pandoc::{Converter, Format};

#[derive(Parser, Debug)]
#[command(name = "md2ast")]
#[command(about = "Convert Markdown to pandoc's JSON document tree")]
#[command(version)]
#[command(after_help = "Examples:
  md2ast '# Hello World'            # Convert text given as an argument
  md2ast -f README.md -o tree.json  # Convert a file into a file
  cat README.md | md2ast --compact  # Read standard input, single-line JSON")]
struct Cli {
    /// Markdown text to convert
    markdown: Option<String>,

    /// Read Markdown from a file instead
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write the JSON tree to a file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON (default)
    #[arg(short, long)]
    pretty: bool,

    /// Emit single-line JSON
    #[arg(long, conflicts_with = "pretty")]
    compact: bool,

    /// Reader format passed to pandoc (default: markdown)
    #[arg(long, value_name = "FORMAT")]
    from: Option<Format>,

    /// Path to the pandoc executable
    #[arg(long, value_name = "PROGRAM")]
    pandoc: Option<PathBuf>,

    /// Configuration file (default: _mdtree.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let Some(input) = select_input(cli.file, cli.markdown, std::io::stdin().is_terminal()) else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };
    let markdown = input.read()?;

    let config = Config::discover(cli.config.as_deref())?;
    let pandoc = config.pandoc(cli.pandoc.as_deref())?;
    let reader = config.reader(cli.from)?;
    let pretty = if cli.compact {
        false
    } else {
        cli.pretty || config.pretty()
    };

    let doc = pandoc.to_tree(&markdown, &reader)?;
    let json = doc
        .to_json(pretty)
        .context("Failed to serialize document tree")?;

    match cli.output {
        Some(path) => {
            fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
