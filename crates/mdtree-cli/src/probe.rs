//! span-probe: Check whether empty span wrappers change pandoc's output

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use mdtree_ast::WrapPolicy;
use mdtree_cli::config::{CONFIG_FILE_NAME, Config};
use mdtree_cli::init_logging;
use mdtree_cli::input::select_input;
use mdtree_pandoc::Format;
use mdtree_probe::{SAMPLE_MARKDOWN, run_probe};

#[derive(Parser, Debug)]
#[command(name = "span-probe")]
#[command(about = "Render Markdown with and without empty spans and compare the output")]
#[command(version)]
#[command(after_help = "Examples:
  span-probe run                          # Probe the built-in nested list
  span-probe run -f doc.md --to gfm       # Probe a file against GitHub Markdown
  span-probe run --artifacts probe-out    # Keep trees and renderings
  span-probe init                         # Print a sample _mdtree.toml")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (default: _mdtree.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the probe
    Run(RunArgs),
    /// Write a sample configuration file
    Init(InitArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Markdown text to probe (default: a nested list)
    markdown: Option<String>,

    /// Read Markdown from a file instead
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Which content to wrap in empty spans
    #[arg(long, value_name = "POLICY")]
    policy: Option<WrapPolicy>,

    /// Target format to render to (repeatable; default: markdown and html)
    #[arg(long = "to", value_name = "FORMAT")]
    targets: Vec<Format>,

    /// Reader format passed to pandoc (default: markdown)
    #[arg(long, value_name = "FORMAT")]
    from: Option<Format>,

    /// Directory to write trees and renderings into
    #[arg(long, value_name = "DIR")]
    artifacts: Option<PathBuf>,

    /// Path to the pandoc executable
    #[arg(long, value_name = "PROGRAM")]
    pandoc: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct InitArgs {
    /// Output file (default: standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the configuration JSON schema instead
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run(args) => run(args, cli.config),
        Command::Init(args) => init(args),
    }
}

fn run(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::discover(config_path.as_deref())?;

    // Standard input is never read; without a file or text the sample is used
    let markdown = match select_input(args.file, args.markdown, true) {
        Some(input) => input.read()?,
        None => SAMPLE_MARKDOWN.to_string(),
    };

    let pandoc = config.pandoc(args.pandoc.as_deref())?;
    let options = config.probe_options(args.from, args.policy, args.targets)?;

    match pandoc.version() {
        Ok(version) => println!("Using {version}"),
        Err(e) => log::warn!("could not query converter version: {e}"),
    }
    println!();
    println!("Input:");
    print!("{markdown}");
    if !markdown.ends_with('\n') {
        println!();
    }
    println!();

    let report = run_probe(&pandoc, &markdown, &options)?;
    print!("{report}");

    let artifacts = args.artifacts.or(config.probe.artifacts_dir);
    if let Some(dir) = artifacts {
        let written = report
            .write_artifacts(&dir)
            .with_context(|| format!("Failed to write artifacts to {}", dir.display()))?;
        println!();
        println!("Wrote {} files to {}", written.len(), dir.display());
    }

    Ok(())
}

fn init(args: InitArgs) -> Result<()> {
    let content = if args.schema {
        Config::json_schema_string()?
    } else {
        Config::sample().to_toml_with_schema()?
    };

    match args.output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Created {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            if !args.schema {
                log::info!("save as {CONFIG_FILE_NAME} to use it");
            }
        }
    }

    Ok(())
}
