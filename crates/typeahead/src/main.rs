use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::{Env, Target};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use typeahead_api::{AutocompleteClient, Overrides, Settings};

mod query;
mod tui;

#[derive(Parser)]
#[command(name = "typeahead")]
#[command(about = "Search-as-you-type client for remote autocomplete services", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Config file (defaults to <config dir>/typeahead/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Autocomplete endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Value for the Authorization header
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Number of candidates requested per query
    #[arg(long, global = true, value_name = "N")]
    limit: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search (default)
    Tui,

    /// Run a single query and print the ranked list
    #[command(alias = "q")]
    Query(query::QueryArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_logging(cli.debug, log_sink(&command, cli.log_file.as_deref()))?;

    let overrides = Overrides {
        endpoint: cli.endpoint,
        token: cli.token,
        page_size: cli.limit,
    };
    let settings = Settings::load(cli.config.as_deref(), &overrides)?;
    log::debug!("Using autocomplete endpoint {}", settings.endpoint);

    let client = AutocompleteClient::new(settings).context("Failed to build HTTP client")?;

    match command {
        Commands::Tui => tui::run(client),
        Commands::Query(args) => query::execute(args, client),
    }
}

/// Where log records go
#[derive(Debug, PartialEq, Eq)]
enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    /// Dropped: the TUI owns the terminal and no log file was given
    Discard,
}

fn log_sink<'a>(command: &Commands, log_file: Option<&'a Path>) -> LogSink<'a> {
    match (log_file, command) {
        (Some(path), _) => LogSink::File(path),
        (None, Commands::Tui) => LogSink::Discard,
        (None, Commands::Query(_)) => LogSink::Stderr,
    }
}

/// Default level depends on --debug (overridden by RUST_LOG)
fn init_logging(debug: bool, sink: LogSink) -> anyhow::Result<()> {
    let env = if debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    let mut builder = env_logger::Builder::from_env(env);

    match sink {
        LogSink::Stderr => {}
        LogSink::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogSink::Discard => {
            builder.target(Target::Pipe(Box::new(io::sink())));
        }
    }

    builder.init();
    Ok(())
}
