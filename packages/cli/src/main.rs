mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{init, inspect, session, InitArgs, InspectArgs, SessionArgs};
use config::Config;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Geomark CLI - view GeoJSON maps and place point markers
#[derive(Parser, Debug)]
#[command(name = "geomark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ./geomark.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default geomark.config.json
    Init(InitArgs),

    /// Summarize GeoJSON files
    Inspect(InspectArgs),

    /// Run an interactive or scripted editing session
    Session(SessionArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, cwd: &Path) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::Inspect(args) => {
            let config = Config::load(cwd, cli.config.as_deref())?;
            inspect(args, cwd, &config)
        }
        Command::Session(args) => {
            let config = Config::load(cwd, cli.config.as_deref())?;
            session(args, cwd, &config)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli, &cwd));

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
