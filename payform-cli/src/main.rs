use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use payform_cli::CliError;
use simplelog::{Config, LevelFilter, WriteLogger};

/// Replay report form sessions and evaluate validation rules.
#[derive(Parser, Debug)]
#[command(name = "payform", version, about)]
struct Cli {
    /// File to write logs to.
    #[arg(long, global = true, default_value = "payform.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scripted session against a page and print the errors shown.
    Replay(payform_cli::replay::ReplayArgs),
    /// Evaluate one named rule.
    Rule(payform_cli::rule::RuleArgs),
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), CliError> {
    let log_file = File::create(path).map_err(|source| CliError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(&cli.log_file, cli.log_level)?;

    match cli.command {
        Commands::Replay(args) => payform_cli::replay::run(&args),
        Commands::Rule(args) => payform_cli::rule::run(&args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
