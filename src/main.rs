use clap::{Parser, Subcommand};
use env_logger::Env;
use std::error::Error;
use std::path::PathBuf;

mod commands;

use commands::{convert::convert_command, summary::summary_command};

#[derive(Parser)]
#[command(
    name = "gpxtojson",
    about = "Convert GPX tracks to JSON annotated with distance, duration and speed"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write the enriched track hierarchy as JSON to stdout")]
    Convert {
        /// GPX file to read, or - for stdin
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    #[command(about = "Print distance, duration and speed per track")]
    Summary {
        /// GPX file to read, or - for stdin
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Convert { file, pretty } => convert_command(&file, pretty),
        Commands::Summary { file } => summary_command(&file),
    }
}
