//! `crayons`: look up Crayola colors by name or by number.

use clap::{ArgAction, Parser, Subcommand};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;
use twokey_demo::{load_crayons, lookup, write_examples, write_list, DemoError};

#[derive(Debug, Parser)]
#[command(name = "crayons", about = "Look up Crayola colors by name or by number")]
struct Args {
    /// Log more detail to stderr; repeat for more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Walk through lookups by either key and a removal (the default).
    Examples,
    /// Print every crayon.
    List,
    /// Print one crayon, by name or by table index.
    Get {
        /// A crayon name such as `Fern`, or an index such as `48`.
        key: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), DemoError> {
    let mut map = load_crayons()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.command.unwrap_or(Command::Examples) {
        Command::Examples => write_examples(&mut out, &mut map),
        Command::List => write_list(&mut out, &map),
        Command::Get { key } => {
            let (crayon, value) = lookup(&map, &key)?;
            writeln!(out, "{crayon} (index {}): {value}", crayon.index())?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("crayons: {error}");
            ExitCode::FAILURE
        }
    }
}
