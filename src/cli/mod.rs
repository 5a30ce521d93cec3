use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod config;
mod info;
mod normalize;

pub use config::Config;

/// calphad-xml - CALPHAD thermodynamic database XML tool
#[derive(Parser)]
#[command(name = "calphad-xml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file (defaults to ./calphad-xml.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a database document against the schema
    Check {
        /// Input XML file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Read a database document and write it back in canonical form
    Normalize {
        /// Input XML file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output XML file path (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Write the document even if it does not conform to the schema
        #[arg(long)]
        lenient: bool,

        /// Write a single line without the metadata block
        #[arg(long)]
        compact: bool,
    },

    /// Display a summary of a database document
    Info {
        /// Input XML file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dump the decoded database as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Check { file } => check::run(file),
        Commands::Normalize {
            input,
            output,
            lenient,
            compact,
        } => normalize::run(input, output, &config, lenient, compact),
        Commands::Info { file, json } => info::run(file, &config, json),
    }
}
