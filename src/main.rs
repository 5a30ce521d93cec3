//! # calphad-xml
//!
//! Command-line tool for checking, normalizing and inspecting CALPHAD XML
//! databases.
//!
//! ## Usage
//!
//! ```bash
//! # Validate a document against the database schema
//! calphad-xml check alzn.xml
//!
//! # Rewrite a document in canonical form
//! calphad-xml normalize alzn.xml alzn.normalized.xml
//!
//! # Summarize a document, or dump it as JSON
//! calphad-xml info alzn.xml --json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
