use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use calphad_xml::codec::read_root;
use calphad_xml::database::Database;
use calphad_xml::schema::validate_source;
use calphad_xml::xml::read_tree;

/// Validate a database document and try to decode it
pub fn run(file: PathBuf) -> Result<()> {
    info!("calphad-xml Schema Check");
    info!("========================");
    info!("File: {}", file.display());

    let handle =
        File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?;
    let root = match read_tree(BufReader::new(handle)) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Read error: {}", e);
            std::process::exit(1);
        }
    };

    let report = validate_source(&root, file.display().to_string());

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Schema-valid documents can still fail to decode (unknown species, duplicate functions)
    let mut db = Database::new();
    if let Err(e) = read_root(&mut db, &root) {
        eprintln!("Decode error: {}", e);
        std::process::exit(1);
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
