use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use calphad_xml::codec::{read_file, write_document, write_file};
use calphad_xml::database::Database;

use super::Config;

/// Read a document and write it back in canonical form
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    config: &Config,
    lenient: bool,
    compact: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let mut writer_config = config.write.clone();
    if lenient {
        writer_config.require_valid = false;
    }
    if compact {
        writer_config.indent = 0;
        writer_config.write_metadata = false;
    }

    let mut db = Database::new();
    read_file(&mut db, &input, &config.read)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    info!(
        "Read {} elements, {} species, {} functions, {} phases, {} parameters",
        db.elements().count(),
        db.species().count(),
        db.symbols().count(),
        db.phases().count(),
        db.parameters().len()
    );

    match output {
        Some(path) => {
            write_file(&db, &path, &writer_config)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_document(&db, &mut handle, &writer_config).context("Failed to write document")?;
            handle.flush()?;
        }
    }

    Ok(())
}
