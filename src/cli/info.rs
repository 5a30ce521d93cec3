use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use calphad_xml::codec::read_file;
use calphad_xml::database::{Database, ModelFamily};

use super::Config;

/// Display information about a database document
pub fn run(file: PathBuf, config: &Config, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mut db = Database::new();
    read_file(&mut db, &file, &config.read)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if json {
        let text = serde_json::to_string_pretty(&db).context("Failed to serialize database")?;
        println!("{}", text);
        return Ok(());
    }

    println!("Database Information");
    println!("====================");
    println!("File: {}", file.display());
    println!();

    println!("Entities:");
    println!("  Elements:   {}", db.elements().count());
    println!("  Species:    {}", db.species().count());
    println!("  Functions:  {}", db.symbols().count());
    println!("  Phases:     {}", db.phases().count());
    println!("  Parameters: {}", db.parameters().len());
    println!();

    let mut models: BTreeMap<&str, usize> = BTreeMap::new();
    for phase in db.phases() {
        let label = match phase.model {
            Some(ModelFamily::Cef) => "CEF",
            Some(ModelFamily::Mqmqa) => "MQMQA",
            None => "no model",
        };
        *models.entry(label).or_default() += 1;
    }
    if !models.is_empty() {
        println!("Phase Models:");
        for (label, count) in &models {
            println!("  {}: {}", label, count);
        }
        println!();
    }

    let mut types: BTreeMap<&str, usize> = BTreeMap::new();
    for parameter in db.parameters() {
        *types.entry(parameter.type_name()).or_default() += 1;
    }
    if !types.is_empty() {
        println!("Parameter Types:");
        for (name, count) in &types {
            println!("  {}: {}", name, count);
        }
        println!();
    }

    println!("Phases:");
    for phase in db.phases() {
        let sublattices = phase
            .constituents
            .iter()
            .map(|site| site.iter().cloned().collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join(" : ");
        println!(
            "  {} ({} parameters) {}",
            phase.name,
            db.parameters_of(&phase.name).count(),
            sublattices
        );
    }

    Ok(())
}
