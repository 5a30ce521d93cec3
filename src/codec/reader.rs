//! Document ingestion

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::database::{Database, Element, ModelFamily, Phase, Species};
use crate::schema;
use crate::xml::{read_tree, XmlElement};

use super::{interval, model_hints, parameter, single_child, CodecError, ReaderConfig};

/// Read a document into `db` with the default configuration
pub fn read_document<R: BufRead>(db: &mut Database, source: R) -> Result<(), CodecError> {
    read_document_with(db, source, &ReaderConfig::default())
}

/// Read a document into `db`
///
/// Schema violations are logged and never fatal; decoding proceeds on a
/// best-effort basis. Decode errors are fatal. The store is mutated in place,
/// so a failed read can leave it partially populated.
pub fn read_document_with<R: BufRead>(
    db: &mut Database,
    source: R,
    config: &ReaderConfig,
) -> Result<(), CodecError> {
    let root = read_tree(source)?;

    if config.validate_schema {
        let report = schema::validate(&root);
        if report.has_failures() {
            warn!(
                "Document does not conform to the database schema:\n{}",
                report.failure_summary()
            );
        }
    }

    read_root(db, &root)
}

/// Read a document from an in-memory string
pub fn read_str(db: &mut Database, text: &str) -> Result<(), CodecError> {
    read_document(db, text.as_bytes())
}

/// Open and read a document file
pub fn read_file<P: AsRef<Path>>(
    db: &mut Database,
    path: P,
    config: &ReaderConfig,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    info!("Reading database {}", path.display());
    let file = File::open(path)?;
    read_document_with(db, BufReader::new(file), config)
}

/// Decode an already parsed document tree into `db`
pub fn read_root(db: &mut Database, root: &XmlElement) -> Result<(), CodecError> {
    for child in root.elements() {
        match child.name.as_str() {
            "ChemicalElement" => read_element(db, child)?,
            "Species" => read_species(db, child)?,
            "Expr" => {
                let name = child.required_attribute("id")?;
                let value = interval::read_value(child)?;
                db.add_symbol(name, value)?;
            }
            "Phase" => read_phase(db, child)?,
            "metadata" => {}
            other => debug!("Skipping unknown element <{}>", other),
        }
    }
    db.process_parameter_queue();
    Ok(())
}

fn read_element(db: &mut Database, element: &XmlElement) -> Result<(), CodecError> {
    db.add_element(Element::new(
        element.required_attribute("id")?,
        element.required_f64_attribute("mass")?,
        element.required_attribute("reference_phase")?,
        element.required_f64_attribute("H298")?,
        element.required_f64_attribute("S298")?,
    ));
    Ok(())
}

fn read_species(db: &mut Database, element: &XmlElement) -> Result<(), CodecError> {
    let mut constituents = BTreeMap::new();
    for constituent in element.children_named("ChemicalElement") {
        constituents.insert(
            constituent.required_attribute("refid")?.to_string(),
            constituent.required_f64_attribute("ratio")?,
        );
    }
    db.add_species(Species::new(
        element.required_attribute("id")?,
        constituents,
        element.f64_attribute("charge")?.unwrap_or(0.0),
    ));
    Ok(())
}

fn read_phase(db: &mut Database, element: &XmlElement) -> Result<(), CodecError> {
    let name = element.required_attribute("id")?;

    let Some(model) = single_child(element, "Model")? else {
        debug!("Phase {} has no model", name);
        db.add_phase(Phase::bare(name));
        return Ok(());
    };
    let model_type = model.required_attribute("type")?;
    let Some(family) = ModelFamily::from_type(model_type) else {
        debug!("Phase {} has unsupported model type {}, skipping its model", name, model_type);
        db.add_phase(Phase::bare(name));
        return Ok(());
    };

    let hints = model_hints::decode(model, family, name, db)?;
    let (site_ratios, constituents) = model_hints::decode_sublattices(model, family)?;
    db.add_phase(Phase::new(name, family, site_ratios, constituents, hints));

    for node in element.children_named("Parameter") {
        let record = parameter::decode(node, name, family, db)?;
        db.add_parameter(record);
    }
    Ok(())
}
