//! Canonical document emission

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::database::Database;
use crate::expr::format_float;
use crate::schema::{self, FORMAT_VERSION, ROOT_ELEMENT};
use crate::xml::{write_tree, XmlElement};

use super::{interval, model_hints, parameter, CodecError, WriterConfig};

/// Processing instruction pointing validators at the schema
pub const SCHEMA_INSTRUCTION: &str = "xml-model href=\"database.rng\" schematypens=\"http://relaxng.org/ns/structure/1.0\" type=\"application/xml\"";

/// Writer identification stored in `<metadata>`
pub const WRITER_NAME: &str = concat!("calphad-xml ", env!("CARGO_PKG_VERSION"));

/// Write `db` as a complete document
///
/// The document is built and validated in memory first; nothing reaches
/// `sink` unless every entity could be encoded.
pub fn write_document<W: Write>(
    db: &Database,
    mut sink: W,
    config: &WriterConfig,
) -> Result<(), CodecError> {
    let root = build_document(db, config)?;
    check_valid(&root, config)?;

    let mut buffer = Vec::new();
    write_tree(&root, &[SCHEMA_INSTRUCTION], &mut buffer, config.indent)?;
    sink.write_all(&buffer)?;
    sink.flush()?;
    Ok(())
}

/// Write `db` into a string
pub fn write_string(db: &Database, config: &WriterConfig) -> Result<String, CodecError> {
    let mut buffer = Vec::new();
    write_document(db, &mut buffer, config)?;
    // quick-xml only emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Create or truncate `path` and write `db` into it
///
/// The file is only created once the document has been built, so a failed
/// encode never truncates an existing file.
pub fn write_file<P: AsRef<Path>>(
    db: &Database,
    path: P,
    config: &WriterConfig,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let text = write_string(db, config)?;
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    info!("Wrote database {}", path.display());
    Ok(())
}

fn check_valid(root: &XmlElement, config: &WriterConfig) -> Result<(), CodecError> {
    let report = schema::validate(root);
    if report.has_failures() {
        if config.require_valid {
            return Err(CodecError::SchemaValidationError(report.failure_summary()));
        }
        warn!(
            "Failed to validate constructed database:\n{}",
            report.failure_summary()
        );
    }
    Ok(())
}

/// Build the canonical document tree of `db`
///
/// Elements, species, symbols and phases are each emitted in name order.
/// Parameters follow the `<Model>` of their phase in store order.
pub fn build_document(db: &Database, config: &WriterConfig) -> Result<XmlElement, CodecError> {
    if db.pending_parameters() > 0 {
        return Err(CodecError::PendingParameters(db.pending_parameters()));
    }
    for parameter in db.parameters() {
        if db.phase(&parameter.phase_name).map_or(true, |p| p.is_bare()) {
            return Err(CodecError::OrphanParameter {
                phase: parameter.phase_name.clone(),
                parameter_type: parameter.type_name().to_string(),
            });
        }
    }

    let mut root = XmlElement::new(ROOT_ELEMENT).with_attribute("version", FORMAT_VERSION);
    if config.write_metadata {
        root.push(
            XmlElement::new("metadata").with_child(XmlElement::new("writer").with_text(WRITER_NAME)),
        );
    }

    for element in db.elements() {
        root.push(
            XmlElement::new("ChemicalElement")
                .with_attribute("id", element.id.as_str())
                .with_attribute("mass", format_float(element.mass))
                .with_attribute("reference_phase", element.reference_phase.as_str())
                .with_attribute("H298", format_float(element.h298))
                .with_attribute("S298", format_float(element.s298)),
        );
    }

    // unit species are implied by their element
    for species in db.species().filter(|s| !db.is_element(&s.name)) {
        let mut node = XmlElement::new("Species")
            .with_attribute("id", species.name.as_str())
            .with_attribute("charge", format_float(species.charge));
        for (element, ratio) in &species.constituents {
            node.push(
                XmlElement::new("ChemicalElement")
                    .with_attribute("refid", element.as_str())
                    .with_attribute("ratio", format_float(*ratio)),
            );
        }
        root.push(node);
    }

    for (name, value) in db.symbols() {
        let mut node = XmlElement::new("Expr").with_attribute("id", name);
        interval::write_value(&mut node, value)?;
        root.push(node);
    }

    for phase in db.phases() {
        let mut node = XmlElement::new("Phase").with_attribute("id", phase.name.as_str());
        if let Some(family) = phase.model {
            node.push(model_hints::encode(phase)?);
            for record in db.parameters_of(&phase.name) {
                node.push(parameter::encode(record, family)?);
            }
        }
        root.push(node);
    }

    Ok(root)
}
