//! # Database Document Codec
//!
//! Bidirectional conversion between the database XML format and a
//! [`Database`](crate::database::Database).
//!
//! ## Components
//!
//! - [`interval`]: text and `<Interval>` fragments to and from piecewise
//!   temperature expressions
//! - [`model_hints`]: phase model metadata to and from `<Model>`
//! - [`parameter`]: `<Parameter>` elements to and from parameter records
//! - [`read_document`]: document ingestion (lenient on schema violations)
//! - [`write_document`]: canonical document emission (strict)
//!
//! ## Round trip
//!
//! Reading a written document reproduces a store equal to the original under
//! set equality. The writer sorts every collection by name, so writing the
//! re-read store yields the same document again.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calphad_xml::codec::{read_str, write_string, WriterConfig};
//! use calphad_xml::database::Database;
//!
//! let mut db = Database::new();
//! read_str(&mut db, r#"<Database version="0">
//!   <ChemicalElement id="AL" mass="26.98" reference_phase="FCC_A1" H298="4577.3" S298="28.322"/>
//!   <Expr id="GHSERAL"><Interval in="T" lower="298.15" upper="700.0">-7976.15 + 137.093038*T</Interval></Expr>
//! </Database>"#)?;
//!
//! let text = write_string(&db, &WriterConfig::default())?;
//! # Ok::<(), calphad_xml::codec::CodecError>(())
//! ```

pub mod interval;
pub mod model_hints;
pub mod parameter;

mod config;
mod error;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use config::{ReaderConfig, WriterConfig};
pub use error::CodecError;
pub use interval::{Fragment, IntervalFragment};
pub use reader::{read_document, read_document_with, read_file, read_root, read_str};
pub use writer::{
    build_document, write_document, write_file, write_string, SCHEMA_INSTRUCTION, WRITER_NAME,
};

use crate::xml::XmlElement;

/// The child called `name`, if any; more than one is malformed
pub(crate) fn single_child<'a>(
    parent: &'a XmlElement,
    name: &'static str,
) -> Result<Option<&'a XmlElement>, CodecError> {
    let mut matches = parent.children_named(name);
    let first = matches.next();
    if matches.next().is_some() {
        return Err(CodecError::malformed(
            parent.name.as_str(),
            format!("expected at most one <{}>", name),
        ));
    }
    Ok(first)
}

/// The one child called `name`; zero or several is malformed
pub(crate) fn required_child<'a>(
    parent: &'a XmlElement,
    name: &'static str,
) -> Result<&'a XmlElement, CodecError> {
    single_child(parent, name)?.ok_or_else(|| {
        CodecError::malformed(parent.name.as_str(), format!("expected exactly one <{}>", name))
    })
}
