//! # calphad-xml - XML Codec for CALPHAD Thermodynamic Databases
//!
//! `calphad_xml` reads and writes thermodynamic databases in a fixed XML
//! format: chemical elements with their reference states, species, named
//! temperature-dependent functions, phases with their sublattice models, and
//! the model parameters of each phase.
//!
//! ## Key Features
//!
//! - **Lossless round trip**: a written document reads back into an equal
//!   store, and writing that store again reproduces the document.
//!
//! - **Piecewise temperature functions**: values are sums of bare algebraic
//!   text and `<Interval>` elements, mapped onto a piecewise [`expr::Expr`]
//!   with an implicit zero outside every declared range.
//!
//! - **Model families**: compound energy formalism (CEF) phases and modified
//!   quasichemical (MQMQA) phases, plus the `MQMG`, `MQMZ`, `MQMX` and `QKT`
//!   parameter payloads.
//!
//! - **Schema validation**: a built-in rule table checks documents before they
//!   are written and reports violations on read.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use calphad_xml::prelude::*;
//!
//! let mut db = Database::new();
//! read_file(&mut db, "alzn.xml", &ReaderConfig::default())?;
//!
//! for phase in db.phases() {
//!     println!("{}: {} parameters", phase.name, db.parameters_of(&phase.name).count());
//! }
//!
//! write_file(&db, "alzn.normalized.xml", &WriterConfig::default())?;
//! # Ok::<(), CodecError>(())
//! ```
//!
//! ## Document Layout
//!
//! ```text
//! Database version="0"
//! ├── metadata/writer            # producing tool
//! ├── ChemicalElement*           # id, mass, reference_phase, H298, S298
//! ├── Species*                   # id, charge, ChemicalElement refid/ratio
//! ├── Expr*                      # id, text and Interval fragments
//! └── Phase*                     # id
//!     ├── Model                  # CEF or MQMQA, sublattices, hints
//!     └── Parameter*             # type, Order, ConstituentArray, value
//! ```
//!
//! ## Architecture
//!
//! - [`expr`]: symbolic expressions over `T` and `P`
//! - [`database`]: in-memory entity store
//! - [`xml`]: mixed-content XML tree on top of quick-xml
//! - [`schema`]: document rules and the validation report
//! - [`codec`]: document reader and writer

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod database;
pub mod expr;
pub mod schema;
pub mod xml;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::codec::{
        read_document, read_document_with, read_file, read_str, write_document, write_file,
        write_string, CodecError, ReaderConfig, WriterConfig,
    };
    pub use crate::database::{
        Database, Element, HintValue, ModelFamily, ModelHints, Parameter, ParameterKind, Phase,
        Species, HINT_KEYS,
    };
    pub use crate::expr::{Branch, Expr, Interval};
    pub use crate::schema::{validate, ValidationReport};
}
