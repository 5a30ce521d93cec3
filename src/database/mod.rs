//! # Thermodynamic Entity Store
//!
//! In-memory model of a CALPHAD database: elements with their reference
//! states, species, named symbolic functions, phases and phase parameters.
//!
//! ## Invariants
//!
//! - Every element is also registered as its own unit species.
//! - Symbol names are unique for the lifetime of a store; redefinition is an
//!   error, never an overwrite.
//! - Parameters are queued by [`Database::add_parameter`] and become visible
//!   through [`Database::parameters`] once [`Database::process_parameter_queue`]
//!   has been called.
//!
//! Equality is set-level: two stores are equal when they hold the same
//! entities, regardless of insertion order.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::expr::Expr;

pub use entities::{Element, ModelFamily, Phase, Species};
pub use error::DatabaseError;
pub use hints::{
    HintValue, ModelHints, MqmqaChemicalGroups, MqmqaHint, HINT_KEYS, PHASE_OPTIONS,
};
pub use parameter::{
    AdditionalMixing, MqmgPayload, MqmxPayload, MqmzPayload, Parameter, ParameterKind,
    QktPayload, PARAMETER_TYPES,
};

mod entities;
mod error;
mod hints;
mod parameter;


/// Entity store for one thermodynamic database
#[derive(Debug, Clone, Default, Serialize)]
pub struct Database {
    elements: BTreeMap<String, Element>,
    species: BTreeMap<String, Species>,
    symbols: BTreeMap<String, Expr>,
    phases: BTreeMap<String, Phase>,
    parameters: Vec<Parameter>,
    #[serde(skip)]
    parameter_queue: Vec<Parameter>,
}

impl Database {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element, its reference state and its unit species
    pub fn add_element(&mut self, element: Element) {
        let unit = Species::unit(&element.id);
        self.species.insert(unit.name.clone(), unit);
        if let Some(previous) = self.elements.insert(element.id.clone(), element) {
            debug!("Element {} redefined", previous.id);
        }
    }

    /// Register a species, replacing any species with the same name
    pub fn add_species(&mut self, species: Species) {
        self.species.insert(species.name.clone(), species);
    }

    /// Define a symbolic function
    pub fn add_symbol(&mut self, name: impl Into<String>, value: Expr) -> Result<(), DatabaseError> {
        let name = name.into();
        if self.symbols.contains_key(&name) {
            return Err(DatabaseError::DuplicateSymbol(name));
        }
        self.symbols.insert(name, value);
        Ok(())
    }

    /// Register a phase, replacing any phase with the same name
    pub fn add_phase(&mut self, phase: Phase) {
        self.phases.insert(phase.name.clone(), phase);
    }

    /// Queue a parameter for insertion
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameter_queue.push(parameter);
    }

    /// Move every queued parameter into the store, in queue order
    pub fn process_parameter_queue(&mut self) {
        if !self.parameter_queue.is_empty() {
            debug!("Flushing {} queued parameters", self.parameter_queue.len());
        }
        self.parameters.append(&mut self.parameter_queue);
    }

    /// Elements in id order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Look up an element
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Whether `id` names an element
    pub fn is_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Species in name order, including the unit species of elements
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.species.values()
    }

    /// Look up a species
    pub fn species_named(&self, name: &str) -> Option<&Species> {
        self.species.get(name)
    }

    /// Symbols in name order
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.symbols.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Look up a symbol
    pub fn symbol(&self, name: &str) -> Option<&Expr> {
        self.symbols.get(name)
    }

    /// Phases in name order
    pub fn phases(&self) -> impl Iterator<Item = &Phase> {
        self.phases.values()
    }

    /// Look up a phase
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.get(name)
    }

    /// Flushed parameters in insertion order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Flushed parameters of one phase, in insertion order
    pub fn parameters_of<'a>(&'a self, phase_name: &'a str) -> impl Iterator<Item = &'a Parameter> {
        self.parameters.iter().filter(move |p| p.phase_name == phase_name)
    }

    /// Number of parameters still waiting in the queue
    pub fn pending_parameters(&self) -> usize {
        self.parameter_queue.len()
    }
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
            && self.species == other.species
            && self.symbols == other.symbols
            && self.phases == other.phases
            && same_multiset(&self.parameters, &other.parameters)
            && same_multiset(&self.parameter_queue, &other.parameter_queue)
    }
}

fn same_multiset(a: &[Parameter], b: &[Parameter]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut unmatched: Vec<&Parameter> = b.iter().collect();
    for parameter in a {
        match unmatched.iter().position(|candidate| *candidate == parameter) {
            Some(i) => {
                unmatched.swap_remove(i);
            }
            None => return false,
        }
    }
    true
}
