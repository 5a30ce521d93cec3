use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::hints::ModelHints;

/// A chemical element with its reference state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Element symbol
    pub id: String,
    /// Atomic mass in g/mol
    pub mass: f64,
    /// Stable phase at 298.15 K
    pub reference_phase: String,
    /// Enthalpy of the reference state at 298.15 K
    pub h298: f64,
    /// Entropy of the reference state at 298.15 K
    pub s298: f64,
}

impl Element {
    /// Create an element
    pub fn new(
        id: impl Into<String>,
        mass: f64,
        reference_phase: impl Into<String>,
        h298: f64,
        s298: f64,
    ) -> Self {
        Self {
            id: id.into(),
            mass,
            reference_phase: reference_phase.into(),
            h298,
            s298,
        }
    }
}

/// A species made of one or more elements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Species {
    /// Species name
    pub name: String,
    /// Element id to stoichiometric ratio
    pub constituents: BTreeMap<String, f64>,
    /// Net charge
    pub charge: f64,
}

impl Species {
    /// Create a species
    pub fn new(name: impl Into<String>, constituents: BTreeMap<String, f64>, charge: f64) -> Self {
        Self {
            name: name.into(),
            constituents,
            charge,
        }
    }

    /// The neutral single-atom species of an element
    pub fn unit(element: &str) -> Self {
        let mut constituents = BTreeMap::new();
        constituents.insert(element.to_string(), 1.0);
        Self::new(element, constituents, 0.0)
    }
}

/// Phase model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelFamily {
    /// Compound energy formalism
    Cef,
    /// Modified quasichemical model in the quadruplet approximation
    Mqmqa,
}

impl ModelFamily {
    /// The `Model@type` attribute value
    pub fn as_str(self) -> &'static str {
        match self {
            ModelFamily::Cef => "CEF",
            ModelFamily::Mqmqa => "MQMQA",
        }
    }

    /// Parse a `Model@type` attribute value
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "CEF" => Some(ModelFamily::Cef),
            "MQMQA" => Some(ModelFamily::Mqmqa),
            _ => None,
        }
    }
}

/// A phase and its sublattice model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    /// Phase name
    pub name: String,
    /// Model family; `None` for a bare phase without model metadata
    pub model: Option<ModelFamily>,
    /// Site ratio per sublattice (a single 1.0 for MQMQA quadruplets)
    pub site_ratios: Vec<f64>,
    /// Eligible species per sublattice
    pub constituents: Vec<BTreeSet<String>>,
    /// Structural metadata
    pub hints: ModelHints,
}

impl Phase {
    /// Create a phase with a model
    pub fn new(
        name: impl Into<String>,
        model: ModelFamily,
        site_ratios: Vec<f64>,
        constituents: Vec<BTreeSet<String>>,
        hints: ModelHints,
    ) -> Self {
        Self {
            name: name.into(),
            model: Some(model),
            site_ratios,
            constituents,
            hints,
        }
    }

    /// Create a phase without model metadata
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            site_ratios: Vec::new(),
            constituents: Vec::new(),
            hints: ModelHints::new(),
        }
    }

    /// Whether the phase has no model
    pub fn is_bare(&self) -> bool {
        self.model.is_none()
    }
}
