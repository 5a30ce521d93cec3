//! Phase model hints
//!
//! Model hints are phase-level structural metadata that are not themselves
//! parameters: magnetic and atomic ordering, symmetry, simple phase options and
//! chemical group assignments. The set of hints is heterogeneous and depends on
//! the model family, so it is kept as a keyed map of typed values.

use std::collections::BTreeMap;

use serde::Serialize;

/// Hint keys with a defined XML representation
#[allow(non_snake_case)]
pub mod HINT_KEYS {
    // =========================================================================
    // Magnetic ordering (Inden-Hillert-Jarl)
    // =========================================================================

    /// Antiferromagnetic factor of the IHJ magnetic model
    pub const MAGNETIC_AFM_FACTOR: &str = "magnetic_afm_factor";

    /// Structure factor of the IHJ magnetic model
    pub const MAGNETIC_STRUCTURE_FACTOR: &str = "magnetic_structure_factor";

    // =========================================================================
    // Two-part atomic ordering
    // =========================================================================

    /// Name of the ordered part of an order/disorder pair
    pub const ORDERED_PHASE: &str = "ordered_phase";

    /// Name of the disordered part of an order/disorder pair
    pub const DISORDERED_PHASE: &str = "disordered_phase";

    // =========================================================================
    // Simple phase options
    // =========================================================================

    /// Two-sublattice ionic liquid
    pub const IONIC_LIQUID_2SL: &str = "ionic_liquid_2SL";

    /// Liquid phase
    pub const LIQUID: &str = "liquid";

    /// Gas phase
    pub const GAS: &str = "gas";

    /// Aqueous phase
    pub const AQUEOUS: &str = "aqueous";

    /// Phase with charged constituents
    pub const CHARGED_PHASE: &str = "charged_phase";

    // =========================================================================
    // Parameter symmetry
    // =========================================================================

    /// Four-sublattice FCC permutation symmetry
    pub const SYMMETRY_FCC_4SL: &str = "symmetry_FCC_4SL";

    /// Four-sublattice BCC permutation symmetry
    pub const SYMMETRY_BCC_4SL: &str = "symmetry_BCC_4SL";

    // =========================================================================
    // Chemical groups
    // =========================================================================

    /// Species to chemical group assignment (non-MQMQA models)
    pub const CHEMICAL_GROUPS: &str = "chemical_groups";

    /// MQMQA descriptor: version plus cation/anion chemical groups
    pub const MQMQA: &str = "mqmqa";
}

/// Simple boolean phase options and the XML element that represents each
pub const PHASE_OPTIONS: [(&str, &str); 5] = [
    (HINT_KEYS::IONIC_LIQUID_2SL, "TwoSublatticeIonicLiquid"),
    (HINT_KEYS::LIQUID, "Liquid"),
    (HINT_KEYS::GAS, "Gas"),
    (HINT_KEYS::AQUEOUS, "Aqueous"),
    (HINT_KEYS::CHARGED_PHASE, "Charged"),
];

/// Cation and anion chemical groups of an MQMQA phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MqmqaChemicalGroups {
    /// Cation species to group id
    pub cations: BTreeMap<String, i64>,
    /// Anion species to group id
    pub anions: BTreeMap<String, i64>,
}

/// MQMQA model descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MqmqaHint {
    /// Model version string (the `version` attribute, e.g. "SUBQ")
    pub version: String,
    /// Chemical group assignment
    pub chemical_groups: MqmqaChemicalGroups,
}

/// Typed value of a single model hint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HintValue {
    /// Flag option
    Bool(bool),
    /// Numeric option
    Float(f64),
    /// Name option (e.g. a phase name)
    Text(String),
    /// Species to chemical group id
    ChemicalGroups(BTreeMap<String, i64>),
    /// MQMQA descriptor
    Mqmqa(MqmqaHint),
}

impl HintValue {
    /// The value if this is a flag
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HintValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value if this is numeric
    pub fn as_float(&self) -> Option<f64> {
        match self {
            HintValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The value if this is a name
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HintValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Keyed collection of model hints for one phase
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelHints(BTreeMap<String, HintValue>);

impl ModelHints {
    /// Create an empty hint set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a hint, replacing any previous value under the same key
    pub fn set(&mut self, key: impl Into<String>, value: HintValue) {
        self.0.insert(key.into(), value);
    }

    /// Builder-style variant of [`ModelHints::set`]
    pub fn with(mut self, key: impl Into<String>, value: HintValue) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a hint
    pub fn get(&self, key: &str) -> Option<&HintValue> {
        self.0.get(key)
    }

    /// Remove and return a hint
    pub fn remove(&mut self, key: &str) -> Option<HintValue> {
        self.0.remove(key)
    }

    /// Whether a hint is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Hint keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of hints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no hints
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
