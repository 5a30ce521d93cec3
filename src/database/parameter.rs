//! Phase parameters and their type-specific payloads

use serde::Serialize;

use crate::expr::Expr;

/// Parameter type names with a dedicated payload
#[allow(non_snake_case)]
pub mod PARAMETER_TYPES {
    /// MQMQA quadruplet Gibbs energy (zeta + stoichiometry)
    pub const MQMG: &str = "MQMG";

    /// MQMQA coordination numbers
    pub const MQMZ: &str = "MQMZ";

    /// MQMQA excess mixing term
    pub const MQMX: &str = "MQMX";

    /// Kohler-Toop QKTO excess term
    pub const QKT: &str = "QKT";
}

/// Payload of an `MQMG` parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MqmgPayload {
    /// Zeta factor
    pub zeta: f64,
    /// Stoichiometric factors of the quadruplet
    pub stoichiometry: Vec<f64>,
}

/// Payload of an `MQMZ` parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MqmzPayload {
    /// Coordination numbers of the quadruplet
    pub coordinations: Vec<f64>,
}

/// Optional third constituent of an `MQMX` mixing term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalMixing {
    /// Species reference
    pub constituent: String,
    /// Exponent applied to the additional constituent
    pub exponent: f64,
}

/// Payload of an `MQMX` parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MqmxPayload {
    /// Mixing code (the `MixingCode@type` attribute, e.g. "G" or "Q")
    pub mixing_code: String,
    /// Exponents, positionally matched to the constituent array
    pub exponents: Vec<f64>,
    /// Additional mixing constituent; `None` stands for the null species with exponent 0
    pub additional_mixing: Option<AdditionalMixing>,
}

/// Payload of a `QKT` parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QktPayload {
    /// Exponents, positionally matched to the constituent array
    pub exponents: Vec<f64>,
}

/// Parameter type together with its type-specific fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterKind {
    /// Any type without extra fields (G, L, TC, BMAGN, MQ, ...)
    Generic(String),
    /// MQMQA quadruplet Gibbs energy
    Mqmg(MqmgPayload),
    /// MQMQA coordination numbers; never carries a value expression
    Mqmz(MqmzPayload),
    /// MQMQA excess mixing term
    Mqmx(MqmxPayload),
    /// QKTO excess term
    Qkt(QktPayload),
}

impl ParameterKind {
    /// The `type` attribute value
    pub fn type_name(&self) -> &str {
        match self {
            ParameterKind::Generic(name) => name,
            ParameterKind::Mqmg(_) => PARAMETER_TYPES::MQMG,
            ParameterKind::Mqmz(_) => PARAMETER_TYPES::MQMZ,
            ParameterKind::Mqmx(_) => PARAMETER_TYPES::MQMX,
            ParameterKind::Qkt(_) => PARAMETER_TYPES::QKT,
        }
    }

    /// Whether a value expression is allowed for this type
    pub fn allows_value(&self) -> bool {
        !matches!(self, ParameterKind::Mqmz(_))
    }
}

/// A model parameter of one phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Owning phase
    pub phase_name: String,
    /// Type and type-specific payload
    pub kind: ParameterKind,
    /// Redlich-Kister order; `None` for MQMQA-family and QKT parameters
    pub order: Option<i64>,
    /// Species per sublattice
    pub constituent_array: Vec<Vec<String>>,
    /// Diffusing species for mobility parameters
    pub diffusing_species: Option<String>,
    /// Value expression
    pub value: Option<Expr>,
}

impl Parameter {
    /// Create a parameter without order, diffusing species or value
    pub fn new(
        phase_name: impl Into<String>,
        kind: ParameterKind,
        constituent_array: Vec<Vec<String>>,
    ) -> Self {
        Self {
            phase_name: phase_name.into(),
            kind,
            order: None,
            constituent_array,
            diffusing_species: None,
            value: None,
        }
    }

    /// Set the Redlich-Kister order
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the value expression
    pub fn with_value(mut self, value: Expr) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the diffusing species
    pub fn with_diffusing_species(mut self, species: impl Into<String>) -> Self {
        self.diffusing_species = Some(species.into());
        self
    }

    /// The `type` attribute value
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}
