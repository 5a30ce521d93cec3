use crate::database::DatabaseError;
use crate::expr::ExprError;
use crate::xml::XmlError;

/// Errors raised while reading or writing a database document
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Interval over a variable other than temperature
    #[error("Unsupported interval variable '{0}', only T is supported")]
    UnsupportedIntervalVariable(String),

    /// Symbolic function name defined twice
    #[error("Database contains duplicate FUNCTION {0}")]
    DuplicateSymbol(String),

    /// Both FCC_4SL and BCC_4SL symmetry set on one phase
    #[error("Multiple parameter symmetry options specified for phase {0}")]
    MultipleSymmetryOptions(String),

    /// Model hints with no XML representation
    #[error("Not all model hints of phase {phase} are supported: {}", keys.join(", "))]
    UnsupportedModelHint {
        /// Phase name
        phase: String,
        /// Unconsumed hint keys
        keys: Vec<String>,
    },

    /// Parameter type that forbids a value expression carries one
    #[error("{parameter_type} parameter of phase {phase} cannot carry a value expression")]
    ValueExpressionConflict {
        /// Phase name
        phase: String,
        /// Parameter type tag
        parameter_type: String,
    },

    /// Type-specific field absent or empty
    #[error("Missing required field '{field}' in {context}")]
    MissingRequiredField {
        /// Where the field was expected
        context: String,
        /// Field or element name
        field: String,
    },

    /// Constructed document does not conform to the schema
    #[error("Failed to validate constructed database:\n{0}")]
    SchemaValidationError(String),

    /// Child element missing or duplicated
    #[error("Malformed <{element}>: {message}")]
    MalformedStructure {
        /// Element name
        element: String,
        /// What is wrong
        message: String,
    },

    /// Reference to a species the store does not know
    #[error("Unknown species '{0}'")]
    UnknownSpecies(String),

    /// Magnetic ordering model other than IHJ
    #[error("Unknown magnetic ordering model '{0}'")]
    UnknownMagneticOrdering(String),

    /// Parameter whose phase is missing or has no model
    #[error("{parameter_type} parameter references phase {phase}, which is not defined with a model")]
    OrphanParameter {
        /// Phase name
        phase: String,
        /// Parameter type tag
        parameter_type: String,
    },

    /// Parameters still queued in the store at write time
    #[error("{0} parameters are still queued; process the parameter queue before writing")]
    PendingParameters(usize),

    /// Expression without a fragment encoding
    #[error("Expression cannot be written as interval fragments: {0}")]
    UnrepresentableExpression(String),

    /// Algebraic text that does not parse
    #[error("Invalid expression '{text}': {source}")]
    Expr {
        /// Offending text
        text: String,
        /// Parser error
        source: ExprError,
    },

    /// XML reading, writing or attribute error
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// I/O error on the output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DatabaseError> for CodecError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateSymbol(name) => CodecError::DuplicateSymbol(name),
        }
    }
}

impl CodecError {
    pub(crate) fn missing(context: impl Into<String>, field: impl Into<String>) -> Self {
        CodecError::MissingRequiredField {
            context: context.into(),
            field: field.into(),
        }
    }

    pub(crate) fn malformed(element: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::MalformedStructure {
            element: element.into(),
            message: message.into(),
        }
    }
}
