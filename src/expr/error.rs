/// Errors that can occur while parsing or evaluating an expression
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    /// Character that cannot start any token
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Byte offset in the source text
        position: usize,
    },

    /// Numeric literal that does not parse as a float
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),

    /// Token in a position the grammar does not allow
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Textual form of the token
        token: String,
        /// Byte offset in the source text
        position: usize,
    },

    /// Input ended in the middle of an expression
    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// Input contained no expression at all
    #[error("Empty expression")]
    Empty,

    /// Function call to a name other than ln/log/exp
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Symbol with no value during evaluation
    #[error("Unbound symbol: {0}")]
    UnboundSymbol(String),
}
