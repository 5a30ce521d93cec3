/// Errors raised by the entity store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatabaseError {
    /// A symbolic function with this name is already defined
    #[error("Database contains duplicate FUNCTION {0}")]
    DuplicateSymbol(String),
}
