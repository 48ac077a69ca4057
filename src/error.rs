use thiserror::Error;

/// Failures surfaced by [`crate::Union`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnionError {
    /// Assignment with an absent candidate (`None`, JSON `null`).
    #[error("cannot store an absent value in a union")]
    NullValue,
    /// The value's shape is not accepted by the descriptor(s) it was checked against.
    #[error("invalid type: {found} does not match {expected}")]
    TypeMismatch { found: String, expected: String },
    /// A union was declared without any allowed type.
    #[error("a union must allow at least one type")]
    InvalidConfiguration,
}

/// Failures while reading a descriptor from its textual form (`list<String>`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorParseError {
    #[error("unknown type name `{0}`")]
    UnknownType(String),
    #[error("expected a type name at offset {0}")]
    MissingName(usize),
    #[error("unexpected `{found}` at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("unexpected end of input, expected `{0}`")]
    UnexpectedEnd(char),
    #[error("type arguments nest deeper than {0} levels")]
    TooDeep(usize),
}
