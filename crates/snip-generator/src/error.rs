use thiserror::Error;

/// Errors returned when configuring a generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet contains a duplicate symbol: {0:?}")]
    DuplicateSymbol(char),
    #[error("alphabet symbol {0:?} is not allowed in short codes")]
    InvalidSymbol(char),
    #[error("invalid code length {length}; expected {min}..={max}")]
    InvalidLength { length: usize, min: usize, max: usize },
}
