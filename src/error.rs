use thiserror::Error;

/// Errors raised while reading or minimizing a Boolean function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QmError {
    /// The length of the truth table is not a power of two
    #[error("A truth table of length {0} is invalid: the length must be a power of two")]
    InvalidTruthTable(usize),

    /// Unknown symbol in the truth table
    #[error("Invalid character '{0}' at position {1} of the truth table")]
    InvalidCharacter(char, usize),

    /// A minterm index does not fit in the number of variables
    #[error("The minterm {0} does not exist in a function of {1} variables")]
    MintermOutOfRange(u32, usize),

    /// The truth table is too large to be minimized
    #[error("Functions of {0} variables are not supported")]
    TooManyVariables(usize),

    /// The number of names does not match the width of the truth table
    #[error("Expected {expected} variable names, found {found}")]
    VariableCountMismatch { expected: usize, found: usize },

    /// The name is invalid
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// The name conflicts
    #[error("The name '{0}' conflicts with an other variable")]
    ConflictingName(String),

    /// The pattern of a term is invalid
    #[error("Not a valid pattern: '{0}'")]
    InvalidPattern(String),

    /// No minterm has the output 1: the function is the constant 0
    #[error("The function has no minterm to cover")]
    EmptyFunction,

    /// A cover without any term has no sum-of-products form
    #[error("Can not render an empty cover")]
    EmptyCover,

    /// The selected implicants leave some required minterms uncovered
    #[error("The cover leaves the minterms {0:?} uncovered")]
    DegenerateCover(Vec<u32>),
}
