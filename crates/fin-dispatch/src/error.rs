use fin_formulas::FinanceError;
use thiserror::Error;

/// Every way a request can fail before or during evaluation.
///
/// `Display` renders exactly the text placed in the envelope's `error` field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The request does not fit the function's schema.
    #[error("{0}")]
    Shape(String),
    /// A rule spanning several fields (or the function name itself) was violated.
    #[error("{0}")]
    CrossField(String),
    /// Arguments are well-formed but outside the function's domain.
    #[error("{0}")]
    Domain(String),
    #[error(transparent)]
    Formula(#[from] FinanceError),
}

impl DispatchError {
    pub fn unknown_function(name: &str) -> Self {
        DispatchError::CrossField(format!(
            "Invalid function name: {name}. Please see documentation for help on supported functions"
        ))
    }

    pub fn required_property(name: &str) -> Self {
        DispatchError::Shape(format!("'{name}' is a required property"))
    }
}
