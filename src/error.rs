use thiserror::Error;

/// Errors produced while building documents, evaluating expressions or
/// talking to a browser.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Expression could not be tokenized or parsed
    #[error("Invalid expression at offset {offset}: {reason}")]
    InvalidExpression { offset: usize, reason: String },

    /// Expression parsed but could not be evaluated
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A node id does not belong to the document
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// The DOM snapshot could not be parsed
    #[error("Failed to parse DOM: {0}")]
    DomParseFailed(String),

    /// Browser could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Could not attach to a running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation did not complete
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Tab lookup or JavaScript evaluation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LocatorError {
    pub(crate) fn invalid(offset: usize, reason: impl Into<String>) -> Self {
        LocatorError::InvalidExpression {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn evaluation(reason: impl Into<String>) -> Self {
        LocatorError::EvaluationFailed(reason.into())
    }

    /// Whether the error comes from a malformed or unsupported expression
    /// rather than from the environment.
    pub fn is_expression_error(&self) -> bool {
        matches!(
            self,
            LocatorError::InvalidExpression { .. } | LocatorError::EvaluationFailed(_)
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LocatorError>;
