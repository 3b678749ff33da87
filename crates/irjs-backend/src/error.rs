//! Error types for IR lowering
//!
//! Lowering is a pure transform over validated IR, so every error here is
//! either a construct the backend does not model or an invariant the
//! front-end broke. Both abort lowering of the current module.

use irjs_ir::{SymbolId, SyntheticRole};
use thiserror::Error;

/// Errors that can occur while lowering IR to the JavaScript AST
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LowerError {
    /// IR shape the backend does not translate
    #[error("Unsupported construct: {construct}")]
    Unsupported {
        /// Description of the construct
        construct: String,
    },

    /// Value reference with no binding in scope
    #[error("Unknown symbol '{name}' ({symbol})")]
    UnknownSymbol {
        /// Referenced symbol
        symbol: SymbolId,
        /// Name it was referenced by
        name: String,
    },

    /// Synthetic name used outside any scope that declares it
    #[error("Synthetic name {role} is not bound in the current scope")]
    UnboundSyntheticName {
        /// Role of the synthetic name
        role: SyntheticRole,
    },

    /// Call site supplies more arguments than the callee declares
    #[error("Call to '{callee}' supplies {supplied} argument(s), but only {declared} are declared")]
    ArgumentCountMismatch {
        /// Callee name
        callee: String,
        /// Argument slots present at the call site
        supplied: usize,
        /// Declared parameter count
        declared: usize,
    },

    /// A parallel lowering worker panicked before finishing a declaration
    #[error("Lowering worker panicked while lowering declaration #{index}")]
    WorkerPanicked {
        /// Index of the declaration in the module
        index: usize,
    },

    /// Internal invariant violation
    #[error("Internal lowering error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

impl LowerError {
    /// Create an unsupported-construct error
    pub fn unsupported(construct: impl Into<String>) -> Self {
        LowerError::Unsupported {
            construct: construct.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        LowerError::Internal {
            message: message.into(),
        }
    }
}

/// Result type for lowering
pub type LowerResult<T> = Result<T, LowerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LowerError::unsupported("64-bit integer constant").to_string(),
            "Unsupported construct: 64-bit integer constant"
        );
        assert_eq!(
            LowerError::UnknownSymbol {
                symbol: SymbolId(42),
                name: "count".to_string(),
            }
            .to_string(),
            "Unknown symbol 'count' (sym42)"
        );
        assert_eq!(
            LowerError::UnboundSyntheticName {
                role: SyntheticRole::ExtensionReceiver,
            }
            .to_string(),
            "Synthetic name <receiver> is not bound in the current scope"
        );
    }
}
