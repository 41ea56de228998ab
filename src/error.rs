//! The error taxonomy for the reader, evaluator, and primitives.
//!
//! Every fallible operation in this crate returns `Result<_, EvalError>`.
//! Each variant carries enough context — the offending operator or value,
//! plus expected/actual arity or type when relevant — to render the
//! one-line diagnostic the evaluator emits when it aborts a top-level form.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("SyntaxError: {0}")]
    SyntaxError(String),

    #[error("UnboundError: unbound atom `{0}`")]
    UnboundError(String),

    #[error("TypeError: `{operator}` expected {expected}, got {actual}")]
    TypeError {
        operator: String,
        expected: String,
        actual: String,
    },

    #[error("ShapeError: {0}")]
    ShapeError(String),

    #[error("ArityError: `{operator}` expected {expected}, got {actual}")]
    ArityError {
        operator: String,
        expected: String,
        actual: usize,
    },

    #[error("DomainError: {0}")]
    DomainError(String),

    #[error("ResourceError: {0}")]
    ResourceError(String),
}

impl EvalError {
    pub fn type_error(operator: &str, expected: &str, actual: &str) -> EvalError {
        EvalError::TypeError {
            operator: operator.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Builds an ArityError from a primitive's declared min/max and the
    /// actual argument count it was called with — the "shared helper" named
    /// in the primitive library's arity-validation contract.
    pub fn arity_error(operator: &str, min: usize, max: Option<usize>, actual: usize) -> EvalError {
        let expected = match max {
            Some(max) if max == min => format!("{min}"),
            Some(max) => format!("{min}..={max}"),
            None => format!("at least {min}"),
        };
        EvalError::ArityError {
            operator: operator.to_string(),
            expected,
            actual,
        }
    }

    pub fn check_arity(operator: &str, min: usize, max: Option<usize>, actual: usize) -> Result<(), EvalError> {
        if actual < min || max.is_some_and(|max| actual > max) {
            return Err(EvalError::arity_error(operator, min, max, actual));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_error_message_names_the_operator() {
        let err = EvalError::arity_error("car", 1, Some(1), 2);
        assert!(err.to_string().contains("car"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn check_arity_accepts_within_range() {
        assert!(EvalError::check_arity("+", 2, None, 3).is_ok());
        assert!(EvalError::check_arity("car", 1, Some(1), 0).is_err());
        assert!(EvalError::check_arity("car", 1, Some(1), 2).is_err());
    }
}
