//! Error types for measurement-based estimation.
//!
//! This module defines the failure taxonomy shared by every estimator.
//! Failures are detected eagerly, before any numeric loop runs, and are
//! never coerced into a default result.

use thiserror::Error;

/// Errors that can occur while validating measurements or estimating
/// body parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// Two paired sequences have different lengths.
    ///
    /// Index `i` of one sequence must correspond to index `i` of the other,
    /// so a length mismatch makes the pairing undefined.
    #[error("Shape mismatch: {left} has {left_len} elements but {right} has {right_len}")]
    ShapeMismatch {
        /// Name of the first sequence
        left: String,
        /// Name of the second sequence
        right: String,
        /// Length of the first sequence
        left_len: usize,
        /// Length of the second sequence
        right_len: usize,
    },

    /// An input value is outside the domain accepted by the estimator.
    ///
    /// This covers elements that cannot be represented as a finite `f64`,
    /// non-positive pressures, empty sequences and degenerate sweep ranges.
    #[error("Invalid input for {parameter}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter
        parameter: String,
        /// Description of why the value was rejected
        reason: String,
    },

    /// A divisor of the final estimate is exactly zero.
    #[error("Division by zero: {reason}")]
    DivisionByZero {
        /// Description of the degenerate divisor
        reason: String,
    },

    /// The computation completed but produced no usable finite value.
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl EstimationError {
    /// Create a ShapeMismatch error for two named sequences.
    pub fn shape_mismatch<S1, S2>(left: S1, left_len: usize, right: S2, right_len: usize) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::ShapeMismatch {
            left: left.into(),
            right: right.into(),
            left_len,
            right_len,
        }
    }

    /// Create an InvalidInput error for a named parameter.
    pub fn invalid_input<S1, S2>(parameter: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error with a custom reason.
    pub fn division_by_zero<S: Into<String>>(reason: S) -> Self {
        Self::DivisionByZero {
            reason: reason.into(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for estimation operations.
pub type Result<T> = std::result::Result<T, EstimationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = EstimationError::shape_mismatch("altitudes", 3, "accelerations", 4);
        assert!(matches!(err, EstimationError::ShapeMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Shape mismatch: altitudes has 3 elements but accelerations has 4"
        );

        let err = EstimationError::invalid_input("pressures", "element 2 is not positive");
        assert!(matches!(err, EstimationError::InvalidInput { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid input for pressures: element 2 is not positive"
        );
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            EstimationError::shape_mismatch("a", 1, "b", 2),
            EstimationError::invalid_input("step", "must be positive"),
            EstimationError::division_by_zero("altitude differences sum to zero"),
            EstimationError::numerical_error("no finite residual"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_shape_mismatch_context() {
        let err = EstimationError::shape_mismatch("altitudes", 10, "pressures", 7);

        if let EstimationError::ShapeMismatch {
            left,
            right,
            left_len,
            right_len,
        } = err
        {
            assert_eq!(left, "altitudes");
            assert_eq!(right, "pressures");
            assert_eq!(left_len, 10);
            assert_eq!(right_len, 7);
        } else {
            panic!("Expected ShapeMismatch variant");
        }
    }
}
