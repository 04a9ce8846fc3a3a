//! Error types for Pandora
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every fallible operation in the workspace reports through [`PandoraError`].

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for Pandora
/// Gantree: PandoraError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PandoraError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Operator string or state vector has the wrong length
    /// Gantree: DimensionMismatch{{what,expected,actual}} // 차원 불일치
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Character outside {I, X, Y, Z}
    /// Gantree: InvalidOperatorSymbol(char) // 파울리 기호
    #[error("Invalid Pauli operator '{0}': must be one of I, X, Y, Z")]
    InvalidOperatorSymbol(char),

    /// Qubit count must be positive
    #[error("Invalid qubit count {0}: must be positive")]
    InvalidQubitCount(usize),

    /// Qubit count above the dense-simulation ceiling
    /// Gantree: QubitLimitExceeded{{qubits,max}} // 큐비트 상한
    #[error("Qubit count {qubits} exceeds the dense simulation limit of {max}")]
    QubitLimitExceeded { qubits: usize, max: usize },

    /// Term index outside the Hamiltonian's term list
    #[error("Term index {index} out of range: Hamiltonian has {len} terms")]
    TermIndexOutOfRange { index: usize, len: usize },

    /// State vector that cannot be normalized
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ========================================================================
    // Profile Errors
    // ========================================================================
    /// Unknown profile name
    /// Gantree: UnknownProfile{{name,valid}} // 프로파일 이름
    #[error("Unknown profile: {name}. Available: {}", .valid.join(", "))]
    UnknownProfile { name: String, valid: Vec<String> },

    // ========================================================================
    // Numerical Errors
    // ========================================================================
    /// Matrix exponential or eigensolver failed
    /// Gantree: NumericalFailure(String) // 수치 실패
    #[error("Numerical failure: {0}")]
    NumericalFailure(String),

    // ========================================================================
    // Learning Errors
    // ========================================================================
    /// No measurements supplied
    #[error("Need at least one measurement")]
    EmptyMeasurements,

    /// Incremental learner rejected a batch
    #[error("Learner error: {0}")]
    LearnerError(String),

    // ========================================================================
    // Configuration / I/O Errors
    // ========================================================================
    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for Pandora operations
/// Gantree: PandoraResult<T> // type alias
pub type PandoraResult<T> = Result<T, PandoraError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for PandoraError {
    fn from(err: serde_json::Error) -> Self {
        PandoraError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl PandoraError {
    /// Build a dimension mismatch error
    pub fn dimension(what: &'static str, expected: usize, actual: usize) -> Self {
        PandoraError::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Check if error is a usage/validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            PandoraError::DimensionMismatch { .. }
                | PandoraError::InvalidOperatorSymbol(_)
                | PandoraError::InvalidQubitCount(_)
                | PandoraError::QubitLimitExceeded { .. }
                | PandoraError::TermIndexOutOfRange { .. }
                | PandoraError::InvalidState(_)
                | PandoraError::UnknownProfile { .. }
        )
    }

    /// Check if error came from the linear algebra layer
    pub fn is_numerical(&self) -> bool {
        matches!(self, PandoraError::NumericalFailure(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
