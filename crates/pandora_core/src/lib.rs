//! # Pandora Core
//!
//! Pauli operator algebra, state vectors and dense Hamiltonians for the
//! Pandora multi-profile simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! pandora_core // L0+L1: Foundation + Operator (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         Constants // 수치/한계/최적화 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!         State // 상태 벡터 유틸 (완료)
//!     L1_Operator // 연산자 대수 (완료)
//!         Pauli // 파울리 연산자 (완료)
//!         PauliString // 크로네커 곱 (완료)
//!         Hamiltonian // 항 합 + 행렬 캐시 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pandora_core::prelude::*;
//!
//! let mut h = Hamiltonian::new(2).unwrap();
//! h.add_term(1.0, "ZI").unwrap();
//! h.add_term(0.5, "IZ").unwrap();
//!
//! let ground = h.ground_state_energy().unwrap();
//! assert!((ground + 1.5).abs() < 1e-9);
//!
//! let psi = zero_state(2);
//! assert!((h.compute_energy(&psi).unwrap() - 1.5).abs() < 1e-12);
//! ```
//!
//! ## Time Evolution
//!
//! ```rust
//! use pandora_core::prelude::*;
//!
//! let mut h = Hamiltonian::new(1).unwrap();
//! h.add_term(1.0, "X").unwrap();
//!
//! let psi = h.time_evolution(&zero_state(1), 0.3).unwrap();
//! assert!((norm(&psi) - 1.0).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// State vectors (Gantree: L0_Foundation → State)
pub mod state;

/// Pauli operators (Gantree: L1_Operator → Pauli)
pub mod pauli;

/// Hamiltonian (Gantree: L1_Operator → Hamiltonian)
pub mod hamiltonian;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{limits, numerics, optimizer};
pub use error::{PandoraError, PandoraResult};
pub use hamiltonian::Hamiltonian;
pub use pauli::{OperatorMatrix, Pauli, PauliString, PauliTerm};
pub use state::{Amplitude, StateVector};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use pandora_core::prelude::*;
    //! ```

    pub use crate::constants::{limits, numerics, optimizer};
    pub use crate::error::{PandoraError, PandoraResult};
    pub use crate::hamiltonian::Hamiltonian;
    pub use crate::pauli::{OperatorMatrix, Pauli, PauliString, PauliTerm};
    pub use crate::state::{
        basis_state, fidelity, from_amplitudes, from_real, norm, normalized, random_state,
        zero_state, Amplitude, StateVector,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
