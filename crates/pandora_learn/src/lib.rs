//! # Pandora Learn
//!
//! Coefficient fitting for Pauli Hamiltonians, with measurement history and
//! an optional incremental learner fed from logged expectations.
//!
//! ## Gantree Architecture
//!
//! ```text
//! pandora_learn // L4: Learn (완료)
//!     OptimizerConfig // 최적화 설정 (완료)
//!     LearnerConfig // 학습기 설정 (완료)
//!     HamiltonianOptimizer // 계수 최적화 (완료)
//!         compute_gradient() - 중앙 차분
//!         optimize_hamiltonian_parameters() - 경사 하강
//!         learn_from_measurements() / refine_from_measurements()
//!         suggest_hamiltonian_term()
//!     History // 이력 (완료)
//!         HamiltonianRecord, ExpectationRecord, ExpectationStats
//!     LearnerBridge // 점진 학습 (완료)
//!         IncrementalLearner trait, PatternLearner
//!     LearningSession // 매니저 + 최적화 (완료)
//!         switch_profile() → attach_profile(), SessionSummary
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pandora_learn::prelude::*;
//!
//! let mut h = Hamiltonian::new(1).unwrap();
//! h.add_term(2.0, "Z").unwrap();
//! let up = zero_state(1);
//!
//! let config = OptimizerConfig::default().with_learning_rate(0.1);
//! let mut optimizer = HamiltonianOptimizer::new(config).unwrap();
//! let result = optimizer
//!     .optimize_hamiltonian_parameters(&mut h, &up, 1.5)
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert!((h.coefficient(0).unwrap() - 1.5).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L4_Learn → OptimizerConfig, LearnerConfig)
pub mod config;

/// Event history (Gantree: L4_Learn → History)
pub mod history;

/// Incremental learner hook (Gantree: L4_Learn → LearnerBridge)
pub mod learner;

/// Optimizer (Gantree: L4_Learn → HamiltonianOptimizer)
pub mod optimizer;

/// Manager with attached optimizer (Gantree: L4_Learn → LearningSession)
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{LearnerConfig, OptimizerConfig};
pub use history::{ExpectationRecord, ExpectationStats, HamiltonianRecord, History};
pub use learner::{IncrementalLearner, LearnerBridge, PatternLearner};
pub use optimizer::{
    compute_gradient, HamiltonianOptimizer, IterationRecord, LearnSummary, OptimizationResult,
};
pub use session::{LearningSession, SessionSummary};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use pandora_learn::prelude::*;
    //! ```

    pub use crate::config::{LearnerConfig, OptimizerConfig};
    pub use crate::history::{ExpectationStats, History};
    pub use crate::learner::{IncrementalLearner, LearnerBridge, PatternLearner};
    pub use crate::optimizer::{compute_gradient, HamiltonianOptimizer, OptimizationResult};
    pub use crate::session::LearningSession;
    pub use pandora_profiles::prelude::*;
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
