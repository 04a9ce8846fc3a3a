//! Constants for Pandora
//!
//! Gantree: L0_Foundation → Constants
//!
//! Numerical tolerances, simulation limits and optimizer defaults.

// ============================================================================
// Numerical Tolerances
// Gantree: numerics // 수치 허용오차
// ============================================================================

pub mod numerics {
    //! Tolerances used by the dense linear algebra layer

    /// Absolute tolerance for Hermiticity checks
    pub const HERMITIAN_TOL: f64 = 1e-10;

    /// A state whose norm deviates from 1 by more than this is renormalized
    /// Gantree: NORM_TOL: f64 = 1e-8
    pub const NORM_TOL: f64 = 1e-8;

    /// Norms below this are treated as zero vectors
    pub const ZERO_NORM: f64 = 1e-300;

    /// Convergence tolerance handed to the Hermitian eigensolver
    pub const EIGEN_EPS: f64 = f64::EPSILON;

    /// Iteration cap for the Hermitian eigensolver (0 would mean unbounded)
    pub const EIGEN_MAX_ITERATIONS: usize = 100_000;
}

// ============================================================================
// Simulation Limits
// Gantree: limits // 시뮬레이션 상한
// ============================================================================

pub mod limits {
    //! Guards against exponential blow-up of dense matrices

    /// Default qubit ceiling: a 2^12 × 2^12 complex matrix is 256 MiB
    /// Gantree: DEFAULT_MAX_QUBITS: usize = 12
    pub const DEFAULT_MAX_QUBITS: usize = 12;

    /// Default qubit count for profiles and managers
    pub const DEFAULT_QUBITS: usize = 6;

    /// Hard ceiling for any caller-supplied qubit limit; larger limits are
    /// clamped to this
    /// Gantree: MAX_SUPPORTED_QUBITS: usize = 30
    pub const MAX_SUPPORTED_QUBITS: usize = 30;

    /// Hilbert space dimension for n qubits. Only meaningful for
    /// `n_qubits <= MAX_SUPPORTED_QUBITS`.
    #[inline]
    pub const fn dimension(n_qubits: usize) -> usize {
        1 << n_qubits
    }
}

// ============================================================================
// Optimizer Defaults
// Gantree: optimizer // 최적화 기본값
// ============================================================================

pub mod optimizer {
    //! Defaults for finite-difference coefficient fitting

    /// Learning rate
    pub const LEARNING_RATE: f64 = 0.01;

    /// Central difference step
    pub const EPSILON: f64 = 1e-5;

    /// Maximum gradient-descent iterations
    pub const MAX_ITERATIONS: usize = 100;

    /// Stop once |E - target| falls below this
    pub const CONVERGENCE_THRESHOLD: f64 = 1e-4;

    /// Snapshot the Hamiltonian every N iterations
    pub const LOG_INTERVAL: usize = 10;

    /// Iterations per measurement in `learn_from_measurements`
    pub const MEASUREMENT_FIT_ITERATIONS: usize = 50;

    /// Coefficient for suggested terms
    pub const SUGGESTED_COEFFICIENT: f64 = 0.5;

    /// Samples buffered before handing a batch to the learner
    pub const LEARNER_BUFFER_SIZE: usize = 32;
}

// ============================================================================
// Tests
// ============================================================================
