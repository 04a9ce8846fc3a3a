//! State vectors for Pandora
//!
//! Gantree: L0_Foundation → State
//!
//! A state is a dense complex amplitude vector of length 2^n. Helpers here
//! build basis states, check dimensions and restore unit norm.

use crate::constants::{limits, numerics};
use crate::error::{PandoraError, PandoraResult};
use nalgebra::DVector;
use num_complex::Complex64;
use rand::Rng;

// ============================================================================
// Type Aliases
// ============================================================================

/// Complex amplitude
/// Gantree: Amplitude // pub type Amplitude = Complex64
pub type Amplitude = Complex64;

/// Dense state vector of length 2^n_qubits
/// Gantree: StateVector // pub type StateVector = DVector<Complex64>
pub type StateVector = DVector<Amplitude>;

// ============================================================================
// Constructors
// ============================================================================

/// Computational basis state |0…0⟩
pub fn zero_state(n_qubits: usize) -> StateVector {
    let dim = limits::dimension(n_qubits);
    let mut state = StateVector::from_element(dim, Amplitude::new(0.0, 0.0));
    state[0] = Amplitude::new(1.0, 0.0);
    state
}

/// Computational basis state |index⟩ (qubit 0 is the most significant bit)
pub fn basis_state(n_qubits: usize, index: usize) -> PandoraResult<StateVector> {
    let dim = limits::dimension(n_qubits);
    if index >= dim {
        return Err(PandoraError::dimension("basis index bound", dim, index + 1));
    }
    let mut state = StateVector::from_element(dim, Amplitude::new(0.0, 0.0));
    state[index] = Amplitude::new(1.0, 0.0);
    Ok(state)
}

/// Build a state from complex amplitudes (not normalized)
pub fn from_amplitudes(amplitudes: &[Amplitude]) -> StateVector {
    StateVector::from_column_slice(amplitudes)
}

/// Build a state from real amplitudes (not normalized)
pub fn from_real(amplitudes: &[f64]) -> StateVector {
    StateVector::from_iterator(
        amplitudes.len(),
        amplitudes.iter().map(|&a| Amplitude::new(a, 0.0)),
    )
}

/// Random normalized state with amplitudes drawn uniformly from the unit square
pub fn random_state<R: Rng>(n_qubits: usize, rng: &mut R) -> StateVector {
    let dim = limits::dimension(n_qubits);
    let state = StateVector::from_fn(dim, |_, _| {
        Amplitude::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    });
    normalized(&state).unwrap_or_else(|_| zero_state(n_qubits))
}

// ============================================================================
// Validation
// ============================================================================

/// Ensure the state has length 2^n_qubits
/// Gantree: check_dimension(state,n) -> Result // 차원 검증
pub fn check_dimension(state: &StateVector, n_qubits: usize) -> PandoraResult<()> {
    let expected = limits::dimension(n_qubits);
    if state.len() != expected {
        return Err(PandoraError::dimension("state vector", expected, state.len()));
    }
    Ok(())
}

/// Euclidean norm
#[inline]
pub fn norm(state: &StateVector) -> f64 {
    state.norm()
}

/// Check unit norm within `tol`
pub fn is_normalized(state: &StateVector, tol: f64) -> bool {
    (norm(state) - 1.0).abs() <= tol
}

/// Return a unit-norm copy; states already within [`numerics::NORM_TOL`] are
/// returned unchanged
pub fn normalized(state: &StateVector) -> PandoraResult<StateVector> {
    let n = norm(state);
    if !n.is_finite() || n < numerics::ZERO_NORM {
        return Err(PandoraError::InvalidState(format!(
            "cannot normalize vector with norm {}",
            n
        )));
    }
    if (n - 1.0).abs() <= numerics::NORM_TOL {
        return Ok(state.clone());
    }
    Ok(state.map(|a| a / n))
}

/// |⟨a|b⟩|², both states assumed normalized
pub fn fidelity(a: &StateVector, b: &StateVector) -> PandoraResult<f64> {
    if a.len() != b.len() {
        return Err(PandoraError::dimension("state vector", a.len(), b.len()));
    }
    Ok(a.dotc(b).norm_sqr())
}

// ============================================================================
// Tests
// ============================================================================
