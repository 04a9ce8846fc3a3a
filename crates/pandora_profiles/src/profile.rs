//! A named Hamiltonian paired with a current state
//!
//! Gantree: L2_Profile → Profile
//!
//! A profile owns exactly one Hamiltonian (seeded from its kind's default
//! terms) and one state vector, initially |0…0⟩.

use crate::kind::ProfileKind;
use pandora_core::constants::{limits, numerics};
use pandora_core::state::{self, StateVector};
use pandora_core::{Hamiltonian, PandoraResult};
use std::fmt;

/// Hamiltonian + state under one term policy
/// Gantree: Profile // 프로파일
#[derive(Debug, Clone)]
pub struct Profile {
    kind: ProfileKind,
    hamiltonian: Hamiltonian,
    state: StateVector,
}

impl Profile {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a profile with the kind's default terms
    /// Gantree: new(kind,n) -> Result<Self> // 생성자
    pub fn new(kind: ProfileKind, n_qubits: usize) -> PandoraResult<Self> {
        Self::with_qubit_limit(kind, n_qubits, limits::DEFAULT_MAX_QUBITS)
    }

    /// Create a profile with an explicit qubit ceiling
    pub fn with_qubit_limit(
        kind: ProfileKind,
        n_qubits: usize,
        max_qubits: usize,
    ) -> PandoraResult<Self> {
        let mut hamiltonian = Hamiltonian::with_qubit_limit(n_qubits, max_qubits)?;
        for term in kind.default_terms(n_qubits)? {
            hamiltonian.add_pauli_term(term)?;
        }
        log::debug!(
            "Initialized {} profile: {} qubits, {} terms",
            kind.label(),
            n_qubits,
            hamiltonian.num_terms()
        );

        Ok(Self {
            kind,
            hamiltonian,
            state: state::zero_state(n_qubits),
        })
    }

    // ========================================================================
    // Hamiltonian Operations
    // ========================================================================

    /// Append an ad-hoc term to this profile's Hamiltonian
    pub fn add_term(&mut self, coefficient: f64, pauli_string: &str) -> PandoraResult<()> {
        self.hamiltonian.add_term(coefficient, pauli_string)
    }

    /// Energy of `state`, or of the profile's own state when `None`
    /// Gantree: compute_energy(state?) -> Result<f64> // 에너지
    pub fn compute_energy(&mut self, state: Option<&StateVector>) -> PandoraResult<f64> {
        match state {
            Some(s) => self.hamiltonian.compute_energy(s),
            None => self.hamiltonian.compute_energy(&self.state),
        }
    }

    /// Evolve `state` by time `t`. With `None` the profile's own state is
    /// evolved and replaced; a supplied state is never stored.
    /// Gantree: time_evolution(t,state?) -> Result<State> // 시간 진화
    pub fn time_evolution(
        &mut self,
        time: f64,
        state: Option<&StateVector>,
    ) -> PandoraResult<StateVector> {
        match state {
            Some(s) => self.hamiltonian.time_evolution(s, time),
            None => {
                let evolved = self.hamiltonian.time_evolution(&self.state, time)?;
                self.state = evolved.clone();
                Ok(evolved)
            }
        }
    }

    /// Ground state of this profile's Hamiltonian
    pub fn ground_state(&mut self) -> PandoraResult<(f64, StateVector)> {
        self.hamiltonian.ground_state()
    }

    // ========================================================================
    // State Management
    // ========================================================================

    /// Copy of the current state
    pub fn state(&self) -> StateVector {
        self.state.clone()
    }

    /// Borrow the current state
    pub fn state_ref(&self) -> &StateVector {
        &self.state
    }

    /// Replace the current state, normalizing it if needed
    /// Gantree: set_state(state) -> Result // 상태 설정
    pub fn set_state(&mut self, state: &StateVector) -> PandoraResult<()> {
        state::check_dimension(state, self.n_qubits())?;
        if !state::is_normalized(state, numerics::NORM_TOL) {
            log::warn!(
                "{} profile: renormalizing state with norm {:.6}",
                self.kind.label(),
                state::norm(state)
            );
        }
        self.state = state::normalized(state)?;
        Ok(())
    }

    /// Reset to |0…0⟩
    pub fn reset_state(&mut self) {
        self.state = state::zero_state(self.n_qubits());
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Profile kind
    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// Lookup name, e.g. "castle"
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Number of qubits
    pub fn n_qubits(&self) -> usize {
        self.hamiltonian.n_qubits()
    }

    /// Borrow the Hamiltonian
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Mutable Hamiltonian, e.g. for coefficient fitting
    pub fn hamiltonian_mut(&mut self) -> &mut Hamiltonian {
        &mut self.hamiltonian
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Profile({} qubits, {} terms)",
            self.kind.label(),
            self.n_qubits(),
            self.hamiltonian.num_terms()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
