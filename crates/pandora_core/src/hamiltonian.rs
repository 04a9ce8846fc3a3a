//! Dense Pauli Hamiltonian
//!
//! Gantree: L1_Operator → Hamiltonian
//!
//! H = Σᵢ cᵢ Pᵢ over a fixed qubit count. The full 2^n × 2^n matrix is
//! assembled lazily and cached until the next term mutation.

use crate::constants::{limits, numerics};
use crate::error::{PandoraError, PandoraResult};
use crate::pauli::{OperatorMatrix, PauliString, PauliTerm};
use crate::state::{self, StateVector};
use nalgebra::linalg::SymmetricEigen;
use num_complex::Complex64;
use serde::Serialize;
use std::fmt;

/// Weighted sum of Pauli strings with a cached dense matrix
/// Gantree: Hamiltonian // 해밀토니안
#[derive(Debug, Clone, Serialize)]
pub struct Hamiltonian {
    /// Number of qubits
    /// Gantree: n_qubits: usize // 큐비트 수
    n_qubits: usize,

    /// Ordered terms; order only matters for optimizer indexing
    /// Gantree: terms: Vec<PauliTerm> // 항 목록
    terms: Vec<PauliTerm>,

    /// Cached matrix, valid while `dirty` is false
    #[serde(skip)]
    cached: Option<OperatorMatrix>,

    /// Set on every term mutation
    #[serde(skip)]
    dirty: bool,
}

impl Hamiltonian {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty Hamiltonian, bounded by [`limits::DEFAULT_MAX_QUBITS`]
    /// Gantree: new(n_qubits) -> Result<Self> // 생성자
    pub fn new(n_qubits: usize) -> PandoraResult<Self> {
        Self::with_qubit_limit(n_qubits, limits::DEFAULT_MAX_QUBITS)
    }

    /// Create an empty Hamiltonian with an explicit qubit ceiling, itself
    /// capped at [`limits::MAX_SUPPORTED_QUBITS`]
    pub fn with_qubit_limit(n_qubits: usize, max_qubits: usize) -> PandoraResult<Self> {
        if n_qubits == 0 {
            return Err(PandoraError::InvalidQubitCount(n_qubits));
        }
        let max = max_qubits.min(limits::MAX_SUPPORTED_QUBITS);
        if n_qubits > max {
            return Err(PandoraError::QubitLimitExceeded {
                qubits: n_qubits,
                max,
            });
        }

        Ok(Self {
            n_qubits,
            terms: Vec::new(),
            cached: None,
            dirty: true,
        })
    }

    // ========================================================================
    // Term Management
    // ========================================================================

    /// Append c · P from a string such as "IXZ"
    /// Gantree: add_term(coeff,pauli) -> Result // 항 추가
    pub fn add_term(&mut self, coefficient: f64, pauli_string: &str) -> PandoraResult<()> {
        let len = pauli_string.chars().count();
        if len != self.n_qubits {
            return Err(PandoraError::dimension("pauli string", self.n_qubits, len));
        }
        let operators = PauliString::parse(pauli_string)?;
        self.push_term(PauliTerm::new(coefficient, operators));
        Ok(())
    }

    /// Append an already-parsed term
    pub fn add_pauli_term(&mut self, term: PauliTerm) -> PandoraResult<()> {
        if term.num_qubits() != self.n_qubits {
            return Err(PandoraError::dimension(
                "pauli string",
                self.n_qubits,
                term.num_qubits(),
            ));
        }
        self.push_term(term);
        Ok(())
    }

    fn push_term(&mut self, term: PauliTerm) {
        self.terms.push(term);
        self.invalidate();
    }

    /// Replace the coefficient of term `index`
    /// Gantree: set_coefficient(i,c) -> Result // 계수 교체
    pub fn set_coefficient(&mut self, index: usize, coefficient: f64) -> PandoraResult<()> {
        let len = self.terms.len();
        let term = self
            .terms
            .get_mut(index)
            .ok_or(PandoraError::TermIndexOutOfRange { index, len })?;
        term.coefficient = coefficient;
        self.invalidate();
        Ok(())
    }

    /// Coefficient of term `index`
    pub fn coefficient(&self, index: usize) -> PandoraResult<f64> {
        self.terms
            .get(index)
            .map(|t| t.coefficient)
            .ok_or(PandoraError::TermIndexOutOfRange {
                index,
                len: self.terms.len(),
            })
    }

    /// All coefficients in term order
    pub fn coefficients(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.coefficient).collect()
    }

    /// Mark the cached matrix stale
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    // ========================================================================
    // Matrix Assembly
    // ========================================================================

    /// Full matrix Σ cᵢ Pᵢ, rebuilt only when terms changed
    /// Gantree: matrix() -> &DMatrix // 행렬 캐시
    pub fn matrix(&mut self) -> &OperatorMatrix {
        if self.dirty {
            self.cached = None;
            self.dirty = false;
        }
        let (n_qubits, terms) = (self.n_qubits, &self.terms);
        self.cached.get_or_insert_with(|| {
            log::debug!(
                "Assembling {}-qubit Hamiltonian from {} terms",
                n_qubits,
                terms.len()
            );
            assemble(n_qubits, terms)
        })
    }

    /// Check M == M† within `tol`
    pub fn is_hermitian(&mut self, tol: f64) -> bool {
        let m = self.matrix();
        let diff = m - m.adjoint();
        diff.iter().all(|z| z.norm() <= tol)
    }

    // ========================================================================
    // Physics
    // ========================================================================

    /// Energy ⟨ψ|H|ψ⟩ (real part)
    /// Gantree: compute_energy(state) -> Result<f64> // 에너지
    pub fn compute_energy(&mut self, state: &StateVector) -> PandoraResult<f64> {
        state::check_dimension(state, self.n_qubits)?;
        let h_psi = self.matrix() * state;
        let energy = state.dotc(&h_psi);
        if energy.im.abs() > numerics::HERMITIAN_TOL * (1.0 + energy.re.abs()) {
            log::trace!("Discarding imaginary energy component {:.3e}", energy.im);
        }
        Ok(energy.re)
    }

    /// Alias of [`Hamiltonian::compute_energy`]
    pub fn compute_expectation(&mut self, state: &StateVector) -> PandoraResult<f64> {
        self.compute_energy(state)
    }

    /// Propagator U(t) = exp(−i·t·H) via the general Padé matrix exponential
    /// Gantree: propagator(t) -> Result<DMatrix> // 전파자
    pub fn propagator(&mut self, time: f64) -> PandoraResult<OperatorMatrix> {
        let generator = self.matrix() * Complex64::new(0.0, -time);
        let u = generator.exp();
        if u.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
            return Err(PandoraError::NumericalFailure(format!(
                "matrix exponential diverged for t = {}",
                time
            )));
        }
        Ok(u)
    }

    /// Evolve a state: |ψ(t)⟩ = exp(−i·t·H)|ψ⟩
    /// Gantree: time_evolution(state,t) -> Result<State> // 시간 진화
    pub fn time_evolution(&mut self, state: &StateVector, time: f64) -> PandoraResult<StateVector> {
        state::check_dimension(state, self.n_qubits)?;
        let u = self.propagator(time)?;
        Ok(u * state)
    }

    /// Lowest eigenvalue and its eigenvector
    /// Gantree: ground_state() -> Result<(f64,State)> // 바닥 상태
    pub fn ground_state(&mut self) -> PandoraResult<(f64, StateVector)> {
        let m = self.matrix().clone();
        let eigen = SymmetricEigen::try_new(
            m,
            numerics::EIGEN_EPS,
            numerics::EIGEN_MAX_ITERATIONS,
        )
        .ok_or_else(|| {
            PandoraError::NumericalFailure(format!(
                "Hermitian eigensolver did not converge for {} qubits",
                self.n_qubits
            ))
        })?;

        let (index, energy) = eigen
            .eigenvalues
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| PandoraError::NumericalFailure("empty spectrum".to_string()))?;

        Ok((energy, eigen.eigenvectors.column(index).into_owned()))
    }

    /// Lowest eigenvalue only
    pub fn ground_state_energy(&mut self) -> PandoraResult<f64> {
        self.ground_state().map(|(energy, _)| energy)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Hilbert space dimension 2^n
    pub fn dimension(&self) -> usize {
        limits::dimension(self.n_qubits)
    }

    /// Number of terms
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Owned copy of the term list
    pub fn terms(&self) -> Vec<PauliTerm> {
        self.terms.clone()
    }

    /// Borrow term `index`
    pub fn term(&self, index: usize) -> Option<&PauliTerm> {
        self.terms.get(index)
    }

    /// Whether the next `matrix()` call rebuilds
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Σ cᵢ Pᵢ as a dense 2^n × 2^n matrix
fn assemble(n_qubits: usize, terms: &[PauliTerm]) -> OperatorMatrix {
    let dim = limits::dimension(n_qubits);
    let mut matrix = OperatorMatrix::zeros(dim, dim);
    for term in terms {
        matrix += term.to_matrix();
    }
    matrix
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "Hamiltonian({} qubits, 0 terms)", self.n_qubits);
        }
        write!(f, "Hamiltonian({} qubits):", self.n_qubits)?;
        for term in &self.terms {
            write!(f, " {}", term)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{basis_state, from_amplitudes, from_real, norm, random_state};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn test_new_validates_qubits() {
        assert!(Hamiltonian::new(1).is_ok());
        assert_eq!(
            Hamiltonian::new(0).unwrap_err(),
            PandoraError::InvalidQubitCount(0)
        );
        assert!(matches!(
            Hamiltonian::with_qubit_limit(5, 4),
            Err(PandoraError::QubitLimitExceeded { qubits: 5, max: 4 })
        ));
    }

    #[test]
    fn test_qubit_limit_is_capped() {
        assert_eq!(
            Hamiltonian::with_qubit_limit(40, 64).unwrap_err(),
            PandoraError::QubitLimitExceeded {
                qubits: 40,
                max: limits::MAX_SUPPORTED_QUBITS
            }
        );
        assert!(Hamiltonian::with_qubit_limit(64, usize::MAX).is_err());
        // Construction is lazy, so the ceiling itself is accepted
        let h = Hamiltonian::with_qubit_limit(limits::MAX_SUPPORTED_QUBITS, usize::MAX).unwrap();
        assert_eq!(h.n_qubits(), limits::MAX_SUPPORTED_QUBITS);
    }

    #[test]
    fn test_add_term_validation() {
        let mut h = Hamiltonian::new(2).unwrap();
        assert!(h.add_term(1.0, "ZI").is_ok());
        assert!(matches!(
            h.add_term(1.0, "ZII"),
            Err(PandoraError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
        assert_eq!(
            h.add_term(1.0, "ZQ").unwrap_err(),
            PandoraError::InvalidOperatorSymbol('Q')
        );
        // Length is checked before symbols
        assert!(matches!(
            h.add_term(1.0, "QQQ"),
            Err(PandoraError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
        assert_eq!(h.num_terms(), 1);
    }

    #[test]
    fn test_single_z_energy() {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(1.0, "Z").unwrap();
        assert_relative_eq!(h.compute_energy(&from_real(&[1.0, 0.0])).unwrap(), 1.0);
        assert_relative_eq!(h.compute_energy(&from_real(&[0.0, 1.0])).unwrap(), -1.0);
    }

    #[test]
    fn test_two_qubit_diagonal() {
        let mut h = Hamiltonian::new(2).unwrap();
        h.add_term(1.0, "ZI").unwrap();
        h.add_term(0.5, "IZ").unwrap();
        let m = h.matrix();
        let diag: Vec<f64> = (0..4).map(|i| m[(i, i)].re).collect();
        assert_eq!(diag, vec![1.5, 0.5, -0.5, -1.5]);
    }

    #[test]
    fn test_energy_dimension_mismatch() {
        let mut h = Hamiltonian::new(2).unwrap();
        h.add_term(1.0, "ZZ").unwrap();
        let err = h.compute_energy(&from_real(&[1.0, 0.0])).unwrap_err();
        assert!(matches!(err, PandoraError::DimensionMismatch { expected: 4, actual: 2, .. }));
    }

    #[test]
    fn test_zero_term_energy() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut h = Hamiltonian::new(3).unwrap();
        let s = random_state(3, &mut rng);
        assert_abs_diff_eq!(h.compute_energy(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_hermitian_with_y_terms() {
        let mut h = Hamiltonian::new(3).unwrap();
        h.add_term(0.7, "XYZ").unwrap();
        h.add_term(-1.3, "YYI").unwrap();
        h.add_term(0.2, "IYX").unwrap();
        assert!(h.is_hermitian(1e-12));
    }

    #[test]
    fn test_cache_invalidation() {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(1.0, "Z").unwrap();
        assert!(h.is_dirty());
        let _ = h.matrix();
        assert!(!h.is_dirty());

        h.set_coefficient(0, 2.0).unwrap();
        assert!(h.is_dirty());
        assert_relative_eq!(h.matrix()[(0, 0)].re, 2.0);
        assert!(h.set_coefficient(3, 1.0).is_err());
    }

    #[test]
    fn test_terms_is_copy() {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(1.0, "X").unwrap();
        let mut terms = h.terms();
        terms[0].coefficient = 9.0;
        assert_eq!(h.coefficient(0).unwrap(), 1.0);
    }

    #[test]
    fn test_x_rotation() {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(1.0, "X").unwrap();
        let evolved = h.time_evolution(&from_real(&[1.0, 0.0]), PI / 2.0).unwrap();
        // exp(-i·π/2·X) = -i·X
        assert_abs_diff_eq!(evolved[0].re, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(evolved[0].im, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(evolved[1].re, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(evolved[1].im, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_time_evolution_preserves_norm() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut h = Hamiltonian::new(3).unwrap();
        h.add_term(1.0, "XII").unwrap();
        h.add_term(0.4, "ZZI").unwrap();
        h.add_term(-0.8, "IYX").unwrap();
        h.add_term(0.3, "XYZ").unwrap();

        for &t in &[0.0, 0.1, 1.0, -2.5, 7.3] {
            let s = random_state(3, &mut rng);
            let evolved = h.time_evolution(&s, t).unwrap();
            assert_abs_diff_eq!(norm(&evolved), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_time_evolution_zero_time_is_identity() {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(2.0, "Y").unwrap();
        let s = from_amplitudes(&[Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)]);
        let evolved = h.time_evolution(&s, 0.0).unwrap();
        assert_abs_diff_eq!((evolved - s).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ground_state_single_z() {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(1.0, "Z").unwrap();
        let (energy, vector) = h.ground_state().unwrap();
        assert_relative_eq!(energy, -1.0, epsilon = 1e-10);
        assert_relative_eq!(vector[1].norm(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ground_state_negative_field() {
        // -2·ZI + 0.5·IZ: minimum at |01⟩ with E = -2.5
        let mut h = Hamiltonian::new(2).unwrap();
        h.add_term(-2.0, "ZI").unwrap();
        h.add_term(0.5, "IZ").unwrap();
        let (energy, vector) = h.ground_state().unwrap();
        assert_relative_eq!(energy, -2.5, epsilon = 1e-10);
        let e = h.compute_energy(&vector).unwrap();
        assert_relative_eq!(e, energy, epsilon = 1e-9);
        let fidelity = crate::state::fidelity(&vector, &basis_state(2, 0b01).unwrap()).unwrap();
        assert_relative_eq!(fidelity, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_variational_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut h = Hamiltonian::new(2).unwrap();
        h.add_term(1.0, "XX").unwrap();
        h.add_term(0.5, "YZ").unwrap();
        h.add_term(-0.7, "ZI").unwrap();
        let ground = h.ground_state_energy().unwrap();
        for _ in 0..20 {
            let s = random_state(2, &mut rng);
            assert!(ground <= h.compute_energy(&s).unwrap() + 1e-10);
        }
    }

    #[test]
    fn test_display() {
        let mut h = Hamiltonian::new(2).unwrap();
        assert_eq!(h.to_string(), "Hamiltonian(2 qubits, 0 terms)");
        h.add_term(-0.5, "XZ").unwrap();
        assert_eq!(h.to_string(), "Hamiltonian(2 qubits): -0.5000*XZ");
    }
}
