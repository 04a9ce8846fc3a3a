//! Hamiltonian coefficient optimizer
//!
//! Gantree: L4_Learn → HamiltonianOptimizer
//!
//! Fits term coefficients so that ⟨ψ|H|ψ⟩ for a fixed state approaches a
//! target energy. Gradients are central differences; the loss is
//! (E − target)², minimized by plain gradient descent.

use crate::config::OptimizerConfig;
use crate::history::{ExpectationStats, History};
use crate::learner::LearnerBridge;
use pandora_core::constants::optimizer;
use pandora_core::state::{self, StateVector};
use pandora_core::{Hamiltonian, PandoraError, PandoraResult, Pauli, PauliString, PauliTerm};
use pandora_profiles::Profile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

// ============================================================================
// Gradient
// ============================================================================

/// ∂E/∂cᵢ ≈ (E(cᵢ+ε) − E(cᵢ−ε)) / 2ε. The coefficient is restored before
/// returning, including on error. `epsilon` must be finite and positive.
/// Gantree: compute_gradient(h,state,i,eps) -> Result<f64> // 수치 기울기
pub fn compute_gradient(
    hamiltonian: &mut Hamiltonian,
    state: &StateVector,
    term_index: usize,
    epsilon: f64,
) -> PandoraResult<f64> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(PandoraError::InvalidConfig(format!(
            "epsilon must be > 0, got {}",
            epsilon
        )));
    }
    let original = hamiltonian.coefficient(term_index)?;

    hamiltonian.set_coefficient(term_index, original + epsilon)?;
    let plus = hamiltonian.compute_energy(state);
    hamiltonian.set_coefficient(term_index, original - epsilon)?;
    let minus = hamiltonian.compute_energy(state);
    hamiltonian.set_coefficient(term_index, original)?;

    Ok((plus? - minus?) / (2.0 * epsilon))
}

// ============================================================================
// Results
// ============================================================================

/// One optimizer iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration index (0-based)
    pub iteration: usize,
    /// Energy before this iteration's update
    pub energy: f64,
    /// |energy − target|
    pub error: f64,
}

/// Outcome of one fit
/// Gantree: OptimizationResult // 최적화 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Target energy
    pub target_energy: f64,
    /// Learning rate used
    pub learning_rate: f64,
    /// Energy before the first update
    pub initial_energy: f64,
    /// Energy after the last update
    pub final_energy: f64,
    /// |final_energy − target|
    pub final_error: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Whether the threshold was reached
    pub converged: bool,
    /// Per-iteration trace
    pub records: Vec<IterationRecord>,
}

impl OptimizationResult {
    /// Initial minus final error
    pub fn improvement(&self) -> f64 {
        (self.initial_energy - self.target_energy).abs() - self.final_error
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizationResult(E: {:.6} -> {:.6}, target={:.6}, error={:.3e}, iter={}, converged={})",
            self.initial_energy,
            self.final_energy,
            self.target_energy,
            self.final_error,
            self.iterations,
            self.converged
        )
    }
}

/// Optimizer activity snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnSummary {
    /// Attached profile, if any
    pub profile_name: Option<String>,
    /// Configured learning rate
    pub learning_rate: f64,
    /// Logged expectation measurements
    pub total_measurements: usize,
    /// Iterations across every fit
    pub training_iterations: usize,
    /// Hamiltonian snapshots
    pub hamiltonian_logs: usize,
    /// Expectation records
    pub expectation_logs: usize,
    /// Statistics over expectation records
    pub expectation_stats: Option<ExpectationStats>,
}

// ============================================================================
// Optimizer
// ============================================================================

/// Gradient-descent coefficient fitter with instrumentation
/// Gantree: HamiltonianOptimizer // 해밀토니안 최적화
#[derive(Debug)]
pub struct HamiltonianOptimizer {
    config: OptimizerConfig,
    history: History,
    bridge: Option<LearnerBridge>,
    profile_name: Option<String>,
    training_iterations: usize,
    rng: StdRng,
}

impl HamiltonianOptimizer {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create optimizer with configuration
    pub fn new(config: OptimizerConfig) -> PandoraResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            history: History::new(),
            bridge: None,
            profile_name: None,
            training_iterations: 0,
            rng,
        })
    }

    /// Attach a learner bridge fed by every expectation log
    pub fn with_learner(mut self, bridge: LearnerBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Record which profile this optimizer works for
    pub fn attach_profile(&mut self, profile: &Profile) {
        self.profile_name = Some(profile.name().to_string());
    }

    // ========================================================================
    // Optimization
    // ========================================================================

    /// Fit with the configured iteration cap and threshold
    /// Gantree: optimize_hamiltonian_parameters(h,state,target) -> Result // 계수 최적화
    pub fn optimize_hamiltonian_parameters(
        &mut self,
        hamiltonian: &mut Hamiltonian,
        state: &StateVector,
        target_energy: f64,
    ) -> PandoraResult<OptimizationResult> {
        let (max_iterations, threshold) =
            (self.config.max_iterations, self.config.convergence_threshold);
        self.optimize_with(hamiltonian, state, target_energy, max_iterations, threshold)
    }

    /// Fit with an explicit cap and threshold. Every term is updated in
    /// order using the energy measured at the start of the iteration.
    pub fn optimize_with(
        &mut self,
        hamiltonian: &mut Hamiltonian,
        state: &StateVector,
        target_energy: f64,
        max_iterations: usize,
        threshold: f64,
    ) -> PandoraResult<OptimizationResult> {
        let lr = self.config.learning_rate;
        let epsilon = self.config.epsilon;
        let interval = self.config.log_interval;

        let initial_energy = hamiltonian.compute_energy(state)?;
        let mut records = Vec::new();

        for iteration in 0..max_iterations {
            let energy = hamiltonian.compute_energy(state)?;
            let error = (energy - target_energy).abs();
            records.push(IterationRecord {
                iteration,
                energy,
                error,
            });

            if error < threshold {
                self.training_iterations += iteration + 1;
                let result = OptimizationResult {
                    target_energy,
                    learning_rate: lr,
                    initial_energy,
                    final_energy: energy,
                    final_error: error,
                    iterations: iteration + 1,
                    converged: true,
                    records,
                };
                self.report(&result);
                return Ok(result);
            }

            let residual = 2.0 * (energy - target_energy);
            for i in 0..hamiltonian.num_terms() {
                let gradient = compute_gradient(hamiltonian, state, i, epsilon)?;
                let coefficient = hamiltonian.coefficient(i)?;
                hamiltonian.set_coefficient(i, coefficient - lr * residual * gradient)?;
            }

            if interval > 0 && iteration % interval == 0 {
                self.history
                    .log_hamiltonian(hamiltonian, json!({ "iteration": iteration, "error": error }));
            }
        }

        self.training_iterations += max_iterations;
        let final_energy = hamiltonian.compute_energy(state)?;
        let result = OptimizationResult {
            target_energy,
            learning_rate: lr,
            initial_energy,
            final_energy,
            final_error: (final_energy - target_energy).abs(),
            iterations: max_iterations,
            converged: false,
            records,
        };
        log::warn!(
            "Optimization hit the {}-iteration cap with error {:.3e}",
            max_iterations,
            result.final_error
        );
        self.report(&result);
        Ok(result)
    }

    /// Fit a profile's Hamiltonian against its own current state
    pub fn optimize_profile(
        &mut self,
        profile: &mut Profile,
        target_energy: f64,
    ) -> PandoraResult<OptimizationResult> {
        self.attach_profile(profile);
        let state = profile.state();
        self.optimize_hamiltonian_parameters(profile.hamiltonian_mut(), &state, target_energy)
    }

    fn report(&self, result: &OptimizationResult) {
        if self.config.verbose {
            log::info!("{}", result);
        } else {
            log::debug!("{}", result);
        }
    }

    // ========================================================================
    // Learning from Data
    // ========================================================================

    /// Fit a fresh Hamiltonian, a unit Z field on every qubit, to
    /// (state, measured energy) pairs
    /// Gantree: learn_from_measurements(data) -> Result<Hamiltonian> // 측정 학습
    pub fn learn_from_measurements(
        &mut self,
        measurements: &[(StateVector, f64)],
    ) -> PandoraResult<Hamiltonian> {
        let (first, _) = measurements.first().ok_or(PandoraError::EmptyMeasurements)?;
        let mut hamiltonian = z_field(qubits_for_dimension(first.len())?)?;
        self.refine_from_measurements(measurements, &mut hamiltonian)?;
        Ok(hamiltonian)
    }

    /// Fit a caller-owned Hamiltonian in place. Every state is checked
    /// against its dimension before the first update, so a rejected batch
    /// leaves the coefficients untouched.
    /// Gantree: refine_from_measurements(data,&mut h) -> Result // 제자리 측정 학습
    pub fn refine_from_measurements(
        &mut self,
        measurements: &[(StateVector, f64)],
        hamiltonian: &mut Hamiltonian,
    ) -> PandoraResult<()> {
        if measurements.is_empty() {
            return Err(PandoraError::EmptyMeasurements);
        }
        let dim = hamiltonian.dimension();
        if let Some((state, _)) = measurements.iter().find(|(s, _)| s.len() != dim) {
            return Err(PandoraError::dimension("measurement state", dim, state.len()));
        }

        for (state, target) in measurements {
            let result = self.optimize_with(
                hamiltonian,
                state,
                *target,
                optimizer::MEASUREMENT_FIT_ITERATIONS,
                self.config.convergence_threshold,
            )?;
            self.log_expectation_value(
                hamiltonian,
                state,
                "learned",
                json!({ "target": target, "error": result.final_error }),
            )?;
        }
        Ok(())
    }

    /// Propose a single-qubit term using the least-used non-identity Pauli
    /// among `existing`, on a random qubit
    /// Gantree: suggest_hamiltonian_term(n,existing) -> Result<PauliTerm> // 항 제안
    pub fn suggest_hamiltonian_term(
        &mut self,
        n_qubits: usize,
        existing: &[PauliString],
    ) -> PandoraResult<PauliTerm> {
        if n_qubits == 0 {
            return Err(PandoraError::InvalidQubitCount(n_qubits));
        }
        let usage = |op: Pauli| {
            existing
                .iter()
                .flat_map(|s| s.iter())
                .filter(|&&p| p == op)
                .count()
        };
        let least_used = Pauli::NON_IDENTITY
            .iter()
            .copied()
            .min_by_key(|&op| usage(op))
            .unwrap_or(Pauli::Z);

        let qubit = self.rng.gen_range(0..n_qubits);
        Ok(PauliTerm::new(
            optimizer::SUGGESTED_COEFFICIENT,
            PauliString::single(n_qubits, qubit, least_used)?,
        ))
    }

    // ========================================================================
    // Instrumentation
    // ========================================================================

    /// Snapshot a Hamiltonian into the history
    pub fn log_hamiltonian(&mut self, hamiltonian: &Hamiltonian, metadata: Value) {
        self.history.log_hamiltonian(hamiltonian, metadata);
    }

    /// Compute and record ⟨ψ|H|ψ⟩, feeding the learner bridge if attached.
    /// Once the record is stored the call succeeds; learner failures are
    /// logged and the sample is dropped.
    pub fn log_expectation_value(
        &mut self,
        hamiltonian: &mut Hamiltonian,
        state: &StateVector,
        label: &str,
        metadata: Value,
    ) -> PandoraResult<f64> {
        let expectation = self
            .history
            .log_expectation_value(hamiltonian, state, label, metadata)?;
        if let Some(bridge) = self.bridge.as_mut() {
            let features = vec![
                expectation,
                state::norm(state),
                hamiltonian.num_terms() as f64,
            ];
            if let Err(e) = bridge.observe(features, label) {
                log::warn!("Learner skipped '{}' sample: {}", label, e);
            }
        }
        Ok(expectation)
    }

    /// Statistics over logged expectation values
    pub fn expectation_statistics(&self) -> Option<ExpectationStats> {
        self.history.expectation_statistics()
    }

    /// Activity snapshot
    pub fn summary(&self) -> LearnSummary {
        LearnSummary {
            profile_name: self.profile_name.clone(),
            learning_rate: self.config.learning_rate,
            total_measurements: self.history.total_measurements(),
            training_iterations: self.training_iterations,
            hamiltonian_logs: self.history.hamiltonians().len(),
            expectation_logs: self.history.expectations().len(),
            expectation_stats: self.history.expectation_statistics(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Event history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Learner bridge, if attached
    pub fn bridge(&self) -> Option<&LearnerBridge> {
        self.bridge.as_ref()
    }

    /// Learner bridge, mutable
    pub fn bridge_mut(&mut self) -> Option<&mut LearnerBridge> {
        self.bridge.as_mut()
    }

    /// Iterations across every fit
    pub fn training_iterations(&self) -> usize {
        self.training_iterations
    }

    /// Configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }
}

impl fmt::Display for HamiltonianOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attached = match &self.profile_name {
            Some(name) => format!(" attached to {}", name),
            None => " (unattached)".to_string(),
        };
        write!(
            f,
            "HamiltonianOptimizer{}: {} measurements, {} training iterations",
            attached,
            self.history.total_measurements(),
            self.training_iterations
        )
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn qubits_for_dimension(dim: usize) -> PandoraResult<usize> {
    if dim < 2 || !dim.is_power_of_two() {
        return Err(PandoraError::InvalidState(format!(
            "state length {} is not 2^n for n >= 1",
            dim
        )));
    }
    Ok(dim.trailing_zeros() as usize)
}

fn z_field(n_qubits: usize) -> PandoraResult<Hamiltonian> {
    let mut h = Hamiltonian::new(n_qubits)?;
    for q in 0..n_qubits {
        h.add_pauli_term(PauliTerm::new(1.0, PauliString::single(n_qubits, q, Pauli::Z)?))?;
    }
    Ok(h)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearnerConfig;
    use crate::learner::PatternLearner;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pandora_core::state::{basis_state, from_real};
    use pandora_profiles::ProfileKind;

    fn optimizer(lr: f64) -> HamiltonianOptimizer {
        HamiltonianOptimizer::new(OptimizerConfig::default().with_learning_rate(lr).with_seed(42))
            .unwrap()
    }

    fn single_z(c: f64) -> Hamiltonian {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(c, "Z").unwrap();
        h
    }

    #[test]
    fn test_gradient_linear_in_coefficient() {
        let mut h = Hamiltonian::new(2).unwrap();
        h.add_term(0.7, "ZI").unwrap();
        h.add_term(-0.2, "XX").unwrap();
        let up = from_real(&[1.0, 0.0, 0.0, 0.0]);

        // ∂E/∂c for ZI on |00⟩ is ⟨ZI⟩ = 1; XX has zero expectation
        assert_relative_eq!(compute_gradient(&mut h, &up, 0, 1e-5).unwrap(), 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(compute_gradient(&mut h, &up, 1, 1e-5).unwrap(), 0.0, epsilon = 1e-8);
        assert_eq!(h.coefficients(), vec![0.7, -0.2]);
    }

    #[test]
    fn test_gradient_index_out_of_range() {
        let mut h = single_z(1.0);
        let err = compute_gradient(&mut h, &from_real(&[1.0, 0.0]), 1, 1e-5).unwrap_err();
        assert_eq!(err, PandoraError::TermIndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn test_gradient_restores_on_energy_error() {
        let mut h = single_z(1.5);
        let bad = from_real(&[1.0, 0.0, 0.0, 0.0]);
        assert!(compute_gradient(&mut h, &bad, 0, 1e-5).is_err());
        assert_eq!(h.coefficient(0).unwrap(), 1.5);
    }

    #[test]
    fn test_gradient_rejects_bad_epsilon() {
        let mut h = single_z(0.8);
        let up = from_real(&[1.0, 0.0]);
        for eps in [0.0, -1e-5, f64::NAN, f64::INFINITY] {
            let err = compute_gradient(&mut h, &up, 0, eps).unwrap_err();
            assert!(matches!(err, PandoraError::InvalidConfig(_)));
        }
        assert_eq!(h.coefficient(0).unwrap(), 0.8);
    }

    #[test]
    fn test_converges_toward_target() {
        let mut opt = optimizer(0.1);
        let mut h = single_z(2.0);
        let up = from_real(&[1.0, 0.0]);

        let result = opt.optimize_hamiltonian_parameters(&mut h, &up, 1.5).unwrap();
        assert!(result.converged);
        assert!(result.iterations <= 50);
        assert!(result.final_error < 1e-4);
        assert_relative_eq!(h.coefficient(0).unwrap(), 1.5, epsilon = 1e-4);
        assert_relative_eq!(result.initial_energy, 2.0);
        assert_eq!(opt.training_iterations(), result.iterations);
    }

    #[test]
    fn test_already_converged_reports_one_iteration() {
        let mut opt = optimizer(0.1);
        let mut h = single_z(1.5);
        let result = opt
            .optimize_hamiltonian_parameters(&mut h, &from_real(&[1.0, 0.0]), 1.5)
            .unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert!(opt.history().hamiltonians().is_empty());
    }

    #[test]
    fn test_iteration_cap() {
        let mut opt = optimizer(0.001);
        let mut h = single_z(2.0);
        let up = from_real(&[1.0, 0.0]);
        let result = opt.optimize_with(&mut h, &up, -5.0, 25, 1e-6).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 25);
        assert_eq!(result.records.len(), 25);
        assert!(result.final_error < result.records[0].error);
        assert_relative_eq!(
            result.final_error,
            (h.coefficient(0).unwrap() + 5.0).abs(),
            epsilon = 1e-10
        );
        // Snapshots at iterations 0, 10, 20
        let logged: Vec<u64> = opt
            .history()
            .hamiltonians()
            .iter()
            .filter_map(|r| r.metadata["iteration"].as_u64())
            .collect();
        assert_eq!(logged, vec![0, 10, 20]);
    }

    #[test]
    fn test_zero_gradient_state_stalls() {
        // ⟨+|Z|+⟩ = 0 for any coefficient
        let mut opt = optimizer(0.1);
        let mut h = single_z(1.0);
        let plus = from_real(&[1.0, 1.0]);
        let plus = pandora_core::state::normalized(&plus).unwrap();
        let result = opt.optimize_with(&mut h, &plus, 1.0, 5, 1e-4).unwrap();
        assert!(!result.converged);
        assert_relative_eq!(h.coefficient(0).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_optimize_profile() {
        let mut opt = optimizer(0.05);
        let mut profile = Profile::new(ProfileKind::Castle, 2).unwrap();
        let result = opt.optimize_profile(&mut profile, 3.0).unwrap();
        assert!(result.final_error < result.records[0].error);
        assert_eq!(opt.summary().profile_name.as_deref(), Some("castle"));
    }

    #[test]
    fn test_learn_from_measurements() {
        let mut opt = optimizer(0.1);
        let data = vec![
            (basis_state(2, 0).unwrap(), 1.0),
            (basis_state(2, 3).unwrap(), -1.0),
        ];
        let h = opt.learn_from_measurements(&data).unwrap();
        assert_eq!(h.num_terms(), 2);
        assert_eq!(h.term(1).unwrap().operators.to_string(), "IZ");

        let records = opt.history().expectations();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.label == "learned"));
        assert_relative_eq!(records[1].metadata["target"].as_f64().unwrap(), -1.0);
    }

    #[test]
    fn test_learn_from_measurements_errors() {
        let mut opt = optimizer(0.1);
        assert_eq!(
            opt.learn_from_measurements(&[]).unwrap_err(),
            PandoraError::EmptyMeasurements
        );
        let odd = from_real(&[1.0, 0.0, 0.0]);
        assert!(opt.learn_from_measurements(&[(odd, 0.0)]).is_err());
        let mixed = vec![
            (basis_state(2, 0).unwrap(), 1.0),
            (basis_state(1, 0).unwrap(), 1.0),
        ];
        assert!(matches!(
            opt.learn_from_measurements(&mixed).unwrap_err(),
            PandoraError::DimensionMismatch { .. }
        ));
        assert!(opt.history().expectations().is_empty());
    }

    #[test]
    fn test_refine_keeps_fit_in_callers_hamiltonian() {
        let mut opt = optimizer(0.1);
        let mut h = single_z(2.0);
        let up = basis_state(1, 0).unwrap();
        opt.refine_from_measurements(&[(up.clone(), 1.5)], &mut h)
            .unwrap();
        let fitted = h.coefficient(0).unwrap();
        assert_relative_eq!(fitted, 1.5, epsilon = 1e-3);

        // A wrong-sized state later in the batch is rejected up front
        let bad = basis_state(2, 0).unwrap();
        let err = opt
            .refine_from_measurements(&[(up, 0.5), (bad, 0.0)], &mut h)
            .unwrap_err();
        assert_eq!(err, PandoraError::dimension("measurement state", 2, 4));
        assert_eq!(h.coefficient(0).unwrap(), fitted);
        assert_eq!(opt.history().expectations().len(), 1);

        assert_eq!(
            opt.refine_from_measurements(&[], &mut h).unwrap_err(),
            PandoraError::EmptyMeasurements
        );
    }

    #[test]
    fn test_suggest_least_used() {
        let mut opt = optimizer(0.1);
        let existing: Vec<PauliString> = ["XXI", "ZIZ", "IXZ"]
            .iter()
            .map(|s| PauliString::parse(s).unwrap())
            .collect();
        let term = opt.suggest_hamiltonian_term(3, &existing).unwrap();
        assert_relative_eq!(term.coefficient, 0.5);
        assert_eq!(term.operators.weight(), 1);
        assert!(term.operators.iter().any(|&p| p == Pauli::Y));

        // Ties resolve in X, Y, Z order
        let term = opt.suggest_hamiltonian_term(2, &[]).unwrap();
        assert!(term.operators.iter().any(|&p| p == Pauli::X));
        assert!(opt.suggest_hamiltonian_term(0, &[]).is_err());
    }

    #[test]
    fn test_expectation_log_feeds_learner() {
        let bridge = LearnerBridge::with_learner(
            LearnerConfig::default().with_buffer_size(2),
            Box::new(PatternLearner::new()),
        )
        .unwrap();
        let mut opt = optimizer(0.1).with_learner(bridge);
        let mut h = single_z(1.0);
        for bit in [0usize, 1, 0] {
            let s = basis_state(1, bit).unwrap();
            opt.log_expectation_value(&mut h, &s, "measurement", Value::Null)
                .unwrap();
        }
        let bridge = opt.bridge().unwrap();
        assert_eq!(bridge.batches_trained(), 1);
        assert_eq!(bridge.buffered(), 1);

        let stats = opt.expectation_statistics().unwrap();
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.mean, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejected_label_still_records_expectation() {
        let bridge =
            LearnerBridge::with_learner(LearnerConfig::default(), Box::new(PatternLearner::new()))
                .unwrap();
        let mut opt = optimizer(0.1).with_learner(bridge);
        let mut h = single_z(1.0);
        let up = basis_state(1, 0).unwrap();

        let e = opt
            .log_expectation_value(&mut h, &up, "custom", Value::Null)
            .unwrap();
        assert_relative_eq!(e, 1.0);
        assert_eq!(opt.history().total_measurements(), 1);
        assert_eq!(opt.history().expectations()[0].label, "custom");
        assert_eq!(opt.bridge().unwrap().buffered(), 0);
    }

    #[test]
    fn test_summary_and_display() {
        let opt = optimizer(0.02);
        let summary = opt.summary();
        assert_eq!(summary.learning_rate, 0.02);
        assert!(summary.expectation_stats.is_none());
        assert_eq!(
            opt.to_string(),
            "HamiltonianOptimizer (unattached): 0 measurements, 0 training iterations"
        );
    }
}
