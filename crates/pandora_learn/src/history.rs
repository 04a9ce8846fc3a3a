//! Append-only instrumentation logs
//!
//! Gantree: L4_Learn → History
//!
//! Hamiltonian snapshots and expectation measurements, each stamped with a
//! UTC timestamp and free-form JSON metadata.

use chrono::{DateTime, Utc};
use pandora_core::state::{self, StateVector};
use pandora_core::{Hamiltonian, PandoraResult, PauliTerm};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Snapshot of a Hamiltonian
/// Gantree: HamiltonianRecord // 해밀토니안 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianRecord {
    /// Capture time
    pub timestamp: DateTime<Utc>,
    /// Qubit count
    pub n_qubits: usize,
    /// Term count
    pub n_terms: usize,
    /// Terms at capture time
    pub terms: Vec<PauliTerm>,
    /// Caller metadata, e.g. `{"iteration": 10, "error": 0.3}`
    pub metadata: Value,
}

/// One logged expectation value
/// Gantree: ExpectationRecord // 기대값 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationRecord {
    /// Capture time
    pub timestamp: DateTime<Utc>,
    /// Free label, e.g. "measurement" or "learned"
    pub label: String,
    /// ⟨ψ|H|ψ⟩
    pub expectation: f64,
    /// ‖ψ‖ of the measured state
    pub state_norm: f64,
    /// Caller metadata
    pub metadata: Value,
}

/// Descriptive statistics over logged expectation values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectationStats {
    /// Mean
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    /// Minimum
    pub min: f64,
    /// Maximum
    pub max: f64,
    /// Number of records
    pub count: usize,
}

impl ExpectationStats {
    /// Statistics of `values`; `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std: variance.sqrt(),
            min,
            max,
            count,
        })
    }
}

impl fmt::Display for ExpectationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:.6} std={:.6} range=[{:.6}, {:.6}]",
            self.count, self.mean, self.std, self.min, self.max
        )
    }
}

/// Event log
/// Gantree: History // 이력
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    hamiltonians: Vec<HamiltonianRecord>,
    expectations: Vec<ExpectationRecord>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Logging
    // ========================================================================

    /// Record a Hamiltonian snapshot
    /// Gantree: log_hamiltonian(h,metadata) // 해밀토니안 기록
    pub fn log_hamiltonian(&mut self, hamiltonian: &Hamiltonian, metadata: Value) {
        self.hamiltonians.push(HamiltonianRecord {
            timestamp: Utc::now(),
            n_qubits: hamiltonian.n_qubits(),
            n_terms: hamiltonian.num_terms(),
            terms: hamiltonian.terms(),
            metadata,
        });
    }

    /// Compute ⟨ψ|H|ψ⟩, record it and return it
    /// Gantree: log_expectation_value(h,state,label,metadata) -> Result<f64> // 기대값 기록
    pub fn log_expectation_value(
        &mut self,
        hamiltonian: &mut Hamiltonian,
        state: &StateVector,
        label: &str,
        metadata: Value,
    ) -> PandoraResult<f64> {
        let expectation = hamiltonian.compute_expectation(state)?;
        self.expectations.push(ExpectationRecord {
            timestamp: Utc::now(),
            label: label.to_string(),
            expectation,
            state_norm: state::norm(state),
            metadata,
        });
        Ok(expectation)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Hamiltonian snapshots, oldest first
    pub fn hamiltonians(&self) -> &[HamiltonianRecord] {
        &self.hamiltonians
    }

    /// Expectation records, oldest first
    pub fn expectations(&self) -> &[ExpectationRecord] {
        &self.expectations
    }

    /// Number of expectation measurements logged
    pub fn total_measurements(&self) -> usize {
        self.expectations.len()
    }

    /// Statistics over every logged expectation value
    /// Gantree: expectation_statistics() -> Option<Stats> // 통계
    pub fn expectation_statistics(&self) -> Option<ExpectationStats> {
        let values: Vec<f64> = self.expectations.iter().map(|r| r.expectation).collect();
        ExpectationStats::from_values(&values)
    }

    /// Full export
    pub fn to_json(&self) -> PandoraResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.hamiltonians.clear();
        self.expectations.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pandora_core::state::from_real;
    use serde_json::json;

    fn z_field() -> Hamiltonian {
        let mut h = Hamiltonian::new(1).unwrap();
        h.add_term(1.0, "Z").unwrap();
        h
    }

    #[test]
    fn test_empty_statistics() {
        let history = History::new();
        assert!(history.expectation_statistics().is_none());
        assert_eq!(history.total_measurements(), 0);
    }

    #[test]
    fn test_log_expectation() {
        let mut history = History::new();
        let mut h = z_field();
        let e = history
            .log_expectation_value(&mut h, &from_real(&[0.0, 1.0]), "measurement", json!({}))
            .unwrap();
        assert_relative_eq!(e, -1.0);

        let record = &history.expectations()[0];
        assert_eq!(record.label, "measurement");
        assert_relative_eq!(record.state_norm, 1.0);
        assert_eq!(history.total_measurements(), 1);
    }

    #[test]
    fn test_log_expectation_dimension_error_not_recorded() {
        let mut history = History::new();
        let mut h = z_field();
        let bad = from_real(&[1.0, 0.0, 0.0, 0.0]);
        assert!(history
            .log_expectation_value(&mut h, &bad, "measurement", Value::Null)
            .is_err());
        assert_eq!(history.total_measurements(), 0);
    }

    #[test]
    fn test_statistics() {
        let stats = ExpectationStats::from_values(&[1.0, -1.0, 1.0, -1.0]).unwrap();
        assert_relative_eq!(stats.mean, 0.0);
        assert_relative_eq!(stats.std, 1.0);
        assert_relative_eq!(stats.min, -1.0);
        assert_relative_eq!(stats.max, 1.0);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn test_log_hamiltonian_snapshot() {
        let mut history = History::new();
        let mut h = z_field();
        history.log_hamiltonian(&h, json!({"iteration": 0}));
        h.set_coefficient(0, 5.0).unwrap();

        let record = &history.hamiltonians()[0];
        assert_eq!(record.n_terms, 1);
        assert_relative_eq!(record.terms[0].coefficient, 1.0);
        assert_eq!(record.metadata["iteration"], 0);
    }

    #[test]
    fn test_to_json() {
        let mut history = History::new();
        let mut h = z_field();
        history.log_hamiltonian(&h, Value::Null);
        history
            .log_expectation_value(&mut h, &from_real(&[1.0, 0.0]), "learned", json!({"target": 0.5}))
            .unwrap();
        let json = history.to_json().unwrap();
        assert!(json.contains("\"label\": \"learned\""));
        assert!(json.contains("\"Z\""));

        history.clear();
        assert!(history.hamiltonians().is_empty());
    }
}
