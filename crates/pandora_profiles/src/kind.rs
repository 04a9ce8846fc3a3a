//! Profile kinds and their default term policies
//!
//! Gantree: L2_Profile → ProfileKind
//!
//! Each kind is a pure function from a qubit count to an ordered list of
//! Pauli terms. Qubits are 0-indexed, qubit 0 is the left-most factor.

use pandora_core::{Pauli, PandoraError, PandoraResult, PauliString, PauliTerm};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named term-generation policy
/// Gantree: ProfileKind // 프로파일 종류
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Transverse X field, even-site Y field, weak ZZ chain
    #[default]
    Alternative,
    /// Strong Z field with ZZ chain and odd-site X perturbation
    Castle,
    /// All-to-all ZZ with uniform X field
    Hive,
    /// Center-weighted Z with XX couplings decaying from the center
    Empire,
    /// Balanced X/Y/Z fields and Heisenberg chain with three-body XYZ
    Omega,
}

impl ProfileKind {
    /// All kinds in canonical order
    pub const ALL: [ProfileKind; 5] = [
        ProfileKind::Alternative,
        ProfileKind::Castle,
        ProfileKind::Hive,
        ProfileKind::Empire,
        ProfileKind::Omega,
    ];

    /// Lookup name (lowercase)
    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::Alternative => "alternative",
            ProfileKind::Castle => "castle",
            ProfileKind::Hive => "hive",
            ProfileKind::Empire => "empire",
            ProfileKind::Omega => "omega",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::Alternative => "Alternative",
            ProfileKind::Castle => "Castle",
            ProfileKind::Hive => "Hive",
            ProfileKind::Empire => "Empire",
            ProfileKind::Omega => "Omega",
        }
    }

    /// One-line description of the coupling pattern
    pub fn description(&self) -> &'static str {
        match self {
            ProfileKind::Alternative => "X field, even-site Y, nearest-neighbour ZZ",
            ProfileKind::Castle => "strong Z field, ZZ chain, odd-site X",
            ProfileKind::Hive => "all-to-all ZZ, uniform X, every third Y",
            ProfileKind::Empire => "central Z, XX couplings weakening with distance",
            ProfileKind::Omega => "balanced XYZ field, Heisenberg chain, three-body XYZ",
        }
    }

    /// Lookup names of every kind
    pub fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|k| k.name().to_string()).collect()
    }

    // ========================================================================
    // Term Policies
    // ========================================================================

    /// Default terms for `n_qubits`, in insertion order
    /// Gantree: default_terms(n) -> Vec<PauliTerm> // 기본 항 생성
    pub fn default_terms(&self, n_qubits: usize) -> PandoraResult<Vec<PauliTerm>> {
        if n_qubits == 0 {
            return Err(PandoraError::InvalidQubitCount(n_qubits));
        }
        let mut terms = TermList::new(n_qubits);
        match self {
            ProfileKind::Alternative => alternative(&mut terms)?,
            ProfileKind::Castle => castle(&mut terms)?,
            ProfileKind::Hive => hive(&mut terms)?,
            ProfileKind::Empire => empire(&mut terms)?,
            ProfileKind::Omega => omega(&mut terms)?,
        }
        Ok(terms.into_inner())
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ProfileKind {
    type Err = PandoraError;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| PandoraError::UnknownProfile {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

// ============================================================================
// Policy Helpers
// ============================================================================

/// Accumulates terms for one qubit count
struct TermList {
    n: usize,
    terms: Vec<PauliTerm>,
}

impl TermList {
    fn new(n: usize) -> Self {
        Self {
            n,
            terms: Vec::new(),
        }
    }

    fn push(&mut self, coefficient: f64, sites: &[(usize, Pauli)]) -> PandoraResult<()> {
        let ops = PauliString::from_sites(self.n, sites)?;
        self.terms.push(PauliTerm::new(coefficient, ops));
        Ok(())
    }

    fn into_inner(self) -> Vec<PauliTerm> {
        self.terms
    }
}

fn alternative(t: &mut TermList) -> PandoraResult<()> {
    let n = t.n;
    for q in 0..n {
        t.push(1.0, &[(q, Pauli::X)])?;
    }
    for q in (0..n).step_by(2) {
        t.push(0.5, &[(q, Pauli::Y)])?;
    }
    for q in 0..n.saturating_sub(1) {
        t.push(0.2, &[(q, Pauli::Z), (q + 1, Pauli::Z)])?;
    }
    Ok(())
}

fn castle(t: &mut TermList) -> PandoraResult<()> {
    let n = t.n;
    for q in 0..n {
        t.push(2.0, &[(q, Pauli::Z)])?;
    }
    for q in 0..n.saturating_sub(1) {
        t.push(1.5, &[(q, Pauli::Z), (q + 1, Pauli::Z)])?;
    }
    for q in (1..n).step_by(2) {
        t.push(0.3, &[(q, Pauli::X)])?;
    }
    Ok(())
}

fn hive(t: &mut TermList) -> PandoraResult<()> {
    let n = t.n;
    let coupling = 0.5 / n as f64;
    for i in 0..n {
        for j in (i + 1)..n {
            t.push(coupling, &[(i, Pauli::Z), (j, Pauli::Z)])?;
        }
    }
    for q in 0..n {
        t.push(0.8, &[(q, Pauli::X)])?;
    }
    for q in (0..n).step_by(3) {
        t.push(0.3, &[(q, Pauli::Y)])?;
    }
    Ok(())
}

fn empire(t: &mut TermList) -> PandoraResult<()> {
    let n = t.n;
    let center = n / 2;
    t.push(3.0, &[(center, Pauli::Z)])?;

    for d in 1..=(n / 2) {
        let strength = 1.5 / d as f64;
        if d <= center {
            t.push(strength, &[(center - d, Pauli::X), (center, Pauli::X)])?;
        }
        if center + d < n {
            t.push(strength, &[(center, Pauli::X), (center + d, Pauli::X)])?;
        }
    }

    // Peripheral fields; both are added even when 0 == n-1
    t.push(1.0, &[(0, Pauli::Z)])?;
    t.push(1.0, &[(n - 1, Pauli::Z)])?;
    Ok(())
}

fn omega(t: &mut TermList) -> PandoraResult<()> {
    let n = t.n;
    let third = 1.0 / 3.0;
    for q in 0..n {
        for op in Pauli::NON_IDENTITY {
            t.push(third, &[(q, op)])?;
        }
    }
    for q in 0..n.saturating_sub(1) {
        for op in Pauli::NON_IDENTITY {
            t.push(0.7 * third, &[(q, op), (q + 1, op)])?;
        }
    }
    if n >= 3 {
        let positions = [0, (n / 2).saturating_sub(1), n.saturating_sub(3)];
        for pos in positions {
            if pos + 2 < n {
                t.push(
                    0.3,
                    &[(pos, Pauli::X), (pos + 1, Pauli::Y), (pos + 2, Pauli::Z)],
                )?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
