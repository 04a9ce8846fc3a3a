//! Profile manager
//!
//! Gantree: L3_Manager → ProfileManager
//!
//! Owns one active profile plus any profiles initialized earlier. Profiles
//! are built on first use and kept for the manager's lifetime; switching
//! can carry the active state over to the target.

use crate::config::ManagerConfig;
use crate::kind::ProfileKind;
use crate::profile::Profile;
use pandora_core::state::StateVector;
use pandora_core::{Hamiltonian, PandoraResult};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Summary
// ============================================================================

/// Snapshot of manager status
/// Gantree: ManagerSummary // 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerSummary {
    /// Active profile name
    pub active_profile: String,
    /// Qubit count
    pub n_qubits: usize,
    /// Every selectable profile name
    pub available_profiles: Vec<String>,
    /// Profiles built so far
    pub initialized_profiles: Vec<String>,
    /// Term count of the active Hamiltonian
    pub hamiltonian_terms: usize,
    /// Energy of the active state
    pub current_energy: f64,
}

impl ManagerSummary {
    /// Pretty JSON
    pub fn to_json(&self) -> PandoraResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ManagerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Active profile: {}", self.active_profile)?;
        writeln!(f, "Qubits: {}", self.n_qubits)?;
        writeln!(f, "Initialized: {}", self.initialized_profiles.join(", "))?;
        writeln!(f, "Hamiltonian terms: {}", self.hamiltonian_terms)?;
        write!(f, "Current energy: {:.6}", self.current_energy)
    }
}

// ============================================================================
// Manager
// ============================================================================

/// Switches between profiles sharing one qubit count
/// Gantree: ProfileManager // 프로파일 매니저
#[derive(Debug, Clone)]
pub struct ProfileManager {
    config: ManagerConfig,
    active: Profile,
    parked: BTreeMap<ProfileKind, Profile>,
}

impl ProfileManager {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a manager with `default_kind` active
    /// Gantree: new(kind,n) -> Result<Self> // 생성자
    pub fn new(default_kind: ProfileKind, n_qubits: usize) -> PandoraResult<Self> {
        Self::from_config(ManagerConfig::new(n_qubits).with_default_profile(default_kind))
    }

    /// Create a manager from a profile name such as "hive"
    pub fn with_name(default_profile: &str, n_qubits: usize) -> PandoraResult<Self> {
        Self::new(default_profile.parse()?, n_qubits)
    }

    /// Create from configuration
    pub fn from_config(config: ManagerConfig) -> PandoraResult<Self> {
        config.validate()?;
        let active =
            Profile::with_qubit_limit(config.default_profile, config.n_qubits, config.max_qubits)?;
        Ok(Self {
            config,
            active,
            parked: BTreeMap::new(),
        })
    }

    // ========================================================================
    // Switching
    // ========================================================================

    /// Switch by name, building the target on first use
    /// Gantree: switch_profile(name,copy_state) -> Result // 프로파일 전환
    pub fn switch_profile(&mut self, name: &str, copy_state: bool) -> PandoraResult<()> {
        let kind: ProfileKind = name.parse()?;
        self.switch_to(kind, copy_state)
    }

    /// Switch by name using the configured `copy_state_on_switch`
    pub fn switch_default(&mut self, name: &str) -> PandoraResult<()> {
        self.switch_profile(name, self.config.copy_state_on_switch)
    }

    /// Switch to `kind`. With `copy_state` the current state is written into
    /// the target; otherwise the target keeps whatever state it had.
    pub fn switch_to(&mut self, kind: ProfileKind, copy_state: bool) -> PandoraResult<()> {
        let from = self.active.kind();
        if kind == from {
            return Ok(());
        }

        let carried = copy_state.then(|| self.active.state());
        let mut target = match self.parked.remove(&kind) {
            Some(profile) => profile,
            None => self.build(kind)?,
        };
        if let Some(state) = carried {
            if let Err(e) = target.set_state(&state) {
                self.parked.insert(kind, target);
                return Err(e);
            }
        }

        let previous = std::mem::replace(&mut self.active, target);
        self.parked.insert(previous.kind(), previous);

        if self.config.verbose {
            log::info!("Switched profile {} -> {} (copy_state={})", from, kind, copy_state);
        } else {
            log::debug!("Switched profile {} -> {} (copy_state={})", from, kind, copy_state);
        }
        Ok(())
    }

    fn build(&self, kind: ProfileKind) -> PandoraResult<Profile> {
        Profile::with_qubit_limit(kind, self.config.n_qubits, self.config.max_qubits)
    }

    // ========================================================================
    // Profile Access
    // ========================================================================

    /// Active profile
    pub fn active(&self) -> &Profile {
        &self.active
    }

    /// Active profile, mutable
    pub fn active_mut(&mut self) -> &mut Profile {
        &mut self.active
    }

    /// Profile of `kind`, building it if needed. Does not change the active kind.
    pub fn profile(&mut self, kind: ProfileKind) -> PandoraResult<&mut Profile> {
        if kind == self.active.kind() {
            return Ok(&mut self.active);
        }
        let (n, max) = (self.config.n_qubits, self.config.max_qubits);
        match self.parked.entry(kind) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => Ok(v.insert(Profile::with_qubit_limit(kind, n, max)?)),
        }
    }

    /// Profile by name, building it if needed
    pub fn profile_by_name(&mut self, name: &str) -> PandoraResult<&mut Profile> {
        self.profile(name.parse()?)
    }

    // ========================================================================
    // Pass-through (active profile)
    // ========================================================================

    /// Add a term to the active Hamiltonian
    pub fn add_term(&mut self, coefficient: f64, pauli_string: &str) -> PandoraResult<()> {
        self.active.add_term(coefficient, pauli_string)
    }

    /// Energy under the active Hamiltonian
    pub fn compute_energy(&mut self, state: Option<&StateVector>) -> PandoraResult<f64> {
        self.active.compute_energy(state)
    }

    /// Active Hamiltonian
    pub fn hamiltonian(&self) -> &Hamiltonian {
        self.active.hamiltonian()
    }

    /// Active Hamiltonian, mutable
    pub fn hamiltonian_mut(&mut self) -> &mut Hamiltonian {
        self.active.hamiltonian_mut()
    }

    /// Time evolution under the active Hamiltonian
    pub fn time_evolution(
        &mut self,
        time: f64,
        state: Option<&StateVector>,
    ) -> PandoraResult<StateVector> {
        self.active.time_evolution(time, state)
    }

    /// Copy of the active state
    pub fn state(&self) -> StateVector {
        self.active.state()
    }

    /// Replace the active state
    pub fn set_state(&mut self, state: &StateVector) -> PandoraResult<()> {
        self.active.set_state(state)
    }

    /// Ground state of the active Hamiltonian
    pub fn ground_state(&mut self) -> PandoraResult<(f64, StateVector)> {
        self.active.ground_state()
    }

    // ========================================================================
    // Comparison & Reporting
    // ========================================================================

    /// Energy of one state under every profile. Uses the active state when
    /// `state` is `None`; neither the active kind nor any state changes.
    /// Gantree: compare_profiles(state?) -> Result<Map> // 프로파일 비교
    pub fn compare_profiles(
        &mut self,
        state: Option<&StateVector>,
    ) -> PandoraResult<BTreeMap<ProfileKind, f64>> {
        let reference = match state {
            Some(s) => s.clone(),
            None => self.active.state(),
        };
        let mut energies = BTreeMap::new();
        for kind in ProfileKind::ALL {
            let energy = self.profile(kind)?.compute_energy(Some(&reference))?;
            energies.insert(kind, energy);
        }
        Ok(energies)
    }

    /// Status snapshot
    /// Gantree: summary() -> Result<ManagerSummary> // 요약
    pub fn summary(&mut self) -> PandoraResult<ManagerSummary> {
        Ok(ManagerSummary {
            active_profile: self.active_profile_name().to_string(),
            n_qubits: self.config.n_qubits,
            available_profiles: ProfileKind::valid_names(),
            initialized_profiles: self
                .initialized_profiles()
                .iter()
                .map(|k| k.name().to_string())
                .collect(),
            hamiltonian_terms: self.active.hamiltonian().num_terms(),
            current_energy: self.active.compute_energy(None)?,
        })
    }

    /// All selectable profile names
    pub fn list_profiles(&self) -> Vec<&'static str> {
        ProfileKind::ALL.iter().map(|k| k.name()).collect()
    }

    /// Kinds built so far, in canonical order
    pub fn initialized_profiles(&self) -> Vec<ProfileKind> {
        let mut kinds: Vec<ProfileKind> = self.parked.keys().copied().collect();
        kinds.push(self.active.kind());
        kinds.sort();
        kinds
    }

    /// Active profile name
    pub fn active_profile_name(&self) -> &'static str {
        self.active.name()
    }

    /// Active profile kind
    pub fn active_kind(&self) -> ProfileKind {
        self.active.kind()
    }

    /// Shared qubit count
    pub fn n_qubits(&self) -> usize {
        self.config.n_qubits
    }

    /// Configuration
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }
}

impl fmt::Display for ProfileManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProfileManager({} qubits, active={}, initialized={})",
            self.config.n_qubits,
            self.active.kind(),
            self.parked.len() + 1
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
