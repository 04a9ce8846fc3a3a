//! Profile manager with an attached optimizer
//!
//! Gantree: L4_Learn → LearningSession
//!
//! Pairs a [`ProfileManager`] with one [`HamiltonianOptimizer`]. The
//! optimizer is attached to the active profile at construction and again
//! after every switch, and its activity is reported next to the manager's.

use crate::config::OptimizerConfig;
use crate::optimizer::{HamiltonianOptimizer, LearnSummary, OptimizationResult};
use pandora_core::state::StateVector;
use pandora_core::PandoraResult;
use pandora_profiles::{ManagerConfig, ManagerSummary, Profile, ProfileKind, ProfileManager};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Summary
// ============================================================================

/// Manager status plus optimizer activity
/// Gantree: SessionSummary // 세션 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Manager snapshot
    pub manager: ManagerSummary,
    /// Optimizer snapshot
    pub learning: LearnSummary,
}

impl SessionSummary {
    /// Pretty JSON
    pub fn to_json(&self) -> PandoraResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.manager)?;
        write!(
            f,
            "Learning: {} measurements, {} training iterations",
            self.learning.total_measurements, self.learning.training_iterations
        )
    }
}

// ============================================================================
// Session
// ============================================================================

/// Profile manager whose optimizer always follows the active profile
/// Gantree: LearningSession // 학습 세션
#[derive(Debug)]
pub struct LearningSession {
    manager: ProfileManager,
    optimizer: HamiltonianOptimizer,
}

impl LearningSession {
    /// Pair a manager and optimizer, attaching the active profile
    /// Gantree: new(manager,optimizer) -> Self // 생성자
    pub fn new(manager: ProfileManager, mut optimizer: HamiltonianOptimizer) -> Self {
        optimizer.attach_profile(manager.active());
        Self { manager, optimizer }
    }

    /// Build both halves from configuration
    pub fn from_configs(
        manager: ManagerConfig,
        optimizer: OptimizerConfig,
    ) -> PandoraResult<Self> {
        Ok(Self::new(
            ProfileManager::from_config(manager)?,
            HamiltonianOptimizer::new(optimizer)?,
        ))
    }

    // ========================================================================
    // Switching
    // ========================================================================

    /// Switch by name and re-attach the optimizer
    /// Gantree: switch_profile(name,copy_state) -> Result // 전환 + 재연결
    pub fn switch_profile(&mut self, name: &str, copy_state: bool) -> PandoraResult<()> {
        self.manager.switch_profile(name, copy_state)?;
        self.optimizer.attach_profile(self.manager.active());
        Ok(())
    }

    /// Switch by name using the manager's `copy_state_on_switch`
    pub fn switch_default(&mut self, name: &str) -> PandoraResult<()> {
        self.manager.switch_default(name)?;
        self.optimizer.attach_profile(self.manager.active());
        Ok(())
    }

    /// Switch by kind and re-attach the optimizer
    pub fn switch_to(&mut self, kind: ProfileKind, copy_state: bool) -> PandoraResult<()> {
        self.manager.switch_to(kind, copy_state)?;
        self.optimizer.attach_profile(self.manager.active());
        Ok(())
    }

    // ========================================================================
    // Learning
    // ========================================================================

    /// Fit the active profile's Hamiltonian against its own state
    pub fn optimize_active(&mut self, target_energy: f64) -> PandoraResult<OptimizationResult> {
        self.optimizer
            .optimize_profile(self.manager.active_mut(), target_energy)
    }

    /// Record ⟨ψ|H|ψ⟩ of the active profile
    pub fn log_active_expectation(&mut self, label: &str, metadata: Value) -> PandoraResult<f64> {
        let profile = self.manager.active_mut();
        let state = profile.state();
        self.optimizer
            .log_expectation_value(profile.hamiltonian_mut(), &state, label, metadata)
    }

    /// Energy of one state under every profile
    pub fn compare_profiles(
        &mut self,
        state: Option<&StateVector>,
    ) -> PandoraResult<BTreeMap<ProfileKind, f64>> {
        self.manager.compare_profiles(state)
    }

    /// Manager and optimizer snapshot
    /// Gantree: summary() -> Result<SessionSummary> // 요약
    pub fn summary(&mut self) -> PandoraResult<SessionSummary> {
        Ok(SessionSummary {
            manager: self.manager.summary()?,
            learning: self.optimizer.summary(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Profile manager
    pub fn manager(&self) -> &ProfileManager {
        &self.manager
    }

    /// Active profile
    pub fn active(&self) -> &Profile {
        self.manager.active()
    }

    /// Active profile, mutable
    pub fn active_mut(&mut self) -> &mut Profile {
        self.manager.active_mut()
    }

    /// Attached optimizer
    pub fn optimizer(&self) -> &HamiltonianOptimizer {
        &self.optimizer
    }

    /// Attached optimizer, mutable
    pub fn optimizer_mut(&mut self) -> &mut HamiltonianOptimizer {
        &mut self.optimizer
    }

    /// Split back into manager and optimizer
    pub fn into_parts(self) -> (ProfileManager, HamiltonianOptimizer) {
        (self.manager, self.optimizer)
    }
}

impl fmt::Display for LearningSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LearningSession({}; {})", self.manager, self.optimizer)
    }
}

// ============================================================================
// Tests
// ============================================================================
