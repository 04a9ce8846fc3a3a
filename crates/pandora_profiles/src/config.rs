//! Profile manager configuration
//!
//! Gantree: L3_Manager → ManagerConfig

use crate::kind::ProfileKind;
use pandora_core::constants::limits;
use pandora_core::{PandoraError, PandoraResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Manager configuration
/// Gantree: ManagerConfig // 매니저 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Qubit count shared by every managed profile
    pub n_qubits: usize,

    /// Profile active after construction
    pub default_profile: ProfileKind,

    /// Qubit ceiling for dense matrices
    pub max_qubits: usize,

    /// Default `copy_state` for [`crate::ProfileManager::switch_default`]
    pub copy_state_on_switch: bool,

    /// Report switches at info level instead of debug
    pub verbose: bool,
}

impl ManagerConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Default configuration for `n_qubits`
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            ..Self::default()
        }
    }

    /// Small configuration for quick experiments (3 qubits)
    pub fn small() -> Self {
        Self::new(3)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set qubit count
    pub fn with_qubits(mut self, n: usize) -> Self {
        self.n_qubits = n;
        self
    }

    /// Set initial profile
    pub fn with_default_profile(mut self, kind: ProfileKind) -> Self {
        self.default_profile = kind;
        self
    }

    /// Set qubit ceiling
    pub fn with_max_qubits(mut self, max: usize) -> Self {
        self.max_qubits = max;
        self
    }

    /// Set state carry-over for default switches
    pub fn with_copy_state(mut self, copy: bool) -> Self {
        self.copy_state_on_switch = copy;
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> PandoraResult<()> {
        if self.n_qubits == 0 {
            return Err(PandoraError::InvalidConfig("n_qubits must be >= 1".to_string()));
        }
        if self.max_qubits == 0 {
            return Err(PandoraError::InvalidConfig("max_qubits must be >= 1".to_string()));
        }
        if self.max_qubits > limits::MAX_SUPPORTED_QUBITS {
            return Err(PandoraError::InvalidConfig(format!(
                "max_qubits ({}) exceeds the supported ceiling of {}",
                self.max_qubits,
                limits::MAX_SUPPORTED_QUBITS
            )));
        }
        if self.n_qubits > self.max_qubits {
            return Err(PandoraError::InvalidConfig(format!(
                "n_qubits ({}) exceeds max_qubits ({})",
                self.n_qubits, self.max_qubits
            )));
        }
        Ok(())
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            n_qubits: limits::DEFAULT_QUBITS,
            default_profile: ProfileKind::Alternative,
            max_qubits: limits::DEFAULT_MAX_QUBITS,
            copy_state_on_switch: true,
            verbose: false,
        }
    }
}

impl fmt::Display for ManagerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ManagerConfig({}Q, default={}, max={}Q, copy_state={})",
            self.n_qubits, self.default_profile, self.max_qubits, self.copy_state_on_switch
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
