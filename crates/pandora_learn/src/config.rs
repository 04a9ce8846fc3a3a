//! Optimizer and learner configuration
//!
//! Gantree: L4_Learn → OptimizerConfig, LearnerConfig

use pandora_core::constants::optimizer;
use pandora_core::{PandoraError, PandoraResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gradient-descent settings
/// Gantree: OptimizerConfig // 최적화 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Step size for coefficient updates
    pub learning_rate: f64,

    /// Central-difference step
    pub epsilon: f64,

    /// Iteration cap
    pub max_iterations: usize,

    /// Stop when |E − target| falls below this
    pub convergence_threshold: f64,

    /// Snapshot the Hamiltonian every N iterations (0 disables)
    pub log_interval: usize,

    /// Seed for term suggestions
    pub seed: Option<u64>,

    /// Report runs at info level instead of debug
    pub verbose: bool,
}

impl OptimizerConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Quick fits (coarser threshold, fewer iterations)
    pub fn quick() -> Self {
        Self {
            learning_rate: 0.05,
            max_iterations: 30,
            convergence_threshold: 1e-3,
            ..Self::default()
        }
    }

    /// Tight fits
    pub fn precise() -> Self {
        Self {
            max_iterations: 1000,
            convergence_threshold: 1e-8,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set learning rate
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set finite-difference step
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set iteration cap
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Set convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set snapshot interval
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
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
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PandoraError::InvalidConfig(format!(
                "learning_rate must be > 0, got {}",
                self.learning_rate
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(PandoraError::InvalidConfig(format!(
                "epsilon must be > 0, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(PandoraError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if self.convergence_threshold.is_nan() || self.convergence_threshold <= 0.0 {
            return Err(PandoraError::InvalidConfig(format!(
                "convergence_threshold must be > 0, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            learning_rate: optimizer::LEARNING_RATE,
            epsilon: optimizer::EPSILON,
            max_iterations: optimizer::MAX_ITERATIONS,
            convergence_threshold: optimizer::CONVERGENCE_THRESHOLD,
            log_interval: optimizer::LOG_INTERVAL,
            seed: None,
            verbose: false,
        }
    }
}

impl fmt::Display for OptimizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizerConfig(lr={}, max_iter={}, threshold={:.1e})",
            self.learning_rate, self.max_iterations, self.convergence_threshold
        )
    }
}

/// Incremental learner buffering
/// Gantree: LearnerConfig // 학습기 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Samples per training batch
    pub buffer_size: usize,

    /// Train as soon as the buffer fills
    pub train_on_fly: bool,

    /// Full label set, handed to the learner on its first batch
    pub classes: Vec<String>,
}

impl LearnerConfig {
    /// Set buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set on-the-fly training
    pub fn with_train_on_fly(mut self, enabled: bool) -> Self {
        self.train_on_fly = enabled;
        self
    }

    /// Replace the label set
    pub fn with_classes<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> PandoraResult<()> {
        if self.buffer_size == 0 {
            return Err(PandoraError::InvalidConfig(
                "buffer_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            buffer_size: optimizer::LEARNER_BUFFER_SIZE,
            train_on_fly: true,
            classes: vec!["measurement".to_string(), "learned".to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
