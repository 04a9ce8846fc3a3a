//! # Pandora Profiles
//!
//! Five named Hamiltonian profiles over the same dense engine, and a manager
//! that switches between them.
//!
//! ## Gantree Architecture
//!
//! ```text
//! pandora_profiles // L2+L3: Profile + Manager (완료)
//!     L2_Profile // 프로파일 (완료)
//!         ProfileKind // Alternative/Castle/Hive/Empire/Omega (완료)
//!             default_terms(n) - 기본 항 정책
//!         Profile // 해밀토니안 + 상태 (완료)
//!             compute_energy(), time_evolution(), set_state()
//!     L3_Manager // 매니저 (완료)
//!         ManagerConfig // 설정 (완료)
//!         ProfileManager // 전환/비교/요약 (완료)
//!             switch_profile() → compare_profiles() → summary()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pandora_profiles::prelude::*;
//!
//! let mut manager = ProfileManager::new(ProfileKind::Alternative, 3).unwrap();
//! manager.switch_profile("castle", true).unwrap();
//!
//! // |000⟩ under Castle: 3·2.0 + 2·1.5
//! let energy = manager.compute_energy(None).unwrap();
//! assert!((energy - 9.0).abs() < 1e-12);
//!
//! let energies = manager.compare_profiles(None).unwrap();
//! assert_eq!(energies.len(), 5);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use pandora_profiles::prelude::*;
//!
//! let config = ManagerConfig::new(4)
//!     .with_default_profile(ProfileKind::Omega)
//!     .with_copy_state(false);
//!
//! let manager = ProfileManager::from_config(config).unwrap();
//! assert_eq!(manager.active_profile_name(), "omega");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Profile kinds (Gantree: L2_Profile → ProfileKind)
pub mod kind;

/// Profile (Gantree: L2_Profile → Profile)
pub mod profile;

/// Manager configuration (Gantree: L3_Manager → ManagerConfig)
pub mod config;

/// Profile manager (Gantree: L3_Manager → ProfileManager)
pub mod manager;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ManagerConfig;
pub use kind::ProfileKind;
pub use manager::{ManagerSummary, ProfileManager};
pub use profile::Profile;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use pandora_profiles::prelude::*;
    //! ```

    pub use crate::config::ManagerConfig;
    pub use crate::kind::ProfileKind;
    pub use crate::manager::{ManagerSummary, ProfileManager};
    pub use crate::profile::Profile;
    pub use pandora_core::prelude::*;
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::{NAME, VERSION};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_term_counts_6q() {
        let expected = [
            (ProfileKind::Alternative, 6 + 3 + 5),
            (ProfileKind::Castle, 6 + 5 + 3),
            (ProfileKind::Hive, 15 + 6 + 2),
            (ProfileKind::Empire, 8),
            (ProfileKind::Omega, 18 + 15 + 3),
        ];
        for (kind, count) in expected {
            let p = Profile::new(kind, 6).unwrap();
            assert_eq!(p.hamiltonian().num_terms(), count, "{}", kind);
        }
    }

    #[test]
    fn test_ground_state_then_switch_with_copy() {
        let mut manager = ProfileManager::new(ProfileKind::Omega, 3).unwrap();
        let (e0, psi0) = manager.ground_state().unwrap();
        manager.set_state(&psi0).unwrap();
        assert_abs_diff_eq!(manager.compute_energy(None).unwrap(), e0, epsilon = 1e-9);

        manager.switch_profile("empire", true).unwrap();
        let carried = manager.state();
        assert_abs_diff_eq!(fidelity(&carried, &psi0).unwrap(), 1.0, epsilon = 1e-12);

        // Carried state still respects the variational bound under Empire
        let empire_ground = manager.ground_state().unwrap().0;
        assert!(empire_ground <= manager.compute_energy(None).unwrap() + 1e-9);
    }

    #[test]
    fn test_variational_bound_all_profiles_4q() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut manager = ProfileManager::new(ProfileKind::Alternative, 4).unwrap();
        for kind in ProfileKind::ALL {
            manager.switch_to(kind, false).unwrap();
            let ground = manager.ground_state().unwrap().0;
            for _ in 0..5 {
                let s = random_state(4, &mut rng);
                assert!(ground <= manager.compute_energy(Some(&s)).unwrap() + 1e-9);
            }
        }
    }

    #[test]
    fn test_evolve_active_state() {
        let mut manager = ProfileManager::new(ProfileKind::Hive, 2).unwrap();
        let evolved = manager.time_evolution(0.75, None).unwrap();
        assert_eq!(manager.state(), evolved);
        assert_abs_diff_eq!(norm(&evolved), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "pandora_profiles");
    }
}
