//! Global configuration model for a stackdock pipeline run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for one composition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackdockConfig {
    /// Compose schema version for the generated document.
    pub compose_version: String,
    /// Root directory for per-service bind-mount volumes.
    pub volumes_dir: PathBuf,
    /// Directory holding catalog asset files (service config templates).
    pub asset_dir: PathBuf,
    /// Scratch directory handed to build phases.
    pub tmp_dir: PathBuf,
    /// Restart policy applied to services that do not override it.
    pub restart_policy: String,
}

impl Default for StackdockConfig {
    fn default() -> Self {
        Self {
            compose_version: crate::constants::COMPOSE_VERSION.into(),
            volumes_dir: PathBuf::from(crate::constants::VOLUMES_DIR),
            asset_dir: PathBuf::from(crate::constants::TEMPLATE_ASSET_DIR),
            tmp_dir: std::env::temp_dir().join(crate::constants::APP_NAME),
            restart_policy: crate::constants::DEFAULT_RESTART_POLICY.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_constants() {
        let config = StackdockConfig::default();
        assert_eq!(config.compose_version, "3.8");
        assert_eq!(config.restart_policy, "unless-stopped");
        assert!(config.tmp_dir.ends_with("stackdock"));
    }
}
