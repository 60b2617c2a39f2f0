//! Build options and the static option descriptor.
//!
//! `BuildOptions` carries the user's per-service choices and is read-only
//! input to compile; the assume phase may fill omitted fields from catalog
//! defaults. `OptionDescriptor` is the service's static declaration of which
//! configuration dimensions are legal at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::PortMapping;

/// An overridable environment key with its catalog default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvOption {
    /// Environment variable name.
    pub key: String,
    /// Default value applied when the user supplies none.
    pub default: String,
}

impl EnvOption {
    /// Creates an overridable environment option.
    #[must_use]
    pub fn new(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: default.into(),
        }
    }
}

/// Static per-service declaration of the legal configuration surface.
///
/// Merge operations consult this before applying anything: a dimension the
/// descriptor marks unsupported is never written into the service's block,
/// no matter what the build options request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Default port mappings with a protocol label per mapping.
    pub labeled_ports: BTreeMap<PortMapping, String>,
    /// Environment keys the user may override, with defaults.
    pub modifyable_environment: Vec<EnvOption>,
    /// Whether the service participates in volume configuration.
    pub volumes: bool,
    /// Whether the service participates in network configuration.
    pub networks: bool,
    /// Whether the service supports the logging toggle.
    pub logging: bool,
    /// Allowed image tags; the first entry is the catalog default.
    pub image_tags: Vec<String>,
}

impl OptionDescriptor {
    /// Returns whether `container` is a declared container-side port.
    #[must_use]
    pub fn declares_container_port(&self, container: u16) -> bool {
        self.labeled_ports.keys().any(|p| p.container == container)
    }

    /// Returns whether `key` is an overridable environment variable.
    #[must_use]
    pub fn declares_env_key(&self, key: &str) -> bool {
        self.modifyable_environment.iter().any(|e| e.key == key)
    }
}

/// The user's per-service choices, supplied once per service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Requested port remaps (new host port per declared container port).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ports: Vec<PortMapping>,
    /// Requested environment overrides.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub environment: BTreeMap<String, String>,
    /// Selected image tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
    /// Requested network mode (`"host"` or `"none"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// Named networks to attach to.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub networks: Vec<String>,
    /// Logging toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(1883, 1883), "mqtt".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "2.0".into()],
        }
    }

    #[test]
    fn declares_container_port_matches_declared() {
        let desc = descriptor();
        assert!(desc.declares_container_port(1883));
        assert!(!desc.declares_container_port(9090));
    }

    #[test]
    fn declares_env_key_matches_declared() {
        let desc = descriptor();
        assert!(desc.declares_env_key("TZ"));
        assert!(!desc.declares_env_key("PASSWORD"));
    }

    #[test]
    fn default_options_are_empty() {
        let options = BuildOptions::default();
        assert!(options.ports.is_empty());
        assert!(options.image_tag.is_none());
        assert!(options.logging.is_none());
    }

    #[test]
    fn options_roundtrip_through_json() {
        let options = BuildOptions {
            ports: vec![PortMapping::new(9001, 1883)],
            image_tag: Some("2.0".into()),
            ..BuildOptions::default()
        };
        let json = serde_json::to_string(&options).expect("serialize");
        let back: BuildOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, options);
    }
}
