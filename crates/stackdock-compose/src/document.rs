//! The working document: the in-progress composed deployment descriptor.
//!
//! One `ComposeDocument` is shared across every phase of a pipeline run and
//! mutated in place, one service block at a time. `BTreeMap` keys keep
//! iteration deterministic, and with it the conflict-report order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stackdock_common::error::{Result, StackdockError};

/// A host-to-container port mapping, serialized in the compose
/// `"host:container"` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortMapping {
    /// Host-side port.
    pub host: u16,
    /// Container-side port.
    pub container: u16,
}

impl PortMapping {
    /// Creates a mapping from host port to container port.
    #[must_use]
    pub const fn new(host: u16, container: u16) -> Self {
        Self { host, container }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

impl FromStr for PortMapping {
    type Err = StackdockError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.parse::<u16>().map_err(|_| StackdockError::Config {
                message: format!("invalid port mapping: {s}"),
            })
        };
        match s.split_once(':') {
            Some((host, container)) => Ok(Self {
                host: parse(host)?,
                container: parse(container)?,
            }),
            // A bare port maps the same number on both sides.
            None => {
                let port = parse(s)?;
                Ok(Self {
                    host: port,
                    container: port,
                })
            }
        }
    }
}

impl Serialize for PortMapping {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PortMapping {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Logging configuration for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingBlock {
    /// Logging driver name.
    pub driver: String,
    /// Driver-specific options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub options: BTreeMap<String, String>,
}

impl Default for LoggingBlock {
    /// The json-file driver with bounded rotation, the composer's standard
    /// logging block.
    fn default() -> Self {
        let mut options = BTreeMap::new();
        let _ = options.insert("max-size".into(), "10m".into());
        let _ = options.insert("max-file".into(), "3".into());
        Self {
            driver: "json-file".into(),
            options,
        }
    }
}

/// A user-defined network declared at the top level of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDef {
    /// Network driver.
    pub driver: String,
}

impl Default for NetworkDef {
    fn default() -> Self {
        Self {
            driver: "bridge".into(),
        }
    }
}

/// Per-service configuration block inside the working document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceBlock {
    /// Container image reference (`repository:tag`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Explicit container name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    /// Restart policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    /// Published port mappings.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ports: Vec<PortMapping>,
    /// Environment variables.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub environment: BTreeMap<String, String>,
    /// Bind-mount volume specs (`host:container` form).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub volumes: Vec<String>,
    /// Network mode (`"host"` or `"none"`); exclusive with `networks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// Named user-defined networks the service attaches to.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub networks: Vec<String>,
    /// Logging configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingBlock>,
    /// Services this one starts after.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub depends_on: Vec<String>,
}

/// The in-progress composed deployment descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeDocument {
    /// Compose schema version.
    pub version: String,
    /// Service name to configuration block.
    pub services: BTreeMap<String, ServiceBlock>,
    /// Top-level user-defined networks.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub networks: BTreeMap<String, NetworkDef>,
}

impl ComposeDocument {
    /// Creates an empty document with the default compose schema version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: stackdock_common::constants::COMPOSE_VERSION.into(),
            services: BTreeMap::new(),
            networks: BTreeMap::new(),
        }
    }

    /// Registers a user-defined network if it is not already declared.
    pub fn ensure_network(&mut self, name: impl Into<String>) {
        let _ = self
            .networks
            .entry(name.into())
            .or_insert_with(NetworkDef::default);
    }
}

impl Default for ComposeDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_mapping_parses_pair() {
        let mapping: PortMapping = "1880:1880".parse().expect("should parse");
        assert_eq!(mapping, PortMapping::new(1880, 1880));
    }

    #[test]
    fn port_mapping_parses_bare_port() {
        let mapping: PortMapping = "8086".parse().expect("should parse");
        assert_eq!(mapping, PortMapping::new(8086, 8086));
    }

    #[test]
    fn port_mapping_rejects_garbage() {
        let result = "http:80".parse::<PortMapping>();
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("invalid port mapping"), "got: {msg}");
    }

    #[test]
    fn port_mapping_serializes_as_string() {
        let json = serde_json::to_string(&PortMapping::new(9090, 80)).expect("serialize");
        assert_eq!(json, "\"9090:80\"");
    }

    #[test]
    fn empty_fields_are_skipped_in_yaml() {
        let mut doc = ComposeDocument::new();
        let _ = doc.services.insert(
            "mosquitto".into(),
            ServiceBlock {
                image: Some("eclipse-mosquitto:latest".into()),
                ..ServiceBlock::default()
            },
        );
        let yaml = serde_yaml::to_string(&doc).expect("serialize");
        assert!(yaml.contains("eclipse-mosquitto"), "got: {yaml}");
        assert!(!yaml.contains("network_mode"), "got: {yaml}");
        assert!(!yaml.contains("networks"), "got: {yaml}");
    }

    #[test]
    fn ensure_network_is_idempotent() {
        let mut doc = ComposeDocument::new();
        doc.ensure_network("iot");
        doc.ensure_network("iot");
        assert_eq!(doc.networks.len(), 1);
        assert_eq!(doc.networks["iot"].driver, "bridge");
    }

    #[test]
    fn default_logging_block_is_bounded_json_file() {
        let logging = LoggingBlock::default();
        assert_eq!(logging.driver, "json-file");
        assert_eq!(logging.options["max-size"], "10m");
    }
}
