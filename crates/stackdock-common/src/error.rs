//! Unified error types for the stackdock workspace.
//!
//! Detected conflicts (ports, networks, dependencies) are never errors; they
//! are [`Issue`](crate::types::Issue) values returned from a successful checker
//! run. The variants here cover faults: a phase whose own logic failed, bad
//! input, or a missing catalog entry.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Phase;

/// Snapshot of the inputs to a failed phase call, captured for diagnosis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    /// JSON capture of the working document at the time of the fault.
    pub document: serde_json::Value,
    /// JSON capture of the build options passed to the phase.
    pub options: serde_json::Value,
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StackdockError {
    /// The compile phase itself faulted while merging a service's options.
    #[error("compile failed for service \"{service}\": {message}")]
    Compile {
        /// Service whose compile phase faulted.
        service: String,
        /// Description of the fault.
        message: String,
        /// Inputs to the failed call.
        snapshot: Box<PhaseSnapshot>,
    },

    /// The issues checker itself faulted (distinct from a detected conflict).
    #[error("validation failed for service \"{service}\": {message}")]
    Validation {
        /// Service whose checker faulted.
        service: String,
        /// Description of the fault.
        message: String,
        /// Inputs to the failed call.
        snapshot: Box<PhaseSnapshot>,
    },

    /// The build phase faulted while resolving assets or assembling scripts.
    #[error("build failed for service \"{service}\": {message}")]
    Build {
        /// Service whose build phase faulted.
        service: String,
        /// Description of the fault.
        message: String,
        /// Inputs to the failed call.
        snapshot: Box<PhaseSnapshot>,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl StackdockError {
    /// Wraps an arbitrary fault as a phase error for `service` with its input
    /// snapshot attached.
    #[must_use]
    pub fn phase_fault(
        phase: Phase,
        service: impl Into<String>,
        message: impl Into<String>,
        snapshot: PhaseSnapshot,
    ) -> Self {
        let service = service.into();
        let message = message.into();
        let snapshot = Box::new(snapshot);
        match phase {
            Phase::Issues => Self::Validation {
                service,
                message,
                snapshot,
            },
            Phase::Build => Self::Build {
                service,
                message,
                snapshot,
            },
            // Init and assume faults surface through the compile they guard.
            Phase::Init | Phase::Compile | Phase::Assume => Self::Compile {
                service,
                message,
                snapshot,
            },
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StackdockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_service() {
        let err = StackdockError::Compile {
            service: "mosquitto".into(),
            message: "bad port remap".into(),
            snapshot: Box::default(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mosquitto"), "got: {msg}");
        assert!(msg.contains("compile failed"), "got: {msg}");
    }

    #[test]
    fn phase_fault_maps_issues_to_validation() {
        let err = StackdockError::phase_fault(
            Phase::Issues,
            "grafana",
            "checker crashed",
            PhaseSnapshot::default(),
        );
        assert!(matches!(err, StackdockError::Validation { .. }));
    }

    #[test]
    fn phase_fault_maps_build_to_build() {
        let err = StackdockError::phase_fault(
            Phase::Build,
            "grafana",
            "missing asset",
            PhaseSnapshot::default(),
        );
        assert!(matches!(err, StackdockError::Build { .. }));
    }

    #[test]
    fn not_found_formats_kind_and_id() {
        let err = StackdockError::NotFound {
            kind: "service template",
            id: "ghost".into(),
        };
        assert_eq!(err.to_string(), "service template not found: ghost");
    }
}
