//! Domain primitive types used across the stackdock workspace.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a service builder, used to tag errors and log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// One-time setup hook before any document mutation.
    Init,
    /// Folding the service's requested overrides into the working document.
    Compile,
    /// Running the service's local conflict checks.
    Issues,
    /// Injecting catalog defaults for omitted build options.
    Assume,
    /// Emitting zip entries and pre/post build script fragments.
    Build,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Compile => write!(f, "compile"),
            Self::Issues => write!(f, "issues"),
            Self::Assume => write!(f, "assume"),
            Self::Build => write!(f, "build"),
        }
    }
}

/// Category of a detected conflict or missing requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Two services claim the same host-side port.
    PortConflict,
    /// Incompatible network modes across the selection.
    NetworkConflict,
    /// A declared companion service is absent from the selection.
    MissingDependency,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortConflict => write!(f, "port conflict"),
            Self::NetworkConflict => write!(f, "network conflict"),
            Self::MissingDependency => write!(f, "missing dependency"),
        }
    }
}

/// A structured, non-fatal finding produced by a conflict checker.
///
/// Issues are data, not errors: they accumulate across the whole pipeline run
/// and never short-circuit compilation of the remaining services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Component that produced the finding (usually a service name or checker).
    pub component: String,
    /// Category of the finding.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Services involved in the finding.
    pub affected_services: Vec<String>,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.component, self.message)
    }
}

/// A unit of shell logic tagged with its owning service.
///
/// Fragments live in either the pre-build or post-build ordered list.
/// Insertion order across services is preserved; fragments are never
/// reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFragment {
    /// Service that contributed the fragment.
    pub service: String,
    /// Human-readable comment emitted above the code.
    pub comment: String,
    /// Shell code of the fragment.
    pub code: String,
}

impl ScriptFragment {
    /// Creates a fragment owned by `service`.
    #[must_use]
    pub fn new(
        service: impl Into<String>,
        comment: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            comment: comment.into(),
            code: code.into(),
        }
    }
}

/// A source-path-to-destination-path mapping for final artifact packaging.
///
/// Created once during a service's build phase, never mutated, consumed only
/// by the external packager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipEntry {
    /// Local filesystem path of the file to package.
    pub full_path: PathBuf,
    /// Destination path inside the packaged artifact.
    pub zip_name: String,
}

impl ZipEntry {
    /// Creates a packaging entry.
    #[must_use]
    pub fn new(full_path: impl Into<PathBuf>, zip_name: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            zip_name: zip_name.into(),
        }
    }
}
