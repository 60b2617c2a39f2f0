//! Cross-service conflict checkers.
//!
//! Pure functions over the working document: they detect conflicts and return
//! them as [`Issue`] data. A detected conflict is never an error; the
//! pipeline collects every finding and reports once, and the orchestrator
//! decides what aborts a run. The document is never mutated here.

use std::ops::Bound;

use stackdock_common::types::{Issue, IssueKind};

use crate::document::ComposeDocument;

/// Name under which checker findings are reported.
const CHECKER_COMPONENT: &str = "conflict-check";

/// Detects host-port collisions between `service` and services that sort
/// before it in the document.
///
/// Driving this once per compiled service yields exactly one Issue per
/// colliding pair, referencing both service names, regardless of the order in
/// which the services compiled.
#[must_use]
pub fn port_conflicts(doc: &ComposeDocument, service: &str) -> Vec<Issue> {
    let Some(block) = doc.services.get(service) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for (other_name, other_block) in doc
        .services
        .range::<str, _>((Bound::Unbounded, Bound::Excluded(service))) {
        for port in &block.ports {
            if other_block.ports.iter().any(|p| p.host == port.host) {
                issues.push(Issue {
                    component: CHECKER_COMPONENT.into(),
                    kind: IssueKind::PortConflict,
                    message: format!(
                        "services \"{other_name}\" and \"{service}\" both claim host port {}",
                        port.host
                    ),
                    affected_services: vec![other_name.clone(), service.to_string()],
                });
            }
        }
    }
    issues
}

/// Detects services claiming exclusive host networking.
///
/// Returns at most one summary Issue naming every host-mode service. The
/// single-finding shape (unlike the pair enumeration of the port checker) is
/// intentional and load-bearing for reported-issue counts.
#[must_use]
pub fn network_conflicts(doc: &ComposeDocument) -> Vec<Issue> {
    let host_services: Vec<String> = doc
        .services
        .iter()
        .filter(|(_, block)| block.network_mode.as_deref() == Some("host"))
        .map(|(name, _)| name.clone())
        .collect();

    if host_services.len() < 2 {
        return Vec::new();
    }

    vec![Issue {
        component: CHECKER_COMPONENT.into(),
        kind: IssueKind::NetworkConflict,
        message: format!(
            "multiple services claim exclusive host networking: {}",
            host_services.join(", ")
        ),
        affected_services: host_services,
    }]
}

/// Verifies that every declared companion of `service` is in the selection.
///
/// Returns one Issue per missing companion, naming it.
#[must_use]
pub fn missing_dependencies(service: &str, required: &[&str], selection: &[String]) -> Vec<Issue> {
    required
        .iter()
        .filter(|companion| !selection.iter().any(|s| s == *companion))
        .map(|companion| Issue {
            component: service.to_string(),
            kind: IssueKind::MissingDependency,
            message: format!(
                "service \"{service}\" requires \"{companion}\", which is not selected"
            ),
            affected_services: vec![service.to_string(), (*companion).to_string()],
        })
        .collect()
}
