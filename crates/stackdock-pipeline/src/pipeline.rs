//! The build pipeline driver.
//!
//! One run composes the selected services into a single working document.
//! Per service, in selection order: init, compile, local issues, optional
//! assume+recompile, build. After every service has compiled, the global
//! conflict checks run over the accumulated document. Detected conflicts
//! accumulate as data and never abort the run; only a faulting phase does.

use std::collections::BTreeMap;
use std::time::Instant;

use stackdock_catalog::TemplateRegistry;
use stackdock_catalog::template::{BuildContext, ServiceTemplate};
use stackdock_common::config::StackdockConfig;
use stackdock_common::error::{PhaseSnapshot, Result, StackdockError};
use stackdock_common::types::{Issue, Phase};
use stackdock_compose::checks;
use stackdock_compose::document::ComposeDocument;
use stackdock_compose::options::BuildOptions;

use crate::artifacts::BuildArtifacts;

/// Drives the four-phase builder lifecycle for a selection of services.
pub struct BuildPipeline<'a> {
    registry: &'a TemplateRegistry,
    config: StackdockConfig,
}

impl<'a> BuildPipeline<'a> {
    /// Creates a pipeline over `registry` with the default configuration.
    #[must_use]
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self::with_config(registry, StackdockConfig::default())
    }

    /// Creates a pipeline with an explicit configuration.
    #[must_use]
    pub const fn with_config(registry: &'a TemplateRegistry, config: StackdockConfig) -> Self {
        Self { registry, config }
    }

    /// Runs the full pipeline for `selection`, in selection order.
    ///
    /// `options` supplies per-service build options; services without an
    /// entry run with defaults (which the assume phase then completes).
    ///
    /// # Errors
    ///
    /// Fails when a selected service is not in the catalog or when any phase
    /// of any service faults. Detected conflicts are returned as issue data
    /// inside the artifacts, never as errors.
    pub fn run(
        &self,
        selection: &[String],
        options: &BTreeMap<String, BuildOptions>,
    ) -> Result<BuildArtifacts> {
        let start = Instant::now();
        tracing::info!(services = selection.len(), "starting composition pipeline");

        // Resolve the whole selection up front so an unknown name fails
        // before any document mutation.
        let templates: Vec<&dyn ServiceTemplate> = selection
            .iter()
            .map(|name| self.registry.require(name))
            .collect::<Result<_>>()?;

        let mut document = ComposeDocument::new();
        document.version.clone_from(&self.config.compose_version);

        let mut issues: Vec<Issue> = Vec::new();
        let mut zip_entries = Vec::new();
        let mut prebuild = Vec::new();
        let mut postbuild = Vec::new();

        for template in &templates {
            let service = template.name();
            let mut service_options = options.get(service).cloned().unwrap_or_default();

            template.init();

            run_compile(*template, &mut document, &service_options, Phase::Compile)?;

            tracing::debug!(service, phase = %Phase::Issues, "running phase");
            let local = template
                .issues(&document, selection)
                .map_err(|fault| phase_fault(Phase::Issues, service, &fault, &document, &service_options))?;
            tracing::debug!(service, found = local.len(), "local checks complete");
            issues.extend(local);

            if template.assume(&mut service_options) {
                tracing::debug!(service, "assumed catalog defaults, recompiling");
                run_compile(*template, &mut document, &service_options, Phase::Assume)?;
            }

            tracing::debug!(service, phase = %Phase::Build, "running phase");
            let mut ctx = BuildContext {
                config: &self.config,
                tmp_path: &self.config.tmp_dir,
                zip_list: &mut zip_entries,
                prebuild: &mut prebuild,
                postbuild: &mut postbuild,
            };
            template
                .build(&mut ctx)
                .map_err(|fault| phase_fault(Phase::Build, service, &fault, &document, &service_options))?;
        }

        // Global conflict pass over the fully compiled document. Driving the
        // pair-scoped port checker once per service reports each colliding
        // pair exactly once; the network checker emits at most one summary.
        for template in &templates {
            issues.extend(checks::port_conflicts(&document, template.name()));
        }
        issues.extend(checks::network_conflicts(&document));

        tracing::info!(
            services = templates.len(),
            issues = issues.len(),
            total_time_ms = start.elapsed().as_millis(),
            "composition complete"
        );

        Ok(BuildArtifacts {
            document,
            issues,
            zip_entries,
            prebuild,
            postbuild,
        })
    }
}

fn run_compile(
    template: &dyn ServiceTemplate,
    document: &mut ComposeDocument,
    options: &BuildOptions,
    phase: Phase,
) -> Result<()> {
    let service = template.name();
    tracing::debug!(service, phase = %phase, "running phase");
    // Snapshot the pre-call state; the failed merge may have partially
    // written the service's own block, but never anyone else's.
    let before = document.clone();
    template.compile(document, options).map_err(|fault| {
        StackdockError::phase_fault(
            phase,
            service,
            fault.to_string(),
            snapshot(&before, options),
        )
    })
}

fn phase_fault(
    phase: Phase,
    service: &str,
    fault: &StackdockError,
    document: &ComposeDocument,
    options: &BuildOptions,
) -> StackdockError {
    tracing::error!(service, phase = %phase, fault = %fault, "phase failed");
    StackdockError::phase_fault(phase, service, fault.to_string(), snapshot(document, options))
}

fn snapshot(document: &ComposeDocument, options: &BuildOptions) -> PhaseSnapshot {
    PhaseSnapshot {
        document: serde_json::to_value(document).unwrap_or(serde_json::Value::Null),
        options: serde_json::to_value(options).unwrap_or(serde_json::Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_service_fails_before_composition() {
        let registry = TemplateRegistry::with_builtins();
        let pipeline = BuildPipeline::new(&registry);

        let result = pipeline.run(&["ghost".to_string()], &BTreeMap::new());
        assert!(matches!(
            result.unwrap_err(),
            StackdockError::NotFound { kind: "service template", .. }
        ));
    }

    #[test]
    fn empty_selection_produces_empty_artifacts() {
        let registry = TemplateRegistry::with_builtins();
        let pipeline = BuildPipeline::new(&registry);

        let artifacts = pipeline.run(&[], &BTreeMap::new()).expect("run");
        assert!(artifacts.document.services.is_empty());
        assert!(!artifacts.has_issues());
        assert!(artifacts.zip_entries.is_empty());
    }
}
