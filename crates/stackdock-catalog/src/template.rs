//! The service template capability set and builder lifecycle.
//!
//! Every cataloged service implements [`ServiceTemplate`]: static metadata
//! accessors plus the four phases the pipeline drives per service. The
//! default phase implementations cover the common case; a template only
//! overrides what it does differently.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stackdock_common::config::StackdockConfig;
use stackdock_common::error::Result;
use stackdock_common::types::{Issue, ScriptFragment, ZipEntry};
use stackdock_compose::checks;
use stackdock_compose::document::{ComposeDocument, ServiceBlock};
use stackdock_compose::merge;
use stackdock_compose::options::{BuildOptions, OptionDescriptor};

/// Display metadata for one cataloged service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMeta {
    /// Human-readable name shown in listings.
    pub display_name: String,
    /// Free-form category tags.
    pub tags: Vec<String>,
    /// Icon identifier for UI consumers.
    pub icon: String,
}

/// Help links for one cataloged service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLinks {
    /// Project website.
    pub website: String,
    /// Documentation entry point.
    pub docs: String,
}

/// Mutable build-phase surfaces, borrowed from the pipeline for the duration
/// of one service's build call.
pub struct BuildContext<'a> {
    /// Run configuration (asset and volume roots).
    pub config: &'a StackdockConfig,
    /// Scratch directory for the build phase.
    pub tmp_path: &'a Path,
    /// File-packaging list, appended to in insertion order.
    pub zip_list: &'a mut Vec<ZipEntry>,
    /// Ordered pre-build script fragments.
    pub prebuild: &'a mut Vec<ScriptFragment>,
    /// Ordered post-build script fragments.
    pub postbuild: &'a mut Vec<ScriptFragment>,
}

/// A self-contained descriptor of one deployable unit.
///
/// The pipeline owns the working document and drives each phase strictly
/// sequentially; templates never retain references after a phase returns.
pub trait ServiceTemplate: Send + Sync {
    /// Catalog name of the service (also its key in the working document).
    fn name(&self) -> &'static str;

    /// Display metadata.
    fn meta(&self) -> ServiceMeta;

    /// Help links.
    fn help(&self) -> HelpLinks;

    /// Helper shell commands, keyed by command name. Display-only.
    fn commands(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::new()
    }

    /// Static declaration of the legal configuration surface.
    fn config_options(&self) -> OptionDescriptor;

    /// The service's default configuration block.
    fn base_block(&self) -> ServiceBlock;

    /// Companion services that must be part of the selection.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// One-time setup hook; never touches the working document.
    fn init(&self) {
        tracing::debug!(service = self.name(), "initializing service builder");
    }

    /// Folds this service's requested overrides into its own block.
    ///
    /// Idempotent: the block is created from [`base_block`](Self::base_block)
    /// on first compile and only descriptor-guarded merges run afterwards, so
    /// repeated compiles with the same inputs leave the document unchanged.
    ///
    /// # Errors
    ///
    /// The default implementation is infallible; templates with their own
    /// merge logic may fail on malformed input.
    fn compile(&self, doc: &mut ComposeDocument, options: &BuildOptions) -> Result<()> {
        let descriptor = self.config_options();
        {
            let block = doc
                .services
                .entry(self.name().to_string())
                .or_insert_with(|| self.base_block());
            merge::merge_ports(block, options, &descriptor);
            merge::merge_environment(block, options, &descriptor);
            merge::merge_image_tag(block, options, &descriptor);
            merge::merge_logging(block, options, &descriptor);
            merge::merge_network_mode(block, options, &descriptor);
            merge::merge_networks(block, options, &descriptor);
        }
        if descriptor.networks {
            for network in &options.networks {
                doc.ensure_network(network.clone());
            }
        }
        Ok(())
    }

    /// Runs this service's local checks; conflicts are data, not failures.
    ///
    /// # Errors
    ///
    /// Fails only when the check logic itself errors, never for a detected
    /// conflict.
    fn issues(&self, doc: &ComposeDocument, selection: &[String]) -> Result<Vec<Issue>> {
        let _ = doc;
        Ok(checks::missing_dependencies(
            self.name(),
            self.dependencies(),
            selection,
        ))
    }

    /// Injects catalog defaults for omitted build options.
    ///
    /// Returns `true` when anything was injected, in which case the pipeline
    /// re-runs compile with the completed options.
    fn assume(&self, options: &mut BuildOptions) -> bool {
        let descriptor = self.config_options();
        let mut injected = false;

        if options.image_tag.is_none() {
            if let Some(tag) = descriptor.image_tags.first() {
                options.image_tag = Some(tag.clone());
                injected = true;
            }
        }
        for env in &descriptor.modifyable_environment {
            if !options.environment.contains_key(&env.key) {
                let _ = options
                    .environment
                    .insert(env.key.clone(), env.default.clone());
                injected = true;
            }
        }
        injected
    }

    /// Appends this service's packaging entries and script fragments.
    ///
    /// Side-effect-only: never mutates the working document.
    ///
    /// # Errors
    ///
    /// Fails when asset-path resolution or script assembly faults.
    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }
}

impl std::fmt::Debug for dyn ServiceTemplate + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceTemplate")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackdock_compose::document::PortMapping;
    use stackdock_compose::options::EnvOption;

    struct Probe;

    impl ServiceTemplate for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn meta(&self) -> ServiceMeta {
            ServiceMeta {
                display_name: "Probe".into(),
                tags: vec!["test".into()],
                icon: "probe".into(),
            }
        }

        fn help(&self) -> HelpLinks {
            HelpLinks {
                website: "https://example.org".into(),
                docs: "https://example.org/docs".into(),
            }
        }

        fn config_options(&self) -> OptionDescriptor {
            let mut labeled_ports = std::collections::BTreeMap::new();
            let _ = labeled_ports.insert(PortMapping::new(8080, 8080), "http".to_string());
            OptionDescriptor {
                labeled_ports,
                modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
                volumes: true,
                networks: false,
                logging: true,
                image_tags: vec!["latest".into()],
            }
        }

        fn base_block(&self) -> ServiceBlock {
            ServiceBlock {
                image: Some("probe:latest".into()),
                ports: vec![PortMapping::new(8080, 8080)],
                ..ServiceBlock::default()
            }
        }
    }

    #[test]
    fn default_compile_is_idempotent() {
        let probe = Probe;
        let options = BuildOptions {
            ports: vec![PortMapping::new(9090, 8080)],
            ..BuildOptions::default()
        };

        let mut doc = ComposeDocument::new();
        probe.compile(&mut doc, &options).expect("compile");
        let once = doc.clone();
        probe.compile(&mut doc, &options).expect("recompile");
        assert_eq!(doc, once);
    }

    #[test]
    fn compile_never_sets_networks_when_unsupported() {
        let probe = Probe;
        let options = BuildOptions {
            network_mode: Some("host".into()),
            networks: vec!["iot".into()],
            ..BuildOptions::default()
        };

        let mut doc = ComposeDocument::new();
        probe.compile(&mut doc, &options).expect("compile");
        let block = &doc.services["probe"];
        assert!(block.network_mode.is_none());
        assert!(block.networks.is_empty());
        assert!(doc.networks.is_empty());
    }

    #[test]
    fn assume_fills_tag_and_env_defaults_once() {
        let probe = Probe;
        let mut options = BuildOptions::default();

        assert!(probe.assume(&mut options));
        assert_eq!(options.image_tag.as_deref(), Some("latest"));
        assert_eq!(options.environment.get("TZ").map(String::as_str), Some("Etc/UTC"));

        // A second pass has nothing left to inject.
        assert!(!probe.assume(&mut options));
    }

    #[test]
    fn assume_respects_user_choices() {
        let probe = Probe;
        let mut options = BuildOptions {
            image_tag: Some("latest".into()),
            ..BuildOptions::default()
        };
        let mut env = std::collections::BTreeMap::new();
        let _ = env.insert("TZ".to_string(), "Europe/Paris".to_string());
        options.environment = env;

        assert!(!probe.assume(&mut options));
        assert_eq!(options.environment["TZ"], "Europe/Paris");
    }
}
