//! Portainer container management UI.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::ScriptFragment;
use stackdock_compose::document::{PortMapping, ServiceBlock};
use stackdock_compose::options::OptionDescriptor;

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// Portainer CE template.
pub struct Portainer;

impl ServiceTemplate for Portainer {
    fn name(&self) -> &'static str {
        "portainer"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Portainer CE".into(),
            tags: vec!["management".into(), "ui".into()],
            icon: "portainer".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://www.portainer.io".into(),
            docs: "https://docs.portainer.io".into(),
        }
    }

    fn config_options(&self) -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(8000, 8000), "edge-agent".to_string());
        let _ = labeled_ports.insert(PortMapping::new(9000, 9000), "http".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: Vec::new(),
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "2.20.2".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("portainer/portainer-ce:latest".into()),
            container_name: Some("portainer".into()),
            restart: Some("unless-stopped".into()),
            ports: vec![PortMapping::new(8000, 8000), PortMapping::new(9000, 9000)],
            volumes: vec![
                "/var/run/docker.sock:/var/run/docker.sock".into(),
                "./volumes/portainer/data:/data".into(),
            ],
            ..ServiceBlock::default()
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the Portainer data directory",
            "mkdir -p ./volumes/portainer/data",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_ui_and_edge_ports() {
        let block = Portainer.base_block();
        assert_eq!(block.ports.len(), 2);
        assert!(Portainer.config_options().declares_container_port(9000));
    }

    #[test]
    fn no_environment_surface() {
        assert!(Portainer.config_options().modifyable_environment.is_empty());
    }
}
