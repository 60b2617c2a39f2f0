//! Node-RED flow-based automation.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::ScriptFragment;
use stackdock_compose::document::{PortMapping, ServiceBlock};
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// Node-RED template.
pub struct NodeRed;

impl ServiceTemplate for NodeRed {
    fn name(&self) -> &'static str {
        "nodered"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Node-RED".into(),
            tags: vec!["automation".into(), "flows".into()],
            icon: "nodered".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://nodered.org".into(),
            docs: "https://nodered.org/docs".into(),
        }
    }

    fn commands(&self) -> BTreeMap<&'static str, String> {
        let mut commands = BTreeMap::new();
        let _ = commands.insert(
            "shell",
            "docker exec -it nodered /bin/bash".to_string(),
        );
        commands
    }

    fn config_options(&self) -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(1880, 1880), "editor".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "3.1".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("nodered/node-red:latest".into()),
            container_name: Some("nodered".into()),
            restart: Some("unless-stopped".into()),
            ports: vec![PortMapping::new(1880, 1880)],
            volumes: vec!["./volumes/nodered/data:/data".into()],
            ..ServiceBlock::default()
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the Node-RED data directory",
            "mkdir -p ./volumes/nodered/data",
        ));
        ctx.postbuild.push(ScriptFragment::new(
            self.name(),
            "Fix volume ownership for the node-red user",
            "chown -R 1000:1000 ./volumes/nodered",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_port_is_declared() {
        assert!(NodeRed.config_options().declares_container_port(1880));
    }

    #[test]
    fn base_block_mounts_data_volume() {
        let block = NodeRed.base_block();
        assert_eq!(block.volumes, vec!["./volumes/nodered/data:/data".to_string()]);
    }
}
