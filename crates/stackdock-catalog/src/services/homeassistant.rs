//! Home Assistant home automation hub.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::ScriptFragment;
use stackdock_compose::document::ServiceBlock;
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// Home Assistant template.
///
/// Runs with host networking for device discovery; the network dimension is
/// not configurable, so no build option can move it onto a named network.
pub struct HomeAssistant;

impl ServiceTemplate for HomeAssistant {
    fn name(&self) -> &'static str {
        "homeassistant"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Home Assistant".into(),
            tags: vec!["automation".into(), "smart-home".into()],
            icon: "homeassistant".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://www.home-assistant.io".into(),
            docs: "https://www.home-assistant.io/docs".into(),
        }
    }

    fn config_options(&self) -> OptionDescriptor {
        OptionDescriptor {
            labeled_ports: BTreeMap::new(),
            modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
            volumes: true,
            networks: false,
            logging: true,
            image_tags: vec!["stable".into(), "2024.5".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("homeassistant/home-assistant:stable".into()),
            container_name: Some("homeassistant".into()),
            restart: Some("unless-stopped".into()),
            volumes: vec!["./volumes/homeassistant/config:/config".into()],
            network_mode: Some("host".into()),
            ..ServiceBlock::default()
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the Home Assistant config directory",
            "mkdir -p ./volumes/homeassistant/config",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stackdock_compose::document::ComposeDocument;
    use stackdock_compose::options::BuildOptions;

    use super::*;

    #[test]
    fn base_block_uses_host_networking() {
        assert_eq!(HomeAssistant.base_block().network_mode.as_deref(), Some("host"));
    }

    #[test]
    fn network_options_cannot_reconfigure_it() {
        let mut doc = ComposeDocument::new();
        let options = BuildOptions {
            network_mode: Some("none".into()),
            networks: vec!["iot".into()],
            ..BuildOptions::default()
        };
        HomeAssistant.compile(&mut doc, &options).expect("compile");

        let block = &doc.services["homeassistant"];
        assert_eq!(block.network_mode.as_deref(), Some("host"));
        assert!(block.networks.is_empty());
        assert!(doc.networks.is_empty());
    }
}
