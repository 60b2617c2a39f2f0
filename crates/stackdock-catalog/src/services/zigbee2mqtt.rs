//! Zigbee2MQTT bridge.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::ScriptFragment;
use stackdock_compose::document::{PortMapping, ServiceBlock};
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// Zigbee2MQTT template. Bridges Zigbee traffic onto MQTT, so the broker is
/// a required companion.
pub struct Zigbee2Mqtt;

impl ServiceTemplate for Zigbee2Mqtt {
    fn name(&self) -> &'static str {
        "zigbee2mqtt"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Zigbee2MQTT".into(),
            tags: vec!["zigbee".into(), "mqtt".into(), "bridge".into()],
            icon: "zigbee2mqtt".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://www.zigbee2mqtt.io".into(),
            docs: "https://www.zigbee2mqtt.io/guide".into(),
        }
    }

    fn config_options(&self) -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(8080, 8080), "frontend".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "1.36.1".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("koenkk/zigbee2mqtt:latest".into()),
            container_name: Some("zigbee2mqtt".into()),
            restart: Some("unless-stopped".into()),
            ports: vec![PortMapping::new(8080, 8080)],
            volumes: vec!["./volumes/zigbee2mqtt/data:/app/data".into()],
            depends_on: vec!["mosquitto".into()],
            ..ServiceBlock::default()
        }
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["mosquitto"]
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the Zigbee2MQTT data directory",
            "mkdir -p ./volumes/zigbee2mqtt/data",
        ));
        Ok(())
    }
}
