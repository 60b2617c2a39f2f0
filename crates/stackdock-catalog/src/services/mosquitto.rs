//! Eclipse Mosquitto MQTT broker.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::{ScriptFragment, ZipEntry};
use stackdock_compose::document::{PortMapping, ServiceBlock};
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// MQTT broker template.
pub struct Mosquitto;

impl ServiceTemplate for Mosquitto {
    fn name(&self) -> &'static str {
        "mosquitto"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Eclipse Mosquitto".into(),
            tags: vec!["mqtt".into(), "broker".into()],
            icon: "mosquitto".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://mosquitto.org".into(),
            docs: "https://mosquitto.org/documentation".into(),
        }
    }

    fn commands(&self) -> BTreeMap<&'static str, String> {
        let mut commands = BTreeMap::new();
        let _ = commands.insert(
            "subscribe",
            "docker exec -it mosquitto mosquitto_sub -t '#' -v".to_string(),
        );
        let _ = commands.insert(
            "publish",
            "docker exec -it mosquitto mosquitto_pub -t test -m hello".to_string(),
        );
        commands
    }

    fn config_options(&self) -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(1883, 1883), "mqtt".to_string());
        let _ = labeled_ports.insert(PortMapping::new(9001, 9001), "websockets".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "2.0".into(), "1.6".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("eclipse-mosquitto:latest".into()),
            container_name: Some("mosquitto".into()),
            restart: Some("unless-stopped".into()),
            ports: vec![PortMapping::new(1883, 1883)],
            volumes: vec![
                "./volumes/mosquitto/config:/mosquitto/config".into(),
                "./volumes/mosquitto/data:/mosquitto/data".into(),
                "./volumes/mosquitto/log:/mosquitto/log".into(),
            ],
            ..ServiceBlock::default()
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.zip_list.push(ZipEntry::new(
            ctx.config.asset_dir.join("mosquitto/mosquitto.conf"),
            "mosquitto/mosquitto.conf",
        ));

        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the mosquitto volume directories",
            "mkdir -p ./volumes/mosquitto/config ./volumes/mosquitto/data ./volumes/mosquitto/log",
        ));

        ctx.postbuild.push(ScriptFragment::new(
            self.name(),
            "Seed the broker configuration if none exists",
            "[ -f ./volumes/mosquitto/config/mosquitto.conf ] || \
             cp ./mosquitto/mosquitto.conf ./volumes/mosquitto/config/mosquitto.conf",
        ));
        ctx.postbuild.push(ScriptFragment::new(
            self.name(),
            "Ensure the broker log directory exists",
            "[ -d ./volumes/mosquitto/log ] || mkdir -p ./volumes/mosquitto/log",
        ));
        ctx.postbuild.push(ScriptFragment::new(
            self.name(),
            "Fix volume ownership for the mosquitto user",
            "chown -R 1883:1883 ./volumes/mosquitto",
        ));
        Ok(())
    }
}
