//! Telegraf metrics agent.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::{ScriptFragment, ZipEntry};
use stackdock_compose::document::ServiceBlock;
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// Telegraf template. Ships metrics from the MQTT broker into InfluxDB, so
/// both are required companions.
pub struct Telegraf;

impl ServiceTemplate for Telegraf {
    fn name(&self) -> &'static str {
        "telegraf"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Telegraf".into(),
            tags: vec!["metrics".into(), "agent".into()],
            icon: "telegraf".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://www.influxdata.com/time-series-platform/telegraf".into(),
            docs: "https://docs.influxdata.com/telegraf".into(),
        }
    }

    fn config_options(&self) -> OptionDescriptor {
        OptionDescriptor {
            labeled_ports: BTreeMap::new(),
            modifyable_environment: vec![EnvOption::new("TZ", "Etc/UTC")],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "1.30".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("telegraf:latest".into()),
            container_name: Some("telegraf".into()),
            restart: Some("unless-stopped".into()),
            volumes: vec![
                "./volumes/telegraf/telegraf.conf:/etc/telegraf/telegraf.conf:ro".into(),
            ],
            depends_on: vec!["influxdb".into(), "mosquitto".into()],
            ..ServiceBlock::default()
        }
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["mosquitto", "influxdb"]
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.zip_list.push(ZipEntry::new(
            ctx.config.asset_dir.join("telegraf/telegraf.conf"),
            "telegraf/telegraf.conf",
        ));
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the Telegraf config directory",
            "mkdir -p ./volumes/telegraf",
        ));
        ctx.postbuild.push(ScriptFragment::new(
            self.name(),
            "Seed the agent configuration if none exists",
            "[ -f ./volumes/telegraf/telegraf.conf ] || \
             cp ./telegraf/telegraf.conf ./volumes/telegraf/telegraf.conf",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stackdock_compose::document::ComposeDocument;

    use super::*;

    #[test]
    fn requires_broker_and_database() {
        assert_eq!(Telegraf.dependencies(), ["mosquitto", "influxdb"]);
    }

    #[test]
    fn issues_flag_each_missing_companion() {
        let doc = ComposeDocument::new();
        let selection = vec!["telegraf".to_string(), "mosquitto".to_string()];
        let issues = Telegraf.issues(&doc, &selection).expect("issues");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("influxdb"), "got: {}", issues[0].message);
    }

    #[test]
    fn publishes_no_ports() {
        assert!(Telegraf.base_block().ports.is_empty());
        assert!(Telegraf.config_options().labeled_ports.is_empty());
    }
}
