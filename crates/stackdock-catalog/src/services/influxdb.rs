//! InfluxDB time-series database.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::ScriptFragment;
use stackdock_compose::document::{PortMapping, ServiceBlock};
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// InfluxDB template.
pub struct InfluxDb;

impl ServiceTemplate for InfluxDb {
    fn name(&self) -> &'static str {
        "influxdb"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "InfluxDB".into(),
            tags: vec!["database".into(), "timeseries".into()],
            icon: "influxdb".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://www.influxdata.com".into(),
            docs: "https://docs.influxdata.com/influxdb".into(),
        }
    }

    fn commands(&self) -> BTreeMap<&'static str, String> {
        let mut commands = BTreeMap::new();
        let _ = commands.insert("cli", "docker exec -it influxdb influx".to_string());
        commands
    }

    fn config_options(&self) -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(8086, 8086), "http".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: vec![
                EnvOption::new("INFLUXDB_DB", "telemetry"),
                EnvOption::new("INFLUXDB_HTTP_FLUX_ENABLED", "false"),
                EnvOption::new("TZ", "Etc/UTC"),
            ],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["1.8".into(), "1.8-alpine".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("influxdb:1.8".into()),
            container_name: Some("influxdb".into()),
            restart: Some("unless-stopped".into()),
            ports: vec![PortMapping::new(8086, 8086)],
            volumes: vec![
                "./volumes/influxdb/data:/var/lib/influxdb".into(),
                "./volumes/influxdb/backup:/var/lib/influxdb/backup".into(),
            ],
            ..ServiceBlock::default()
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the InfluxDB data and backup directories",
            "mkdir -p ./volumes/influxdb/data ./volumes/influxdb/backup",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_declares_database_env() {
        let desc = InfluxDb.config_options();
        assert!(desc.declares_env_key("INFLUXDB_DB"));
        assert!(!desc.declares_env_key("INFLUXDB_ADMIN_PASSWORD"));
    }

    #[test]
    fn default_tag_is_pinned() {
        assert_eq!(
            InfluxDb.config_options().image_tags.first().map(String::as_str),
            Some("1.8")
        );
    }
}
