//! Grafana dashboards.

use std::collections::BTreeMap;

use stackdock_common::error::Result;
use stackdock_common::types::ScriptFragment;
use stackdock_compose::document::{PortMapping, ServiceBlock};
use stackdock_compose::options::{EnvOption, OptionDescriptor};

use crate::template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};

/// Grafana template.
pub struct Grafana;

impl ServiceTemplate for Grafana {
    fn name(&self) -> &'static str {
        "grafana"
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            display_name: "Grafana".into(),
            tags: vec!["dashboards".into(), "visualization".into()],
            icon: "grafana".into(),
        }
    }

    fn help(&self) -> HelpLinks {
        HelpLinks {
            website: "https://grafana.com".into(),
            docs: "https://grafana.com/docs".into(),
        }
    }

    fn config_options(&self) -> OptionDescriptor {
        let mut labeled_ports = BTreeMap::new();
        let _ = labeled_ports.insert(PortMapping::new(3000, 3000), "http".to_string());
        OptionDescriptor {
            labeled_ports,
            modifyable_environment: vec![
                EnvOption::new("GF_SECURITY_ADMIN_PASSWORD", "admin"),
                EnvOption::new("TZ", "Etc/UTC"),
            ],
            volumes: true,
            networks: true,
            logging: true,
            image_tags: vec!["latest".into(), "10.4.2".into()],
        }
    }

    fn base_block(&self) -> ServiceBlock {
        ServiceBlock {
            image: Some("grafana/grafana:latest".into()),
            container_name: Some("grafana".into()),
            restart: Some("unless-stopped".into()),
            ports: vec![PortMapping::new(3000, 3000)],
            volumes: vec!["./volumes/grafana/data:/var/lib/grafana".into()],
            ..ServiceBlock::default()
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        ctx.prebuild.push(ScriptFragment::new(
            self.name(),
            "Create the Grafana data directory",
            "mkdir -p ./volumes/grafana/data",
        ));
        ctx.postbuild.push(ScriptFragment::new(
            self.name(),
            "Fix volume ownership for the grafana user",
            "chown -R 472:472 ./volumes/grafana",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_password_is_overridable() {
        assert!(Grafana.config_options().declares_env_key("GF_SECURITY_ADMIN_PASSWORD"));
    }

    #[test]
    fn http_port_is_default_mapped() {
        let block = Grafana.base_block();
        assert_eq!(block.ports, vec![PortMapping::new(3000, 3000)]);
    }
}
