//! Name-to-template registry in fixed catalog order.

use stackdock_common::error::{Result, StackdockError};

use crate::services;
use crate::template::ServiceTemplate;

/// Registry mapping service names to their template implementations.
///
/// Registration order is the catalog order, which the pipeline uses as the
/// fallback iteration order; conflict messages depend on it being stable.
pub struct TemplateRegistry {
    templates: Vec<Box<dyn ServiceTemplate>>,
}

impl TemplateRegistry {
    /// Creates a registry holding every built-in service template.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            templates: vec![
                Box::new(services::mosquitto::Mosquitto),
                Box::new(services::nodered::NodeRed),
                Box::new(services::influxdb::InfluxDb),
                Box::new(services::grafana::Grafana),
                Box::new(services::telegraf::Telegraf),
                Box::new(services::zigbee2mqtt::Zigbee2Mqtt),
                Box::new(services::portainer::Portainer),
                Box::new(services::homeassistant::HomeAssistant),
            ],
        }
    }

    /// Looks up a template by catalog name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ServiceTemplate> {
        self.templates
            .iter()
            .find(|t| t.name() == name)
            .map(AsRef::as_ref)
    }

    /// Looks up a template by catalog name, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error for names outside the catalog.
    pub fn require(&self, name: &str) -> Result<&dyn ServiceTemplate> {
        self.get(name).ok_or_else(|| StackdockError::NotFound {
            kind: "service template",
            id: name.to_string(),
        })
    }

    /// Returns the catalog names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    /// Iterates templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ServiceTemplate> {
        self.templates.iter().map(AsRef::as_ref)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
