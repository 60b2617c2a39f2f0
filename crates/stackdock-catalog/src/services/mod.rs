//! Built-in service templates, one module per cataloged service.

pub mod grafana;
pub mod homeassistant;
pub mod influxdb;
pub mod mosquitto;
pub mod nodered;
pub mod portainer;
pub mod telegraf;
pub mod zigbee2mqtt;
