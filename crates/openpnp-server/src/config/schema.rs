use std::net::SocketAddr;

use serde::Deserialize;

use openpnp_core::error::{PnpError, Result};
use openpnp_core::services::{CallBackAfter, DeviceInfoType};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub inventory: InventorySection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PnpError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.inventory.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1024..=1_048_576).contains(&self.max_body_bytes) {
            return Err(PnpError::BadConfig(
                "server.max_body_bytes must be between 1024 and 1048576".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            PnpError::BadConfig(format!(
                "server.listen {:?} is not a socket address: {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_body_bytes() -> usize {
    65536
}

/// Built-in inventory handler settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventorySection {
    #[serde(default)]
    pub device_info: DeviceInfoType,

    #[serde(default = "default_callback_after")]
    pub callback_after: CallbackSection,

    #[serde(default = "default_reason")]
    pub reason: String,
}

impl Default for InventorySection {
    fn default() -> Self {
        Self {
            device_info: DeviceInfoType::default(),
            callback_after: default_callback_after(),
            reason: default_reason(),
        }
    }
}

impl InventorySection {
    pub fn validate(&self) -> Result<()> {
        self.callback_after
            .timer()
            .validate()
            .map_err(|e| PnpError::BadConfig(format!("inventory.callback_after: {e}")))
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct CallbackSection {
    #[serde(default)]
    pub hours: u8,
    #[serde(default)]
    pub minutes: u8,
    #[serde(default)]
    pub seconds: u8,
}

impl CallbackSection {
    pub fn timer(&self) -> CallBackAfter {
        CallBackAfter::new(self.hours, self.minutes, self.seconds)
    }
}

fn default_callback_after() -> CallbackSection {
    CallbackSection {
        seconds: 30,
        ..CallbackSection::default()
    }
}
fn default_reason() -> String {
    openpnp_core::services::backoff::DEFAULT_REASON.into()
}
