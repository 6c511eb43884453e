//! `config-upgrade` service: download a configuration file and apply it.

use std::fmt;
use std::str::FromStr;

use crate::error::{PnpError, Result};
use crate::services::{Details, CONFIG_UPGRADE_NAMESPACE};
use crate::xml::Element;

/// Which configuration the downloaded file replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyTo {
    #[default]
    Startup,
    Running,
    /// Access-point configuration.
    Ap,
}

impl ApplyTo {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplyTo::Startup => "startup",
            ApplyTo::Running => "running",
            ApplyTo::Ap => "AP",
        }
    }
}

impl FromStr for ApplyTo {
    type Err = PnpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "startup" => Ok(ApplyTo::Startup),
            "running" => Ok(ApplyTo::Running),
            "AP" => Ok(ApplyTo::Ap),
            other => Err(PnpError::invalid_args(format!("unknown applyTo target: {other:?}"))),
        }
    }
}

impl fmt::Display for ApplyTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reload the device once the configuration is in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reload {
    pub reason: String,
    pub delay_in: u32,
    pub user: String,
    /// Save the running config before reloading.
    pub save_config: bool,
}

impl Default for Reload {
    fn default() -> Self {
        Self {
            reason: "PnP config upgrade".into(),
            delay_in: 0,
            user: "PnP Agent".into(),
            save_config: true,
        }
    }
}

/// Parameters of a config-upgrade request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpgrade {
    /// URL of the configuration file.
    pub location: String,
    pub details: Details,
    pub apply_to: ApplyTo,
    /// Sent only when non-empty.
    pub checksum: Option<String>,
    /// `None` sends a `noReload` marker.
    pub reload: Option<Reload>,
    pub abort_on_syntax_fault: bool,
}

impl ConfigUpgrade {
    /// Defaults: all details, apply to startup, reload with the default
    /// reason, abort on syntax faults.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            details: Details::All,
            apply_to: ApplyTo::Startup,
            checksum: None,
            reload: Some(Reload::default()),
            abort_on_syntax_fault: true,
        }
    }

    pub fn details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    pub fn apply_to(mut self, apply_to: ApplyTo) -> Self {
        self.apply_to = apply_to;
        self
    }

    pub fn checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn reload(mut self, reload: Option<Reload>) -> Self {
        self.reload = reload;
        self
    }

    pub fn abort_on_syntax_fault(mut self, abort: bool) -> Self {
        self.abort_on_syntax_fault = abort;
        self
    }

    pub fn build(&self) -> Result<Element> {
        config_upgrade(self)
    }
}

/// Build a config-upgrade request body.
pub fn config_upgrade(params: &ConfigUpgrade) -> Result<Element> {
    if params.location.trim().is_empty() {
        return Err(PnpError::invalid_args("config-upgrade location must not be empty"));
    }

    let mut source =
        Element::new("source").with_child(Element::leaf("location", params.location.as_str()));
    if let Some(checksum) = params.checksum.as_deref().filter(|c| !c.is_empty()) {
        source.push_child(Element::leaf("checksum", checksum));
    }

    let config = Element::new("config")
        .with_attr("details", params.details.as_str())
        .with_child(Element::new("copy").with_child(source))
        .with_child(Element::leaf("applyTo", params.apply_to.as_str()));

    let reload = match &params.reload {
        Some(reload) => Element::new("reload")
            .with_child(Element::leaf("reason", reload.reason.as_str()))
            .with_child(Element::leaf("delayIn", reload.delay_in.to_string()))
            .with_child(Element::leaf("user", reload.user.as_str()))
            .with_child(Element::leaf("saveConfig", if reload.save_config { "1" } else { "0" })),
        None => Element::new("noReload"),
    };

    let mut request = Element::namespaced(CONFIG_UPGRADE_NAMESPACE, "request")
        .with_child(config)
        .with_child(reload);
    if params.abort_on_syntax_fault {
        request.push_child(Element::new("abortOnSyntaxFault"));
    }
    Ok(request)
}
