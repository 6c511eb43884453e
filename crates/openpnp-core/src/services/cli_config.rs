//! `cli-config` service: run configuration-mode CLI commands.
//!
//! Only the IOS command list form is encoded; CLI data blocks and XML config
//! data are not.

use std::fmt;
use std::str::FromStr;

use crate::error::{PnpError, Result};
use crate::services::{require_commands, Details, CLI_CONFIG_NAMESPACE};
use crate::xml::Element;

/// What the agent does when a command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFail {
    /// Apply every command and record each status.
    #[default]
    Continue,
    /// Stop at the first failure.
    Stop,
    /// Stop and restore the previous configuration (needs `archive`).
    Rollback,
}

impl OnFail {
    pub fn as_str(self) -> &'static str {
        match self {
            OnFail::Continue => "continue",
            OnFail::Stop => "stop",
            OnFail::Rollback => "rollback",
        }
    }
}

impl FromStr for OnFail {
    type Err = PnpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "continue" => Ok(OnFail::Continue),
            "stop" => Ok(OnFail::Stop),
            "rollback" => Ok(OnFail::Rollback),
            other => Err(PnpError::invalid_args(format!("unknown action-on-fail: {other:?}"))),
        }
    }
}

impl fmt::Display for OnFail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a cli-config request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliConfig {
    pub commands: Vec<String>,
    pub details: Details,
    /// Syntax-check only (`configTest`) instead of applying.
    pub check: bool,
    pub on_fail: OnFail,
    /// Save running config to startup; only valid when applying.
    pub write: bool,
}

impl CliConfig {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn on_fail(mut self, on_fail: OnFail) -> Self {
        self.on_fail = on_fail;
        self
    }

    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub fn build(&self) -> Result<Element> {
        cli_config(self)
    }
}

/// Build a cli-config request body.
pub fn cli_config(params: &CliConfig) -> Result<Element> {
    require_commands("cli-config", &params.commands)?;
    if params.check && params.write {
        return Err(PnpError::invalid_args(
            "cli-config cannot persist the configuration of a syntax check",
        ));
    }

    let data = Element::new("config-data").with_child(
        Element::new("cli-config-data")
            .with_children(params.commands.iter().map(|cmd| Element::leaf("cmd", cmd.as_str()))),
    );

    let action = if params.check {
        Element::new("configTest").with_attr("details", params.details.as_str())
    } else {
        Element::new("configApply")
            .with_attr("details", params.details.as_str())
            .with_attr("action-on-fail", params.on_fail.as_str())
    };

    let mut request =
        Element::namespaced(CLI_CONFIG_NAMESPACE, "request").with_child(action.with_child(data));
    if params.write {
        request.push_child(Element::new("configPersist"));
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::ErrorCode;

    fn commands(action: &Element) -> Vec<&str> {
        action
            .child("config-data")
            .unwrap()
            .child("cli-config-data")
            .unwrap()
            .children_named("cmd")
            .filter_map(Element::text)
            .collect()
    }

    #[test]
    fn apply_keeps_command_order() {
        let req = CliConfig::new(["hostname sw1", "ip domain-name lab", "end"])
            .on_fail(OnFail::Rollback)
            .build()
            .unwrap();
        assert_eq!(req.tag(), "{urn:cisco:pnp:cli-config}request");
        let apply = req.child("configApply").unwrap();
        assert_eq!(apply.attr("details"), Some("all"));
        assert_eq!(apply.attr("action-on-fail"), Some("rollback"));
        assert_eq!(commands(apply), ["hostname sw1", "ip domain-name lab", "end"]);
        assert!(req.child("configPersist").is_none());
    }

    #[test]
    fn check_uses_config_test() {
        let req = CliConfig::new(["hostname sw1"])
            .check(true)
            .details(Details::Brief)
            .build()
            .unwrap();
        let test = req.child("configTest").unwrap();
        assert_eq!(test.attr("details"), Some("brief"));
        assert_eq!(test.attr("action-on-fail"), None);
        assert!(req.child("configApply").is_none());
    }

    #[test]
    fn write_appends_persist_marker() {
        let req = CliConfig::new(["hostname sw1"]).write(true).build().unwrap();
        let names: Vec<&str> = req.children().iter().map(Element::name).collect();
        assert_eq!(names, ["configApply", "configPersist"]);
    }

    #[test]
    fn write_during_check_is_rejected() {
        let err = CliConfig::new(["hostname sw1"]).check(true).write(true).build().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidServiceArguments);
    }

    #[test]
    fn empty_command_list_is_rejected() {
        let err = CliConfig::new(Vec::<String>::new()).build().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidServiceArguments);
    }
}
