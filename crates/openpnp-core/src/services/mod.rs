//! PnP service body codecs.
//!
//! Each builder returns a detached body element (no correlator); the
//! correlator is stamped when the body is installed into a reply with
//! [`Envelope::make_reply`](crate::protocol::Envelope::make_reply).
//! Arguments are validated before any XML is built and rejected with
//! `PnpError::InvalidServiceArguments`.
//!
//! Services the agent supports but this crate does not encode yet are
//! exposed as stubs returning `PnpError::Unimplemented`.

pub mod backoff;
pub mod cli_config;
pub mod cli_exec;
pub mod config_upgrade;
pub mod device_info;
pub mod placeholder;
pub mod work_info;

use std::fmt;
use std::str::FromStr;

use crate::error::{PnpError, Result};

pub use backoff::{backoff, BackoffMode, CallBackAfter};
pub use cli_config::{cli_config, CliConfig, OnFail};
pub use cli_exec::{cli_exec, CliExec, Dialog, ExecCommand};
pub use config_upgrade::{config_upgrade, ApplyTo, ConfigUpgrade, Reload};
pub use device_info::{decode_device_info, device_info, DeviceInfo, DeviceInfoType};
pub use work_info::bye;

pub const BACKOFF_NAMESPACE: &str = "urn:cisco:pnp:backoff";
pub const DEVICE_INFO_NAMESPACE: &str = "urn:cisco:pnp:device-info";
pub const CONFIG_UPGRADE_NAMESPACE: &str = "urn:cisco:pnp:config-upgrade";
pub const CLI_CONFIG_NAMESPACE: &str = "urn:cisco:pnp:cli-config";
pub const CLI_EXEC_NAMESPACE: &str = "urn:cisco:pnp:cli-exec";
pub const WORK_INFO_NAMESPACE: &str = "urn:cisco:pnp:work-info";

/// Level of error detail the agent reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Details {
    Brief,
    Errors,
    #[default]
    All,
}

impl Details {
    pub fn as_str(self) -> &'static str {
        match self {
            Details::Brief => "brief",
            Details::Errors => "errors",
            Details::All => "all",
        }
    }
}

impl FromStr for Details {
    type Err = PnpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "brief" => Ok(Details::Brief),
            "errors" => Ok(Details::Errors),
            "all" => Ok(Details::All),
            other => Err(PnpError::invalid_args(format!("unknown details level: {other:?}"))),
        }
    }
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn require_commands<T>(service: &str, commands: &[T]) -> Result<()> {
    if commands.is_empty() {
        return Err(PnpError::invalid_args(format!(
            "{service} needs at least one command"
        )));
    }
    Ok(())
}
