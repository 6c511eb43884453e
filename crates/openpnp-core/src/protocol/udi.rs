//! Unique Device Identifier (`PID:<pid>,VID:<vid>,SN:<sn>`).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{PnpError, Result};

/// Parsed UDI triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Udi {
    #[serde(rename = "PID")]
    pub pid: String,
    #[serde(rename = "VID")]
    pub vid: String,
    #[serde(rename = "SN")]
    pub sn: String,
}

// Constant pattern; compiling it cannot fail.
#[allow(clippy::unwrap_used)]
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^PID:(?P<pid>[^,]*),VID:(?P<vid>[^,]*),SN:(?P<sn>.*)$").unwrap()
    })
}

impl FromStr for Udi {
    type Err = PnpError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = pattern()
            .captures(s.trim())
            .ok_or_else(|| PnpError::MalformedUdi(s.to_owned()))?;
        Ok(Self {
            pid: caps["pid"].to_owned(),
            vid: caps["vid"].to_owned(),
            sn: caps["sn"].to_owned(),
        })
    }
}

impl fmt::Display for Udi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID:{},VID:{},SN:{}", self.pid, self.vid, self.sn)
    }
}
