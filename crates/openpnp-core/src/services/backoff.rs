//! `backoff` service: tell the agent when to call home again.

use crate::error::{PnpError, Result};
use crate::services::BACKOFF_NAMESPACE;
use crate::xml::Element;

pub const DEFAULT_REASON: &str = "No Reason";

/// Callback timer; only non-zero units are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallBackAfter {
    /// 0..=47
    pub hours: u8,
    /// 0..=59
    pub minutes: u8,
    /// 0..=59
    pub seconds: u8,
}

impl CallBackAfter {
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn seconds(seconds: u8) -> Self {
        Self::new(0, 0, seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hours > 47 {
            return Err(PnpError::invalid_args(format!(
                "backoff hours must be between 0 and 47, got {}",
                self.hours
            )));
        }
        if self.minutes > 59 {
            return Err(PnpError::invalid_args(format!(
                "backoff minutes must be between 0 and 59, got {}",
                self.minutes
            )));
        }
        if self.seconds > 59 {
            return Err(PnpError::invalid_args(format!(
                "backoff seconds must be between 0 and 59, got {}",
                self.seconds
            )));
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// What the agent should do; the variants are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffMode {
    /// Stop calling home and drop the PnP profile.
    Terminate,
    /// Replace the agent's default retry interval (1..=2880 minutes).
    DefaultMinutes(u16),
    /// Call back once after the given delay.
    CallBackAfter(CallBackAfter),
}

/// Build a backoff request body.
///
/// `None` sends only the reason and leaves the agent on its current timer.
/// A zero callback timer is treated the same way.
pub fn backoff(mode: Option<BackoffMode>, reason: &str) -> Result<Element> {
    let instruction = match mode {
        None => None,
        Some(BackoffMode::Terminate) => Some(Element::new("terminate")),
        Some(BackoffMode::DefaultMinutes(minutes)) => {
            if !(1..=2880).contains(&minutes) {
                return Err(PnpError::invalid_args(format!(
                    "backoff defaultMinutes must be between 1 and 2880, got {minutes}"
                )));
            }
            Some(Element::leaf("defaultMinutes", minutes.to_string()))
        }
        Some(BackoffMode::CallBackAfter(timer)) => {
            timer.validate()?;
            (!timer.is_zero()).then(|| call_back_after(timer))
        }
    };

    let mut body = Element::new("backoff").with_child(Element::leaf("reason", reason));
    if let Some(instruction) = instruction {
        body.push_child(instruction);
    }
    Ok(Element::namespaced(BACKOFF_NAMESPACE, "request").with_child(body))
}

fn call_back_after(timer: CallBackAfter) -> Element {
    let units = [
        ("hours", timer.hours),
        ("minutes", timer.minutes),
        ("seconds", timer.seconds),
    ];
    Element::new("callBackAfter").with_children(
        units
            .into_iter()
            .filter(|(_, value)| *value != 0)
            .map(|(name, value)| Element::leaf(name, value.to_string())),
    )
}
