//! Services the PnP agent supports that have no encoder yet.
//!
//! Each stub fails with `PnpError::Unimplemented`, never with an argument or
//! message error, so callers can tell "not built" from "bad input".

use crate::error::{PnpError, Result};
use crate::xml::Element;

fn unimplemented(service: &str) -> Result<Element> {
    Err(PnpError::Unimplemented(format!("{service} service")))
}

/// Query which services the agent supports.
pub fn capability() -> Result<Element> {
    unimplemented("capability")
}

/// Install a trustpoint or trustpool certificate.
pub fn certificate_install() -> Result<Element> {
    unimplemented("certificate-install")
}

/// Extended (non-IOS, data block and XML) cli-config variants.
pub fn cli_config_extended() -> Result<Element> {
    unimplemented("cli-config extended")
}

pub fn device_authentication() -> Result<Element> {
    unimplemented("device-authentication")
}

pub fn file_transfer() -> Result<Element> {
    unimplemented("file-transfer")
}

/// Install a new software image.
pub fn image_install() -> Result<Element> {
    unimplemented("image-install")
}

pub fn licensing() -> Result<Element> {
    unimplemented("licensing")
}

/// Point the PnP profile at another server.
pub fn redirection() -> Result<Element> {
    unimplemented("redirection")
}

pub fn reload() -> Result<Element> {
    unimplemented("reload")
}

pub fn script() -> Result<Element> {
    unimplemented("script")
}

/// Install a software maintenance update.
pub fn smu() -> Result<Element> {
    unimplemented("smu")
}

pub fn topology() -> Result<Element> {
    unimplemented("topology")
}
