//! `device-info` service: request device inventory and decode the answer.
//!
//! The decoded form mirrors the response layout. Sections missing from the
//! XML come back as `None` (and as absent/null keys when serialized), never
//! as an error; only a UDI that does not match the triple pattern fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PnpError, Result};
use crate::protocol::{Envelope, Udi};
use crate::services::DEVICE_INFO_NAMESPACE;
use crate::xml::Element;

/// Which inventory sections the agent should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceInfoType {
    Image,
    Hardware,
    Filesystem,
    Udi,
    Profile,
    #[default]
    All,
}

impl DeviceInfoType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceInfoType::Image => "image",
            DeviceInfoType::Hardware => "hardware",
            DeviceInfoType::Filesystem => "filesystem",
            DeviceInfoType::Udi => "udi",
            DeviceInfoType::Profile => "profile",
            DeviceInfoType::All => "all",
        }
    }
}

impl FromStr for DeviceInfoType {
    type Err = PnpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(DeviceInfoType::Image),
            "hardware" => Ok(DeviceInfoType::Hardware),
            "filesystem" => Ok(DeviceInfoType::Filesystem),
            "udi" => Ok(DeviceInfoType::Udi),
            "profile" => Ok(DeviceInfoType::Profile),
            "all" => Ok(DeviceInfoType::All),
            other => Err(PnpError::invalid_args(format!(
                "unknown device-info type: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for DeviceInfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a device-info request body.
pub fn device_info(info_type: DeviceInfoType) -> Element {
    Element::namespaced(DEVICE_INFO_NAMESPACE, "request")
        .with_child(Element::new("deviceInfo").with_attr("type", info_type.as_str()))
}

/// Decoded device-info response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// UDI from the envelope.
    #[serde(flatten)]
    pub udi: Udi,
    #[serde(rename = "primary-chassis", skip_serializing_if = "Option::is_none")]
    pub primary_chassis: Option<Udi>,
    #[serde(rename = "stacked-switch", skip_serializing_if = "Option::is_none")]
    pub stacked_switches: Option<Vec<Udi>>,
    #[serde(rename = "ha-device", skip_serializing_if = "Option::is_none")]
    pub ha_devices: Option<Vec<Udi>>,
    #[serde(flatten)]
    pub image: Option<ImageInfo>,
    #[serde(flatten)]
    pub hardware: Option<HardwareInfo>,
    #[serde(rename = "fileSystemList", skip_serializing_if = "Option::is_none")]
    pub file_systems: Option<Vec<FileSystem>>,
    #[serde(rename = "profileInfo", skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub version_string: Option<String>,
    pub image_file: Option<String>,
    pub image_hash: Option<String>,
    pub return_to_rom_reason: Option<String>,
    pub boot_variable: Option<String>,
    pub boot_ldr_variable: Option<String>,
    pub config_variable: Option<String>,
    pub config_reg: Option<String>,
    pub config_reg_next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareInfo {
    pub hostname: Option<String>,
    pub vendor: Option<String>,
    pub platform_name: Option<String>,
    pub processor_type: Option<String>,
    pub hw_revision: Option<String>,
    pub main_mem_size: Option<String>,
    pub io_mem_size: Option<String>,
    pub board_id: Option<String>,
    pub board_rework_id: Option<String>,
    pub processor_rev: Option<String>,
    pub midplane_version: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileSystem {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub fs_type: Option<String>,
    pub size: Option<String>,
    pub freespace: Option<String>,
    pub readable: Option<String>,
    pub writable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Profile {
    #[serde(rename = "profile-name")]
    pub profile_name: Option<String>,
    #[serde(rename = "created-by")]
    pub created_by: Option<String>,
    #[serde(rename = "discovery-created")]
    pub discovery_created: Option<String>,
    #[serde(rename = "primary-server")]
    pub primary_server: Option<ServerInfo>,
    #[serde(rename = "backup-server")]
    pub backup_server: Option<ServerInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ServerInfo {
    pub protocol: Option<String>,
    #[serde(rename = "server-address")]
    pub server_address: Option<String>,
    /// Tag of the address child: `ipv4`, `ipv6` or `host`.
    #[serde(rename = "server-address-type")]
    pub server_address_type: Option<String>,
    pub port: Option<String>,
}

/// Decode a device-info response envelope.
pub fn decode_device_info(env: &Envelope) -> Result<DeviceInfo> {
    let body = env.body();
    if body.namespace() != Some(DEVICE_INFO_NAMESPACE) || body.name() != "response" {
        return Err(PnpError::malformed(format!(
            "expected a device-info response, got {}",
            body.tag()
        )));
    }

    let udi = env.parsed_udi()?;

    let (primary_chassis, stacked_switches, ha_devices) = match body.child("udi") {
        Some(section) => (
            section
                .child_text("primary-chassis")
                .map(str::parse::<Udi>)
                .transpose()?,
            udi_list(section, "stacked-switch")?,
            udi_list(section, "ha-device")?,
        ),
        None => (None, None, None),
    };

    let info = DeviceInfo {
        udi,
        primary_chassis,
        stacked_switches,
        ha_devices,
        image: body.child("imageInfo").map(image_info),
        hardware: body.child("hardwareInfo").map(hardware_info),
        file_systems: body
            .child("fileSystemList")
            .map(|list| list.children_named("fileSystem").map(file_system).collect()),
        profiles: body
            .child("profileInfo")
            .map(|list| list.children_named("profile").map(profile).collect()),
    };
    tracing::debug!(udi = %info.udi, "decoded device-info response");
    Ok(info)
}

fn udi_list(section: &Element, name: &str) -> Result<Option<Vec<Udi>>> {
    let list = section
        .children_named(name)
        .map(|el| el.text().unwrap_or_default().parse::<Udi>())
        .collect::<Result<Vec<Udi>>>()?;
    Ok((!list.is_empty()).then_some(list))
}

fn text(section: &Element, name: &str) -> Option<String> {
    section.child_text(name).map(str::to_owned)
}

fn attr(el: &Element, name: &str) -> Option<String> {
    el.attr(name).map(str::to_owned)
}

fn image_info(section: &Element) -> ImageInfo {
    ImageInfo {
        version_string: text(section, "versionString"),
        image_file: text(section, "imageFile"),
        image_hash: text(section, "imageHash"),
        return_to_rom_reason: text(section, "returnToRomReason"),
        boot_variable: text(section, "bootVariable"),
        boot_ldr_variable: text(section, "bootLdrVariable"),
        config_variable: text(section, "configVariable"),
        config_reg: text(section, "configReg"),
        config_reg_next: text(section, "configRegNext"),
    }
}

fn hardware_info(section: &Element) -> HardwareInfo {
    HardwareInfo {
        hostname: text(section, "hostname"),
        vendor: text(section, "vendor"),
        platform_name: text(section, "platformName"),
        processor_type: text(section, "processorType"),
        hw_revision: text(section, "hwRevision"),
        main_mem_size: text(section, "mainMemSize"),
        io_mem_size: text(section, "ioMemSize"),
        board_id: text(section, "boardId"),
        board_rework_id: text(section, "boardReworkId"),
        processor_rev: text(section, "processorRev"),
        midplane_version: text(section, "midplaneVersion"),
        location: text(section, "location"),
    }
}

fn file_system(el: &Element) -> FileSystem {
    FileSystem {
        name: attr(el, "name"),
        fs_type: attr(el, "type"),
        size: attr(el, "size"),
        freespace: attr(el, "freespace"),
        readable: attr(el, "readable"),
        writable: attr(el, "writable"),
    }
}

fn profile(el: &Element) -> Profile {
    Profile {
        profile_name: attr(el, "profile-name"),
        created_by: attr(el, "created-by"),
        discovery_created: attr(el, "discovery-created"),
        primary_server: el.child("primary-server").map(server_info),
        backup_server: el.child("backup-server").map(server_info),
    }
}

fn server_info(el: &Element) -> ServerInfo {
    let mut server = ServerInfo {
        protocol: text(el, "protocol"),
        ..ServerInfo::default()
    };
    if let Some(address) = el.child("server-address") {
        for child in address.children() {
            if child.name().contains("port") {
                server.port = child.text().map(str::to_owned);
            } else {
                server.server_address = child.text().map(str::to_owned);
                server.server_address_type = Some(child.name().to_owned());
            }
        }
    }
    server
}
