//! Device-info response decoding against a captured agent response.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use openpnp_core::services::decode_device_info;
use openpnp_core::Envelope;

use vector_loader::load;

#[test]
fn decode_sample_response() {
    let env = Envelope::parse(&load("device_info_response.xml")).unwrap();
    let info = decode_device_info(&env).unwrap();

    assert_eq!(info.udi.pid, "CISCO3945-CHASSIS");
    assert_eq!(info.udi.vid, "V02");
    assert_eq!(info.udi.sn, "FTX1503AH3V");
    let chassis = info.primary_chassis.as_ref().unwrap();
    assert_eq!(chassis.pid, "CISCO3945-CHASSIS");
    assert_eq!(chassis.sn, "FTX1503AH3V");
    assert!(info.stacked_switches.is_none());
    assert!(info.ha_devices.is_none());

    let image = info.image.as_ref().unwrap();
    assert_eq!(image.version_string.as_deref(), Some("15.5(20140930:030825)"));
    assert_eq!(image.image_file.as_deref(), Some("flash0:c3900-ipbasek9-mz.SSA"));
    assert_eq!(image.boot_variable.as_deref(), Some("flash0:c3900-ipbasek9-mz.SSA,12;"));
    assert_eq!(image.return_to_rom_reason.as_deref(), Some("reload"));
    assert_eq!(image.config_reg.as_deref(), Some("0x0"));
    assert!(image.image_hash.is_none());
    assert!(image.boot_ldr_variable.is_none());
    assert!(image.config_variable.is_none());
    assert!(image.config_reg_next.is_none());

    let hw = info.hardware.as_ref().unwrap();
    assert_eq!(hw.hostname.as_deref(), Some("WSMA-3945"));
    assert_eq!(hw.vendor.as_deref(), Some("Cisco"));
    assert_eq!(hw.platform_name.as_deref(), Some("CISCO3945-CHASSIS"));
    assert_eq!(hw.hw_revision.as_deref(), Some("1.0"));
    assert_eq!(hw.main_mem_size.as_deref(), Some("1010827264"));
    assert_eq!(hw.io_mem_size.as_deref(), Some("0"));
    assert_eq!(hw.board_id.as_deref(), Some("FTX1503AH3V"));
    assert!(hw.board_rework_id.is_none());
    assert!(hw.processor_type.is_none());
    assert!(hw.processor_rev.is_none());
    assert!(hw.midplane_version.is_none());
    assert!(hw.location.is_none());

    let fs = &info.file_systems.as_ref().unwrap()[0];
    assert_eq!(fs.name.as_deref(), Some("flash0"));
    assert_eq!(fs.freespace.as_deref(), Some("141590528"));
    assert_eq!(fs.size.as_deref(), Some("512065536"));
    assert_eq!(fs.fs_type.as_deref(), Some("disk"));
    assert_eq!(fs.readable.as_deref(), Some("true"));
    assert_eq!(fs.writable.as_deref(), Some("true"));

    let profile = &info.profiles.as_ref().unwrap()[0];
    assert_eq!(profile.profile_name.as_deref(), Some("pnp_profile"));
    assert_eq!(profile.created_by.as_deref(), Some("PnP-DHCP"));
    assert_eq!(profile.discovery_created.as_deref(), Some("true"));
    let primary = profile.primary_server.as_ref().unwrap();
    assert_eq!(primary.protocol.as_deref(), Some("http"));
    assert_eq!(primary.server_address.as_deref(), Some("10.0.0.1"));
    assert_eq!(primary.server_address_type.as_deref(), Some("ipv4"));
    assert!(primary.port.is_none());
    let backup = profile.backup_server.as_ref().unwrap();
    assert_eq!(backup.server_address.as_deref(), Some("10.0.0.2"));
    assert_eq!(backup.port.as_deref(), Some("8080"));
}

#[test]
fn sample_renders_as_flat_mapping() {
    let env = Envelope::parse(&load("device_info_response.xml")).unwrap();
    let info = decode_device_info(&env).unwrap();
    let map = serde_json::to_value(&info).unwrap();

    assert_eq!(map["PID"], "CISCO3945-CHASSIS");
    assert_eq!(map["primary-chassis"]["SN"], "FTX1503AH3V");
    assert_eq!(map["hostname"], "WSMA-3945");
    assert_eq!(map["versionString"], "15.5(20140930:030825)");
    assert!(map["boardReworkId"].is_null());
    assert_eq!(map["fileSystemList"][0]["freespace"], "141590528");
    assert_eq!(map["profileInfo"][0]["primary-server"]["server-address"], "10.0.0.1");
    assert_eq!(map["profileInfo"][0]["backup-server"]["port"], "8080");
    assert!(map.get("stacked-switch").is_none());
}
