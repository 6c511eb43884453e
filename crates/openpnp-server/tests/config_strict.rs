#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use openpnp_core::services::DeviceInfoType;
use openpnp_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
inventory:
  callbak_after: { seconds: 10 } # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.max_body_bytes, 65536);
    assert_eq!(cfg.inventory.device_info, DeviceInfoType::All);
    assert_eq!(cfg.inventory.callback_after.seconds, 30);
    assert_eq!(cfg.inventory.reason, "No Reason");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
  max_body_bytes: 131072
inventory:
  device_info: hardware
  callback_after: { hours: 1, minutes: 30 }
  reason: "nightly poll"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.inventory.device_info, DeviceInfoType::Hardware);
    assert_eq!(cfg.inventory.callback_after.hours, 1);
    assert_eq!(cfg.inventory.callback_after.seconds, 0);
}

#[test]
fn out_of_range_values_fail() {
    let cases = [
        "version: 2\n",
        "version: 1\nserver: { listen: \"not an address\" }\n",
        "version: 1\nserver: { max_body_bytes: 10 }\n",
        "version: 1\ninventory: { callback_after: { minutes: 75 } }\n",
        "version: 1\ninventory: { device_info: everything }\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "case={case}");
    }
}
