use async_trait::async_trait;

use openpnp_core::error::Result;
use openpnp_core::services::{
    backoff, decode_device_info, device_info, BackoffMode, CallBackAfter, DeviceInfoType,
    DEVICE_INFO_NAMESPACE,
};
use openpnp_core::{Element, Envelope};

use crate::config::InventorySection;
use crate::dispatch::WorkHandler;

/// Collects device inventory on every call-home, then backs the agent off.
///
/// Work request -> device-info request. Work response -> backoff.
pub struct InventoryHandler {
    info_type: DeviceInfoType,
    callback: CallBackAfter,
    reason: String,
}

impl InventoryHandler {
    pub fn new(
        info_type: DeviceInfoType,
        callback: CallBackAfter,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            info_type,
            callback,
            reason: reason.into(),
        }
    }

    pub fn from_config(section: &InventorySection) -> Self {
        Self::new(
            section.device_info,
            section.callback_after.timer(),
            section.reason.as_str(),
        )
    }
}

#[async_trait]
impl WorkHandler for InventoryHandler {
    async fn handle_work_request(&self, _request: &Envelope) -> Result<Element> {
        Ok(device_info(self.info_type))
    }

    async fn handle_work_response(&self, response: &Envelope) -> Result<Element> {
        if response.success() == Some(false) {
            tracing::warn!(
                udi = response.udi(),
                service = response.service().unwrap_or("-"),
                "agent reported a failed work response"
            );
        } else if response.service() == Some(DEVICE_INFO_NAMESPACE) {
            let info = decode_device_info(response)?;
            let hostname = info.hardware.as_ref().and_then(|hw| hw.hostname.as_deref());
            tracing::info!(
                pid = %info.udi.pid,
                sn = %info.udi.sn,
                hostname = hostname.unwrap_or("-"),
                "device inventory received"
            );
        }
        backoff(Some(BackoffMode::CallBackAfter(self.callback)), &self.reason)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use openpnp_core::ErrorCode;

    const UDI: &str = "PID:C9300-24P,VID:V01,SN:FOC0000X0XX";

    fn handler() -> InventoryHandler {
        InventoryHandler::new(DeviceInfoType::Hardware, CallBackAfter::new(0, 1, 30), "poll")
    }

    fn device_info_response(udi: &str) -> Envelope {
        let body = Element::namespaced(DEVICE_INFO_NAMESPACE, "response")
            .with_attr("correlator", "c-1")
            .with_attr("success", "1")
            .with_child(Element::new("hardwareInfo").with_child(Element::leaf("hostname", "sw1")));
        Envelope::new(udi, body)
    }

    #[tokio::test]
    async fn work_request_asks_for_configured_sections() {
        let req = Envelope::new(UDI, openpnp_core::services::bye());
        let body = handler().handle_work_request(&req).await.unwrap();
        assert_eq!(body.child("deviceInfo").unwrap().attr("type"), Some("hardware"));
    }

    #[tokio::test]
    async fn work_response_backs_off() {
        let body = handler()
            .handle_work_response(&device_info_response(UDI))
            .await
            .unwrap();
        let timer = body.child("backoff").unwrap().child("callBackAfter").unwrap();
        assert_eq!(timer.child_text("minutes"), Some("1"));
        assert_eq!(timer.child_text("seconds"), Some("30"));
        assert_eq!(body.child("backoff").unwrap().child_text("reason"), Some("poll"));
    }

    #[tokio::test]
    async fn undecodable_inventory_is_an_error() {
        let err = handler()
            .handle_work_response(&device_info_response("not-a-udi"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedUdi);
    }
}
