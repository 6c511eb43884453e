use std::sync::Arc;

use async_trait::async_trait;

use openpnp_core::error::{PnpError, Result};
use openpnp_core::{Element, Envelope};

/// Business logic behind the work endpoints.
///
/// Both methods return the body of the reply; the dispatcher wraps it into an
/// envelope carrying the request's session attributes and correlator. A method
/// left at its default fails the exchange with `PnpError::Unimplemented`.
#[async_trait]
pub trait WorkHandler: Send + Sync {
    async fn handle_work_request(&self, _request: &Envelope) -> Result<Element> {
        Err(PnpError::Unimplemented("work-request handler".into()))
    }

    async fn handle_work_response(&self, _response: &Envelope) -> Result<Element> {
        Err(PnpError::Unimplemented("work-response handler".into()))
    }
}

/// The three agent-facing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Hello,
    WorkRequest,
    WorkResponse,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Hello => "/pnp/HELLO",
            Endpoint::WorkRequest => "/pnp/WORK-REQUEST",
            Endpoint::WorkResponse => "/pnp/WORK-RESPONSE",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Hello => "HELLO",
            Endpoint::WorkRequest => "WORK-REQUEST",
            Endpoint::WorkResponse => "WORK-RESPONSE",
        }
    }
}

/// Outcome of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Empty 200 (HELLO).
    Empty,
    /// Serialized reply envelope.
    Envelope(Vec<u8>),
}

/// Binds endpoints to a `WorkHandler`. Holds no per-exchange state, so one
/// instance serves concurrent requests.
pub struct Dispatcher {
    handler: Arc<dyn WorkHandler>,
}

impl Dispatcher {
    pub fn new(handler: Arc<dyn WorkHandler>) -> Self {
        Self { handler }
    }

    /// Run one request/reply round trip.
    pub async fn exchange(&self, endpoint: Endpoint, body: &[u8]) -> Result<Reply> {
        if endpoint == Endpoint::Hello {
            tracing::debug!("agent hello");
            return Ok(Reply::Empty);
        }

        let request = Envelope::parse(body)?;
        tracing::info!(endpoint = endpoint.as_str(), %request, "agent request");
        tracing::debug!(xml = %String::from_utf8_lossy(body), "agent request body");

        // every reply body carries the correlator of the message it answers
        if request.correlator().is_none() {
            return Err(PnpError::MalformedMessage(format!(
                "{} envelope has no correlator",
                endpoint.as_str()
            )));
        }

        let reply_body = match endpoint {
            Endpoint::WorkRequest => self.handler.handle_work_request(&request).await?,
            Endpoint::WorkResponse => self.handler.handle_work_response(&request).await?,
            Endpoint::Hello => return Ok(Reply::Empty),
        };

        let reply = request.make_reply(reply_body);
        let xml = reply.serialize()?;
        tracing::info!(endpoint = endpoint.as_str(), %reply, "server response");
        tracing::debug!(xml = %String::from_utf8_lossy(&xml), "server response body");

        Ok(Reply::Envelope(xml))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use openpnp_core::services::{bye, device_info, DeviceInfoType};
    use openpnp_core::ErrorCode;

    const REQUEST: &[u8] = br#"<pnp xmlns="urn:cisco:pnp" version="1.0" udi="PID:A,VID:B,SN:C" username="u" password="p">
        <info xmlns="urn:cisco:pnp:work-info" correlator="corr-1"><deviceId/></info>
    </pnp>"#;

    const UNCORRELATED: &[u8] = br#"<pnp xmlns="urn:cisco:pnp" version="1.0" udi="PID:A,VID:B,SN:C">
        <info xmlns="urn:cisco:pnp:work-info"/>
    </pnp>"#;

    struct Unconfigured;
    impl WorkHandler for Unconfigured {}

    struct Inventory;

    #[async_trait]
    impl WorkHandler for Inventory {
        async fn handle_work_request(&self, _request: &Envelope) -> Result<Element> {
            Ok(device_info(DeviceInfoType::All))
        }

        async fn handle_work_response(&self, _response: &Envelope) -> Result<Element> {
            Ok(bye())
        }
    }

    fn reply_envelope(reply: Reply) -> Envelope {
        match reply {
            Reply::Envelope(xml) => Envelope::parse(&xml).unwrap(),
            Reply::Empty => panic!("expected an envelope reply"),
        }
    }

    #[tokio::test]
    async fn hello_ignores_body() {
        let d = Dispatcher::new(Arc::new(Unconfigured));
        assert_eq!(d.exchange(Endpoint::Hello, b"garbage").await.unwrap(), Reply::Empty);
    }

    #[tokio::test]
    async fn default_handlers_are_unimplemented() {
        let d = Dispatcher::new(Arc::new(Unconfigured));
        for endpoint in [Endpoint::WorkRequest, Endpoint::WorkResponse] {
            let err = d.exchange(endpoint, REQUEST).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::Unimplemented);
        }
    }

    #[tokio::test]
    async fn work_request_reply_is_correlated() {
        let d = Dispatcher::new(Arc::new(Inventory));
        let reply = reply_envelope(d.exchange(Endpoint::WorkRequest, REQUEST).await.unwrap());
        assert_eq!(reply.udi(), "PID:A,VID:B,SN:C");
        assert_eq!(reply.username(), Some("u"));
        assert_eq!(reply.password(), Some("p"));
        assert_eq!(reply.correlator(), Some("corr-1"));
        assert_eq!(reply.service(), Some("urn:cisco:pnp:device-info"));
    }

    #[tokio::test]
    async fn work_response_uses_second_handler() {
        let d = Dispatcher::new(Arc::new(Inventory));
        let reply = reply_envelope(d.exchange(Endpoint::WorkResponse, REQUEST).await.unwrap());
        assert_eq!(reply.service(), Some("urn:cisco:pnp:work-info"));
        assert_eq!(reply.correlator(), Some("corr-1"));
    }

    #[tokio::test]
    async fn bad_envelope_fails_only_its_exchange() {
        let d = Dispatcher::new(Arc::new(Inventory));
        let err = d.exchange(Endpoint::WorkRequest, b"<pnp").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedMessage);
        assert!(d.exchange(Endpoint::WorkRequest, REQUEST).await.is_ok());
    }

    #[tokio::test]
    async fn uncorrelated_work_message_is_rejected() {
        let d = Dispatcher::new(Arc::new(Inventory));
        for endpoint in [Endpoint::WorkRequest, Endpoint::WorkResponse] {
            let err = d.exchange(endpoint, UNCORRELATED).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::MalformedMessage);
        }
    }
}
