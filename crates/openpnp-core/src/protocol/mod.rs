//! PnP wire protocol: envelope framing and device identifiers.
//!
//! Every exchange is one `pnp` envelope in each direction. Parsers never
//! panic: malformed input is reported as `PnpError::MalformedMessage` (or
//! `MalformedUdi`) so a bad agent request only fails its own exchange.

pub mod envelope;
pub mod udi;

pub use envelope::Envelope;
pub use udi::Udi;

/// Namespace of the `pnp` envelope root.
pub const PNP_NAMESPACE: &str = "urn:cisco:pnp";

/// Value of the envelope `version` attribute.
pub const PROTOCOL_VERSION: &str = "1.0";
