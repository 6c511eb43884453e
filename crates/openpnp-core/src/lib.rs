//! openpnp core: the Cisco Plug-and-Play message layer.
//!
//! This crate defines the envelope model, the per-service body codecs and the
//! error surface shared by the server and by embedding applications. It
//! carries no transport or runtime dependencies so it can be reused with any
//! HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PnpError`/`Result` so a malformed
//! agent message fails its own exchange and nothing else.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod services;
pub mod xml;

/// Shared result type.
pub use error::{ErrorCode, PnpError, Result};
pub use protocol::{Envelope, Udi};
pub use xml::Element;
