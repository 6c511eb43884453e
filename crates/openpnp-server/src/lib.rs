//! openpnp server library entry.
//!
//! This crate wires config, the HTTP transport, the exchange dispatcher and
//! the built-in inventory handler into a PnP server. It is consumed by the
//! binary (`main.rs`), by integration tests, and by applications that bring
//! their own `WorkHandler`.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod router;
pub mod services;
pub mod transport;
