//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and the handler trait so embedding applications
//! can depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Endpoint, Reply, WorkHandler};
