//! Top-level facade crate for openpnp.
//!
//! Re-exports the protocol layer and the HTTP server so users can depend on a single crate.

pub mod core {
    pub use openpnp_core::*;
}

pub mod server {
    pub use openpnp_server::*;
}
