//! Transport layer (HTTP).
//!
//! The agent calls home over plain HTTP POSTs; bodies are passed through to
//! the dispatcher untouched.

pub mod http;
