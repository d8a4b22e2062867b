//! Session module
//!
//! Holds the bearer token the transport attaches to every request.
//!
//! The token lives in an explicitly passed [`Session`] handle instead of
//! ambient global state. Clones share the same slot, so the transport can
//! evict the token on a 401 and every other holder observes it.

mod store;

pub use store::Session;
