//! Kestrel DNS Infrastructure Layer
//!
//! Adapters behind the application ports: the in-memory cache, the
//! forwarding resolver and its upstream transports, and the UDP/TCP
//! listeners.
pub mod dns;
