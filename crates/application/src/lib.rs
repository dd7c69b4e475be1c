//! Kestrel DNS Application Layer
//!
//! Ports the infrastructure implements (resolver, cache, reply delivery) and
//! the transport-agnostic query handling use case.
pub mod codec;
pub mod ports;
pub mod use_cases;
