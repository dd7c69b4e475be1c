//! Listening side of the server: one UDP endpoint per bind address, one TCP
//! listener per bind address, all feeding the same query use case.

pub mod bootstrap;
pub mod socket;
pub mod spawner;
pub mod tcp;
pub mod udp;

pub use bootstrap::{start_server, start_server_with_resolver, ServerHandles, ServerOptions};
pub use spawner::QueryTaskSpawner;
pub use tcp::{TcpHandler, TcpServerHandle};
pub use udp::{UdpEndpointHandle, UdpHandler};
