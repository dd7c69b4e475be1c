#![allow(dead_code)]
pub mod builders;
pub mod dns_server_mock;

pub use builders::*;
pub use dns_server_mock::{MockDnsServer, UpstreamBehavior};
