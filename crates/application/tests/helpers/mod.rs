mod log_capture;
mod messages;
mod mock_resolver;
mod recording_sink;

pub use log_capture::LogCapture;
pub use messages::*;
pub use mock_resolver::MockDnsResolver;
pub use recording_sink::RecordingSink;
