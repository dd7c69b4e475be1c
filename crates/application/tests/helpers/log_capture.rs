use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Collects the rendered message of every event emitted under one target.
#[derive(Clone)]
pub struct LogCapture {
    target: &'static str,
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    /// Installs the capture as the default subscriber of the current thread
    /// until the returned guard is dropped.
    pub fn install(target: &'static str) -> (Self, DefaultGuard) {
        let capture = Self {
            target,
            lines: Arc::new(Mutex::new(Vec::new())),
        };
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != self.target {
            return;
        }
        let mut message = MessageField::default();
        event.record(&mut message);
        self.lines.lock().unwrap().push(message.0);
    }
}

#[derive(Default)]
struct MessageField(String);

impl Visit for MessageField {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
