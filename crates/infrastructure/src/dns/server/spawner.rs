use kestrel_dns_application::ports::ReplySink;
use kestrel_dns_application::use_cases::HandleQueryUseCase;
use kestrel_dns_domain::DecodeErrorPolicy;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::warn;

/// Runs every received message as its own task.
///
/// Receive loops call [`spawn`](Self::spawn) and go straight back to
/// reading. With an in-flight limit, surplus tasks wait for a permit inside
/// the task, never in the receive loop.
#[derive(Clone)]
pub struct QueryTaskSpawner {
    use_case: Arc<HandleQueryUseCase>,
    decode_error_policy: DecodeErrorPolicy,
    in_flight: Option<Arc<Semaphore>>,
}

impl QueryTaskSpawner {
    pub fn new(
        use_case: Arc<HandleQueryUseCase>,
        decode_error_policy: DecodeErrorPolicy,
        max_in_flight: Option<usize>,
    ) -> Self {
        Self {
            use_case,
            decode_error_policy,
            in_flight: max_in_flight.map(|limit| Arc::new(Semaphore::new(limit))),
        }
    }

    pub fn spawn<S>(&self, sink: Arc<S>, data: Vec<u8>, peer: SocketAddr) -> JoinHandle<()>
    where
        S: ReplySink + 'static,
    {
        let use_case = Arc::clone(&self.use_case);
        let in_flight = self.in_flight.clone();
        let policy = self.decode_error_policy;

        tokio::spawn(async move {
            let _permit = match in_flight {
                Some(semaphore) => match semaphore.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(_) => return,
                },
                None => None,
            };

            if let Err(e) = use_case.execute(sink.as_ref(), &data, peer).await {
                if policy == DecodeErrorPolicy::Log {
                    warn!(
                        protocol = sink.protocol().as_str(),
                        client = %peer,
                        bytes = data.len(),
                        error = %e,
                        "Dropping message"
                    );
                }
            }
        })
    }
}
