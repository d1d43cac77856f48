//! Serialized access to the console backend.
//!
//! The console protocol has no request correlation, so exactly one command may
//! be outstanding at a time. A single actor task owns the backend and drains a
//! FIFO queue of requests; callers hold a cloneable [`SessionHandle`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use rconbridge_logging::{ConsoleEvent, ConsoleEventLogger};

use crate::error::{Result, SessionError};
use crate::traits::ConsoleBackend;

/// Default deadline a caller waits for its reply, queueing included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of requests that may wait in the queue.
const DEFAULT_QUEUE_DEPTH: usize = 64;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub request_timeout: Duration,
    pub queue_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

struct SessionRequest {
    command: String,
    reply_tx: oneshot::Sender<anyhow::Result<String>>,
}

/// Handle to the serialized console session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionRequest>,
    request_timeout: Duration,
}

impl SessionHandle {
    /// Spawn the session actor that owns `backend` and return a handle to it.
    pub fn spawn<B: ConsoleBackend>(backend: B, config: SessionConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        info!(
            backend = backend.name(),
            queue_depth = config.queue_depth,
            timeout_ms = config.request_timeout.as_millis() as u64,
            "Console session started"
        );
        tokio::spawn(run_session(backend, rx));
        Self {
            tx,
            request_timeout: config.request_timeout,
        }
    }

    /// Run one console command and return its raw reply.
    ///
    /// Giving up on the deadline does not cancel a command the backend has
    /// already started; its reply is discarded.
    pub async fn execute(&self, command: &str) -> Result<String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = SessionRequest {
            command: command.to_string(),
            reply_tx,
        };

        let exchange = async {
            self.tx
                .send(request)
                .await
                .map_err(|_| SessionError::Disconnected)?;
            match reply_rx.await {
                Ok(Ok(reply)) => Ok(reply),
                Ok(Err(e)) => Err(SessionError::Backend(format!("{e:#}"))),
                Err(_) => Err(SessionError::Disconnected),
            }
        };

        match tokio::time::timeout(self.request_timeout, exchange).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(command = %command, "Console command timed out");
                Err(SessionError::Timeout(self.request_timeout).into())
            }
        }
    }
}

async fn run_session<B: ConsoleBackend>(mut backend: B, mut rx: mpsc::Receiver<SessionRequest>) {
    while let Some(request) = rx.recv().await {
        if request.reply_tx.is_closed() {
            debug!(command = %request.command, "Caller gave up before dispatch; skipping");
            continue;
        }

        ConsoleEventLogger::log_event(ConsoleEvent::CommandSent {
            command: request.command.clone(),
        });

        let result = backend.command(&request.command).await;
        match &result {
            Ok(reply) => ConsoleEventLogger::log_event(ConsoleEvent::ReplyReceived {
                command: request.command.clone(),
                reply: reply.clone(),
            }),
            Err(e) => ConsoleEventLogger::log_event(ConsoleEvent::Failed {
                command: request.command.clone(),
                error_msg: format!("{e:#}"),
            }),
        }

        if request.reply_tx.send(result).is_err() {
            debug!(command = %request.command, "Reply discarded; caller stopped waiting");
        }
    }
    info!("Console session closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Echo backend that fails the test if two commands ever overlap.
    struct ExclusiveEcho {
        in_flight: Arc<AtomicBool>,
        served: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait]
    impl ConsoleBackend for ExclusiveEcho {
        fn name(&self) -> &str {
            "echo"
        }

        async fn command(&mut self, text: &str) -> anyhow::Result<String> {
            assert!(
                !self.in_flight.swap(true, Ordering::SeqCst),
                "two commands in flight"
            );
            tokio::time::sleep(self.delay).await;
            self.in_flight.store(false, Ordering::SeqCst);
            self.served.fetch_add(1, Ordering::SeqCst);
            if text == "explode" {
                anyhow::bail!("socket reset");
            }
            Ok(format!("reply to {text}"))
        }
    }

    fn echo(delay: Duration) -> (ExclusiveEcho, Arc<AtomicUsize>) {
        let served = Arc::new(AtomicUsize::new(0));
        let backend = ExclusiveEcho {
            in_flight: Arc::new(AtomicBool::new(false)),
            served: served.clone(),
            delay,
        };
        (backend, served)
    }

    #[tokio::test]
    async fn returns_reply_for_command() {
        let (backend, _) = echo(Duration::ZERO);
        let session = SessionHandle::spawn(backend, SessionConfig::default());
        assert_eq!(session.execute("list").await.unwrap(), "reply to list");
    }

    #[tokio::test]
    async fn concurrent_callers_get_their_own_replies() {
        let (backend, served) = echo(Duration::from_millis(2));
        let session = SessionHandle::spawn(backend, SessionConfig::default());

        let mut tasks = Vec::new();
        for i in 0..16 {
            let session = session.clone();
            tasks.push(tokio::spawn(async move {
                let command = format!("cmd-{i}");
                let reply = session.execute(&command).await.unwrap();
                assert_eq!(reply, format!("reply to {command}"));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(served.load(Ordering::SeqCst), 16);
    }

    #[tokio::test]
    async fn backend_failure_surfaces_as_session_error() {
        let (backend, _) = echo(Duration::ZERO);
        let session = SessionHandle::spawn(backend, SessionConfig::default());
        let err = session.execute("explode").await.unwrap_err();
        assert!(matches!(err, BridgeError::Session(SessionError::Backend(ref m)) if m.contains("socket reset")));
        // The session keeps serving after a failed command.
        assert_eq!(session.execute("list").await.unwrap(), "reply to list");
    }

    #[tokio::test]
    async fn slow_reply_times_out_and_session_recovers() {
        let (backend, served) = echo(Duration::from_millis(200));
        let session = SessionHandle::spawn(
            backend,
            SessionConfig {
                request_timeout: Duration::from_millis(20),
                queue_depth: 4,
            },
        );

        let err = session.execute("slow").await.unwrap_err();
        assert!(matches!(err, BridgeError::Session(SessionError::Timeout(_))));
        assert_eq!(err.kind(), "session_timeout");

        // The abandoned command still runs to completion.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(served.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn closed_queue_reports_disconnected() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let session = SessionHandle {
            tx,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        };
        let err = session.execute("list").await.unwrap_err();
        assert!(matches!(err, BridgeError::Session(SessionError::Disconnected)));
    }
}
