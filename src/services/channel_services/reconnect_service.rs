use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::models::channel_models::{ChannelError, SocketState};
use crate::models::config_models::{ReconnectConfig, RelayConfig};
use crate::services::channel_services::channel_client_service::{
    ChannelCallbacks, SessionChannel,
};
use crate::services::editor_services::CodeBroadcaster;

/// Channel wrapper that re-opens the connection with capped exponential
/// backoff when the transport drops, and replays the last locally known
/// buffer after a reconnect so every participant converges again.
///
/// An explicit `close` stops the supervisor; only transport-initiated drops
/// are retried.
#[derive(Clone)]
pub struct SupervisedChannel {
    inner: Arc<RwLock<Option<SessionChannel>>>,
    last_buffer: Arc<StdMutex<Option<String>>>,
    shutdown: CancellationToken,
}

impl SupervisedChannel {
    pub async fn connect(
        relay: RelayConfig,
        policy: ReconnectConfig,
        session_id: String,
        callbacks: ChannelCallbacks,
    ) -> Result<Self, ChannelError> {
        let first = SessionChannel::open(&relay, &session_id, callbacks.clone()).await?;
        let inner = Arc::new(RwLock::new(Some(first)));
        let last_buffer = Arc::new(StdMutex::new(None));
        let shutdown = CancellationToken::new();

        tokio::spawn(supervise(
            relay,
            policy,
            session_id,
            callbacks,
            inner.clone(),
            last_buffer.clone(),
            shutdown.clone(),
        ));

        Ok(Self {
            inner,
            last_buffer,
            shutdown,
        })
    }

    /// Remembers the buffer for replay-on-reconnect, then forwards it to the
    /// live channel if there is one. During a reconnect window this degrades
    /// to the same best-effort no-op as a closed channel.
    pub async fn send(&self, code: &str) {
        *self.last_buffer.lock().unwrap() = Some(code.to_owned());
        if let Some(channel) = self.inner.read().await.as_ref() {
            channel.send(code).await;
        }
    }

    pub async fn state(&self) -> SocketState {
        match self.inner.read().await.as_ref() {
            Some(channel) => channel.state(),
            None => SocketState::Connecting,
        }
    }

    pub async fn close(&self) {
        self.shutdown.cancel();
        if let Some(channel) = self.inner.read().await.as_ref() {
            channel.close().await;
        }
    }
}

async fn supervise(
    relay: RelayConfig,
    policy: ReconnectConfig,
    session_id: String,
    callbacks: ChannelCallbacks,
    inner: Arc<RwLock<Option<SessionChannel>>>,
    last_buffer: Arc<StdMutex<Option<String>>>,
    shutdown: CancellationToken,
) {
    loop {
        let closed = match inner.read().await.as_ref() {
            Some(channel) => channel.closed_token(),
            None => return,
        };
        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = closed.cancelled() => {}
        }
        if shutdown.is_cancelled() {
            return;
        }
        warn!(%session_id, "channel dropped, reconnecting");
        *inner.write().await = None;

        let mut backoff = Duration::from_millis(policy.initial_backoff_ms);
        let mut attempt = 0u32;
        let channel = loop {
            attempt += 1;
            if attempt > policy.max_retries {
                error!(%session_id, "giving up after {} reconnect attempts", policy.max_retries);
                return;
            }
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = sleep(backoff) => {}
            }
            backoff = (backoff * 2).min(Duration::from_millis(policy.max_backoff_ms));
            match SessionChannel::open(&relay, &session_id, callbacks.clone()).await {
                Ok(channel) => break channel,
                Err(error) => warn!(%error, attempt, "reconnect attempt failed"),
            }
        };

        // Late joiners and reconnectors converge on the last local buffer.
        let replay = last_buffer.lock().unwrap().clone();
        if let Some(code) = replay {
            channel.send(&code).await;
        }
        info!(%session_id, "channel reconnected");
        *inner.write().await = Some(channel);
    }
}

#[async_trait::async_trait]
impl CodeBroadcaster for SupervisedChannel {
    async fn broadcast(&self, code: &str) {
        self.send(code).await;
    }
}
