pub use crate::models::channel_models::{
    ChannelError, InboundMessage, MessageKind, OutboundMessage, SocketState,
};

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::models::config_models::RelayConfig;
use crate::models::language_models::EditorLanguage;
use crate::services::editor_services::CodeBroadcaster;
use crate::services::language_services::language_sniffer_service::infer_language;
use crate::utils::helper_utils::sanitize_code_content;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Subscriber half of a channel: the code callback fires for every decoded
/// frame, the language callback only when the sniffer recognizes a marker.
#[derive(Clone)]
pub struct ChannelCallbacks {
    pub on_code: Arc<dyn Fn(String) + Send + Sync>,
    pub on_language: Arc<dyn Fn(EditorLanguage) + Send + Sync>,
}

impl ChannelCallbacks {
    pub fn new(
        on_code: impl Fn(String) + Send + Sync + 'static,
        on_language: impl Fn(EditorLanguage) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_code: Arc::new(on_code),
            on_language: Arc::new(on_language),
        }
    }
}

/// One live relay connection, scoped to one session id for its lifetime.
/// Owns the socket exclusively; there is no shared module-level connection.
pub struct SessionChannel {
    session_id: String,
    state: Arc<AtomicU8>,
    sink: Arc<Mutex<WsSink>>,
    shutdown: CancellationToken,
    done: CancellationToken,
}

impl SessionChannel {
    /// Connects to the relay endpoint for `session_id` and starts the reader
    /// task. Delivery only works with a non-empty session id; the relay does
    /// not route frames for an empty room.
    pub async fn open(
        relay: &RelayConfig,
        session_id: &str,
        callbacks: ChannelCallbacks,
    ) -> Result<Self, ChannelError> {
        if session_id.is_empty() {
            warn!("opening channel with empty session id, relay will not route updates");
        }
        let url = relay.ws_url(session_id);
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(ChannelError::Connect)?;
        info!(session_id, "channel connected");

        let (sink, source) = stream.split();
        let state = Arc::new(AtomicU8::new(SocketState::Open as u8));
        let shutdown = CancellationToken::new();
        let done = CancellationToken::new();

        tokio::spawn(read_loop(
            source,
            state.clone(),
            callbacks,
            shutdown.clone(),
            done.clone(),
        ));

        Ok(Self {
            session_id: session_id.to_owned(),
            state,
            sink: Arc::new(Mutex::new(sink)),
            shutdown,
            done,
        })
    }

    /// Broadcasts the full current buffer. A silent no-op unless the channel
    /// is OPEN: at-most-once, no queueing — the next edit re-sends the whole
    /// buffer anyway.
    pub async fn send(&self, code: &str) {
        if self.state() != SocketState::Open {
            debug!(session_id = %self.session_id, "channel not open, dropping update");
            return;
        }
        let frame = OutboundMessage {
            session_id: self.session_id.clone(),
            kind: MessageKind::CodeUpdate,
            content: code.to_owned(),
        };
        let json = match serde_json::to_string(&frame) {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, "could not encode code update");
                return;
            }
        };
        let mut sink = self.sink.lock().await;
        if let Err(error) = sink.send(Message::text(json)).await {
            warn!(%error, "relay send failed, marking channel closed");
            self.state.store(SocketState::Closed as u8, Ordering::SeqCst);
        }
    }

    /// Idempotent teardown: the first call sends a close frame and stops the
    /// reader, later calls return immediately.
    pub async fn close(&self) {
        let transition = self.state.compare_exchange(
            SocketState::Open as u8,
            SocketState::Closing as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        if transition.is_err() {
            return;
        }
        self.shutdown.cancel();
        let mut sink = self.sink.lock().await;
        if let Err(error) = sink.send(Message::Close(None)).await {
            debug!(%error, "close frame not delivered");
        }
        let _ = sink.close().await;
        self.state.store(SocketState::Closed as u8, Ordering::SeqCst);
        info!(session_id = %self.session_id, "channel closed");
    }

    pub fn state(&self) -> SocketState {
        SocketState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Token cancelled when the reader task exits, whether by explicit close
    /// or transport drop. The reconnect supervisor watches this.
    pub fn closed_token(&self) -> CancellationToken {
        self.done.clone()
    }
}

async fn read_loop(
    mut source: WsSource,
    state: Arc<AtomicU8>,
    callbacks: ChannelCallbacks,
    shutdown: CancellationToken,
    done: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => dispatch_frame(text.as_str(), &callbacks),
                Some(Ok(Message::Close(_))) => {
                    info!("relay closed the channel");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    warn!(%error, "channel transport error");
                    break;
                }
                None => break,
            },
        }
    }
    state.store(SocketState::Closed as u8, Ordering::SeqCst);
    done.cancel();
}

/// Decodes one relay frame and fans it into the callbacks. Malformed frames
/// are logged and dropped; they must never take the editor down.
fn dispatch_frame(raw: &str, callbacks: &ChannelCallbacks) {
    let text = sanitize_code_content(raw);
    match serde_json::from_str::<InboundMessage>(&text) {
        Ok(message) => {
            // fullCode and codeUpdate both carry the entire buffer
            if let Some(language) = infer_language(&message.code) {
                (callbacks.on_language)(language);
            }
            (callbacks.on_code)(message.code);
        }
        Err(error) => {
            warn!(%error, "dropping malformed relay frame");
        }
    }
}

impl SocketState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SocketState::Connecting,
            1 => SocketState::Open,
            2 => SocketState::Closing,
            _ => SocketState::Closed,
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Connect(error) => write!(f, "relay connect failed: {}", error),
        }
    }
}

impl Error for ChannelError {}

#[async_trait::async_trait]
impl CodeBroadcaster for SessionChannel {
    async fn broadcast(&self, code: &str) {
        self.send(code).await;
    }
}
