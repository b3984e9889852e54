pub use crate::models::editor_models::EditorState;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use once_cell::sync::OnceCell;
use tokio::time::sleep;
use tracing::debug;

use crate::models::config_models::EditorConfig;
use crate::models::language_models::EditorLanguage;
use crate::services::channel_services::channel_client_service::ChannelCallbacks;
use crate::services::editor_services::CodeBroadcaster;
use crate::services::language_services::language_sniffer_service::infer_language;

/// The only mutator of the local buffer and language selection. Local edits
/// apply immediately and broadcast after a short debounce window; remote
/// frames overwrite unconditionally and are never re-broadcast, which is
/// what keeps two bound peers from echoing updates back and forth.
#[derive(Clone)]
pub struct EditorBinding {
    state: Arc<StdMutex<EditorState>>,
    broadcaster: Arc<OnceCell<Arc<dyn CodeBroadcaster>>>,
    debounce: Duration,
    flush_scheduled: Arc<AtomicBool>,
}

impl EditorBinding {
    pub fn new(config: &EditorConfig) -> Self {
        let language = EditorLanguage::JavaScript;
        Self {
            state: Arc::new(StdMutex::new(EditorState {
                code: language.template().to_owned(),
                language,
            })),
            broadcaster: Arc::new(OnceCell::new()),
            debounce: Duration::from_millis(config.debounce_ms),
            flush_scheduled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attaches the outbound side. Until bound, edits stay local.
    pub fn bind(&self, broadcaster: Arc<dyn CodeBroadcaster>) {
        if self.broadcaster.set(broadcaster).is_err() {
            debug!("editor binding already bound, ignoring");
        }
    }

    /// Channel callbacks that route inbound frames into this binding.
    pub fn callbacks(&self) -> ChannelCallbacks {
        let code_binding = self.clone();
        let language_binding = self.clone();
        ChannelCallbacks::new(
            move |code| code_binding.on_remote(&code),
            move |language| language_binding.set_language(language),
        )
    }

    /// Local keystroke path: the editing surface never waits on the network.
    /// Broadcasts coalesce inside the debounce window; the wire format is
    /// still the full buffer.
    pub fn on_local_edit(&self, text: &str) {
        self.state.lock().unwrap().code = text.to_owned();
        self.schedule_flush();
    }

    /// Remote frame path: remote always wins, no merge. The language moves
    /// only when the buffer carries a recognized marker.
    pub fn on_remote(&self, code: &str) {
        let mut state = self.state.lock().unwrap();
        state.code = code.to_owned();
        if let Some(language) = infer_language(code) {
            state.language = language;
        }
    }

    pub fn set_language(&self, language: EditorLanguage) {
        self.state.lock().unwrap().language = language;
    }

    /// Explicit selector switch: replace the buffer with the language
    /// template and broadcast it immediately so every participant lands on
    /// the same starting point.
    pub async fn switch_language(&self, language: EditorLanguage) {
        let template = language.template();
        {
            let mut state = self.state.lock().unwrap();
            state.code = template.to_owned();
            state.language = language;
        }
        if let Some(broadcaster) = self.broadcaster.get() {
            broadcaster.broadcast(template).await;
        }
    }

    pub fn current_code(&self) -> String {
        self.state.lock().unwrap().code.clone()
    }

    pub fn current_language(&self) -> EditorLanguage {
        self.state.lock().unwrap().language
    }

    fn schedule_flush(&self) {
        if self.flush_scheduled.swap(true, Ordering::SeqCst) {
            return;
        }
        let binding = self.clone();
        tokio::spawn(async move {
            sleep(binding.debounce).await;
            binding.flush_scheduled.store(false, Ordering::SeqCst);
            let code = binding.current_code();
            if let Some(broadcaster) = binding.broadcaster.get() {
                broadcaster.broadcast(&code).await;
            }
        });
    }
}
