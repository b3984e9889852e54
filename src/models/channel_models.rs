use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    FullCode,
    CodeUpdate,
}

// PRIMARY STRUCTURE FOR RELAY FRAMES (inbound)
//
// The relay historically named the text field "code" on fan-out but "content"
// on ingest; the alias accepts either spelling so the client keeps working
// against both relay generations.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(alias = "content")]
    pub code: String,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

/***
 * Example frame (as JSON), relay -> client:
 * {
 *   "type": "codeUpdate",
 *   "code": "def solution(n):\n    return n * n\n"
 * }
 *
 * Client -> relay:
 * {
 *   "sessionId": "abc123",
 *   "type": "codeUpdate",
 *   "content": "def solution(n):\n    return n * n\n"
 * }
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SocketState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

#[derive(Debug)]
pub enum ChannelError {
    Connect(tokio_tungstenite::tungstenite::Error),
}
