pub mod editor_binding_service;

use async_trait::async_trait;

/// Seam between the editor binding and whatever carries updates to the other
/// participants. Channels implement it; tests substitute a recorder.
#[async_trait]
pub trait CodeBroadcaster: Send + Sync {
    async fn broadcast(&self, code: &str);
}
