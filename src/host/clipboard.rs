use crate::error::ClipboardError;
use async_trait::async_trait;

/// The platform's asynchronous text clipboard.
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    async fn read_text(&self) -> Result<String, ClipboardError>;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
