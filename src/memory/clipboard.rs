use crate::error::ClipboardError;
use crate::host::SystemClipboard;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// A process-local clipboard. Reading an empty clipboard yields an empty string.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
    deny_reads: bool,
    deny_writes: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
            ..Self::default()
        }
    }

    pub fn deny_reads(mut self) -> Self {
        self.deny_reads = true;
        self
    }

    pub fn deny_writes(mut self) -> Self {
        self.deny_writes = true;
        self
    }

    pub fn contents(&self) -> Option<String> {
        self.slot().clone()
    }

    pub fn set_contents(&self, text: impl Into<String>) {
        *self.slot() = Some(text.into());
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        match self.text.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl SystemClipboard for MemoryClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        if self.deny_reads {
            return Err(ClipboardError::Denied("read".to_string()));
        }
        Ok(self.slot().clone().unwrap_or_default())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.deny_writes {
            return Err(ClipboardError::Denied("write".to_string()));
        }
        *self.slot() = Some(text.to_string());
        Ok(())
    }
}
