//! The copy and paste entry points.
//!
//! A [`ClipboardTransfer`] owns a shared handle to the host canvas, the platform
//! clipboard and the pointer tracker. Copy serializes one node without its successors;
//! paste runs reconciliation, sanitization and repositioning before handing the tree to
//! the host.

use crate::geometry::PointerTracker;
use crate::policy::KindPolicy;
use crate::sanitize::Sanitizer;
use futures::lock::Mutex;
use std::sync::Arc;

mod commands;
mod copy;
mod paste;
mod report;

pub use commands::*;
pub use paste::{materialize, translate};
pub use report::*;

/// Copy/paste pipeline bound to one host canvas and one clipboard.
pub struct ClipboardTransfer<H, C> {
    host: Arc<Mutex<H>>,
    clipboard: C,
    pointer: PointerTracker,
    sanitizer: Sanitizer,
    labels: CommandLabels,
}

pub struct ClipboardTransferBuilder<H, C> {
    host: Arc<Mutex<H>>,
    clipboard: C,
    policy: KindPolicy,
    pointer: Option<PointerTracker>,
    labels: CommandLabels,
}

impl<H, C> ClipboardTransferBuilder<H, C> {
    pub fn new(host: Arc<Mutex<H>>, clipboard: C) -> Self {
        Self {
            host,
            clipboard,
            policy: KindPolicy::default(),
            pointer: None,
            labels: CommandLabels::default(),
        }
    }

    /// Overrides the two identity-sensitive node kinds.
    pub fn with_protected_kinds(mut self, variable_reference_kind: &str, argument_slot_kind: &str) -> Self {
        let prefix = self.policy.variable_field_prefix().to_string();
        self.policy =
            KindPolicy::new(variable_reference_kind, argument_slot_kind).with_variable_field_prefix(&prefix);
        self
    }

    pub fn with_variable_field_prefix(mut self, prefix: &str) -> Self {
        self.policy = self.policy.with_variable_field_prefix(prefix);
        self
    }

    pub fn with_pointer_tracker(mut self, tracker: PointerTracker) -> Self {
        self.pointer = Some(tracker);
        self
    }

    pub fn with_command_labels(mut self, copy: &str, paste: &str) -> Self {
        self.labels = CommandLabels {
            copy: copy.to_string(),
            paste: paste.to_string(),
        };
        self
    }

    pub fn build(self) -> ClipboardTransfer<H, C> {
        ClipboardTransfer {
            host: self.host,
            clipboard: self.clipboard,
            pointer: self.pointer.unwrap_or_default(),
            sanitizer: Sanitizer::new(self.policy),
            labels: self.labels,
        }
    }
}

impl<H, C> ClipboardTransfer<H, C> {
    pub fn builder(host: H, clipboard: C) -> ClipboardTransferBuilder<H, C> {
        ClipboardTransferBuilder::new(Arc::new(Mutex::new(host)), clipboard)
    }

    /// Like [`builder`](Self::builder), for a host the application already shares.
    pub fn builder_shared(host: Arc<Mutex<H>>, clipboard: C) -> ClipboardTransferBuilder<H, C> {
        ClipboardTransferBuilder::new(host, clipboard)
    }

    pub fn host(&self) -> &Arc<Mutex<H>> {
        &self.host
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn policy(&self) -> &KindPolicy {
        self.sanitizer.policy()
    }
}
