//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nodeclip
//! crate. Import this module to get access to the core functionality without having to
//! import each type individually.

// Entry points
pub use crate::transfer::{
    ClipboardTransfer, CopyReport, MaterializePath, PasteReport, Placement,
};

// Payload model
pub use crate::payload::{
    Attachment, ClipboardPayload, FieldValue, SerializedNode, VariableIdentity, VariableRef,
};

// Host capabilities
pub use crate::host::{
    CanvasHost, CommandRegistry, Materializer, NodeSerializer, OptionCatalog, PointerSource,
    SystemClipboard, VariableRecord, VariableTable, ViewMetrics, ViewportHost,
};

// Geometry
pub use crate::geometry::{Affine2, Point, PointerSample, PointerTracker, Rect, ResolvedPosition};

// Passes
pub use crate::policy::KindPolicy;
pub use crate::reconcile::{ReconcileReport, Registration};
pub use crate::sanitize::{SanitizeReport, Sanitizer};

// Error types
pub use crate::error::{ClipboardError, CopyError, HostError, PasteError, PayloadError};
