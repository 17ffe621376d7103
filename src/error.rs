use thiserror::Error;

/// Errors reported by a host capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Host capability '{0}' is not available")]
    Unsupported(&'static str),

    #[error("Node kind '{0}' is not known to the host")]
    UnknownKind(String),

    #[error("Node kind '{kind}' has no field named '{field}'")]
    UnknownField { kind: String, field: String },

    #[error("Host rejected the request: {0}")]
    Rejected(String),
}

impl HostError {
    /// `true` when the error only means "this API variant does not exist here".
    pub fn is_unsupported(&self) -> bool {
        matches!(self, HostError::Unsupported(_))
    }
}

/// Errors raised by the platform clipboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard access was denied: {0}")]
    Denied(String),

    #[error("Clipboard is unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while decoding or encoding a clipboard payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Clipboard text is neither a node tree nor legacy markup: {0}")]
    Malformed(String),

    #[error("Failed to encode node tree: {0}")]
    Encode(String),
}

/// Errors that abort a copy. The clipboard is left untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("Failed to serialize the selected node: {0}")]
    Serialize(HostError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("Failed to write to the clipboard: {0}")]
    Clipboard(ClipboardError),
}

/// Errors that abort a paste.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasteError {
    #[error("Failed to read from the clipboard: {0}")]
    Clipboard(ClipboardError),

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("Host could not materialize legacy markup: {0}")]
    LegacyMarkup(HostError),

    #[error("Host failed to materialize the pasted tree: {0}")]
    Materialize(HostError),

    #[error("No materialization path available")]
    NoMaterializationPath,
}
