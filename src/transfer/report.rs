use crate::geometry::{Point, ResolvedPosition};
use crate::reconcile::ReconcileReport;
use crate::sanitize::SanitizeReport;

/// Outcome of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub node_count: usize,
    /// Length of the text written to the clipboard.
    pub bytes: usize,
    /// `true` when the selected node had successors that were left out.
    pub dropped_successors: bool,
}

/// How the pasted content reached the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializePath {
    /// The repositioned tree was appended.
    Tree,
    /// The host cannot append trees; the payload's legacy markup was used instead.
    LegacyFallback,
    /// The clipboard held legacy markup, appended as is.
    LegacyMarkup,
}

/// Where the pasted root came from and where it went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Point,
    pub target: ResolvedPosition,
    pub offset: Point,
}

/// Outcome of a successful paste.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteReport {
    pub path: MaterializePath,
    pub node_count: usize,
    pub reconcile: ReconcileReport,
    pub sanitize: SanitizeReport,
    /// `None` for legacy markup, which is appended without repositioning.
    pub placement: Option<Placement>,
}

impl PasteReport {
    pub(super) fn legacy_markup() -> Self {
        Self {
            path: MaterializePath::LegacyMarkup,
            node_count: 0,
            reconcile: ReconcileReport::default(),
            sanitize: SanitizeReport::default(),
            placement: None,
        }
    }
}
