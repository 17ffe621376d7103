use crate::error::HostError;
use crate::geometry::{Affine2, Point, Rect};
use serde::{Deserialize, Serialize};

/// Visible region of the canvas as reported by the host, in canvas units.
///
/// Hosts may omit any of the values; consumers treat a missing value as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMetrics {
    pub view_left: Option<f64>,
    pub view_top: Option<f64>,
    pub view_width: Option<f64>,
    pub view_height: Option<f64>,
}

impl ViewMetrics {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            view_left: Some(left),
            view_top: Some(top),
            view_width: Some(width),
            view_height: Some(height),
        }
    }
}

/// Viewport geometry of the destination canvas.
pub trait ViewportHost {
    fn view_metrics(&self) -> Result<ViewMetrics, HostError>;

    /// Screen transform of the node-rendering surface, found through the host's own
    /// accessor. `Ok(None)` means the surface exists but exposes no transform.
    fn surface_screen_transform(&self) -> Result<Option<Affine2>, HostError> {
        Err(HostError::Unsupported("surface_screen_transform"))
    }

    /// Same as [`surface_screen_transform`](Self::surface_screen_transform), but locating
    /// the surface by querying the rendered document.
    fn query_surface_screen_transform(&self) -> Result<Option<Affine2>, HostError> {
        Err(HostError::Unsupported("query_surface_screen_transform"))
    }

    /// Bounding box of the rendering surface in screen coordinates.
    fn surface_bounds(&self) -> Result<Rect, HostError> {
        Err(HostError::Unsupported("surface_bounds"))
    }

    /// Current zoom factor.
    fn scale(&self) -> Option<f64> {
        None
    }

    /// Scroll position, consulted when the view metrics lack a left/top.
    fn scroll_offset(&self) -> Option<Point> {
        None
    }
}
