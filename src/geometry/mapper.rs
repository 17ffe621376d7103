use super::affine::{Affine2, Point};
use super::pointer::{PointerSample, PointerTracker};
use crate::error::HostError;
use crate::host::{ViewMetrics, ViewportHost};
use tracing::debug;

/// Which step of the fallback chain produced a canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStrategy {
    /// No pointer event has been observed yet.
    ViewportCenter,
    /// The pointer was mapped through the inverted surface transform.
    InverseTransform,
    /// The pointer was offset from the surface bounds and divided by the scale.
    ScaledOffset,
    /// The pointer was known but neither mapping had the metrics it needs.
    ViewportFallback,
    /// Nothing could be measured at all.
    Origin,
}

/// A canvas-space position and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub point: Point,
    pub strategy: PositionStrategy,
}

impl ResolvedPosition {
    fn new(point: Point, strategy: PositionStrategy) -> Self {
        Self { point, strategy }
    }
}

/// Maps the last observed pointer position into canvas space.
///
/// Tries, in order: viewport centre when there is no pointer, the inverted surface
/// screen transform, the bounds/scale/scroll approximation, and finally the viewport
/// centre again. The inverse transform handles any pan, zoom or nested scaling; the
/// approximation only holds for uniform scale plus translation.
pub fn resolve_canvas_position<V>(host: &V, pointer: Option<PointerSample>) -> ResolvedPosition
where
    V: ViewportHost + ?Sized,
{
    let Some(sample) = pointer else {
        return viewport_center(host, PositionStrategy::ViewportCenter);
    };
    let screen = sample.screen_point();

    if let Some(inverse) = surface_transform(host).and_then(|ctm| ctm.inverse()) {
        return ResolvedPosition::new(inverse.apply(screen), PositionStrategy::InverseTransform);
    }

    match scaled_offset(host, screen) {
        Ok(point) => ResolvedPosition::new(point, PositionStrategy::ScaledOffset),
        Err(e) => {
            debug!(error = %e, "Surface metrics unavailable, using viewport centre");
            viewport_center(host, PositionStrategy::ViewportFallback)
        }
    }
}

impl PointerTracker {
    /// Resolves this tracker's latest sample against `host`.
    pub fn resolve<V: ViewportHost + ?Sized>(&self, host: &V) -> ResolvedPosition {
        resolve_canvas_position(host, self.latest())
    }
}

fn surface_transform<V: ViewportHost + ?Sized>(host: &V) -> Option<Affine2> {
    let locators: [(&str, fn(&V) -> Result<Option<Affine2>, HostError>); 2] = [
        ("surface", V::surface_screen_transform),
        ("query", V::query_surface_screen_transform),
    ];
    for (locator, locate) in locators {
        match locate(host) {
            Ok(Some(ctm)) => return Some(ctm),
            Ok(None) => debug!(locator, "Surface located but it has no screen transform"),
            Err(e) => debug!(locator, error = %e, "Surface transform locator failed"),
        }
    }
    None
}

fn scaled_offset<V: ViewportHost + ?Sized>(host: &V, screen: Point) -> Result<Point, HostError> {
    let bounds = host.surface_bounds()?;
    let relative = screen - bounds.origin();
    let scale = host
        .scale()
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(1.0);

    let metrics = host.view_metrics().ok();
    let scroll = host.scroll_offset().unwrap_or_default();
    let scroll_x = metrics
        .and_then(|m| m.view_left)
        .unwrap_or(scroll.x);
    let scroll_y = metrics
        .and_then(|m| m.view_top)
        .unwrap_or(scroll.y);

    Ok(Point::new(
        scroll_x + relative.x / scale,
        scroll_y + relative.y / scale,
    ))
}

fn viewport_center<V: ViewportHost + ?Sized>(host: &V, strategy: PositionStrategy) -> ResolvedPosition {
    match host.view_metrics() {
        Ok(metrics) => ResolvedPosition::new(metrics.center(), strategy),
        Err(e) => {
            debug!(error = %e, "View metrics unavailable, using canvas origin");
            ResolvedPosition::new(Point::ORIGIN, PositionStrategy::Origin)
        }
    }
}

impl ViewMetrics {
    /// Centre of the visible viewport, treating missing metrics as zero.
    pub fn center(&self) -> Point {
        Point::new(
            self.view_left.unwrap_or(0.0) + self.view_width.unwrap_or(0.0) / 2.0,
            self.view_top.unwrap_or(0.0) + self.view_height.unwrap_or(0.0) / 2.0,
        )
    }
}
