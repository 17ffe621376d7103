use super::affine::Point;
use crate::error::HostError;
use crate::host::PointerSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// A pointer-move event in screen (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerSample {
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    pub fn screen_point(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// Last-known pointer position shared between the movement listener and the
/// position resolver. Clones share the same slot.
///
/// The listener is the only writer and every write replaces the previous sample.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    latest: Arc<RwLock<Option<PointerSample>>>,
    attached: Arc<AtomicBool>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sample: PointerSample) {
        let mut slot = match self.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(sample);
    }

    /// The most recent sample, `None` if the pointer has never moved over the surface.
    pub fn latest(&self) -> Option<PointerSample> {
        match self.latest.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Subscribes this tracker to `source`'s pointer moves.
    ///
    /// Returns `Ok(false)` without subscribing again when already attached.
    pub fn attach<P: PointerSource + ?Sized>(&self, source: &mut P) -> Result<bool, HostError> {
        if self.attached.swap(true, Ordering::AcqRel) {
            return Ok(false);
        }
        let tracker = self.clone();
        match source.subscribe_pointer_moves(Box::new(move |sample| tracker.record(sample))) {
            Ok(()) => Ok(true),
            Err(e) => {
                self.attached.store(false, Ordering::Release);
                Err(e)
            }
        }
    }
}
