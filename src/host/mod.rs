//! Capabilities consumed from the host canvas and the platform.
//!
//! Hosts differ in which API variants they ship, so optional variants are trait methods
//! whose default implementation reports [`HostError::Unsupported`](crate::error::HostError).
//! The pipeline tries the variants in a fixed order and callers never pick one.

pub mod canvas;
pub mod catalog;
pub mod clipboard;
pub mod commands;
pub mod variables;
pub mod viewport;

pub use canvas::*;
pub use catalog::*;
pub use clipboard::*;
pub use commands::*;
pub use variables::*;
pub use viewport::*;

/// Everything the paste pipeline needs from a destination canvas.
pub trait CanvasHost: ViewportHost + VariableTable + OptionCatalog + Materializer {}

impl<T> CanvasHost for T where T: ViewportHost + VariableTable + OptionCatalog + Materializer {}
