//! In-memory implementations of the host capabilities, used by the CLI and in tests.

pub mod canvas;
pub mod clipboard;

pub use canvas::*;
pub use clipboard::*;
