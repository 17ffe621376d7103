//! # Nodeclip - Copy and Paste for Node Canvases
//!
//! **Nodeclip** moves a node and everything nested inside it between visual programming
//! canvases through the system clipboard. The destination may be another project, where
//! variables and dropdown options differ from the source, so a paste never trusts the
//! payload blindly.
//!
//! ## Core Workflow
//!
//! The crate is host-agnostic. It talks to a canvas only through the traits in [`host`],
//! and every optional API variant has a default "unsupported" implementation. The
//! primary workflow is:
//!
//! 1.  **Implement the host traits**: [`host::ViewportHost`], [`host::VariableTable`],
//!     [`host::OptionCatalog`], [`host::Materializer`] and [`host::NodeSerializer`] for your
//!     canvas, plus [`host::SystemClipboard`] for the platform clipboard.
//! 2.  **Build a transfer**: `ClipboardTransfer::builder(host, clipboard).build()`.
//! 3.  **Install the commands**: [`ClipboardTransfer::install`] registers "Copy Node" and
//!     "Paste Node" and starts tracking the pointer.
//! 4.  **Copy and paste**: copy serializes one node without its successors; paste
//!     reconciles variables, sanitizes fields, moves the tree under the pointer and
//!     appends it.
//!
//! ## Quick Start
//!
//! The following example uses the in-memory host that ships with the crate.
//!
//! ```rust,no_run
//! use nodeclip::prelude::*;
//! use nodeclip::memory::{MemoryCanvas, MemoryClipboard};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let canvas = MemoryCanvas::new()
//!         .with_metrics(ViewMetrics::new(0.0, 0.0, 800.0, 600.0))
//!         .with_kind("setHealth");
//!     let transfer = ClipboardTransfer::builder(canvas, MemoryClipboard::new()).build();
//!
//!     let node = SerializedNode::new("setHealth")
//!         .with_field("VAR", VariableRef::new("Health", "Number"))
//!         .at(40.0, 40.0);
//!
//!     futures::executor::block_on(async {
//!         transfer.copy(&node).await?;
//!         let report = transfer.paste().await?;
//!         println!("Pasted {} node(s) via {:?}", report.node_count, report.path);
//!         Ok::<_, Box<dyn std::error::Error>>(())
//!     })?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod geometry;
pub mod host;
pub mod memory;
pub mod payload;
pub mod policy;
pub mod prelude;
pub mod reconcile;
pub mod sanitize;
pub mod transfer;
pub mod traverse;

pub use transfer::{ClipboardTransfer, ClipboardTransferBuilder};
