//! Common test utilities for building payloads and destination canvases.
use nodeclip::memory::{MemoryCanvas, MemoryClipboard};
use nodeclip::prelude::*;

/// The payload a user copies from a "move" node that writes the `Health` variable.
#[allow(dead_code)]
pub const HEALTH_PAYLOAD_JSON: &str = r#"{
    "type": "move",
    "fields": {
        "VAR": { "identity": null, "name": "Health", "type": "Number" }
    },
    "x": 100,
    "y": 50
}"#;

#[allow(dead_code)]
pub const LEGACY_MARKUP: &str = r#"<xml xmlns="https://developers.google.com/blockly/xml"><block type="move"/></xml>"#;

/// A tree touching every attachment shape, kinds named in visiting order.
///
/// ```text
/// a
/// ├─ COND: b
/// │        └─ LHS: c (shadow d)
/// ├─ DO:   e -> f -> g
/// next: h
/// ```
#[allow(dead_code)]
pub fn create_nested_tree() -> SerializedNode {
    let c_slot = Attachment::primary(SerializedNode::new("c")).with_placeholder(SerializedNode::new("d"));
    let b = SerializedNode::new("b").with_input("LHS", c_slot);
    let e = SerializedNode::new("e").with_next(SerializedNode::new("f").with_next(SerializedNode::new("g")));

    SerializedNode::new("a")
        .with_input("COND", Attachment::primary(b))
        .with_input("DO", Attachment::primary(e))
        .with_next(SerializedNode::new("h"))
}

#[allow(dead_code)]
pub fn create_health_node() -> SerializedNode {
    SerializedNode::new("move")
        .with_field("VAR", VariableRef::new("Health", "Number"))
        .at(100.0, 50.0)
}

/// A destination whose surface transform is the identity, with an 800x600 viewport.
#[allow(dead_code)]
pub fn create_identity_canvas() -> MemoryCanvas {
    MemoryCanvas::new()
        .with_metrics(ViewMetrics::new(0.0, 0.0, 800.0, 600.0))
        .with_transform(Affine2::IDENTITY)
        .with_kind("move")
}

#[allow(dead_code)]
pub fn create_transfer(canvas: MemoryCanvas, clipboard: MemoryClipboard) -> ClipboardTransfer<MemoryCanvas, MemoryClipboard> {
    ClipboardTransfer::builder(canvas, clipboard).build()
}

/// Kinds of every node in visiting order.
#[allow(dead_code)]
pub fn kinds(root: &SerializedNode) -> Vec<String> {
    nodeclip::traverse::collect(root)
        .into_iter()
        .map(|node| node.kind.clone())
        .collect()
}
