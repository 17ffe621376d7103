use crate::error::HostError;
use crate::geometry::PointerSample;
use crate::payload::SerializedNode;

/// Serializes a live node of type `N` together with its whole subtree.
pub trait NodeSerializer<N: ?Sized> {
    fn serialize_node(&self, node: &N) -> Result<SerializedNode, HostError>;
}

/// Instantiates pasted content as live nodes.
pub trait Materializer {
    fn append_tree(&mut self, _root: &SerializedNode) -> Result<(), HostError> {
        Err(HostError::Unsupported("append_tree"))
    }

    fn append_legacy_markup(&mut self, _markup: &str) -> Result<(), HostError> {
        Err(HostError::Unsupported("append_legacy_markup"))
    }
}

pub type PointerListener = Box<dyn Fn(PointerSample) + Send + Sync>;

/// Source of pointer-move events over the rendering surface.
pub trait PointerSource {
    fn subscribe_pointer_moves(&mut self, listener: PointerListener) -> Result<(), HostError>;
}
