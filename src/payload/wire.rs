use super::node::SerializedNode;
use crate::error::PayloadError;
use serde::Deserialize;

/// Prefix that marks clipboard text as legacy markup.
pub const LEGACY_MARKUP_PREFIX: &str = "<xml";

/// The decoded contents of the clipboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardPayload {
    Tree(SerializedNode),
    LegacyMarkup(String),
}

impl ClipboardPayload {
    /// Decodes clipboard text, trying the node tree format first and legacy markup second.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        match decode_tree(text) {
            Ok(root) if !root.kind.is_empty() || root.legacy_markup.is_some() => {
                Ok(ClipboardPayload::Tree(root))
            }
            Ok(_) => Err(PayloadError::Malformed(
                "JSON object carries neither a node type nor legacy markup".to_string(),
            )),
            Err(json_err) => {
                if is_legacy_markup(text) {
                    Ok(ClipboardPayload::LegacyMarkup(text.trim().to_string()))
                } else {
                    Err(PayloadError::Malformed(json_err.to_string()))
                }
            }
        }
    }

    /// Encodes a node tree as the pretty-printed text written on copy.
    pub fn encode(root: &SerializedNode) -> Result<String, PayloadError> {
        serde_json::to_string_pretty(root).map_err(|e| PayloadError::Encode(e.to_string()))
    }
}

/// Nesting grows two levels per chained statement, so the recursion limit is lifted and the
/// stack grows on demand instead.
fn decode_tree(text: &str) -> Result<SerializedNode, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let root = SerializedNode::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(root)
}

pub fn is_legacy_markup(text: &str) -> bool {
    text.trim_start().starts_with(LEGACY_MARKUP_PREFIX)
}
