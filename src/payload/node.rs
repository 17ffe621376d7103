use super::field::FieldValue;
use crate::geometry::Point;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name -> value, in the order the host serializer emitted them.
pub type Fields = IndexMap<String, FieldValue>;

/// Input slot name -> attachment, in insertion order.
pub type Inputs = IndexMap<String, Attachment>;

/// One canvas node and everything nested or chained beneath it.
///
/// Keys the crate does not model (ids, collapsed flags, comments, ...) are kept in
/// `extra` so a payload survives a decode/encode cycle without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNode {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: Inputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_state: Option<serde_json::Value>,
    /// Legacy markup carried alongside the tree, used only when the host cannot
    /// materialize trees.
    #[serde(rename = "_legacyXml", default, skip_serializing_if = "Option::is_none")]
    pub legacy_markup: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A connection point holding an optional real node and an optional shadow node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "block", default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Box<SerializedNode>>,
    #[serde(rename = "shadow", default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<SerializedNode>>,
}

impl Attachment {
    pub fn primary(node: SerializedNode) -> Self {
        Self {
            primary: Some(Box::new(node)),
            placeholder: None,
        }
    }

    pub fn placeholder(node: SerializedNode) -> Self {
        Self {
            primary: None,
            placeholder: Some(Box::new(node)),
        }
    }

    pub fn with_placeholder(mut self, node: SerializedNode) -> Self {
        self.placeholder = Some(Box::new(node));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.placeholder.is_none()
    }
}

impl SerializedNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.inputs.insert(name.into(), attachment);
        self
    }

    pub fn with_next(mut self, node: SerializedNode) -> Self {
        self.next = Some(Attachment::primary(node));
        self
    }

    pub fn with_extra_state(mut self, state: serde_json::Value) -> Self {
        self.extra_state = Some(state);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// The node's own position, treating absent coordinates as zero.
    pub fn position(&self) -> Point {
        Point::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// The node that follows this one in its sequential chain.
    pub fn next_node(&self) -> Option<&SerializedNode> {
        self.next.as_ref().and_then(|next| next.primary.as_deref())
    }

    /// Removes and returns the attachment to the following nodes.
    pub fn detach_next(&mut self) -> Option<Attachment> {
        self.next.take()
    }

    /// Reads a boolean flag from `extraState`, `false` when absent or not a boolean.
    pub fn extra_flag(&self, key: &str) -> bool {
        self.extra_state
            .as_ref()
            .and_then(|state| state.get(key))
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}
