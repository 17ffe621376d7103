use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value as the host serializer emits it.
///
/// Variants are tried in order when decoding, so a bare string is always `Text` and an
/// object is a `Variable` only when it carries a `name` and no keys beyond `id` (or
/// `identity`), `name` and `type`. Anything else (numbers, booleans, other objects) is
/// carried through as `Other` and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Variable(VariableRef),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The variable name this value refers to, for plain or structured references.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Variable(var) => Some(&var.name),
            FieldValue::Other(_) => None,
        }
    }

    /// The declared variable type. Plain-name references have no type.
    pub fn variable_type(&self) -> &str {
        match self {
            FieldValue::Variable(var) => &var.var_type,
            _ => "",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<VariableRef> for FieldValue {
    fn from(value: VariableRef) -> Self {
        FieldValue::Variable(value)
    }
}

/// The structured form of a variable reference: `{id, name, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableRef {
    #[serde(default, alias = "identity", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: String,
}

impl VariableRef {
    pub fn new(name: impl Into<String>, var_type: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            var_type: var_type.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.var_type.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.var_type)
        }
    }
}
