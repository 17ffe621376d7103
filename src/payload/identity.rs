use super::field::VariableRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable referenced by a pasted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: String,
    #[serde(default)]
    pub is_object_var: bool,
}

/// Deduplication key of a [`VariableIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Id(String),
    Named { name: String, var_type: String },
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Id(id) => write!(f, "{}", id),
            IdentityKey::Named { name, var_type } => write!(f, "{}::{}", name, var_type),
        }
    }
}

impl VariableIdentity {
    /// An untyped identity known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            var_type: String::new(),
            is_object_var: false,
        }
    }

    pub fn from_ref(var: &VariableRef, is_object_var: bool) -> Self {
        Self {
            id: var.id.clone(),
            name: var.name.clone(),
            var_type: var.var_type.clone(),
            is_object_var,
        }
    }

    pub fn with_type(mut self, var_type: impl Into<String>) -> Self {
        self.var_type = var_type.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn key(&self) -> IdentityKey {
        match &self.id {
            Some(id) => IdentityKey::Id(id.clone()),
            None => IdentityKey::Named {
                name: self.name.clone(),
                var_type: self.var_type.clone(),
            },
        }
    }
}
