use crate::error::HostError;
use crate::payload::VariableIdentity;
use serde::{Deserialize, Serialize};

/// A variable as recorded in the destination's variable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: String,
    #[serde(default)]
    pub is_object_var: bool,
}

impl VariableRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, var_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            var_type: var_type.into(),
            is_object_var: false,
        }
    }
}

/// The destination canvas's variable table.
///
/// Every method is an optional API variant. Lookups return `Ok(None)` when the variable is
/// absent. The crate only ever reads and appends; nothing is renamed or deleted.
pub trait VariableTable {
    fn variable_by_id(&self, _id: &str) -> Result<Option<VariableRecord>, HostError> {
        Err(HostError::Unsupported("variable_by_id"))
    }

    /// The table's general-purpose lookup by name.
    fn lookup_variable(&self, _name: &str) -> Result<Option<VariableRecord>, HostError> {
        Err(HostError::Unsupported("lookup_variable"))
    }

    /// A dedicated by-name lookup offered by some table versions.
    fn variable_by_name(&self, _name: &str) -> Result<Option<VariableRecord>, HostError> {
        Err(HostError::Unsupported("variable_by_name"))
    }

    /// Creates a variable keeping the incoming id (when it has one) and object flag.
    fn create_variable_with_id(
        &mut self,
        _identity: &VariableIdentity,
    ) -> Result<VariableRecord, HostError> {
        Err(HostError::Unsupported("create_variable_with_id"))
    }

    /// Creates a variable from a name and a type; the table assigns the id.
    fn create_variable(&mut self, _name: &str, _var_type: &str) -> Result<VariableRecord, HostError> {
        Err(HostError::Unsupported("create_variable"))
    }
}
