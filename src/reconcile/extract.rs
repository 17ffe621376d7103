use crate::payload::{FieldValue, SerializedNode, VariableIdentity};
use crate::policy::KindPolicy;
use crate::traverse::walk;
use itertools::Itertools;

/// Extra-state flag marking a referenced variable as object-typed.
pub const OBJECT_VAR_FLAG: &str = "isObjectVar";

/// Every variable the tree refers to, deduplicated by identity key, first occurrence first.
///
/// Structured references are picked up from any field. Plain strings count only when they
/// sit in a variable-like field and are non-empty.
pub fn extract_identities(root: &SerializedNode, policy: &KindPolicy) -> Vec<VariableIdentity> {
    let mut found = Vec::new();
    walk(root, &mut |node| {
        let is_object_var = node.extra_flag(OBJECT_VAR_FLAG);
        for (field, value) in &node.fields {
            let identity = match value {
                FieldValue::Variable(var) => VariableIdentity::from_ref(var, is_object_var),
                FieldValue::Text(name) if policy.is_variable_field(field) => VariableIdentity {
                    is_object_var,
                    ..VariableIdentity::named(name.as_str())
                },
                _ => continue,
            };
            if !identity.name.is_empty() {
                found.push(identity);
            }
        }
    });
    found.into_iter().unique_by(VariableIdentity::key).collect()
}
