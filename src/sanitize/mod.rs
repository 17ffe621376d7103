//! In-place repair of pasted field values.
//!
//! Variable-like fields are resolved to plain names whose variables are guaranteed to
//! exist, and enumerated fields are revalidated against the destination's current
//! option set. Identity-sensitive nodes are never touched. No single failure aborts the
//! pass; it shows up as [`FieldRepair::Skipped`] in the report instead.

use crate::host::{OptionCatalog, VariableTable};
use crate::payload::{FieldValue, SerializedNode};
use crate::policy::KindPolicy;
use crate::reconcile::{CreatedVariable, ensure_named};
use crate::traverse::walk_mut;
use tracing::{debug, warn};

mod report;

pub use report::*;

/// Repairs pasted trees against a destination canvas.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    policy: KindPolicy,
}

impl Sanitizer {
    pub fn new(policy: KindPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &KindPolicy {
        &self.policy
    }

    /// Sanitizes every node of `root` in place.
    pub fn sanitize<H>(&self, root: &mut SerializedNode, host: &mut H) -> SanitizeReport
    where
        H: VariableTable + OptionCatalog + ?Sized,
    {
        let mut report = SanitizeReport::default();
        walk_mut(root, &mut |node| {
            if self.policy.is_protected(&node.kind) {
                report.protected_nodes += 1;
                return;
            }

            let SerializedNode { kind, fields, .. } = node;
            for (field, value) in fields.iter_mut() {
                let repair = if self.policy.is_variable_field(field) {
                    repair_variable_field(value, &mut *host, &mut report.variables_created)
                } else if let FieldValue::Text(text) = value {
                    repair_option_field(kind, field, text, &*host)
                } else {
                    continue;
                };
                report.outcomes.push(FieldOutcome {
                    kind: kind.clone(),
                    field: field.clone(),
                    repair,
                });
            }
        });
        report
    }
}

fn repair_variable_field<H>(
    value: &mut FieldValue,
    host: &mut H,
    created: &mut Vec<CreatedVariable>,
) -> FieldRepair
where
    H: VariableTable + ?Sized,
{
    let (name, var_type) = match value.variable_name() {
        Some(name) if !name.is_empty() => (name.to_string(), value.variable_type().to_string()),
        _ => return FieldRepair::Unchanged,
    };

    match ensure_named(host, &name, &var_type) {
        Ok(Some(variable)) => created.push(variable),
        Ok(None) => {}
        Err(e) => {
            warn!(name = %name, error = %e, "Could not ensure variable exists, leaving field as is");
            return FieldRepair::Skipped {
                reason: e.to_string(),
            };
        }
    }

    if matches!(value, FieldValue::Variable(_)) {
        *value = FieldValue::Text(name.clone());
        FieldRepair::Normalized { name }
    } else {
        FieldRepair::Unchanged
    }
}

fn repair_option_field<H>(kind: &str, field: &str, text: &mut String, host: &H) -> FieldRepair
where
    H: OptionCatalog + ?Sized,
{
    match host.field_options(kind, field) {
        Ok(None) => FieldRepair::Unchanged,
        Ok(Some(options)) => {
            if options.iter().any(|option| option == text) {
                return FieldRepair::Unchanged;
            }
            let replacement = options.into_iter().next().unwrap_or_default();
            if replacement == *text {
                return FieldRepair::Unchanged;
            }
            let from = std::mem::replace(text, replacement.clone());
            debug!(kind, field, from = %from, to = %replacement, "Replaced invalid option");
            FieldRepair::Replaced {
                from,
                to: replacement,
            }
        }
        Err(e) => {
            debug!(kind, field, error = %e, "Option lookup failed, leaving value");
            FieldRepair::Skipped {
                reason: e.to_string(),
            }
        }
    }
}
