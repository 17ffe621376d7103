//! Variable reconciliation: make every variable a payload refers to exist in the
//! destination before anything is materialized.
//!
//! Existing destination variables always win. A pasted reference to a variable the
//! destination already has (by id or by name) never changes that variable's type or id,
//! even when the incoming type differs.

use crate::error::HostError;
use crate::host::{VariableRecord, VariableTable};
use crate::payload::{SerializedNode, VariableIdentity};
use crate::policy::KindPolicy;
use tracing::{debug, warn};

mod extract;
mod resolver;

pub use extract::{OBJECT_VAR_FLAG, extract_identities};
pub use resolver::{CreatedVariable, create_variable, ensure_named, find_variable};

/// What happened to one referenced identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The destination already had it; nothing changed.
    Existing(VariableRecord),
    Created(CreatedVariable),
    /// Every creation path refused.
    Failed(HostError),
}

/// Outcome of a reconciliation pass, one entry per extracted identity in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub entries: Vec<(VariableIdentity, Registration)>,
}

impl ReconcileReport {
    pub fn created(&self) -> impl Iterator<Item = &CreatedVariable> {
        self.entries.iter().filter_map(|(_, reg)| match reg {
            Registration::Created(created) => Some(created),
            _ => None,
        })
    }

    pub fn existing(&self) -> impl Iterator<Item = &VariableRecord> {
        self.entries.iter().filter_map(|(_, reg)| match reg {
            Registration::Existing(record) => Some(record),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&VariableIdentity, &HostError)> {
        self.entries.iter().filter_map(|(identity, reg)| match reg {
            Registration::Failed(e) => Some((identity, e)),
            _ => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Registers every identity the destination table lacks, in the given order.
pub fn register_missing<T>(table: &mut T, identities: &[VariableIdentity]) -> ReconcileReport
where
    T: VariableTable + ?Sized,
{
    let entries = identities
        .iter()
        .map(|identity| {
            let registration = match find_variable(&*table, identity) {
                Some(existing) => {
                    if !identity.var_type.is_empty() && existing.var_type != identity.var_type {
                        debug!(
                            name = %identity.name,
                            existing_type = %existing.var_type,
                            incoming_type = %identity.var_type,
                            "Keeping existing variable despite type mismatch"
                        );
                    }
                    Registration::Existing(existing)
                }
                None => match create_variable(table, identity) {
                    Ok(created) => {
                        debug!(
                            name = %created.record.name,
                            id = %created.record.id,
                            identity_preserved = created.identity_preserved,
                            "Created missing variable"
                        );
                        Registration::Created(created)
                    }
                    Err(e) => {
                        warn!(key = %identity.key(), error = %e, "Could not create missing variable");
                        Registration::Failed(e)
                    }
                },
            };
            (identity.clone(), registration)
        })
        .collect();

    ReconcileReport { entries }
}

/// Extracts the payload's variables and registers the missing ones.
pub fn reconcile<T>(table: &mut T, root: &SerializedNode, policy: &KindPolicy) -> ReconcileReport
where
    T: VariableTable + ?Sized,
{
    let identities = extract_identities(root, policy);
    register_missing(table, &identities)
}
