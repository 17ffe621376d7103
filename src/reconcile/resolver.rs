use crate::error::HostError;
use crate::host::{VariableRecord, VariableTable};
use crate::payload::VariableIdentity;
use tracing::debug;

type Lookup<T> = fn(&T, &str) -> Result<Option<VariableRecord>, HostError>;

/// Finds an existing variable for `identity`: by id first, then by name through each
/// lookup variant the table offers. The first hit wins.
pub fn find_variable<T>(table: &T, identity: &VariableIdentity) -> Option<VariableRecord>
where
    T: VariableTable + ?Sized,
{
    if let Some(id) = identity.id.as_deref() {
        if let Some(found) = try_lookup(table, "variable_by_id", T::variable_by_id, id) {
            return Some(found);
        }
    }

    let by_name: [(&str, Lookup<T>); 2] = [
        ("lookup_variable", T::lookup_variable),
        ("variable_by_name", T::variable_by_name),
    ];
    by_name
        .into_iter()
        .find_map(|(variant, lookup)| try_lookup(table, variant, lookup, &identity.name))
}

fn try_lookup<T: VariableTable + ?Sized>(
    table: &T,
    variant: &str,
    lookup: Lookup<T>,
    key: &str,
) -> Option<VariableRecord> {
    match lookup(table, key) {
        Ok(found) => found,
        Err(e) => {
            debug!(variant, key, error = %e, "Variable lookup variant failed");
            None
        }
    }
}

/// A variable created by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedVariable {
    pub record: VariableRecord,
    /// `true` when the incoming id was kept.
    pub identity_preserved: bool,
}

/// Creates `identity` in the table, preferring identity-preserving creation and
/// degrading to name-and-type creation. Returns the last error if every path refuses.
pub fn create_variable<T>(
    table: &mut T,
    identity: &VariableIdentity,
) -> Result<CreatedVariable, HostError>
where
    T: VariableTable + ?Sized,
{
    let preserving_err = match table.create_variable_with_id(identity) {
        Ok(record) => {
            let identity_preserved = identity
                .id
                .as_deref()
                .is_some_and(|id| id == record.id);
            return Ok(CreatedVariable {
                record,
                identity_preserved,
            });
        }
        Err(e) => e,
    };
    debug!(
        name = %identity.name,
        error = %preserving_err,
        "Identity-preserving creation failed, creating by name and type"
    );

    table
        .create_variable(&identity.name, &identity.var_type)
        .map(|record| CreatedVariable {
            record,
            identity_preserved: false,
        })
}

/// Makes sure a variable called `name` exists, creating a minimal one when it does not.
///
/// Returns the created variable, or `None` when one already existed.
pub fn ensure_named<T>(
    table: &mut T,
    name: &str,
    var_type: &str,
) -> Result<Option<CreatedVariable>, HostError>
where
    T: VariableTable + ?Sized,
{
    let identity = VariableIdentity::named(name).with_type(var_type);
    if find_variable(&*table, &identity).is_some() {
        return Ok(None);
    }
    create_variable(table, &identity).map(Some)
}
