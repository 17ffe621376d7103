/// Node kind that reads or writes a variable.
pub const VARIABLE_REFERENCE_KIND: &str = "variableReferenceBlock";
/// Node kind bound to an argument slot of a subroutine.
pub const ARGUMENT_SLOT_KIND: &str = "subroutineArgumentBlock";
/// Field names equal to or starting with this (ignoring case) hold variable references.
pub const VARIABLE_FIELD_PREFIX: &str = "VAR";

/// Which node kinds are identity-sensitive and which fields hold variable references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindPolicy {
    protected_kinds: Vec<String>,
    variable_field_prefix: String,
}

impl Default for KindPolicy {
    fn default() -> Self {
        Self {
            protected_kinds: vec![
                VARIABLE_REFERENCE_KIND.to_string(),
                ARGUMENT_SLOT_KIND.to_string(),
            ],
            variable_field_prefix: VARIABLE_FIELD_PREFIX.to_string(),
        }
    }
}

impl KindPolicy {
    /// A policy protecting exactly the given variable-reference and argument-slot kinds.
    pub fn new(variable_reference_kind: &str, argument_slot_kind: &str) -> Self {
        Self {
            protected_kinds: vec![
                variable_reference_kind.to_string(),
                argument_slot_kind.to_string(),
            ],
            ..Self::default()
        }
    }

    pub fn with_variable_field_prefix(mut self, prefix: &str) -> Self {
        self.variable_field_prefix = prefix.to_string();
        self
    }

    pub fn protected_kinds(&self) -> &[String] {
        &self.protected_kinds
    }

    pub fn variable_field_prefix(&self) -> &str {
        &self.variable_field_prefix
    }

    pub fn is_protected(&self, kind: &str) -> bool {
        self.protected_kinds.iter().any(|k| k == kind)
    }

    pub fn is_variable_field(&self, field: &str) -> bool {
        let prefix = self.variable_field_prefix.as_str();
        field
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}
