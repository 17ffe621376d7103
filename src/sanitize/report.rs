use crate::reconcile::CreatedVariable;

/// The result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRepair {
    Unchanged,
    /// A structured variable reference was rewritten to its plain name.
    Normalized { name: String },
    /// An enumerated value outside the valid set was replaced.
    Replaced { from: String, to: String },
    /// The check could not be completed; the value was left as it was.
    Skipped { reason: String },
}

impl FieldRepair {
    pub fn is_change(&self) -> bool {
        matches!(self, FieldRepair::Normalized { .. } | FieldRepair::Replaced { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub kind: String,
    pub field: String,
    pub repair: FieldRepair,
}

/// Aggregate outcome of a sanitization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub outcomes: Vec<FieldOutcome>,
    /// Identity-sensitive nodes left untouched.
    pub protected_nodes: usize,
    /// Variables created by the by-name safety net.
    pub variables_created: Vec<CreatedVariable>,
}

impl SanitizeReport {
    pub fn changes(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.outcomes.iter().filter(|o| o.repair.is_change())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.repair, FieldRepair::Skipped { .. }))
    }

    /// `true` when the pass changed nothing and skipped nothing.
    pub fn is_clean(&self) -> bool {
        self.changes().next().is_none() && self.skipped().next().is_none()
    }
}
