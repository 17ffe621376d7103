use crate::error::HostError;

/// Per-node-kind lookup of enumerated (dropdown) field options.
pub trait OptionCatalog {
    /// The valid values of `field` on nodes of `kind`.
    ///
    /// `Ok(None)` means the field exists but is free-form. Unknown kinds and fields are
    /// reported as errors so the caller can leave the value alone.
    fn field_options(&self, _kind: &str, _field: &str) -> Result<Option<Vec<String>>, HostError> {
        Err(HostError::Unsupported("field_options"))
    }
}
