use crate::error::HostError;
use crate::geometry::{Affine2, Point, PointerSample, Rect};
use crate::host::{
    CommandRegistry, CommandSpec, Materializer, NodeSerializer, OptionCatalog, PointerListener,
    PointerSource, VariableRecord, VariableTable, ViewMetrics, ViewportHost,
};
use crate::payload::{SerializedNode, VariableIdentity};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which optional host API variants a [`MemoryCanvas`] pretends to ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    pub view_metrics: bool,
    pub surface_transform: bool,
    pub query_surface_transform: bool,
    pub surface_bounds: bool,
    pub variable_by_id: bool,
    pub lookup_variable: bool,
    pub variable_by_name: bool,
    pub create_variable_with_id: bool,
    pub create_variable: bool,
    pub field_options: bool,
    pub append_tree: bool,
    pub append_legacy_markup: bool,
    pub pointer_events: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            view_metrics: true,
            surface_transform: true,
            query_surface_transform: true,
            surface_bounds: true,
            variable_by_id: true,
            lookup_variable: true,
            variable_by_name: true,
            create_variable_with_id: true,
            create_variable: true,
            field_options: true,
            append_tree: true,
            append_legacy_markup: true,
            pointer_events: true,
        }
    }
}

/// A canvas host kept entirely in memory.
///
/// Loadable from JSON so a destination can be described in a file. Materialized trees and
/// markup are recorded in [`nodes`](Self::nodes) and [`legacy`](Self::legacy).
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryCanvas {
    pub capabilities: Capabilities,
    pub variables: Vec<VariableRecord>,
    /// Enumerated options per node kind and field. A kind listed with no entry for a field
    /// treats that field as free-form.
    pub options: AHashMap<String, AHashMap<String, Vec<String>>>,
    pub metrics: ViewMetrics,
    pub transform: Option<Affine2>,
    pub query_transform: Option<Affine2>,
    pub bounds: Option<Rect>,
    pub scale: Option<f64>,
    pub scroll: Option<Point>,
    pub nodes: Vec<SerializedNode>,
    pub legacy: Vec<String>,
    pub commands: Vec<CommandSpec>,
    #[serde(skip)]
    listeners: Vec<PointerListener>,
}

impl fmt::Debug for MemoryCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCanvas")
            .field("capabilities", &self.capabilities)
            .field("variables", &self.variables)
            .field("metrics", &self.metrics)
            .field("nodes", &self.nodes.len())
            .field("legacy", &self.legacy.len())
            .field("commands", &self.commands)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_variable(mut self, record: VariableRecord) -> Self {
        self.variables.push(record);
        self
    }

    /// Declares a node kind whose fields are all free-form.
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.options.entry(kind.to_string()).or_default();
        self
    }

    pub fn with_options(mut self, kind: &str, field: &str, values: &[&str]) -> Self {
        self.options
            .entry(kind.to_string())
            .or_default()
            .insert(field.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_metrics(mut self, metrics: ViewMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_transform(mut self, transform: Affine2) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_query_transform(mut self, transform: Affine2) -> Self {
        self.query_transform = Some(transform);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn variable_named(&self, name: &str) -> Option<&VariableRecord> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Delivers a pointer move to every subscribed listener.
    pub fn emit_pointer(&self, sample: PointerSample) {
        for listener in &self.listeners {
            listener(sample);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn next_variable_id(&self) -> String {
        let mut n = self.variables.len() + 1;
        loop {
            let id = format!("var-{n}");
            if !self.variables.iter().any(|v| v.id == id) {
                return id;
            }
            n += 1;
        }
    }

    fn require(enabled: bool, capability: &'static str) -> Result<(), HostError> {
        if enabled {
            Ok(())
        } else {
            Err(HostError::Unsupported(capability))
        }
    }
}

impl ViewportHost for MemoryCanvas {
    fn view_metrics(&self) -> Result<ViewMetrics, HostError> {
        Self::require(self.capabilities.view_metrics, "view_metrics")?;
        Ok(self.metrics)
    }

    fn surface_screen_transform(&self) -> Result<Option<Affine2>, HostError> {
        Self::require(self.capabilities.surface_transform, "surface_screen_transform")?;
        Ok(self.transform)
    }

    fn query_surface_screen_transform(&self) -> Result<Option<Affine2>, HostError> {
        Self::require(
            self.capabilities.query_surface_transform,
            "query_surface_screen_transform",
        )?;
        Ok(self.query_transform)
    }

    fn surface_bounds(&self) -> Result<Rect, HostError> {
        Self::require(self.capabilities.surface_bounds, "surface_bounds")?;
        self.bounds
            .ok_or_else(|| HostError::Rejected("surface has no bounds".to_string()))
    }

    fn scale(&self) -> Option<f64> {
        self.scale
    }

    fn scroll_offset(&self) -> Option<Point> {
        self.scroll
    }
}

impl VariableTable for MemoryCanvas {
    fn variable_by_id(&self, id: &str) -> Result<Option<VariableRecord>, HostError> {
        Self::require(self.capabilities.variable_by_id, "variable_by_id")?;
        Ok(self.variables.iter().find(|v| v.id == id).cloned())
    }

    fn lookup_variable(&self, name: &str) -> Result<Option<VariableRecord>, HostError> {
        Self::require(self.capabilities.lookup_variable, "lookup_variable")?;
        Ok(self.variable_named(name).cloned())
    }

    fn variable_by_name(&self, name: &str) -> Result<Option<VariableRecord>, HostError> {
        Self::require(self.capabilities.variable_by_name, "variable_by_name")?;
        Ok(self.variable_named(name).cloned())
    }

    fn create_variable_with_id(
        &mut self,
        identity: &VariableIdentity,
    ) -> Result<VariableRecord, HostError> {
        Self::require(self.capabilities.create_variable_with_id, "create_variable_with_id")?;
        let id = match &identity.id {
            Some(id) if self.variables.iter().any(|v| &v.id == id) => {
                return Err(HostError::Rejected(format!("variable id '{id}' is taken")));
            }
            Some(id) => id.clone(),
            None => self.next_variable_id(),
        };
        let record = VariableRecord {
            id,
            name: identity.name.clone(),
            var_type: identity.var_type.clone(),
            is_object_var: identity.is_object_var,
        };
        self.variables.push(record.clone());
        Ok(record)
    }

    fn create_variable(&mut self, name: &str, var_type: &str) -> Result<VariableRecord, HostError> {
        Self::require(self.capabilities.create_variable, "create_variable")?;
        let record = VariableRecord::new(self.next_variable_id(), name, var_type);
        self.variables.push(record.clone());
        Ok(record)
    }
}

impl OptionCatalog for MemoryCanvas {
    fn field_options(&self, kind: &str, field: &str) -> Result<Option<Vec<String>>, HostError> {
        Self::require(self.capabilities.field_options, "field_options")?;
        let fields = self
            .options
            .get(kind)
            .ok_or_else(|| HostError::UnknownKind(kind.to_string()))?;
        Ok(fields.get(field).cloned())
    }
}

impl Materializer for MemoryCanvas {
    fn append_tree(&mut self, root: &SerializedNode) -> Result<(), HostError> {
        Self::require(self.capabilities.append_tree, "append_tree")?;
        self.nodes.push(root.clone());
        Ok(())
    }

    fn append_legacy_markup(&mut self, markup: &str) -> Result<(), HostError> {
        Self::require(self.capabilities.append_legacy_markup, "append_legacy_markup")?;
        self.legacy.push(markup.to_string());
        Ok(())
    }
}

impl NodeSerializer<SerializedNode> for MemoryCanvas {
    fn serialize_node(&self, node: &SerializedNode) -> Result<SerializedNode, HostError> {
        Ok(node.clone())
    }
}

impl PointerSource for MemoryCanvas {
    fn subscribe_pointer_moves(&mut self, listener: PointerListener) -> Result<(), HostError> {
        Self::require(self.capabilities.pointer_events, "subscribe_pointer_moves")?;
        self.listeners.push(listener);
        Ok(())
    }
}

impl CommandRegistry for MemoryCanvas {
    fn is_registered(&self, id: &str) -> bool {
        self.commands.iter().any(|c| c.id == id)
    }

    fn unregister(&mut self, id: &str) {
        self.commands.retain(|c| c.id != id);
    }

    fn register(&mut self, spec: CommandSpec) -> Result<(), HostError> {
        if self.is_registered(&spec.id) {
            return Err(HostError::Rejected(format!("command '{}' already registered", spec.id)));
        }
        self.commands.push(spec);
        Ok(())
    }
}
