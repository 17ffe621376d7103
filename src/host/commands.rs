use crate::error::HostError;
use serde::{Deserialize, Serialize};

/// Where a command is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandScope {
    /// On a node's context menu; the command receives that node.
    Node,
    /// On the canvas background; the command takes no argument.
    Canvas,
}

/// A context-menu command as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub id: String,
    pub label: String,
    pub scope: CommandScope,
    pub weight: i32,
}

/// The host's context-menu registry.
pub trait CommandRegistry {
    fn is_registered(&self, id: &str) -> bool;

    fn unregister(&mut self, id: &str);

    fn register(&mut self, spec: CommandSpec) -> Result<(), HostError>;
}
