use super::ClipboardTransfer;
use crate::error::HostError;
use crate::host::{
    CanvasHost, CommandRegistry, CommandScope, CommandSpec, NodeSerializer, PointerSource,
    SystemClipboard,
};
use tracing::{error, info};

pub const COPY_COMMAND_ID: &str = "nodeclip.copy";
pub const PASTE_COMMAND_ID: &str = "nodeclip.paste";
pub const COMMAND_WEIGHT: i32 = 90;

/// Menu labels of the two commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLabels {
    pub copy: String,
    pub paste: String,
}

impl Default for CommandLabels {
    fn default() -> Self {
        Self {
            copy: "Copy Node".to_string(),
            paste: "Paste Node".to_string(),
        }
    }
}

impl CommandLabels {
    pub fn specs(&self) -> [CommandSpec; 2] {
        [
            CommandSpec {
                id: COPY_COMMAND_ID.to_string(),
                label: self.copy.clone(),
                scope: CommandScope::Node,
                weight: COMMAND_WEIGHT,
            },
            CommandSpec {
                id: PASTE_COMMAND_ID.to_string(),
                label: self.paste.clone(),
                scope: CommandScope::Canvas,
                weight: COMMAND_WEIGHT,
            },
        ]
    }
}

impl<H, C> ClipboardTransfer<H, C> {
    /// Registers both commands on `host`, replacing earlier registrations with the same
    /// ids, and starts pointer tracking on it (once per tracker).
    pub fn install<R>(&self, host: &mut R) -> Result<(), HostError>
    where
        R: CommandRegistry + PointerSource + ?Sized,
    {
        for spec in self.labels.specs() {
            if host.is_registered(&spec.id) {
                host.unregister(&spec.id);
            }
            host.register(spec)?;
        }
        let attached = self.pointer.attach(host)?;
        info!(tracking_attached = attached, "Clipboard commands installed");
        Ok(())
    }
}

impl<H, C> ClipboardTransfer<H, C>
where
    C: SystemClipboard,
{
    /// Node-scoped command body: copy and report only through diagnostics.
    pub async fn run_copy_command<N>(&self, node: &N)
    where
        N: ?Sized,
        H: NodeSerializer<N>,
    {
        if let Err(e) = self.copy(node).await {
            error!(error = %e, "Copy failed");
        }
    }
}

impl<H, C> ClipboardTransfer<H, C>
where
    H: CanvasHost,
    C: SystemClipboard,
{
    /// Canvas-scoped command body: paste and report only through diagnostics.
    pub async fn run_paste_command(&self) {
        if let Err(e) = self.paste().await {
            error!(error = %e, "Paste failed");
        }
    }
}
