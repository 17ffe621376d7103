use super::{ClipboardTransfer, CopyReport};
use crate::error::CopyError;
use crate::host::{NodeSerializer, SystemClipboard};
use crate::payload::ClipboardPayload;
use crate::traverse::count_nodes;
use tracing::info;

impl<H, C> ClipboardTransfer<H, C>
where
    C: SystemClipboard,
{
    /// Copies `node` and everything nested in it, but not the nodes chained after it.
    ///
    /// On any failure the clipboard keeps its previous contents.
    pub async fn copy<N>(&self, node: &N) -> Result<CopyReport, CopyError>
    where
        N: ?Sized,
        H: NodeSerializer<N>,
    {
        let mut root = {
            let host = self.host.lock().await;
            host.serialize_node(node).map_err(CopyError::Serialize)?
        };
        let dropped_successors = root.detach_next().is_some();

        let text = ClipboardPayload::encode(&root)?;
        self.clipboard
            .write_text(&text)
            .await
            .map_err(CopyError::Clipboard)?;

        let report = CopyReport {
            node_count: count_nodes(&root),
            bytes: text.len(),
            dropped_successors,
        };
        info!(
            kind = %root.kind,
            nodes = report.node_count,
            dropped_successors,
            "Copied node (excluding chain below)"
        );
        Ok(report)
    }
}
