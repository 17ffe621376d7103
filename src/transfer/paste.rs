use super::{ClipboardTransfer, MaterializePath, PasteReport, Placement};
use crate::error::PasteError;
use crate::geometry::Point;
use crate::host::{CanvasHost, Materializer, SystemClipboard};
use crate::payload::{ClipboardPayload, SerializedNode};
use crate::reconcile::reconcile;
use crate::traverse::{count_nodes, walk_mut};
use tracing::{debug, info, warn};

impl<H, C> ClipboardTransfer<H, C>
where
    H: CanvasHost,
    C: SystemClipboard,
{
    /// Pastes the clipboard contents under the pointer.
    ///
    /// The host stays locked for the whole run, so overlapping pastes execute one after
    /// the other. Malformed clipboard text is rejected before the destination is touched.
    pub async fn paste(&self) -> Result<PasteReport, PasteError> {
        let mut host = self.host.lock().await;

        let text = self
            .clipboard
            .read_text()
            .await
            .map_err(PasteError::Clipboard)?;
        if text.trim().is_empty() {
            return Err(PasteError::EmptyClipboard);
        }

        match ClipboardPayload::parse(&text)? {
            ClipboardPayload::Tree(root) => self.paste_tree(&mut *host, root),
            ClipboardPayload::LegacyMarkup(markup) => {
                host.append_legacy_markup(&markup)
                    .map_err(PasteError::LegacyMarkup)?;
                info!("Pasted legacy markup");
                Ok(PasteReport::legacy_markup())
            }
        }
    }

    fn paste_tree(&self, host: &mut H, mut root: SerializedNode) -> Result<PasteReport, PasteError> {
        let reconciled = reconcile(host, &root, self.policy());
        let sanitized = self.sanitizer.sanitize(&mut root, host);
        if !sanitized.is_clean() {
            debug!(
                changed = sanitized.changes().count(),
                skipped = sanitized.skipped().count(),
                "Sanitized pasted tree"
            );
        }

        let origin = root.position();
        let target = self.pointer.resolve(&*host);
        let offset = target.point - origin;
        translate(&mut root, offset);

        let path = materialize(host, &root)?;
        let node_count = count_nodes(&root);
        info!(
            nodes = node_count,
            x = target.point.x,
            y = target.point.y,
            strategy = ?target.strategy,
            "Paste complete at cursor (relative positions preserved)"
        );

        Ok(PasteReport {
            path,
            node_count,
            reconcile: reconciled,
            sanitize: sanitized,
            placement: Some(Placement {
                origin,
                target,
                offset,
            }),
        })
    }
}

/// Moves every node of the tree by `offset`, treating absent coordinates as zero.
pub fn translate(root: &mut SerializedNode, offset: Point) {
    walk_mut(root, &mut |node| {
        node.x = Some(node.x.unwrap_or(0.0) + offset.x);
        node.y = Some(node.y.unwrap_or(0.0) + offset.y);
    });
}

/// Hands a prepared tree to the host, falling back to the payload's legacy markup when
/// the host cannot append trees.
pub fn materialize<M>(host: &mut M, root: &SerializedNode) -> Result<MaterializePath, PasteError>
where
    M: Materializer + ?Sized,
{
    match host.append_tree(root) {
        Ok(()) => Ok(MaterializePath::Tree),
        Err(e) if e.is_unsupported() => {
            let Some(markup) = root.legacy_markup.as_deref() else {
                return Err(PasteError::NoMaterializationPath);
            };
            warn!("Host cannot append trees, falling back to legacy markup");
            host.append_legacy_markup(markup)
                .map_err(PasteError::LegacyMarkup)?;
            Ok(MaterializePath::LegacyFallback)
        }
        Err(e) => Err(PasteError::Materialize(e)),
    }
}
