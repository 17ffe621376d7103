//! End-to-end copy and paste tests against the in-memory host
mod common;
use common::*;
use async_trait::async_trait;
use futures::future::join;
use nodeclip::geometry::PositionStrategy;
use nodeclip::host::CommandScope;
use nodeclip::memory::{Capabilities, MemoryCanvas, MemoryClipboard};
use nodeclip::prelude::*;
use nodeclip::transfer::{COMMAND_WEIGHT, COPY_COMMAND_ID, PASTE_COMMAND_ID};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use tokio_test::block_on;

/// Installs the transfer's commands on its own host and moves the pointer there.
fn install_and_point(transfer: &ClipboardTransfer<MemoryCanvas, MemoryClipboard>, x: f64, y: f64) {
    let mut host = block_on(transfer.host().lock());
    transfer.install(&mut *host).expect("install");
    host.emit_pointer(PointerSample::new(x, y));
}

struct DetachedNodes;

impl NodeSerializer<str> for DetachedNodes {
    fn serialize_node(&self, id: &str) -> Result<SerializedNode, HostError> {
        Err(HostError::Rejected(format!("node {id} is not on the canvas")))
    }
}

/// Returns `Pending` once, waking itself, then completes.
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// A clipboard whose reads suspend once, logging when each read starts and finishes.
struct YieldingClipboard {
    inner: MemoryClipboard,
    events: Mutex<Vec<&'static str>>,
}

impl YieldingClipboard {
    fn with_text(text: &str) -> Self {
        Self {
            inner: MemoryClipboard::with_text(text),
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("event log").clone()
    }
}

#[async_trait]
impl SystemClipboard for YieldingClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.events.lock().expect("event log").push("read started");
        YieldNow(false).await;
        self.events.lock().expect("event log").push("read finished");
        self.inner.read_text().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.inner.write_text(text).await
    }
}

/// A `repeat` node whose `DO` body is a chain of `len` statements.
fn create_repeat_block(len: usize) -> SerializedNode {
    let mut body = SerializedNode::new("say").with_field("MESSAGE", format!("line {len}").as_str());
    for i in (1..len).rev() {
        body = SerializedNode::new("say")
            .with_field("MESSAGE", format!("line {i}").as_str())
            .with_next(body);
    }
    SerializedNode::new("repeat")
        .with_field("TIMES", FieldValue::Other(serde_json::json!(3)))
        .with_input("DO", Attachment::primary(body))
}

#[cfg(test)]
mod copy_tests {
    use super::*;

    #[test]
    fn test_copy_excludes_following_nodes() {
        let transfer = create_transfer(MemoryCanvas::new(), MemoryClipboard::new());
        let node = create_health_node().with_next(SerializedNode::new("wait").with_next(SerializedNode::new("say")));

        let report = block_on(transfer.copy(&node)).expect("copy");
        assert!(report.dropped_successors);
        assert_eq!(report.node_count, 1);

        let text = transfer.clipboard().contents().expect("clipboard written");
        assert_eq!(report.bytes, text.len());
        let ClipboardPayload::Tree(copied) = ClipboardPayload::parse(&text).expect("payload") else {
            panic!("expected a node tree");
        };
        assert!(copied.next.is_none());
        assert_eq!(kinds(&copied), vec!["move"]);
    }

    #[test]
    fn test_copy_keeps_nested_inputs() {
        let transfer = create_transfer(MemoryCanvas::new(), MemoryClipboard::new());
        let report = block_on(transfer.copy(&create_nested_tree())).expect("copy");

        // h is the only successor of the root
        assert_eq!(report.node_count, 7);
        let text = transfer.clipboard().contents().expect("clipboard written");
        let ClipboardPayload::Tree(copied) = ClipboardPayload::parse(&text).expect("payload") else {
            panic!("expected a node tree");
        };
        assert_eq!(kinds(&copied), vec!["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_failed_write_leaves_clipboard_unchanged() {
        let clipboard = MemoryClipboard::with_text("previous").deny_writes();
        let transfer = create_transfer(MemoryCanvas::new(), clipboard);

        let err = block_on(transfer.copy(&create_health_node())).unwrap_err();
        assert!(matches!(err, CopyError::Clipboard(ClipboardError::Denied(_))));
        assert_eq!(transfer.clipboard().contents().as_deref(), Some("previous"));
    }

    #[test]
    fn test_failed_serialization_leaves_clipboard_unchanged() {
        let transfer = ClipboardTransfer::builder(DetachedNodes, MemoryClipboard::with_text("previous")).build();

        let err = block_on(transfer.copy("n-42")).unwrap_err();
        assert!(matches!(err, CopyError::Serialize(HostError::Rejected(_))));
        assert_eq!(transfer.clipboard().contents().as_deref(), Some("previous"));
    }
}

#[cfg(test)]
mod paste_tests {
    use super::*;

    #[test]
    fn test_paste_creates_variable_and_lands_under_pointer() {
        let clipboard = MemoryClipboard::with_text(HEALTH_PAYLOAD_JSON);
        let transfer = create_transfer(create_identity_canvas(), clipboard);
        install_and_point(&transfer, 300.0, 300.0);

        let report = block_on(transfer.paste()).expect("paste");
        assert_eq!(report.path, MaterializePath::Tree);
        assert_eq!(report.node_count, 1);

        let placement = report.placement.expect("placed");
        assert_eq!(placement.origin, Point::new(100.0, 50.0));
        assert_eq!(placement.target.point, Point::new(300.0, 300.0));
        assert_eq!(placement.target.strategy, PositionStrategy::InverseTransform);
        assert_eq!(placement.offset, Point::new(200.0, 250.0));

        let host = block_on(transfer.host().lock());
        let health = host.variable_named("Health").expect("variable created");
        assert_eq!(health.var_type, "Number");
        assert_eq!(host.nodes.len(), 1);
        assert_eq!(host.nodes[0].position(), Point::new(300.0, 300.0));
        assert_eq!(host.nodes[0].fields["VAR"], FieldValue::text("Health"));
    }

    #[test]
    fn test_relative_layout_is_preserved() {
        let payload = SerializedNode::new("move")
            .at(100.0, 50.0)
            .with_input("VALUE", Attachment::primary(SerializedNode::new("num").at(120.0, 80.0)))
            .with_next(SerializedNode::new("say").at(100.0, 90.0));
        let clipboard = MemoryClipboard::with_text(ClipboardPayload::encode(&payload).expect("encodes"));
        let transfer = create_transfer(create_identity_canvas(), clipboard);
        install_and_point(&transfer, 300.0, 300.0);

        block_on(transfer.paste()).expect("paste");

        let host = block_on(transfer.host().lock());
        let pasted = &host.nodes[0];
        let positions: Vec<_> = nodeclip::traverse::collect(pasted)
            .into_iter()
            .map(|n| n.position())
            .collect();
        assert_eq!(
            positions,
            vec![
                Point::new(300.0, 300.0),
                Point::new(320.0, 330.0),
                Point::new(300.0, 340.0)
            ]
        );
    }

    #[test]
    fn test_paste_without_pointer_uses_viewport_center() {
        let clipboard = MemoryClipboard::with_text(HEALTH_PAYLOAD_JSON);
        let transfer = create_transfer(create_identity_canvas(), clipboard);

        let report = block_on(transfer.paste()).expect("paste");
        let placement = report.placement.expect("placed");
        assert_eq!(placement.target.strategy, PositionStrategy::ViewportCenter);
        assert_eq!(placement.target.point, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_copy_then_paste_round_trip() {
        let transfer = create_transfer(create_identity_canvas(), MemoryClipboard::new());
        install_and_point(&transfer, 10.0, 20.0);

        block_on(transfer.copy(&create_health_node().with_next(SerializedNode::new("wait")))).expect("copy");
        let report = block_on(transfer.paste()).expect("paste");

        assert_eq!(report.node_count, 1);
        let host = block_on(transfer.host().lock());
        assert_eq!(host.nodes[0].kind, "move");
        assert_eq!(host.nodes[0].position(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_long_statement_body_round_trips() {
        let transfer = create_transfer(create_identity_canvas(), MemoryClipboard::new());
        let block = create_repeat_block(100);

        let copied = block_on(transfer.copy(&block)).expect("copy");
        assert_eq!(copied.node_count, 101);
        let pasted = block_on(transfer.paste()).expect("paste");
        assert_eq!(pasted.node_count, 101);

        let host = block_on(transfer.host().lock());
        assert_eq!(host.nodes.len(), 1);
        let body = host.nodes[0].inputs["DO"].primary.as_deref().expect("DO body");
        assert_eq!(kinds(body).len(), 100);
        assert_eq!(kinds(&host.nodes[0]).len(), 101);
    }

    #[test]
    fn test_malformed_clipboard_mutates_nothing() {
        let clipboard = MemoryClipboard::with_text("definitely not a payload");
        let transfer = create_transfer(create_identity_canvas(), clipboard);

        let err = block_on(transfer.paste()).unwrap_err();
        assert!(matches!(err, PasteError::Payload(PayloadError::Malformed(_))));

        let host = block_on(transfer.host().lock());
        assert!(host.variables.is_empty());
        assert!(host.nodes.is_empty());
        assert!(host.legacy.is_empty());
    }

    #[test]
    fn test_empty_clipboard() {
        let transfer = create_transfer(create_identity_canvas(), MemoryClipboard::new());
        assert_eq!(block_on(transfer.paste()).unwrap_err(), PasteError::EmptyClipboard);

        let transfer = create_transfer(create_identity_canvas(), MemoryClipboard::with_text("  \n"));
        assert_eq!(block_on(transfer.paste()).unwrap_err(), PasteError::EmptyClipboard);
    }

    #[test]
    fn test_denied_read() {
        let clipboard = MemoryClipboard::with_text(HEALTH_PAYLOAD_JSON).deny_reads();
        let transfer = create_transfer(create_identity_canvas(), clipboard);
        assert!(matches!(
            block_on(transfer.paste()).unwrap_err(),
            PasteError::Clipboard(ClipboardError::Denied(_))
        ));
    }

    #[test]
    fn test_legacy_markup_pasted_as_is() {
        let clipboard = MemoryClipboard::with_text(LEGACY_MARKUP);
        let transfer = create_transfer(create_identity_canvas(), clipboard);
        install_and_point(&transfer, 300.0, 300.0);

        let report = block_on(transfer.paste()).expect("paste");
        assert_eq!(report.path, MaterializePath::LegacyMarkup);
        assert!(report.placement.is_none());

        let host = block_on(transfer.host().lock());
        assert_eq!(host.legacy, vec![LEGACY_MARKUP.to_string()]);
        assert!(host.nodes.is_empty());
    }

    #[test]
    fn test_legacy_markup_without_host_support() {
        let canvas = create_identity_canvas().with_capabilities(Capabilities {
            append_legacy_markup: false,
            ..Capabilities::default()
        });
        let transfer = create_transfer(canvas, MemoryClipboard::with_text(LEGACY_MARKUP));
        assert_eq!(
            block_on(transfer.paste()).unwrap_err(),
            PasteError::LegacyMarkup(HostError::Unsupported("append_legacy_markup"))
        );
    }

    #[test]
    fn test_tree_falls_back_to_embedded_markup() {
        let mut payload = create_health_node();
        payload.legacy_markup = Some(LEGACY_MARKUP.to_string());
        let canvas = create_identity_canvas().with_capabilities(Capabilities {
            append_tree: false,
            ..Capabilities::default()
        });
        let clipboard = MemoryClipboard::with_text(ClipboardPayload::encode(&payload).expect("encodes"));
        let transfer = create_transfer(canvas, clipboard);

        let report = block_on(transfer.paste()).expect("paste");
        assert_eq!(report.path, MaterializePath::LegacyFallback);
        let host = block_on(transfer.host().lock());
        assert_eq!(host.legacy.len(), 1);
        assert!(host.variable_named("Health").is_some());
    }

    #[test]
    fn test_no_materialization_path() {
        let canvas = create_identity_canvas().with_capabilities(Capabilities {
            append_tree: false,
            ..Capabilities::default()
        });
        let transfer = create_transfer(canvas, MemoryClipboard::with_text(HEALTH_PAYLOAD_JSON));
        assert_eq!(
            block_on(transfer.paste()).unwrap_err(),
            PasteError::NoMaterializationPath
        );
    }

    #[test]
    fn test_concurrent_pastes_do_not_interleave() {
        let transfer =
            ClipboardTransfer::builder(create_identity_canvas(), YieldingClipboard::with_text(HEALTH_PAYLOAD_JSON))
                .build();

        let (first, second) = block_on(join(transfer.paste(), transfer.paste()));
        let first = first.expect("first paste");
        let second = second.expect("second paste");

        // the second read only starts once the first paste has materialized
        assert_eq!(
            transfer.clipboard().events(),
            vec!["read started", "read finished", "read started", "read finished"]
        );
        assert_eq!(first.reconcile.created().count(), 1);
        assert_eq!(second.reconcile.created().count(), 0);
        assert_eq!(second.reconcile.existing().count(), 1);
        let host = block_on(transfer.host().lock());
        assert_eq!(host.nodes.len(), 2);
        assert_eq!(host.variables.len(), 1);
    }

    #[test]
    fn test_existing_variable_type_wins_on_paste() {
        let canvas = create_identity_canvas().with_variable(VariableRecord::new("v-1", "Health", "String"));
        let transfer = create_transfer(canvas, MemoryClipboard::with_text(HEALTH_PAYLOAD_JSON));

        let report = block_on(transfer.paste()).expect("paste");
        assert_eq!(report.reconcile.existing().count(), 1);
        let host = block_on(transfer.host().lock());
        assert_eq!(host.variables, vec![VariableRecord::new("v-1", "Health", "String")]);
        assert_eq!(host.nodes[0].fields["VAR"], FieldValue::text("Health"));
    }

    #[test]
    fn test_shared_host_handle() {
        let shared = std::sync::Arc::new(futures::lock::Mutex::new(create_identity_canvas()));
        let transfer =
            ClipboardTransfer::builder_shared(shared.clone(), MemoryClipboard::with_text(HEALTH_PAYLOAD_JSON)).build();

        block_on(transfer.paste()).expect("paste");
        assert_eq!(block_on(shared.lock()).nodes.len(), 1);
    }
}

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn test_install_registers_both_commands() {
        let transfer = create_transfer(create_identity_canvas(), MemoryClipboard::new());
        install_and_point(&transfer, 0.0, 0.0);

        let host = block_on(transfer.host().lock());
        assert_eq!(host.commands.len(), 2);
        let copy = host.commands.iter().find(|c| c.id == COPY_COMMAND_ID).expect("copy command");
        assert_eq!(copy.label, "Copy Node");
        assert_eq!(copy.scope, CommandScope::Node);
        assert_eq!(copy.weight, COMMAND_WEIGHT);
        let paste = host.commands.iter().find(|c| c.id == PASTE_COMMAND_ID).expect("paste command");
        assert_eq!(paste.label, "Paste Node");
        assert_eq!(paste.scope, CommandScope::Canvas);
        assert!(transfer.pointer().is_attached());
    }

    #[test]
    fn test_reinstall_replaces_registrations() {
        let transfer = ClipboardTransfer::builder(create_identity_canvas(), MemoryClipboard::new())
            .with_command_labels("Copy Block", "Paste Block")
            .build();
        install_and_point(&transfer, 0.0, 0.0);
        install_and_point(&transfer, 0.0, 0.0);

        let host = block_on(transfer.host().lock());
        assert_eq!(host.commands.len(), 2);
        assert!(host.commands.iter().any(|c| c.label == "Paste Block"));
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn test_command_bodies_swallow_failures() {
        let transfer = create_transfer(create_identity_canvas(), MemoryClipboard::with_text("garbage"));
        block_on(transfer.run_paste_command());
        assert!(block_on(transfer.host().lock()).nodes.is_empty());

        block_on(transfer.run_copy_command(&create_health_node()));
        assert!(transfer.clipboard().contents().is_some_and(|text| text.contains("Health")));

        block_on(transfer.run_paste_command());
        assert_eq!(block_on(transfer.host().lock()).nodes.len(), 1);
    }
}
