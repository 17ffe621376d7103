use clap::{Parser, Subcommand};
use futures::executor::block_on;
use nodeclip::memory::{MemoryCanvas, MemoryClipboard};
use nodeclip::prelude::*;
use nodeclip::reconcile::extract_identities;
use nodeclip::traverse::collect;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Copy and paste node trees between canvas descriptions on disk
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serialize a node tree the way the copy command does (successors dropped)
    Copy {
        /// Path to a JSON node tree
        tree_path: String,
        /// Write the clipboard text here instead of stdout
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Show what a clipboard payload contains
    Inspect {
        /// Path to a file holding clipboard text
        clipboard_path: String,
    },
    /// Paste a clipboard payload into a canvas description
    Paste {
        /// Path to the destination canvas JSON
        #[arg(short, long)]
        canvas: String,
        /// Path to a file holding clipboard text
        #[arg(long)]
        clipboard: String,
        /// Last pointer position in screen coordinates, as `X,Y`
        #[arg(short, long, value_parser = parse_pointer)]
        pointer: Option<PointerSample>,
        /// Write the updated canvas here instead of stdout
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Copy { tree_path, out } => run_copy(&tree_path, out.as_deref()),
        Command::Inspect { clipboard_path } => run_inspect(&clipboard_path),
        Command::Paste {
            canvas,
            clipboard,
            pointer,
            out,
        } => run_paste(&canvas, &clipboard, pointer, out.as_deref()),
    }
}

fn run_copy(tree_path: &str, out: Option<&str>) {
    let tree_json = read_file(tree_path);
    let node = match ClipboardPayload::parse(&tree_json) {
        Ok(ClipboardPayload::Tree(node)) => node,
        Ok(ClipboardPayload::LegacyMarkup(_)) => exit_with_error("Expected a node tree, found legacy markup"),
        Err(e) => exit_with_error(&format!("Failed to parse node tree: {}", e)),
    };

    let transfer = ClipboardTransfer::builder(MemoryCanvas::new(), MemoryClipboard::new()).build();
    let report = block_on(transfer.copy(&node))
        .unwrap_or_else(|e| exit_with_error(&format!("Copy failed: {}", e)));
    let text = transfer.clipboard().contents().unwrap_or_default();

    write_output(out, &text);
    eprintln!(
        "Copied {} node(s), {} bytes{}",
        report.node_count,
        report.bytes,
        if report.dropped_successors {
            " (chain below dropped)"
        } else {
            ""
        }
    );
}

fn run_inspect(clipboard_path: &str) {
    let text = read_file(clipboard_path);
    let payload = ClipboardPayload::parse(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Unreadable clipboard payload: {}", e)));

    match payload {
        ClipboardPayload::LegacyMarkup(markup) => {
            println!("Legacy markup payload ({} bytes)", markup.len());
        }
        ClipboardPayload::Tree(root) => {
            let nodes = collect(&root);
            println!("Tree payload rooted at '{}'", root.kind);
            println!("  Nodes: {}", nodes.len());
            for node in &nodes {
                let position = node.position();
                println!("    - {} at ({}, {})", node.kind, position.x, position.y);
            }

            let identities = extract_identities(&root, &KindPolicy::default());
            println!("  Variables: {}", identities.len());
            for identity in &identities {
                println!(
                    "    - {} [{}]{}",
                    identity.name,
                    if identity.var_type.is_empty() {
                        "untyped"
                    } else {
                        identity.var_type.as_str()
                    },
                    identity
                        .id
                        .as_deref()
                        .map(|id| format!(" id={}", id))
                        .unwrap_or_default()
                );
            }
        }
    }
}

fn run_paste(canvas_path: &str, clipboard_path: &str, pointer: Option<PointerSample>, out: Option<&str>) {
    let total_start = Instant::now();

    let canvas = MemoryCanvas::from_json(&read_file(canvas_path))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse canvas: {}", e)));
    let clipboard = MemoryClipboard::with_text(read_file(clipboard_path));

    let tracker = PointerTracker::new();
    if let Some(sample) = pointer {
        tracker.record(sample);
    }
    let transfer = ClipboardTransfer::builder(canvas, clipboard)
        .with_pointer_tracker(tracker)
        .build();

    let report = block_on(transfer.paste())
        .unwrap_or_else(|e| exit_with_error(&format!("Paste failed: {}", e)));

    let canvas_json = block_on(async {
        let host = transfer.host().lock().await;
        serde_json::to_string_pretty(&*host)
    })
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode canvas: {}", e)));
    write_output(out, &canvas_json);

    eprintln!("\n--- Paste Summary ---");
    eprintln!("Path:               {:?}", report.path);
    eprintln!("Nodes:              {}", report.node_count);
    eprintln!("Variables created:  {}", report.reconcile.created().count());
    eprintln!("Variables existing: {}", report.reconcile.existing().count());
    eprintln!("Variables failed:   {}", report.reconcile.failed().count());
    eprintln!("Fields changed:     {}", report.sanitize.changes().count());
    eprintln!("Fields skipped:     {}", report.sanitize.skipped().count());
    if let Some(placement) = report.placement {
        eprintln!(
            "Placed at:          ({}, {}) via {:?}",
            placement.target.point.x, placement.target.point.y, placement.target.strategy
        );
    }
    eprintln!("Total:              {:?}", total_start.elapsed());
}

fn parse_pointer(value: &str) -> Result<PointerSample, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(PointerSample::new(x, y))
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)))
}

fn write_output(out: Option<&str>, text: &str) {
    match out {
        Some(path) => fs::write(path, text)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e))),
        None => println!("{}", text),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
