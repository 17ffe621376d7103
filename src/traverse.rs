//! Pre-order traversal over a serialized node tree.
//!
//! Every pass over a payload (variable extraction, sanitization, offset application)
//! goes through [`walk`] or [`walk_mut`]; they differ only in the visitor. A node is
//! visited, then each of its inputs in insertion order (primary before placeholder,
//! each fully), then the node chained after it. Chains are followed in a loop rather
//! than by recursion so long sequences do not deepen the stack.

use crate::payload::SerializedNode;

/// Visits every node of the tree rooted at `root` exactly once, in pre-order.
pub fn walk<'a, F>(root: &'a SerializedNode, visit: &mut F)
where
    F: FnMut(&'a SerializedNode),
{
    let mut current = Some(root);
    while let Some(node) = current {
        visit(node);
        for attachment in node.inputs.values() {
            if let Some(child) = attachment.primary.as_deref() {
                walk(child, visit);
            }
            if let Some(child) = attachment.placeholder.as_deref() {
                walk(child, visit);
            }
        }
        current = node.next_node();
    }
}

/// Mutable counterpart of [`walk`] with the same visiting order.
pub fn walk_mut<F>(root: &mut SerializedNode, visit: &mut F)
where
    F: FnMut(&mut SerializedNode),
{
    let mut current = Some(root);
    while let Some(node) = current {
        visit(node);
        for attachment in node.inputs.values_mut() {
            if let Some(child) = attachment.primary.as_deref_mut() {
                walk_mut(child, visit);
            }
            if let Some(child) = attachment.placeholder.as_deref_mut() {
                walk_mut(child, visit);
            }
        }
        current = node
            .next
            .as_mut()
            .and_then(|next| next.primary.as_deref_mut());
    }
}

pub fn count_nodes(root: &SerializedNode) -> usize {
    let mut count = 0;
    walk(root, &mut |_| count += 1);
    count
}

/// Collects references to every node in visiting order.
pub fn collect(root: &SerializedNode) -> Vec<&SerializedNode> {
    let mut nodes = Vec::new();
    walk(root, &mut |node| nodes.push(node));
    nodes
}
