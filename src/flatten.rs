use crate::arena::{NodeArena, NodeId};

/// Flattened representation of a visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedNode {
    /// Handle of the source node.
    pub id: NodeId,
    /// Zero-based tree depth (`0` for root-level rows).
    pub depth: usize,
}

/// Flatten the forest into the depth-first list of visible rows.
///
/// A node is emitted whenever the traversal reaches it; the traversal
/// descends into children only when the node is expanded. Root nodes are
/// always reached, so they are always emitted.
pub(crate) fn flatten_visible<V>(
    arena: &NodeArena<V>,
    roots: &[NodeId],
) -> Vec<FlattenedNode> {
    let mut entries = Vec::new();
    for &root in roots {
        push_visible(arena, root, 0, &mut entries);
    }
    entries
}

fn push_visible<V>(
    arena: &NodeArena<V>,
    id: NodeId,
    depth: usize,
    entries: &mut Vec<FlattenedNode>,
) {
    let Some(node) = arena.get(id) else {
        return;
    };
    entries.push(FlattenedNode { id, depth });

    if node.is_expanded() {
        for &child in node.children() {
            push_visible(arena, child, depth + 1, entries);
        }
    }
}

/// Enumerate every node of the forest in depth-first pre-order, ignoring
/// expansion state.
pub(crate) fn flatten_all<V>(
    arena: &NodeArena<V>,
    roots: &[NodeId],
) -> Vec<NodeId> {
    let mut out = Vec::new();
    for &root in roots {
        push_all(arena, root, &mut out);
    }
    out
}

/// Enumerate `id` and all of its descendants in depth-first pre-order,
/// ignoring expansion state.
pub(crate) fn collect_subtree<V>(
    arena: &NodeArena<V>,
    id: NodeId,
) -> Vec<NodeId> {
    let mut out = Vec::new();
    push_all(arena, id, &mut out);
    out
}

fn push_all<V>(arena: &NodeArena<V>, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(node) = arena.get(id) else {
        return;
    };
    out.push(id);
    for &child in node.children() {
        push_all(arena, child, out);
    }
}
