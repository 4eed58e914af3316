use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, trace, warn};

use crate::arena::{Node, NodeArena, NodeId};
use crate::error::{Result, TreeSourceError};
use crate::flatten::{
    FlattenedNode, collect_subtree, flatten_all, flatten_visible,
};

/// Tree data source that projects a forest of expandable nodes into a flat
/// row sequence.
///
/// Structural edits and expansion changes only touch the forest; the
/// flattened [`items`](Self::items) sequence is a snapshot that is replaced
/// wholesale by [`reload`](Self::reload). Batch any number of edits between
/// two reloads.
///
/// Values are assumed unique across the forest. When a duplicate is
/// inserted anyway, the lookup index resolves the value to the node
/// inserted last.
pub struct TreeSource<V> {
    arena: NodeArena<V>,
    roots: Vec<NodeId>,
    index: HashMap<V, NodeId>,
    items: Vec<FlattenedNode>,
}

impl<V> Default for TreeSource<V> {
    fn default() -> Self {
        Self {
            arena: NodeArena::new(),
            roots: Vec::new(),
            index: HashMap::new(),
            items: Vec::new(),
        }
    }
}

impl<V> TreeSource<V>
where
    V: Eq + Hash + Clone,
{
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Structural edits ---

    /// Append `values` as children of `parent`, or as roots when `parent`
    /// is `None`.
    ///
    /// An unresolvable parent makes the whole call a no-op; use
    /// [`try_append`](Self::try_append) to observe that case.
    pub fn append<I>(&mut self, values: I, parent: Option<&V>)
    where
        I: IntoIterator<Item = V>,
    {
        if let Err(err) = self.try_append(values, parent) {
            debug!("append dropped: {err}");
        }
    }

    /// Fallible variant of [`append`](Self::append).
    pub fn try_append<I>(
        &mut self,
        values: I,
        parent: Option<&V>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        let parent_id = match parent {
            Some(parent) => Some(
                self.resolve(parent).ok_or(TreeSourceError::ParentNotFound)?,
            ),
            None => None,
        };

        for value in values {
            let id = self.create_node(value, parent_id);
            match parent_id {
                Some(parent_id) => {
                    if let Some(node) = self.arena.get_mut(parent_id) {
                        node.children_mut().push(id);
                    }
                },
                None => self.roots.push(id),
            }
        }
        Ok(())
    }

    /// Splice `values` in as siblings immediately before `anchor`.
    ///
    /// The new nodes share the anchor's parent (or become roots when the
    /// anchor is a root). An unresolvable anchor makes the call a no-op.
    pub fn insert_before<I>(&mut self, values: I, anchor: &V)
    where
        I: IntoIterator<Item = V>,
    {
        if let Err(err) = self.try_insert_before(values, anchor) {
            debug!("insert_before dropped: {err}");
        }
    }

    /// Splice `values` in as siblings immediately after `anchor`.
    pub fn insert_after<I>(&mut self, values: I, anchor: &V)
    where
        I: IntoIterator<Item = V>,
    {
        if let Err(err) = self.try_insert_after(values, anchor) {
            debug!("insert_after dropped: {err}");
        }
    }

    /// Fallible variant of [`insert_before`](Self::insert_before).
    pub fn try_insert_before<I>(&mut self, values: I, anchor: &V) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        self.try_insert(values, anchor, 0)
    }

    /// Fallible variant of [`insert_after`](Self::insert_after).
    pub fn try_insert_after<I>(&mut self, values: I, anchor: &V) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        self.try_insert(values, anchor, 1)
    }

    /// Remove each resolvable value together with its whole subtree.
    ///
    /// Unresolved values are skipped. Passing an ancestor and one of its
    /// descendants in the same call is safe in either order.
    pub fn delete(&mut self, values: &[V]) {
        for value in values {
            match self.resolve(value) {
                Some(id) => self.remove_subtree(id),
                None => {
                    debug!("delete skipped a value not present in the forest");
                },
            }
        }
    }

    /// Drop the entire forest, index and flattened snapshot.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.roots.clear();
        self.index.clear();
        self.items.clear();
    }

    // --- Expansion state ---

    /// Flip the expansion flag of the one node holding `value`.
    ///
    /// Descendants keep their own flags; an unresolvable value is ignored.
    pub fn toggle_expand(&mut self, value: &V) {
        let Some(id) = self.resolve(value) else {
            debug!("toggle_expand dropped: value not present in the forest");
            return;
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.toggle_expanded();
        }
    }

    /// Set the expansion flag of the one node holding `value`.
    pub fn set_expanded(&mut self, value: &V, expanded: bool) {
        let Some(id) = self.resolve(value) else {
            debug!("set_expanded dropped: value not present in the forest");
            return;
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.set_expanded(expanded);
        }
    }

    /// Set the expansion flag on the node holding `value` and on every one
    /// of its descendants.
    pub fn set_subtree_expanded(&mut self, value: &V, expanded: bool) {
        let Some(id) = self.resolve(value) else {
            debug!(
                "set_subtree_expanded dropped: value not present in the forest"
            );
            return;
        };
        for member in collect_subtree(&self.arena, id) {
            if let Some(node) = self.arena.get_mut(member) {
                node.set_expanded(expanded);
            }
        }
    }

    /// Expand every node of the forest, at all levels.
    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    /// Collapse every node of the forest, at all levels.
    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    // --- Reload boundary ---

    /// Recompute the lookup index and the flattened row sequence from the
    /// current forest state.
    ///
    /// This is the only operation that makes prior edits observable through
    /// [`items`](Self::items). Cost is linear in the node count.
    pub fn reload(&mut self) {
        self.index.clear();
        let all = flatten_all(&self.arena, &self.roots);
        for &id in &all {
            if let Some(node) = self.arena.get(id) {
                self.index.insert(node.value().clone(), id);
            }
        }

        self.items = flatten_visible(&self.arena, &self.roots);
        trace!(
            "reload: {} nodes, {} visible rows",
            all.len(),
            self.items.len()
        );
    }

    // --- Queries ---

    /// Currently visible rows, top to bottom, as of the last
    /// [`reload`](Self::reload).
    pub fn items(&self) -> &[FlattenedNode] {
        &self.items
    }

    /// Resolve a value to its node handle, or `None` when absent.
    pub fn lookup(&self, value: &V) -> Option<NodeId> {
        self.resolve(value)
    }

    /// Root node handles in order (the backing store of the forest).
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Read access to a node, or `None` when the handle is stale.
    pub fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.arena.get(id)
    }

    /// The value held by `id`, or `None` when the handle is stale.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.arena.get(id).map(Node::value)
    }

    /// Number of parent hops from `id` to its root (roots are level 0).
    pub fn level(&self, id: NodeId) -> Option<usize> {
        let mut level = 0;
        let mut node = self.arena.get(id)?;
        while let Some(parent) = node.parent() {
            level += 1;
            node = self.arena.get(parent)?;
        }
        Some(level)
    }

    /// Every node of the forest in depth-first pre-order, ignoring
    /// expansion state.
    pub fn depth_first(&self) -> Vec<NodeId> {
        flatten_all(&self.arena, &self.roots)
    }

    /// `id` plus all of its descendants in depth-first pre-order, ignoring
    /// expansion state.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        collect_subtree(&self.arena, id)
    }

    /// Total node count across the whole forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    // --- Internal helpers ---

    fn resolve(&self, value: &V) -> Option<NodeId> {
        self.index.get(value).copied()
    }

    fn create_node(&mut self, value: V, parent: Option<NodeId>) -> NodeId {
        let id = self.arena.insert(value.clone(), parent);
        if self.index.insert(value, id).is_some() {
            warn!("duplicate value inserted; lookup now resolves to the newest node");
        }
        id
    }

    fn try_insert<I>(
        &mut self,
        values: I,
        anchor: &V,
        offset: usize,
    ) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        let anchor_id =
            self.resolve(anchor).ok_or(TreeSourceError::AnchorNotFound)?;
        let parent = self.arena.get(anchor_id).and_then(Node::parent);
        let position = self
            .containing_sequence(parent)
            .iter()
            .position(|&id| id == anchor_id)
            .ok_or(TreeSourceError::AnchorNotFound)?;

        let mut at = position + offset;
        for value in values {
            let id = self.create_node(value, parent);
            self.splice(parent, at, id);
            at += 1;
        }
        Ok(())
    }

    /// The sequence a child of `parent` lives in: the parent's children, or
    /// the forest roots when `parent` is `None`.
    fn containing_sequence(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => {
                self.arena.get(id).map(Node::children).unwrap_or(&[])
            },
            None => &self.roots,
        }
    }

    fn splice(&mut self, parent: Option<NodeId>, at: usize, id: NodeId) {
        match parent {
            Some(parent_id) => {
                if let Some(node) = self.arena.get_mut(parent_id) {
                    node.children_mut().insert(at, id);
                }
            },
            None => self.roots.insert(at, id),
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        match self.arena.get(id).and_then(Node::parent) {
            Some(parent_id) => {
                if let Some(parent) = self.arena.get_mut(parent_id) {
                    parent.children_mut().retain(|&child| child != id);
                }
            },
            None => self.roots.retain(|&root| root != id),
        }

        for member in collect_subtree(&self.arena, id) {
            if let Some(node) = self.arena.remove(member) {
                // Under duplicate values the index may already point at a
                // different, still-live node; leave that entry alone.
                if self.index.get(node.value()) == Some(&member) {
                    self.index.remove(node.value());
                }
            }
        }
    }

    fn set_all(&mut self, expanded: bool) {
        for node in self.arena.iter_mut() {
            node.set_expanded(expanded);
        }
    }
}
