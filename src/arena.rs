/// Handle to a node stored in the tree source.
///
/// Handles are cheap to copy and stay valid until their node is deleted.
/// Slots freed by a deletion are reused by later insertions, so a handle
/// must not be kept across the deletion of its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single element of the hierarchy: one user value plus structural and
/// expansion state.
///
/// Ownership is strictly top-down. A node's `children` sequence owns the
/// child slots; `parent` is a plain back-handle used for ancestor walks and
/// never keeps anything alive.
#[derive(Debug, Clone)]
pub struct Node<V> {
    value: V,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    is_expanded: bool,
}

impl<V> Node<V> {
    fn new(value: V, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
            is_expanded: false,
        }
    }

    /// The wrapped user value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Handle of the parent node, `None` for root-level nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the flattener descends into this node's children.
    ///
    /// The flag never affects the node's own row: visibility of a node is
    /// decided by its ancestors' flags, not by its own.
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.is_expanded = !self.is_expanded;
    }
}

/// Flat slot storage for all nodes of the forest.
///
/// Slots vacated by [`NodeArena::remove`] are pushed onto a free list and
/// handed out again by the next [`NodeArena::insert`].
#[derive(Debug)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
}

impl<V> NodeArena<V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert(
        &mut self,
        value: V,
        parent: Option<NodeId>,
    ) -> NodeId {
        let node = Node::new(value, parent);
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            },
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            },
        }
    }

    /// Vacate a slot and return its node, or `None` if already vacant.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<V>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.slots.get(id.0)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Iterate over every live node, in slot order.
    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Node<V>> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
