use slotmap::new_key_type;


new_key_type! {
    /// Handle to a node of a [`SkipList`].
    ///
    /// [`SkipList`]: crate::SkipList
    pub struct SkipNodeId;
}

/// A node of a [`SkipList`]: a payload and one forward link per level the node participates in.
///
/// Level `0` is the base list; [`SkipNode::next`] is the level-0 link.
///
/// [`SkipList`]: crate::SkipList
#[derive(Debug, Clone)]
pub struct SkipNode<T> {
    data:    T,
    forward: Vec<Option<SkipNodeId>>,
}

impl<T> SkipNode<T> {
    /// A node with `level_count` levels, none of which link anywhere yet.
    #[inline]
    #[must_use]
    pub(super) fn new(data: T, level_count: usize) -> Self {
        Self {
            data,
            forward: vec![None; level_count],
        }
    }

    #[inline]
    #[must_use]
    pub(super) const fn with_forward_links(data: T, forward: Vec<Option<SkipNodeId>>) -> Self {
        Self { data, forward }
    }

    #[inline]
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// The following node in the base list.
    #[inline]
    #[must_use]
    pub fn next(&self) -> Option<SkipNodeId> {
        self.forward(0)
    }

    /// The following node at `level`, or `None` if there is no such node or this node does not
    /// participate in `level`.
    #[inline]
    #[must_use]
    pub fn forward(&self, level: usize) -> Option<SkipNodeId> {
        self.forward.get(level).copied().flatten()
    }

    /// The number of levels this node participates in.
    #[inline]
    #[must_use]
    pub const fn level_count(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    #[must_use]
    pub fn forward_links(&self) -> &[Option<SkipNodeId>] {
        &self.forward
    }

    /// Set the link at `level`, which this node must participate in.
    #[inline]
    pub(super) fn set_forward(&mut self, level: usize, link: Option<SkipNodeId>) {
        if let Some(slot) = self.forward.get_mut(level) {
            *slot = link;
        }
    }

    #[inline]
    pub(super) fn forward_links_mut(&mut self) -> &mut Vec<Option<SkipNodeId>> {
        &mut self.forward
    }
}
