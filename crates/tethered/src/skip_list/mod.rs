mod iter;
mod node;


use std::mem;

use slotmap::SlotMap;
use tracing::Level as LogLevel;

use crate::{
    config_constants::DEFAULT_MAX_LEVEL,
    error::{Error, Result},
    level_source::{GeometricLevels, LevelSource},
};

pub use self::{
    iter::LevelIter,
    node::{SkipNode, SkipNodeId},
};


/// An ordered set implemented as a skip list, whose level counts come from an injected
/// [`LevelSource`].
///
/// There is no sentinel node: the head is the node holding the smallest payload, and it spans
/// every level of the list. Inserting a payload smaller than the head makes the new node the head,
/// demoting the old head to an ordinary node.
///
/// Duplicate payloads are not stored; inserting a payload already in the list returns the
/// existing node.
///
/// Level counts drawn from the level source are clamped to `1..=max_level`, where `max_level`
/// defaults to [`DEFAULT_MAX_LEVEL`].
#[derive(Debug, Clone)]
pub struct SkipList<T, L = GeometricLevels> {
    nodes:     SlotMap<SkipNodeId, SkipNode<T>>,
    head:      Option<SkipNodeId>,
    levels:    L,
    max_level: usize,
}

impl<T> SkipList<T> {
    /// A skip list whose level counts are drawn from a [`GeometricLevels`] source seeded with
    /// `seed`.
    #[inline]
    #[must_use]
    pub fn new_seeded(seed: u64) -> Self {
        Self::new(GeometricLevels::new_seeded(seed))
    }
}

impl<T> Default for SkipList<T> {
    #[inline]
    fn default() -> Self {
        Self::new(GeometricLevels::default())
    }
}

impl<T, L> SkipList<T, L> {
    #[inline]
    #[must_use]
    pub fn new(levels: L) -> Self {
        Self {
            nodes:     SlotMap::with_key(),
            head:      None,
            levels,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Cap the level count of nodes inserted from now on at `max_level`, which is treated as
    /// at least `1`. Nodes already in the list keep their levels.
    #[inline]
    #[must_use]
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    /// The largest level count a newly inserted node may have.
    #[inline]
    #[must_use]
    pub const fn max_level(&self) -> usize {
        self.max_level
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node holding the smallest payload, if the list is nonempty.
    #[inline]
    #[must_use]
    pub const fn head(&self) -> Option<SkipNodeId> {
        self.head
    }

    /// The number of levels of the list, which is the level count of its head.
    /// An empty list has height `0`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.head.map_or(0, |head| self.nodes[head].level_count())
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    #[inline]
    pub fn node(&self, id: SkipNodeId) -> Result<&SkipNode<T>> {
        match self.nodes.get(id) {
            Some(node) => Ok(node),
            None       => Err(Error::stale_handle()),
        }
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    #[inline]
    pub fn data(&self, id: SkipNodeId) -> Result<&T> {
        self.node(id).map(SkipNode::data)
    }

    #[inline]
    #[must_use]
    pub const fn level_source(&self) -> &L {
        &self.levels
    }

    #[inline]
    #[must_use]
    pub const fn level_source_mut(&mut self) -> &mut L {
        &mut self.levels
    }

    /// Iterate over every payload in ascending order.
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> LevelIter<'_, T> {
        LevelIter::new(&self.nodes, self.head, 0)
    }

    /// Iterate over the payloads linked together at `level`, in ascending order, starting with
    /// the head. Levels at or above [`height`] are empty.
    ///
    /// [`height`]: SkipList::height
    #[must_use]
    pub fn level_iter(&self, level: usize) -> LevelIter<'_, T> {
        let start = self.head.filter(|&head| level < self.nodes[head].level_count());
        LevelIter::new(&self.nodes, start, level)
    }

    /// Drop every node. All outstanding handles become stale.
    ///
    /// The level source is kept as-is.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }
}

impl<T: Ord, L> SkipList<T, L> {
    /// Find the predecessors of `data` at every level, ordered from level `0` upwards.
    ///
    /// The predecessor at a level is the last node at that level whose payload compares less
    /// than or equal to `data`, except that the head is used if every payload at that level is
    /// greater than `data`. In particular, if `data` is in the list, its node is the level-0
    /// entry.
    ///
    /// The returned vector has [`height`] entries, and is empty if the list is empty.
    ///
    /// [`height`]: SkipList::height
    #[must_use]
    pub fn find(&self, data: &T) -> Vec<SkipNodeId> {
        let Some(head) = self.head else {
            return Vec::new();
        };

        let height = self.nodes[head].level_count();
        let mut preceding = Vec::with_capacity(height);
        let mut current = head;

        for level in (0..height).rev() {
            while let Some(next) = self.nodes[current].forward(level) {
                if self.nodes[next].data() <= data {
                    current = next;
                } else {
                    break;
                }
            }
            preceding.push(current);
        }

        preceding.reverse();
        preceding
    }

    /// The node holding a payload equal to `data`, if there is one.
    #[must_use]
    pub fn get(&self, data: &T) -> Option<SkipNodeId> {
        let candidate = *self.find(data).first()?;
        (self.nodes[candidate].data() == data).then_some(candidate)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, data: &T) -> bool {
        self.get(data).is_some()
    }
}

impl<T: Ord, L: LevelSource> SkipList<T, L> {
    /// Insert `data`, and return the node holding it.
    ///
    /// If an equal payload is already in the list, its node is returned and nothing else happens;
    /// in particular, no level count is drawn.
    ///
    /// Inserting into an empty list creates a single-level head without consulting the level
    /// source.
    pub fn insert(&mut self, data: T) -> SkipNodeId {
        let Some(head) = self.head else {
            let node = self.nodes.insert(SkipNode::new(data, 1));
            self.head = Some(node);
            return node;
        };

        if data < *self.nodes[head].data() {
            return self.insert_before_head(head, data);
        }

        let mut preceding = self.find(&data);
        if let Some(&existing) = preceding.first() {
            if *self.nodes[existing].data() == data {
                return existing;
            }
        }

        let levels = self.draw_level_count();
        if levels > preceding.len() {
            self.nodes[head].forward_links_mut().resize(levels, None);
            preceding.resize(levels, head);
            tracing::event!(LogLevel::TRACE, "skip list height grew to {levels}");
        }

        let forward = preceding
            .iter()
            .take(levels)
            .enumerate()
            .map(|(level, &pred)| self.nodes[pred].forward(level))
            .collect();
        let inserted = self.nodes.insert(SkipNode::with_forward_links(data, forward));

        for (level, &pred) in preceding.iter().take(levels).enumerate() {
            self.nodes[pred].set_forward(level, Some(inserted));
        }

        inserted
    }

    /// Make a new node holding `data` the head, where `data` is smaller than every payload in
    /// the list.
    ///
    /// The new head takes over the old head's links at every level, and the old head becomes an
    /// ordinary node with a freshly drawn level count, placed right after the new head.
    fn insert_before_head(&mut self, old_head: SkipNodeId, data: T) -> SkipNodeId {
        let levels = self.draw_level_count();

        let old_links = self.nodes[old_head].forward_links_mut();
        if levels > old_links.len() {
            old_links.resize(levels, None);
        }

        let mut head_links = mem::take(old_links);
        old_links.extend(head_links.iter().take(levels).copied());
        for link in head_links.iter_mut().take(levels) {
            *link = Some(old_head);
        }

        let new_head = self.nodes.insert(SkipNode::with_forward_links(data, head_links));
        self.head = Some(new_head);

        tracing::event!(
            LogLevel::TRACE,
            "skip list head replaced, {old_head:?} demoted to {levels} levels",
        );

        new_head
    }

    /// Draw a level count for a new node, clamped to `1..=max_level`.
    fn draw_level_count(&mut self) -> usize {
        match self.levels.next_level_count() {
            0 => {
                tracing::event!(LogLevel::DEBUG, "level source returned 0 levels, using 1");
                1
            }
            levels if levels > self.max_level => {
                tracing::event!(
                    LogLevel::DEBUG,
                    "level source returned {levels} levels, capped at {}",
                    self.max_level,
                );
                self.max_level
            }
            levels => levels,
        }
    }
}
