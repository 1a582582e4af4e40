use super::handle::Handle;
use super::node::Side;
use super::raw_sb_tree::RawSBTree;

/// How a full-structure walk arrived at the node it is currently on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WalkState {
    /// The starting node of the walk.
    Root,
    /// Descended from the parent into its left child.
    Left,
    /// Descended from the parent into its right child.
    Right,
    /// Moved across from a finished subtree to the other child of the same parent.
    Sibling,
    /// Climbed back from a finished child; the node was already visited.
    Parent,
}

impl WalkState {
    /// Whether this step lands on a node for the first time.
    #[must_use]
    pub const fn is_first_visit(self) -> bool {
        !matches!(self, WalkState::Parent)
    }

    /// Change in depth caused by this step: `1` for a descent, `-1` for a climb, `0`
    /// otherwise.
    #[must_use]
    pub const fn depth_delta(self) -> isize {
        match self {
            WalkState::Left | WalkState::Right => 1,
            WalkState::Parent => -1,
            WalkState::Root | WalkState::Sibling => 0,
        }
    }
}

impl<T> RawSBTree<T> {
    /// One step of the stack-free full-structure walk, preferring `first` children. Returns
    /// `None` once the walk climbs back out of the root.
    pub(crate) fn walk_step(&self, at: Handle, state: WalkState, first: Side) -> Option<(Handle, WalkState)> {
        let second = first.opposite();
        let arrived_down = |side: Side| match side {
            Side::Left => WalkState::Left,
            Side::Right => WalkState::Right,
        };

        if state != WalkState::Parent {
            if let Some(child) = self.node(at).child(first) {
                return Some((child, arrived_down(first)));
            }
            if let Some(child) = self.node(at).child(second) {
                return Some((child, arrived_down(second)));
            }
        }

        let parent = self.parent(at)?;
        match self.node(parent).child(second) {
            Some(sibling) if sibling != at => Some((sibling, WalkState::Sibling)),
            _ => Some((parent, WalkState::Parent)),
        }
    }
}
