//! Rotations and size-balance restoration.
//!
//! Every node `t` keeps `size(t.left) >= size(t.right.left)`, `size(t.left) >= size(t.right.right)`
//! and the mirrored pair for `t.right`. A single insertion or deletion can break these by at
//! most one element on one side of each ancestor, which the rebalancer repairs while climbing
//! from the mutation site to the root.

use super::handle::Handle;
use super::node::Side;
use super::raw_sb_tree::RawSBTree;
use super::size::Size;

impl<T> RawSBTree<T> {
    /// Rotates `t` down towards `direction`; its child on the other side takes its place.
    /// Returns the node now at the top of the rotated subtree.
    pub(super) fn rotate(&mut self, t: Handle, direction: Side) -> Handle {
        let rising = direction.opposite();
        let pivot = self.node(t).child(rising).expect("`RawSBTree::rotate()` - no child to rotate up!");
        log::trace!("{direction:?} rotation at {t:?}");

        let inner = self.node(pivot).child(direction);
        self.node_mut(t).set_child(rising, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(t));
        }

        let parent = self.parent(t);
        self.node_mut(pivot).set_parent(parent);
        self.replace_child(parent, t, Some(pivot));

        self.node_mut(pivot).set_child(direction, Some(t));
        self.node_mut(t).set_parent(Some(pivot));

        let size = self.node(t).size();
        self.node_mut(pivot).set_size(size);
        let size = self.size_of(self.left(t)) + self.size_of(self.right(t)) + 1;
        self.node_mut(t).set_size(Size::from_usize(size));

        pivot
    }

    /// Restores the size balance of the subtree at `t`, whose `heavy` side may have grown
    /// too large relative to the other. Returns the node now at the top of the subtree.
    pub(super) fn rebalance(&mut self, t: Handle, heavy: Side) -> Handle {
        self.maintain(t, heavy, 0)
    }

    fn maintain(&mut self, t: Handle, heavy: Side, depth: usize) -> Handle {
        #[cfg(test)]
        {
            self.max_rebalance_depth = self.max_rebalance_depth.max(depth);
        }

        let light = heavy.opposite();
        let Some(child) = self.node(t).child(heavy) else {
            return t;
        };
        let light_size = self.size_of(self.node(t).child(light));
        let inner = self.node(child).child(light);
        let outer = self.node(child).child(heavy);

        if light_size < self.size_of(inner) {
            // The near grandchild outweighs the light side: double rotation.
            self.rotate(child, heavy);
            let t = self.rotate(t, light);
            let node = self.node(t);
            let (light_child, heavy_child) = (node.child(light), node.child(heavy));
            if let Some(light_child) = light_child {
                self.maintain(light_child, light, depth + 1);
            }
            if let Some(heavy_child) = heavy_child {
                self.maintain(heavy_child, heavy, depth + 1);
            }
            self.maintain(t, heavy, depth + 1)
        } else if light_size < self.size_of(outer) {
            // The far grandchild outweighs the light side: single rotation.
            let t = self.rotate(t, light);
            if let Some(light_child) = self.node(t).child(light) {
                self.maintain(light_child, light, depth + 1);
            }
            self.maintain(t, heavy, depth + 1)
        } else {
            t
        }
    }

    /// Runs the rebalance climb after a structural change at `start`: first at `start`,
    /// whose `via` subtree changed, then at every ancestor up to the root.
    pub(super) fn rebalance_climb(&mut self, start: Handle, via: Side, grew: bool) {
        let heavy = |via: Side| if grew { via } else { via.opposite() };

        let mut t = self.rebalance(start, heavy(via));
        while let Some(via) = self.side_of(t) {
            let parent = self.parent(t).expect("`RawSBTree::rebalance_climb()` - sided node has no parent!");
            t = self.rebalance(parent, heavy(via));
        }
    }
}
