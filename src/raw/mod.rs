mod arena;
mod balance;
mod handle;
mod node;
mod raw_sb_tree;
mod search;
mod size;
mod walk;

pub(crate) use handle::Handle;
pub(crate) use node::Side;
pub(crate) use raw_sb_tree::RawSBTree;
pub use walk::WalkState;
