//! Listener pattern for parse-tree traversal.

use super::tree::ParseNode;

/// Listener trait for MetaEd parse trees.
///
/// Implement this trait to react to productions as a tree is walked.
/// `enter` fires pre-order, `exit` post-order. Default implementations are
/// no-ops.
pub trait MetaEdListener {
    fn enter(&mut self, _node: &ParseNode) {}
    fn exit(&mut self, _node: &ParseNode) {}
}

/// Walk `root` depth first, calling `enter` before and `exit` after each
/// node's children.
pub fn walk<L: MetaEdListener + ?Sized>(listener: &mut L, root: &ParseNode) {
    listener.enter(root);
    for child in root.nodes() {
        walk(listener, child);
    }
    listener.exit(root);
}
