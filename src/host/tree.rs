//! Tree-view contract.

use crate::models::NodeId;

pub trait TreeHost {
    /// Scroll the node into view, optionally selecting and focusing it.
    fn reveal(&mut self, node: NodeId, select: bool, focus: bool);

    /// Invalidate the whole tree (`None`) or one subtree.
    fn refresh(&mut self, node: Option<NodeId>);
}
