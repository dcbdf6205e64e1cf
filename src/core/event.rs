//! Host lifecycle notifications delivered to the coordinator.
//!
//! All of these arrive synchronously from the embedding editor's event
//! loop, one at a time; none of them carry ownership of host state.

use crate::host::{BufferHandle, PaneColumn};
use crate::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The focused pane changed; `None` when focus left all panes.
    ActivePaneChanged(Option<(BufferHandle, PaneColumn)>),
    /// The set of visible panes changed (split, close, drag).
    VisiblePanesChanged(Vec<(BufferHandle, PaneColumn)>),
    /// A buffer moved to another column, e.g. after drag and drop.
    PaneColumnChanged(BufferHandle, PaneColumn),
    /// The editor window gained or lost OS focus.
    WindowFocusChanged(bool),
    /// Buffer text changed. `has_changes: false` marks zero-length
    /// change sets, which hosts emit for non-typing reasons (formatting
    /// on save) and which must be ignored.
    DocumentTextChanged {
        handle: BufferHandle,
        has_changes: bool,
    },
    TreeNodeExpanded(NodeId),
    TreeNodeCollapsed(NodeId),
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::ActivePaneChanged(_) => "activePaneChanged",
            HostEvent::VisiblePanesChanged(_) => "visiblePanesChanged",
            HostEvent::PaneColumnChanged(_, _) => "paneColumnChanged",
            HostEvent::WindowFocusChanged(_) => "windowFocusChanged",
            HostEvent::DocumentTextChanged { .. } => "documentTextChanged",
            HostEvent::TreeNodeExpanded(_) => "treeNodeExpanded",
            HostEvent::TreeNodeCollapsed(_) => "treeNodeCollapsed",
        }
    }

    pub fn is_tree_event(&self) -> bool {
        matches!(
            self,
            HostEvent::TreeNodeExpanded(_) | HostEvent::TreeNodeCollapsed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let event = HostEvent::WindowFocusChanged(true);
        assert_eq!(event.name(), "windowFocusChanged");
        assert!(!event.is_tree_event());
    }
}
