//! User-triggered command surface.

use crate::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click or press enter on an outline node; `aside` opens the body
    /// beside the current pane instead of reusing the last column.
    SelectNode { node: NodeId, aside: bool },
    SwitchDocument(usize),
    /// Invalidate the whole tree (`None`) or one subtree.
    RefreshTree(Option<NodeId>),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectNode { .. } => "selectNode",
            Command::SwitchDocument(_) => "switchDocument",
            Command::RefreshTree(_) => "refreshTree",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Command::SwitchDocument(1).name(), "switchDocument");
        assert_eq!(Command::RefreshTree(None).name(), "refreshTree");
    }
}
