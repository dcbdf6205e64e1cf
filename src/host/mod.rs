//! Boundary contracts satisfied by the embedding editor.
//!
//! Everything observable - tree rendering, panes, tabs, history - lives
//! behind these traits; the core never talks to a concrete toolkit.

pub mod handle;
pub mod pane;
pub mod tree;

pub use handle::{BufferHandle, BODY_SCHEME};
pub use pane::{PaneColumn, PaneHost, ShowOptions, ShowTarget};
pub use tree::TreeHost;
