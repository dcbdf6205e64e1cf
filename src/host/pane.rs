//! Editor-pane display contract.
//!
//! The embedding editor owns panes, tabs, and the text buffers shown in
//! them; the coordinator only asks it to show, close, or save buffers
//! addressed by handle, and to report where they ended up.

use super::handle::BufferHandle;
use std::fmt;

/// 1-based pane column, as editors number their split groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneColumn(pub u8);

impl Default for PaneColumn {
    fn default() -> Self {
        PaneColumn(1)
    }
}

impl fmt::Display for PaneColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowTarget {
    Column(PaneColumn),
    /// Open beside the current pane instead of reusing a column.
    Beside,
}

#[derive(Clone, Copy, Debug)]
pub struct ShowOptions {
    pub preserve_focus: bool,
    /// Disposable-tab display mode; the host may replace a preview tab
    /// with the next shown buffer instead of opening a new one.
    pub preview: bool,
}

pub trait PaneHost {
    /// Show the buffer at `handle`, opening it if needed. Reports the
    /// column the editor actually placed it in.
    fn show_buffer(
        &mut self,
        handle: &BufferHandle,
        target: ShowTarget,
        options: ShowOptions,
    ) -> PaneColumn;

    /// Buffers currently visible in some pane, with their columns.
    fn visible_buffers(&self) -> Vec<(BufferHandle, PaneColumn)>;

    fn is_open(&self, handle: &BufferHandle) -> bool;

    /// Current text of an open buffer; `None` when the host has already
    /// destroyed it.
    fn buffer_text(&self, handle: &BufferHandle) -> Option<String>;

    /// Whether the host marks the buffer as having unsaved edits.
    fn is_dirty(&self, handle: &BufferHandle) -> bool;

    /// Delete-and-hide; the host provides no atomic repoint primitive.
    fn close_buffer(&mut self, handle: &BufferHandle);

    /// Evict the handle from the host's recently-opened history.
    fn remove_from_history(&mut self, handle: &BufferHandle);

    /// Durable host save. May normalize content (e.g. trim trailing
    /// whitespace), so byte-exact callers skip it. Returns whether the
    /// buffer was dirty.
    fn save_buffer(&mut self, handle: &BufferHandle) -> bool;
}
