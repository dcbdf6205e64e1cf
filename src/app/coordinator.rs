//! Selection/body coordinator.
//!
//! Tracks which outline node is selected and which body buffer the host
//! is showing for it, and reconciles the two on every selection click,
//! body edit, and editor-layout change. The one hard ordering rule:
//! pending edits are flushed into the document store before the body
//! binding moves to another node, so text is always attributed to the
//! node it was typed under.

use compact_str::CompactString;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Command, HostEvent};
use crate::host::{BufferHandle, PaneColumn, PaneHost, ShowOptions, ShowTarget, TreeHost};
use crate::models::{DocumentError, NodeId, SharedDocuments};
use crate::services::{BodyFs, WorkbenchConfig};

pub struct Coordinator<P: PaneHost, T: TreeHost> {
    store: SharedDocuments,
    body_fs: Rc<RefCell<BodyFs>>,
    panes: P,
    tree: T,
    scheme: CompactString,
    save_on_flush: bool,

    last_selected: Option<NodeId>,
    body_handle: Option<BufferHandle>,
    /// Captured when the change event arrives, so a later selection
    /// change cannot misattribute the edit.
    pending_edit: Option<BufferHandle>,
    preview_mode: bool,
    last_column: PaneColumn,
}

impl<P: PaneHost, T: TreeHost> Coordinator<P, T> {
    pub fn new(
        store: SharedDocuments,
        body_fs: Rc<RefCell<BodyFs>>,
        panes: P,
        tree: T,
        config: &WorkbenchConfig,
    ) -> Self {
        if config.startup_document != 0 {
            if let Err(e) = store.borrow_mut().switch(config.startup_document) {
                tracing::warn!(error = %e, "startup document unavailable, keeping first");
            }
        }
        Self {
            store,
            body_fs,
            panes,
            tree,
            scheme: CompactString::from(config.body_scheme.as_str()),
            save_on_flush: config.save_on_flush,
            last_selected: None,
            body_handle: None,
            pending_edit: None,
            preview_mode: true,
            last_column: PaneColumn::default(),
        }
    }

    // ---- inspection -----------------------------------------------------

    pub fn last_selected(&self) -> Option<NodeId> {
        self.last_selected
    }

    pub fn body_handle(&self) -> Option<&BufferHandle> {
        self.body_handle.as_ref()
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn last_column(&self) -> PaneColumn {
        self.last_column
    }

    pub fn has_pending_edit(&self) -> bool {
        self.pending_edit.is_some()
    }

    pub fn documents(&self) -> &SharedDocuments {
        &self.store
    }

    pub fn panes(&self) -> &P {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut P {
        &mut self.panes
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    // ---- dispatch -------------------------------------------------------

    pub fn handle_command(&mut self, command: Command) -> Result<(), DocumentError> {
        tracing::debug!(command = command.name(), "command");
        match command {
            Command::SelectNode { node, aside } => {
                self.select_node(node, aside);
                Ok(())
            }
            Command::SwitchDocument(id) => self.switch_document(id),
            Command::RefreshTree(node) => {
                self.refresh_tree(node);
                Ok(())
            }
        }
    }

    pub fn handle_event(&mut self, event: HostEvent) {
        tracing::trace!(event = event.name(), "host event");
        match event {
            HostEvent::ActivePaneChanged(active) => {
                if let Some((handle, _)) = active {
                    if handle.has_scheme(&self.scheme) && Some(&handle) != self.body_handle.as_ref()
                    {
                        self.hide_delete_body(&handle);
                    }
                }
                self.flush_pending_edit(self.save_on_flush);
            }
            HostEvent::VisiblePanesChanged(panes) => {
                for (handle, _) in &panes {
                    if handle.has_scheme(&self.scheme) && Some(handle) != self.body_handle.as_ref()
                    {
                        self.hide_delete_body(handle);
                    }
                }
                self.flush_pending_edit(self.save_on_flush);
            }
            HostEvent::PaneColumnChanged(handle, column) => {
                if Some(&handle) == self.body_handle.as_ref() {
                    self.last_column = column;
                }
                self.flush_pending_edit(self.save_on_flush);
            }
            HostEvent::WindowFocusChanged(_) => {
                self.flush_pending_edit(self.save_on_flush);
            }
            HostEvent::DocumentTextChanged {
                handle,
                has_changes,
            } => {
                self.on_document_changed(handle, has_changes);
            }
            HostEvent::TreeNodeExpanded(node) => self.on_tree_expand_collapse(node, true),
            HostEvent::TreeNodeCollapsed(node) => self.on_tree_expand_collapse(node, false),
        }
    }

    // ---- selection ------------------------------------------------------

    /// Click or press enter on an outline node.
    pub fn select_node(&mut self, node: NodeId, aside: bool) {
        if self.last_selected == Some(node) {
            // Re-click on the already-selected node: no rebind, just
            // re-resolve the pane and bring it forward.
            if let Some(gnx) = self.gnx_of(node) {
                self.locate_opened_body(&gnx);
            }
            self.show_body(aside, false);
            return;
        }

        self.flush_pending_edit(false);
        self.apply_node_to_body(node, aside, false);
    }

    /// Select the active document's load-time auto-focus node, if any.
    pub fn select_initial(&mut self) {
        let initial = self.store.borrow().active().outline().initial_selection();
        if let Some(node) = initial {
            self.tree.reveal(node, true, false);
            self.select_node(node, false);
        }
    }

    fn apply_node_to_body(&mut self, node: NodeId, aside: bool, preserve_focus: bool) {
        self.last_selected = Some(node);

        let Some(gnx) = self.gnx_of(node) else {
            tracing::warn!("selected node no longer in the active outline");
            return;
        };

        match self.body_handle.clone() {
            None => {
                // First binding for this pane.
                self.bind(BufferHandle::new(&self.scheme, &gnx));
            }
            Some(handle) => {
                let needs_switch =
                    !self.panes.is_open(&handle) || !self.locate_opened_body(&gnx);
                if needs_switch && handle.gnx() != gnx.as_str() {
                    // Persist the outgoing buffer before repointing.
                    self.panes.save_buffer(&handle);
                    self.switch_body(&gnx, aside, preserve_focus);
                    return;
                }
            }
        }

        self.show_body(aside, preserve_focus);
    }

    /// Repoint the body pane to a new gnx. Preview buffers are
    /// disposable and can be replaced in place; a pinned buffer must be
    /// closed first, and the new binding starts out in preview mode.
    fn switch_body(&mut self, new_gnx: &str, aside: bool, preserve_focus: bool) {
        let old = self.body_handle.clone();
        let new_handle = BufferHandle::new(&self.scheme, new_gnx);
        tracing::debug!(from = ?old, to = %new_handle, preview = self.preview_mode, "switch body");

        if self.preview_mode {
            self.bind(new_handle);
            self.show_body(aside, preserve_focus);
            if let Some(old) = old {
                self.panes.remove_from_history(&old);
            }
        } else {
            if let Some(old) = &old {
                self.panes.close_buffer(old);
            }
            self.preview_mode = true;
            self.bind(new_handle);
            if let Some(old) = old {
                if old.gnx() != new_gnx {
                    self.panes.remove_from_history(&old);
                }
            }
            self.show_body(aside, preserve_focus);
        }
    }

    fn bind(&mut self, handle: BufferHandle) {
        self.body_fs.borrow_mut().set_body_time(&handle);
        self.body_handle = Some(handle);
    }

    fn show_body(&mut self, aside: bool, preserve_focus: bool) {
        let Some(handle) = self.body_handle.clone() else {
            return;
        };
        let target = if aside {
            ShowTarget::Beside
        } else {
            ShowTarget::Column(self.last_column)
        };
        let column = self.panes.show_buffer(
            &handle,
            target,
            ShowOptions {
                preserve_focus,
                preview: true,
            },
        );
        self.last_column = column;
    }

    /// Scan the visible panes for a buffer bound to `gnx`; adopt its
    /// column as the reopen target. Resets the column to the default
    /// when nothing matches.
    fn locate_opened_body(&mut self, gnx: &str) -> bool {
        self.last_column = PaneColumn::default();
        let mut found = false;
        for (handle, column) in self.panes.visible_buffers() {
            if handle.has_scheme(&self.scheme) && handle.gnx() == gnx {
                found = true;
                self.last_column = column;
            }
        }
        found
    }

    fn gnx_of(&self, node: NodeId) -> Option<CompactString> {
        self.store
            .borrow()
            .active()
            .outline()
            .gnx(node)
            .map(CompactString::from)
    }

    // ---- edits ----------------------------------------------------------

    /// Host reported a text change on some buffer. Zero-length change
    /// sets and foreign schemes never count as user edits.
    pub fn on_document_changed(&mut self, handle: BufferHandle, has_changes: bool) {
        if !has_changes || !handle.has_scheme(&self.scheme) || self.last_selected.is_none() {
            return;
        }
        // An edited buffer must never be discarded as disposable.
        self.preview_mode = false;
        self.pending_edit = Some(handle);
    }

    /// Write the pending edit back into the document store under the
    /// gnx captured at edit time. Returns whether a flush happened.
    ///
    /// Called defensively from every focus/layout/visibility event: the
    /// host can destroy editors without an early-enough closing signal.
    pub fn flush_pending_edit(&mut self, force_persist: bool) -> bool {
        let dirty = match &self.pending_edit {
            Some(handle) => self.panes.is_dirty(handle),
            None => false,
        };
        if !dirty {
            // A clean pending buffer stays pending; the next dirty
            // report will flush it.
            return false;
        }
        let Some(handle) = self.pending_edit.take() else {
            return false;
        };
        let Some(text) = self.panes.buffer_text(&handle) else {
            tracing::warn!(handle = %handle, "pending edit buffer vanished before flush");
            return false;
        };

        let selected_gnx = self.last_selected.and_then(|node| self.gnx_of(node));
        if selected_gnx.as_deref() != Some(handle.gnx()) {
            // Stale binding: selection moved since the edit arrived.
            // Still committed to the captured gnx; never dropped.
            tracing::warn!(
                bound = handle.gnx(),
                selected = selected_gnx.as_deref().unwrap_or("<none>"),
                "flushing stale body binding"
            );
        }

        self.store
            .borrow_mut()
            .active_mut()
            .set_body(handle.gnx(), &text);

        if force_persist {
            // Host save may normalize whitespace; callers needing
            // byte-exact round trips pass false.
            self.panes.save_buffer(&handle);
        }
        true
    }

    // ---- tree and documents ---------------------------------------------

    /// Expanding or collapsing a node's arrow without clicking its
    /// label still selects it and updates the body pane.
    pub fn on_tree_expand_collapse(&mut self, node: NodeId, expanding: bool) {
        self.flush_pending_edit(self.save_on_flush);
        {
            let mut store = self.store.borrow_mut();
            let outline = store.active_mut().outline_mut();
            if expanding {
                outline.expand(node);
            } else {
                outline.collapse(node);
            }
        }
        if self.last_selected == Some(node) {
            return;
        }
        self.tree.reveal(node, true, false);
        self.select_node(node, false);
    }

    /// Replace the active document. Pending edits are saved first, so a
    /// body write can never race the switch.
    pub fn switch_document(&mut self, id: usize) -> Result<(), DocumentError> {
        self.flush_pending_edit(true);
        self.store.borrow_mut().switch(id)?;
        // Node ids belong to the outgoing outline; the body rebinds on
        // the next selection.
        self.last_selected = None;
        self.tree.refresh(None);
        Ok(())
    }

    pub fn refresh_tree(&mut self, node: Option<NodeId>) {
        self.tree.refresh(node);
    }

    fn hide_delete_body(&mut self, handle: &BufferHandle) {
        tracing::debug!(handle = %handle, "closing extraneous body buffer");
        self.panes.close_buffer(handle);
        self.panes.remove_from_history(handle);
    }
}
