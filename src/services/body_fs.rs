//! Virtual buffer provider serving body text from the document store.
//!
//! Body panes are addressed like files under a dedicated scheme. The
//! provider resolves reads against the active document, so the same gnx
//! yields different text after a document switch. Deleting a handle only
//! signals watchers that the buffer is gone; the stored body survives.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::{Duration, Instant, SystemTime};

use crate::host::handle::BufferHandle;
use crate::models::SharedDocuments;

pub type Result<T> = std::result::Result<T, BodyFsError>;

#[derive(Debug)]
pub enum BodyFsError {
    /// Unknown gnx: distinguishable from an empty body.
    NotFound(BufferHandle),
    WrongScheme(BufferHandle),
}

impl fmt::Display for BodyFsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyFsError::NotFound(handle) => write!(f, "not found: {}", handle),
            BodyFsError::WrongScheme(handle) => write!(f, "wrong scheme: {}", handle),
        }
    }
}

impl std::error::Error for BodyFsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub ctime: SystemTime,
    pub mtime: SystemTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Changed(BufferHandle),
    Deleted(BufferHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

/// Virtual document/buffer contract the host consumes.
pub trait BufferFs {
    fn scheme(&self) -> &str;

    fn read(&self, handle: &BufferHandle) -> Result<String>;

    fn write(&mut self, handle: &BufferHandle, text: &str) -> Result<()>;

    fn stat(&self, handle: &BufferHandle) -> Result<FileStat>;

    fn delete(&mut self, handle: &BufferHandle) -> Result<()>;

    fn watch(&mut self, handle: &BufferHandle) -> WatchId;

    fn unwatch(&mut self, id: WatchId);
}

pub struct BodyFs {
    scheme: CompactString,
    store: SharedDocuments,
    // (ctime, mtime) per handle; stamped when the binding changes or on write
    times: FxHashMap<BufferHandle, (SystemTime, SystemTime)>,
    watches: FxHashMap<WatchId, BufferHandle>,
    next_watch: u64,
    queued: Vec<FileChange>,
    fire_at: Option<Instant>,
    debounce: Duration,
}

impl BodyFs {
    pub fn new(store: SharedDocuments, scheme: &str, debounce: Duration) -> Self {
        Self {
            scheme: CompactString::from(scheme),
            store,
            times: FxHashMap::default(),
            watches: FxHashMap::default(),
            next_watch: 0,
            queued: Vec::new(),
            fire_at: None,
            debounce,
        }
    }

    /// Stamp mtime (and ctime on first sight) for `stat`. Called by the
    /// coordinator whenever the body binding moves to this handle.
    pub fn set_body_time(&mut self, handle: &BufferHandle) {
        let now = SystemTime::now();
        self.times
            .entry(handle.clone())
            .and_modify(|(_, mtime)| *mtime = now)
            .or_insert((now, now));
    }

    fn check_scheme(&self, handle: &BufferHandle) -> Result<()> {
        if handle.has_scheme(&self.scheme) {
            Ok(())
        } else {
            Err(BodyFsError::WrongScheme(handle.clone()))
        }
    }

    /// Queue events and (re)arm the coalescing deadline. Rapid bursts of
    /// changes reach watchers as one batch.
    fn fire_soon(&mut self, changes: impl IntoIterator<Item = FileChange>) {
        self.queued.extend(changes);
        self.fire_at = Some(Instant::now() + self.debounce);
    }

    /// Drain the queued batch once the deadline has passed. The host's
    /// event loop polls this; no threads or timers are involved.
    pub fn poll_changes(&mut self, now: Instant) -> Option<Vec<FileChange>> {
        let fire_at = self.fire_at?;
        if now < fire_at {
            return None;
        }
        self.fire_at = None;
        if self.queued.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.queued))
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.queued.is_empty()
    }

    pub fn watched(&self, handle: &BufferHandle) -> bool {
        self.watches.values().any(|h| h == handle)
    }
}

impl BufferFs for BodyFs {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn read(&self, handle: &BufferHandle) -> Result<String> {
        self.check_scheme(handle)?;
        let store = self.store.borrow();
        match store.active().body(handle.gnx()) {
            Some(text) => Ok(text.into_owned()),
            None => Err(BodyFsError::NotFound(handle.clone())),
        }
    }

    fn write(&mut self, handle: &BufferHandle, text: &str) -> Result<()> {
        self.check_scheme(handle)?;
        self.store
            .borrow_mut()
            .active_mut()
            .set_body(handle.gnx(), text);
        self.set_body_time(handle);
        self.fire_soon([FileChange::Changed(handle.clone())]);
        Ok(())
    }

    fn stat(&self, handle: &BufferHandle) -> Result<FileStat> {
        self.check_scheme(handle)?;
        let size = {
            let store = self.store.borrow();
            store
                .active()
                .body_len_bytes(handle.gnx())
                .ok_or_else(|| BodyFsError::NotFound(handle.clone()))?
        };
        let (ctime, mtime) = self
            .times
            .get(handle)
            .copied()
            .unwrap_or((SystemTime::UNIX_EPOCH, SystemTime::UNIX_EPOCH));
        Ok(FileStat {
            size: size as u64,
            ctime,
            mtime,
        })
    }

    fn delete(&mut self, handle: &BufferHandle) -> Result<()> {
        self.check_scheme(handle)?;
        // Closing the pane, not forgetting the body: the mapping stays.
        let parent = BufferHandle::new(&self.scheme, "");
        self.fire_soon([
            FileChange::Changed(parent),
            FileChange::Deleted(handle.clone()),
        ]);
        Ok(())
    }

    fn watch(&mut self, handle: &BufferHandle) -> WatchId {
        let id = WatchId(self.next_watch);
        self.next_watch += 1;
        self.watches.insert(id, handle.clone());
        tracing::debug!(handle = %handle, "watch");
        id
    }

    fn unwatch(&mut self, id: WatchId) {
        if let Some(handle) = self.watches.remove(&id) {
            tracing::debug!(handle = %handle, "unwatch");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, DocumentStore, Outline};

    fn fixture() -> BodyFs {
        let mut outline = Outline::new();
        outline.add_root("node1", "1").unwrap();
        let mut doc = Document::new("one", outline);
        doc.set_body("1", "node1 body");
        doc.set_body("empty", "");
        let store = DocumentStore::new(doc).into_shared();
        BodyFs::new(store, "outline", Duration::from_millis(5))
    }

    #[test]
    fn read_distinguishes_missing_from_empty() {
        let fs = fixture();
        assert_eq!(fs.read(&BufferHandle::body("1")).unwrap(), "node1 body");
        assert_eq!(fs.read(&BufferHandle::body("empty")).unwrap(), "");
        assert!(matches!(
            fs.read(&BufferHandle::body("missing")),
            Err(BodyFsError::NotFound(_))
        ));
    }

    #[test]
    fn rejects_foreign_scheme() {
        let fs = fixture();
        let foreign = BufferHandle::new("file", "1");
        assert!(matches!(
            fs.read(&foreign),
            Err(BodyFsError::WrongScheme(_))
        ));
    }

    #[test]
    fn write_updates_store_and_stat() {
        let mut fs = fixture();
        let handle = BufferHandle::body("1");
        fs.write(&handle, "rewritten").unwrap();
        assert_eq!(fs.read(&handle).unwrap(), "rewritten");
        let stat = fs.stat(&handle).unwrap();
        assert_eq!(stat.size, "rewritten".len() as u64);
        assert!(stat.mtime > SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn delete_keeps_body_mapping() {
        let mut fs = fixture();
        let handle = BufferHandle::body("1");
        fs.delete(&handle).unwrap();
        assert_eq!(fs.read(&handle).unwrap(), "node1 body");
    }

    #[test]
    fn changes_coalesce_into_one_batch() {
        let mut fs = fixture();
        fs.delete(&BufferHandle::body("1")).unwrap();
        fs.delete(&BufferHandle::body("empty")).unwrap();
        assert!(fs.has_pending_changes());

        // Deadline not reached yet.
        assert_eq!(fs.poll_changes(Instant::now()), None);
        assert!(fs.has_pending_changes());

        let later = Instant::now() + Duration::from_millis(50);
        let batch = fs.poll_changes(later).unwrap();
        assert_eq!(batch.len(), 4);
        assert!(batch.contains(&FileChange::Deleted(BufferHandle::body("1"))));

        // Drained: nothing further.
        assert_eq!(fs.poll_changes(later), None);
        assert!(!fs.has_pending_changes());
    }

    #[test]
    fn watch_round_trip() {
        let mut fs = fixture();
        let handle = BufferHandle::body("1");
        let id = fs.watch(&handle);
        assert!(fs.watched(&handle));
        fs.unwatch(id);
        assert!(!fs.watched(&handle));
    }
}
