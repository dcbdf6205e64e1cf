//! Documents: one outline forest plus its gnx-to-body mapping.
//!
//! Several documents can be loaded at once; exactly one is active and
//! determines what the tree shows and which bodies resolve.

use compact_str::CompactString;
use ropey::Rope;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::outline::Outline;

/// Single-threaded shared ownership: the coordinator mutates bodies, the
/// body filesystem serves reads, both from host-dispatched callbacks.
pub type SharedDocuments = Rc<RefCell<DocumentStore>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    UnknownDocument(usize),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::UnknownDocument(id) => write!(f, "unknown document id: {}", id),
        }
    }
}

impl std::error::Error for DocumentError {}

pub struct Document {
    name: CompactString,
    outline: Outline,
    bodies: FxHashMap<CompactString, Rope>,
}

impl Document {
    pub fn new(name: &str, outline: Outline) -> Self {
        Self {
            name: CompactString::from(name),
            outline,
            bodies: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn outline_mut(&mut self) -> &mut Outline {
        &mut self.outline
    }

    /// Body text for a gnx; `None` for a key that was never written.
    pub fn body(&self, gnx: &str) -> Option<Cow<'_, str>> {
        self.bodies.get(gnx).map(rope_to_cow)
    }

    /// Total variant: a missing body is a valid state and reads as empty.
    pub fn body_text(&self, gnx: &str) -> Cow<'_, str> {
        self.body(gnx).unwrap_or(Cow::Borrowed(""))
    }

    pub fn body_len_bytes(&self, gnx: &str) -> Option<usize> {
        self.bodies.get(gnx).map(|rope| rope.len_bytes())
    }

    /// Unconditional upsert.
    pub fn set_body(&mut self, gnx: &str, text: &str) {
        self.bodies
            .insert(CompactString::from(gnx), Rope::from_str(text));
    }
}

fn rope_to_cow(rope: &Rope) -> Cow<'_, str> {
    match rope.slice(..).as_str() {
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(rope.to_string()),
    }
}

pub struct DocumentStore {
    documents: Vec<Document>,
    active: usize,
}

impl DocumentStore {
    pub fn new(first: Document) -> Self {
        Self {
            documents: vec![first],
            active: 0,
        }
    }

    /// Returns the id of the added document.
    pub fn push(&mut self, document: Document) -> usize {
        self.documents.push(document);
        self.documents.len() - 1
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn active_id(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Document {
        &self.documents[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Document {
        &mut self.documents[self.active]
    }

    pub fn get(&self, id: usize) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Replace the active forest wholesale. Out-of-range ids are an
    /// error, not clamped.
    pub fn switch(&mut self, id: usize) -> Result<(), DocumentError> {
        if id >= self.documents.len() {
            return Err(DocumentError::UnknownDocument(id));
        }
        self.active = id;
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.name())
    }

    pub fn into_shared(self) -> SharedDocuments {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_body(name: &str, gnx: &str, body: &str) -> Document {
        let mut outline = Outline::new();
        outline.add_root(name, gnx).unwrap();
        let mut doc = Document::new(name, outline);
        doc.set_body(gnx, body);
        doc
    }

    #[test]
    fn unknown_body_reads_empty() {
        let doc = doc_with_body("one", "1", "x");
        assert_eq!(doc.body("missing"), None);
        assert_eq!(doc.body_text("missing"), "");
        assert_eq!(doc.body_text("1"), "x");
    }

    #[test]
    fn set_body_upserts() {
        let mut doc = doc_with_body("one", "1", "x");
        doc.set_body("1", "updated");
        assert_eq!(doc.body_text("1"), "updated");
        doc.set_body("fresh", "created");
        assert_eq!(doc.body_text("fresh"), "created");
    }

    #[test]
    fn switch_isolates_documents() {
        let mut store = DocumentStore::new(doc_with_body("one", "1", "x"));
        let second = store.push(doc_with_body("two", "1", "y"));

        assert_eq!(store.active().body_text("1"), "x");
        store.switch(second).unwrap();
        assert_eq!(store.active().body_text("1"), "y");
        store.switch(0).unwrap();
        assert_eq!(store.active().body_text("1"), "x");
    }

    #[test]
    fn switch_rejects_unknown_id() {
        let mut store = DocumentStore::new(doc_with_body("one", "1", "x"));
        assert_eq!(store.switch(7), Err(DocumentError::UnknownDocument(7)));
        assert_eq!(store.active_id(), 0);
    }
}
