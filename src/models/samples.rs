//! In-memory sample documents, standing in for a future file loader.

use super::document::{Document, DocumentStore};
use super::outline::{NodeId, Outline};

/// Panic-free insert for fixture data. The gnx values below are unique
/// and the parent ids come from earlier inserts, so the error arm only
/// covers a malformed fixture table; a null key keeps the build total.
fn add(outline: &mut Outline, parent: Option<NodeId>, header: &str, gnx: &str) -> NodeId {
    let added = match parent {
        Some(parent) => outline.add_child(parent, header, gnx),
        None => outline.add_root(header, gnx),
    };
    added.unwrap_or_else(|e| {
        tracing::warn!(error = %e, gnx, "fixture node skipped");
        NodeId::default()
    })
}

/// Two small fixture documents: three roots with two children, and a
/// three-level chain. Every node body is "nodeN body".
pub fn sample_store() -> DocumentStore {
    let mut first = Outline::new();
    let n1 = add(&mut first, None, "node1", "1");
    add(&mut first, None, "node2", "2");
    let n3 = add(&mut first, None, "node3", "3");
    add(&mut first, Some(n3), "childNode4", "4");
    add(&mut first, Some(n3), "childNode5", "5");
    first.mark_selected(n1);

    let mut second = Outline::new();
    add(&mut second, None, "node6", "6");
    let n7 = add(&mut second, None, "node7", "7");
    let n8 = add(&mut second, Some(n7), "node8", "8");
    add(&mut second, Some(n8), "childNode9", "9");
    add(&mut second, None, "childNode10", "10");

    let mut doc1 = Document::new("sample one", first);
    for gnx in 1..=5 {
        doc1.set_body(&gnx.to_string(), &format!("node{} body", gnx));
    }
    let mut doc2 = Document::new("sample two", second);
    for gnx in 6..=10 {
        doc2.set_body(&gnx.to_string(), &format!("node{} body", gnx));
    }

    let mut store = DocumentStore::new(doc1);
    store.push(doc2);
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_shape() {
        let store = sample_store();
        assert_eq!(store.len(), 2);

        let doc = store.active();
        assert_eq!(doc.outline().children(None).len(), 3);
        assert_eq!(doc.body_text("4"), "node4 body");
        assert!(doc.outline().initial_selection().is_some());

        let other = store.get(1).unwrap();
        assert_eq!(other.body_text("9"), "node9 body");
        assert_eq!(other.body("4"), None);
    }
}
