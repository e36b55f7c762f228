//! Review session helpers: answer durations and per-session documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::Record;

/// Fold pending review time into the record's accumulated answer duration.
///
/// Returns `None` and leaves `pending` untouched when the record has no
/// answered question. Otherwise `pending` is consumed (reset to zero).
pub fn accumulate_duration(record: &Record, pending: &mut f64) -> Option<f64> {
    if !record.has_any_question_answered() {
        return None;
    }
    let previous = record.answer.as_ref().and_then(|a| a.duration).unwrap_or(0.0);
    let total = previous + *pending;
    *pending = 0.0;
    Some(total)
}

/// A span of the source document highlighted during review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// The source document shown next to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Key-value storage of documents by session.
pub trait DocumentStore {
    fn get(&self, session: &str) -> Option<Document>;
    fn save(&mut self, session: &str, document: Document);
}

/// In-memory document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<String, Document>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, session: &str) -> Option<Document> {
        self.documents.get(session).cloned()
    }

    fn save(&mut self, session: &str, document: Document) {
        self.documents.insert(session.to_string(), document);
    }
}

/// The current document of one review session.
pub struct SessionDocuments<S: DocumentStore> {
    store: S,
    session: String,
}

impl<S: DocumentStore> SessionDocuments<S> {
    pub fn new(store: S, session: impl Into<String>) -> Self {
        Self {
            store,
            session: session.into(),
        }
    }

    pub fn get(&self) -> Option<Document> {
        self.store.get(&self.session)
    }

    /// Replace the session's document.
    pub fn set(&mut self, document: Document) {
        self.store.save(&self.session, document);
    }

    /// Replace the segments of the current document. No-op without a document.
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        if let Some(mut document) = self.get() {
            document.segments = segments;
            self.set(document);
        }
    }

    /// Store an empty document for the session.
    pub fn clear(&mut self) {
        self.set(Document::default());
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Answer;

    fn segment(id: &str) -> Segment {
        Segment {
            id: id.to_string(),
            text: String::new(),
            page: None,
        }
    }

    #[test]
    fn test_duration_accumulates_and_resets() {
        let mut record = Record::new("r1").with_answer("q", "a");
        record.answer.as_mut().unwrap().duration = Some(10.0);
        let mut pending = 4.5;

        assert_eq!(accumulate_duration(&record, &mut pending), Some(14.5));
        assert_eq!(pending, 0.0);
    }

    #[test]
    fn test_duration_without_prior() {
        let record = Record::new("r1").with_answer("q", "a");
        let mut pending = 3.0;
        assert_eq!(accumulate_duration(&record, &mut pending), Some(3.0));
    }

    #[test]
    fn test_duration_requires_answer() {
        let mut record = Record::new("r1");
        record.answer = Some(Answer::default());
        let mut pending = 3.0;

        assert_eq!(accumulate_duration(&record, &mut pending), None);
        assert_eq!(pending, 3.0);
    }

    #[test]
    fn test_session_documents() {
        let mut docs = SessionDocuments::new(MemoryDocumentStore::new(), "s1");
        assert!(docs.get().is_none());

        docs.set_segments(vec![segment("a")]);
        assert!(docs.get().is_none());

        docs.set(Document {
            id: Some("d1".to_string()),
            ..Document::default()
        });
        docs.set_segments(vec![segment("a"), segment("b")]);
        let doc = docs.get().unwrap();
        assert_eq!(doc.id.as_deref(), Some("d1"));
        assert_eq!(doc.segments.len(), 2);

        docs.clear();
        assert_eq!(docs.get(), Some(Document::default()));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut store = MemoryDocumentStore::new();
        store.save("a", Document { id: Some("x".to_string()), ..Document::default() });

        let docs = SessionDocuments::new(store, "b");
        assert!(docs.get().is_none());
        assert!(docs.into_store().get("a").is_some());
    }
}
