//! Listing and grouping of already-parsed documents.
//!
//! Nothing here reads storage: callers hand over the documents they loaded.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::types::Kind;

/// Documents matching an optional kind and an optional novel, most recently
/// updated first. Documents without `updated_at` sort last; ties break on
/// filename.
pub fn filter<'a>(
    documents: &'a [Document],
    kind: Option<Kind>,
    novel_id: Option<&str>,
) -> Vec<&'a Document> {
    let mut matched: Vec<&Document> = documents
        .iter()
        .filter(|doc| kind.map_or(true, |k| doc.kind == k))
        .filter(|doc| novel_id.map_or(true, |id| doc.belongs_to(id)))
        .collect();

    matched.sort_by(|a, b| {
        // Some > None, so descending order puts undated documents last.
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    matched
}

/// Every document of one novel, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelBundle {
    pub novel_id: String,
    pub documents: Vec<Document>,
    pub total_count: usize,
    pub word_count: usize,
}

impl NovelBundle {
    /// Keep the documents named `novel-<novel_id>-...` and order them by
    /// kind (novel, chapter, character, world, plot, analysis, rest), then
    /// creation time, then filename.
    pub fn assemble(
        novel_id: impl Into<String>,
        documents: impl IntoIterator<Item = Document>,
    ) -> Self {
        let novel_id = novel_id.into();

        let mut documents: Vec<Document> = documents
            .into_iter()
            .filter(|doc| doc.belongs_to(&novel_id))
            .collect();
        documents.sort_by(bundle_order);

        debug_assert!(documents
            .windows(2)
            .all(|w| bundle_order(&w[0], &w[1]) != Ordering::Greater));

        let word_count = documents.iter().map(|doc| doc.word_count).sum();

        NovelBundle {
            novel_id,
            total_count: documents.len(),
            word_count,
            documents,
        }
    }

    pub fn main_document(&self) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.kind == Kind::Novel)
    }

    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(move |doc| doc.kind == kind)
    }
}

fn bundle_order(a: &Document, b: &Document) -> Ordering {
    a.kind
        .bundle_rank()
        .cmp(&b.kind.bundle_rank())
        // Undated documents after dated ones.
        .then_with(|| a.created_at.is_none().cmp(&b.created_at.is_none()))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.filename.cmp(&b.filename))
}
