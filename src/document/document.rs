use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metadata::Metadata;
use super::parser::{ContentParser, ParseWarning, ParsedContent};
use super::sections::Sections;
use super::word_count::WordCounter;
use crate::naming::{classify, novel_id_of};
use crate::types::{DocumentVersion, Kind};

/// The unit of content: one named markdown note and everything derived from it.
///
/// `raw_content` is the single source of truth. `kind`, `version`,
/// `metadata`, `sections`, `word_count` and `tags` are pure functions of
/// `(filename, raw_content)`; the timestamps belong to the storage layer
/// and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub kind: Kind,
    pub version: DocumentVersion,
    pub raw_content: String,
    pub metadata: Metadata,
    pub sections: Sections,
    pub word_count: usize,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

impl Document {
    /// Parse with the default configuration.
    pub fn parse(filename: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self::parse_with(&ContentParser::default(), filename, raw_content)
    }

    pub fn parse_with<W: WordCounter>(
        parser: &ContentParser<W>,
        filename: impl Into<String>,
        raw_content: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        let raw_content = raw_content.into();

        let kind = classify(&filename);
        let version = DocumentVersion::from_content(raw_content.as_bytes());
        let ParsedContent {
            metadata,
            sections,
            word_count,
            warnings,
        } = parser.parse(&raw_content);

        debug!(
            filename = %filename,
            kind = %kind,
            word_count,
            sections = sections.heading_count(),
            warnings = warnings.len(),
            "parsed document"
        );

        Document {
            tags: metadata.tags().to_vec(),
            filename,
            kind,
            version,
            raw_content,
            metadata,
            sections,
            word_count,
            created_at: None,
            updated_at: None,
            warnings,
        }
    }

    /// Attach storage timestamps.
    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// A new document for edited content under the same filename.
    ///
    /// Timestamps carry over; bumping `updated_at` is the storage layer's job.
    pub fn revise<W: WordCounter>(
        &self,
        parser: &ContentParser<W>,
        raw_content: impl Into<String>,
    ) -> Self {
        Self::parse_with(parser, self.filename.clone(), raw_content)
            .with_timestamps(self.created_at, self.updated_at)
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title()
    }

    pub fn novel_id(&self) -> Option<String> {
        novel_id_of(&self.filename)
    }

    pub fn belongs_to(&self, novel_id: &str) -> bool {
        self.filename
            .strip_prefix("novel-")
            .and_then(|rest| rest.strip_prefix(novel_id))
            .is_some_and(|rest| rest.starts_with('-'))
    }

    pub fn section(&self, heading: &str) -> Option<&str> {
        self.sections.get(heading)
    }
}
