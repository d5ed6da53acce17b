pub mod document;
pub mod metadata;
pub mod parser;
pub mod sections;
pub mod word_count;

pub use document::Document;
pub use metadata::{Metadata, MetadataValue, ReservedKeyError};
pub use parser::{extract_sections, ContentParser, ParseWarning, Parsed, ParsedContent};
pub use sections::{Sections, HEADER_KEY};
pub use word_count::{word_count, CjkWordCounter, WordCounter};
