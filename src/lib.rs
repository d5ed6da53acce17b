//! Deterministic core for novel-project markdown notes.
//!
//! `manuscript-core` gives every note of a writing project (novel, chapters,
//! characters, world and plot entries, analysis reports) a canonical
//! identity from its filename, parses front matter, titles, tag and
//! basic-info blocks and second-level sections out of free-form markdown,
//! counts words CJK-aware, and synthesizes entity profiles and analysis
//! reports from templates. All operations are pure: identical inputs
//! always produce identical outputs, and nothing here touches storage.

pub mod config;
pub mod document;
pub mod engine;
pub mod library;
pub mod naming;
pub mod synthesis;
pub mod types;

pub use config::{ConfigError, EngineConfig};
pub use document::{Document, Metadata, ParseWarning, Sections};
pub use engine::{analyze, parse, Engine};
pub use naming::{classify, generate_name, FileName, NamingError};
pub use synthesis::{render_template, AnalysisEngine, TemplateError};
pub use types::{AnalysisKind, Kind};
