use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::config::{ConfigError, EngineConfig};
use crate::document::{CjkWordCounter, ContentParser, Document, WordCounter};
use crate::naming::{self, NamingError};
use crate::synthesis::{self, AnalysisEngine, PersistableReport, TemplateError};
use crate::types::{AnalysisKind, Kind};

/// Entry point bundling the parser and analysis engine under one config.
///
/// Holds no state beyond its configuration; every call is independent.
#[derive(Debug, Clone)]
pub struct Engine<W = CjkWordCounter> {
    config: EngineConfig,
    parser: ContentParser<W>,
    analysis: AnalysisEngine<W>,
}

impl Default for Engine<CjkWordCounter> {
    fn default() -> Self {
        Self::with_counter(EngineConfig::v0(), CjkWordCounter)
    }
}

impl Engine<CjkWordCounter> {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_counter(config, CjkWordCounter))
    }
}

impl<W: WordCounter + Clone> Engine<W> {
    pub fn with_counter(config: EngineConfig, counter: W) -> Self {
        let parser = ContentParser::with_counter(&config, counter);
        let analysis = AnalysisEngine::with_parser(&config, parser.clone());
        Self {
            config,
            parser,
            analysis,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parser(&self) -> &ContentParser<W> {
        &self.parser
    }

    pub fn classify(&self, filename: &str) -> Kind {
        naming::classify(filename)
    }

    pub fn parse(&self, filename: &str, raw_content: &str) -> Document {
        Document::parse_with(&self.parser, filename, raw_content)
    }

    pub fn generate_name(
        &self,
        kind: Kind,
        parent_id: &str,
        free_text: Option<&str>,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<String, NamingError> {
        naming::generate_name(kind, parent_id, free_text, timestamp)
    }

    pub fn render_template(
        &self,
        kind: Kind,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, TemplateError> {
        synthesis::render_template(kind, fields)
    }

    pub fn generate_entity(
        &self,
        kind: Kind,
        novel_id: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<Document, TemplateError> {
        synthesis::generate_entity(&self.parser, kind, novel_id, fields)
    }

    pub fn analyze(&self, raw_content: &str, analysis_kind: &str) -> String {
        self.analysis.analyze(raw_content, analysis_kind)
    }

    pub fn analyze_at(&self, raw_content: &str, analysis_kind: &str, at: NaiveDateTime) -> String {
        self.analysis.analyze_at(raw_content, analysis_kind, at)
    }

    pub fn report_for(
        &self,
        document: &Document,
        kind: AnalysisKind,
        at: NaiveDateTime,
    ) -> Option<PersistableReport> {
        self.analysis.report_for(document, kind, at)
    }
}

/// Parse with the default configuration.
pub fn parse(filename: &str, raw_content: &str) -> Document {
    Document::parse(filename, raw_content)
}

/// Analyze with the default configuration.
pub fn analyze(raw_content: &str, analysis_kind: &str) -> String {
    AnalysisEngine::default().analyze(raw_content, analysis_kind)
}
