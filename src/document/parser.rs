use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::metadata::{split_tags, Metadata};
use super::sections::Sections;
use super::word_count::{CjkWordCounter, WordCounter};
use crate::config::EngineConfig;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());

const FRONT_MATTER_FENCE: &str = "---";

/// A problem found while parsing that did not stop the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ParseWarning {
    #[error("Front matter is not valid YAML: {reason}")]
    MalformedFrontMatter { reason: String },
    #[error("Front matter is not a key-value mapping")]
    FrontMatterNotAMapping,
    #[error("Front matter opened with --- but never closed")]
    UnclosedFrontMatter,
    #[error("Front matter field {key} dropped: {reason}")]
    InvalidReservedField { key: String, reason: String },
}

/// Parsed data plus the non-fatal warnings collected on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    pub fn clean(value: T) -> Self {
        Parsed {
            value,
            warnings: Vec::new(),
        }
    }
}

/// Everything derived from one raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedContent {
    pub metadata: Metadata,
    pub sections: Sections,
    pub word_count: usize,
    pub warnings: Vec<ParseWarning>,
}

/// Extracts metadata, sections and a word count from raw document text.
///
/// Never fails: malformed input degrades to empty data plus warnings.
#[derive(Debug, Clone)]
pub struct ContentParser<W = CjkWordCounter> {
    tags_headings: Vec<String>,
    basic_info_headings: Vec<String>,
    counter: W,
}

impl Default for ContentParser<CjkWordCounter> {
    fn default() -> Self {
        Self::new(&EngineConfig::v0())
    }
}

impl ContentParser<CjkWordCounter> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_counter(config, CjkWordCounter)
    }
}

impl<W: WordCounter> ContentParser<W> {
    pub fn with_counter(config: &EngineConfig, counter: W) -> Self {
        Self {
            tags_headings: config.tags_headings.clone(),
            basic_info_headings: config.basic_info_headings.clone(),
            counter,
        }
    }

    pub fn parse(&self, content: &str) -> ParsedContent {
        let Parsed { value: metadata, warnings } = self.parse_metadata(content);
        ParsedContent {
            metadata,
            sections: extract_sections(content),
            word_count: self.counter.count_words(content),
            warnings,
        }
    }

    /// Runs the four metadata passes and merges them, later passes winning:
    /// front matter, first-level title, tags block, basic-info block.
    pub fn parse_metadata(&self, content: &str) -> Parsed<Metadata> {
        let Parsed {
            value: mut metadata,
            warnings,
        } = front_matter(content);

        metadata.merge(title(content));
        metadata.merge(self.tags_block(content));
        metadata.merge(self.basic_info_block(content));

        Parsed {
            value: metadata,
            warnings,
        }
    }

    pub fn word_count(&self, content: &str) -> usize {
        self.counter.count_words(content)
    }

    /// First non-blank line after a tags heading, comma-split.
    fn tags_block(&self, content: &str) -> Metadata {
        let mut metadata = Metadata::new();
        let mut lines = content.lines();

        if lines
            .by_ref()
            .find(|line| is_reserved_heading(line, &self.tags_headings))
            .is_none()
        {
            return metadata;
        }

        if let Some(line) = lines.find(|line| !line.trim().is_empty()) {
            if !line.starts_with('#') {
                metadata.set_tags(split_tags(line));
            }
        }
        metadata
    }

    /// `key: value` lines under a basic-info heading, up to the next
    /// first- or second-level heading.
    fn basic_info_block(&self, content: &str) -> Metadata {
        let mut metadata = Metadata::new();
        let mut lines = content.lines();

        if lines
            .by_ref()
            .find(|line| is_reserved_heading(line, &self.basic_info_headings))
            .is_none()
        {
            return metadata;
        }

        for line in lines.take_while(|line| !line.starts_with("## ") && !line.starts_with("# ")) {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim_matches(|c| c == '-' || c == ' ').trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            metadata.insert_string(key.to_lowercase(), value);
        }
        metadata
    }
}

fn is_reserved_heading(line: &str, headings: &[String]) -> bool {
    line.strip_prefix("## ")
        .map(str::trim_end)
        .is_some_and(|title| headings.iter().any(|h| h == title))
}

/// YAML block between a leading `---` line and the next `---` line.
pub fn front_matter(content: &str) -> Parsed<Metadata> {
    let mut lines = content.lines();
    let opens = lines
        .next()
        .map(|first| first.trim_start_matches('\u{feff}').trim_end() == FRONT_MATTER_FENCE)
        .unwrap_or(false);
    if !opens {
        return Parsed::clean(Metadata::new());
    }

    let mut yaml_lines: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == FRONT_MATTER_FENCE {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }

    if !closed {
        return degraded(ParseWarning::UnclosedFrontMatter);
    }

    let raw_yaml = yaml_lines.join("\n");
    let yaml_value: serde_yaml::Value = match serde_yaml::from_str(&raw_yaml) {
        Ok(value) => value,
        Err(e) => {
            return degraded(ParseWarning::MalformedFrontMatter {
                reason: e.to_string(),
            })
        }
    };
    let json_value = match serde_json::to_value(yaml_value) {
        Ok(value) => value,
        Err(e) => {
            return degraded(ParseWarning::MalformedFrontMatter {
                reason: e.to_string(),
            })
        }
    };

    let fields: BTreeMap<String, Value> = match json_value {
        Value::Object(map) => map.into_iter().collect(),
        Value::Null => BTreeMap::new(),
        _ => return degraded(ParseWarning::FrontMatterNotAMapping),
    };

    let mut parsed = Parsed::clean(Metadata::new());
    for (key, value) in fields {
        if let Err(e) = parsed.value.insert_json(key, value) {
            let warning = ParseWarning::InvalidReservedField {
                reason: e.to_string(),
                key: e.key,
            };
            warn!(%warning, "dropping front matter field");
            parsed.warnings.push(warning);
        }
    }
    parsed
}

fn degraded(warning: ParseWarning) -> Parsed<Metadata> {
    warn!(%warning, "dropping front matter");
    Parsed {
        value: Metadata::new(),
        warnings: vec![warning],
    }
}

/// First `# ...` line anywhere in the text.
pub fn title(content: &str) -> Metadata {
    let mut metadata = Metadata::new();
    if let Some(caps) = TITLE_RE.captures(content) {
        metadata.set_title(caps[1].trim());
    }
    metadata
}

/// Split on `## ...` lines. Text before the first heading is the header.
///
/// A heading that is blank after trimming still ends the previous section,
/// but its own body is dropped.
pub fn extract_sections(content: &str) -> Sections {
    let mut header: Option<&str> = None;
    let mut pending: Option<String> = None;
    let mut bodies: Vec<(String, &str)> = Vec::new();
    let mut cursor = 0;

    for caps in SECTION_RE.captures_iter(content) {
        let (Some(line), Some(heading)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let preceding = content[cursor..line.start()].trim();
        match pending.take() {
            Some(previous) => bodies.push((previous, preceding)),
            None if header.is_none() => header = Some(preceding),
            None => {}
        }
        pending = Some(heading.as_str().trim().to_string());
        cursor = line.end();
    }

    let rest = content[cursor..].trim();
    match pending {
        Some(previous) => bodies.push((previous, rest)),
        None if header.is_none() => header = Some(rest),
        None => {}
    }

    let mut sections = Sections::new(header.unwrap_or_default());
    for (heading, body) in bodies {
        if !heading.is_empty() {
            sections.insert(heading, body);
        }
    }
    sections
}
