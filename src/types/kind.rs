use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown kind token: {0}")]
pub struct UnknownKind(pub String);

/// Entity classification of a document.
///
/// Never stored on its own: always re-derived from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Novel,
    Chapter,
    Character,
    World,
    Plot,
    Analysis,
    Style,
    Template,
    Unknown,
}

impl Kind {
    pub const ALL: [Kind; 9] = [
        Kind::Novel,
        Kind::Chapter,
        Kind::Character,
        Kind::World,
        Kind::Plot,
        Kind::Analysis,
        Kind::Style,
        Kind::Template,
        Kind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Novel => "novel",
            Kind::Chapter => "chapter",
            Kind::Character => "character",
            Kind::World => "world",
            Kind::Plot => "plot",
            Kind::Analysis => "analysis",
            Kind::Style => "style",
            Kind::Template => "template",
            Kind::Unknown => "unknown",
        }
    }

    /// Display label shown next to a file in the editor.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Novel => "小说主文件",
            Kind::Chapter => "章节内容",
            Kind::Character => "人物设定",
            Kind::World => "世界构建",
            Kind::Plot => "情节设定",
            Kind::Analysis => "分析报告",
            Kind::Style => "风格模板",
            Kind::Template => "模板文件",
            Kind::Unknown => "未知",
        }
    }

    /// Kinds that have a profile template.
    pub fn is_generatable(self) -> bool {
        matches!(self, Kind::Character | Kind::World | Kind::Plot)
    }

    /// Position of this kind inside a novel bundle listing.
    pub(crate) fn bundle_rank(self) -> u8 {
        match self {
            Kind::Novel => 0,
            Kind::Chapter => 1,
            Kind::Character => 2,
            Kind::World => 3,
            Kind::Plot => 4,
            Kind::Analysis => 5,
            Kind::Style | Kind::Template | Kind::Unknown => u8::MAX,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// The closed set of analysis reports the engine can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Plot,
    Character,
    Style,
    Structure,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Plot,
        AnalysisKind::Character,
        AnalysisKind::Style,
        AnalysisKind::Structure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Plot => "plot",
            AnalysisKind::Character => "character",
            AnalysisKind::Style => "style",
            AnalysisKind::Structure => "structure",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
