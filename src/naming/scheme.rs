use std::fmt;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use crate::naming::classifier::classify;
use crate::types::Kind;

/// `YYYYMMDD_HHMMSS`, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const NOVEL_PREFIX: &str = "novel-";
const MD_SUFFIX: &str = ".md";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("Kind {0} has no filename pattern")]
    UnnameableKind(Kind),
    #[error("A {0} filename needs a free-text segment")]
    MissingSegment(Kind),
    #[error("Chapter number must be a non-negative integer, got {0:?}")]
    InvalidChapterNumber(String),
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
///
/// Not reversible: decoding only ever yields the sanitized slug.
pub fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A canonical filename, one variant per nameable kind.
///
/// Free-text segments are sanitized on construction; the novel id and the
/// analysis timestamp are taken as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileName {
    Novel { novel_id: String },
    Chapter { novel_id: String, number: u32 },
    Character { novel_id: String, slug: String },
    World { novel_id: String, slug: String },
    Plot { novel_id: String, slug: String },
    Analysis { novel_id: String, analysis: String, timestamp: String },
    Style { slug: String },
    Template { template_type: String, slug: String },
}

impl FileName {
    pub fn novel(novel_id: impl Into<String>) -> Self {
        FileName::Novel {
            novel_id: novel_id.into(),
        }
    }

    pub fn chapter(novel_id: impl Into<String>, number: u32) -> Self {
        FileName::Chapter {
            novel_id: novel_id.into(),
            number,
        }
    }

    pub fn character(novel_id: impl Into<String>, name: &str) -> Self {
        FileName::Character {
            novel_id: novel_id.into(),
            slug: sanitize(name),
        }
    }

    pub fn world(novel_id: impl Into<String>, name: &str) -> Self {
        FileName::World {
            novel_id: novel_id.into(),
            slug: sanitize(name),
        }
    }

    pub fn plot(novel_id: impl Into<String>, name: &str) -> Self {
        FileName::Plot {
            novel_id: novel_id.into(),
            slug: sanitize(name),
        }
    }

    pub fn analysis(novel_id: impl Into<String>, analysis: &str, at: NaiveDateTime) -> Self {
        FileName::Analysis {
            novel_id: novel_id.into(),
            analysis: sanitize(analysis),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Analysis filename stamped with the current local time.
    pub fn analysis_now(novel_id: impl Into<String>, analysis: &str) -> Self {
        Self::analysis(novel_id, analysis, Local::now().naive_local())
    }

    pub fn style(name: &str) -> Self {
        FileName::Style {
            slug: sanitize(name),
        }
    }

    pub fn template(template_type: &str, name: &str) -> Self {
        FileName::Template {
            template_type: sanitize(template_type),
            slug: sanitize(name),
        }
    }

    /// Entity-profile filename for a generatable kind.
    pub fn entity(kind: Kind, novel_id: impl Into<String>, name: &str) -> Option<Self> {
        match kind {
            Kind::Character => Some(Self::character(novel_id, name)),
            Kind::World => Some(Self::world(novel_id, name)),
            Kind::Plot => Some(Self::plot(novel_id, name)),
            _ => None,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            FileName::Novel { .. } => Kind::Novel,
            FileName::Chapter { .. } => Kind::Chapter,
            FileName::Character { .. } => Kind::Character,
            FileName::World { .. } => Kind::World,
            FileName::Plot { .. } => Kind::Plot,
            FileName::Analysis { .. } => Kind::Analysis,
            FileName::Style { .. } => Kind::Style,
            FileName::Template { .. } => Kind::Template,
        }
    }

    pub fn novel_id(&self) -> Option<&str> {
        match self {
            FileName::Novel { novel_id }
            | FileName::Chapter { novel_id, .. }
            | FileName::Character { novel_id, .. }
            | FileName::World { novel_id, .. }
            | FileName::Plot { novel_id, .. }
            | FileName::Analysis { novel_id, .. } => Some(novel_id),
            FileName::Style { .. } | FileName::Template { .. } => None,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Pattern-match a filename back into its segments.
    ///
    /// Segments are split on the first occurrence of the kind's marker, so
    /// a novel id that itself contains a marker decodes differently from
    /// how it was generated. Returns `None` for unknown files and for
    /// chapter files whose suffix is not a number.
    pub fn decode(filename: &str) -> Option<Self> {
        match classify(filename) {
            Kind::Novel => {
                let novel_id = filename
                    .strip_prefix(NOVEL_PREFIX)?
                    .strip_suffix("-main.md")?;
                Some(Self::novel(novel_id))
            }
            Kind::Chapter => {
                let (novel_id, number) = novel_segments(filename, "-chapter-")?;
                let number = number.parse().ok()?;
                Some(Self::chapter(novel_id, number))
            }
            Kind::Character => {
                let (novel_id, slug) = novel_segments(filename, "-character-")?;
                Some(FileName::Character {
                    novel_id: novel_id.to_string(),
                    slug: slug.to_string(),
                })
            }
            Kind::World => {
                let (novel_id, slug) = novel_segments(filename, "-world-")?;
                Some(FileName::World {
                    novel_id: novel_id.to_string(),
                    slug: slug.to_string(),
                })
            }
            Kind::Plot => {
                let (novel_id, slug) = novel_segments(filename, "-plot-")?;
                Some(FileName::Plot {
                    novel_id: novel_id.to_string(),
                    slug: slug.to_string(),
                })
            }
            Kind::Analysis => {
                let (novel_id, rest) = novel_segments(filename, "-analysis-")?;
                let (analysis, timestamp) = rest.rsplit_once('-')?;
                Some(FileName::Analysis {
                    novel_id: novel_id.to_string(),
                    analysis: analysis.to_string(),
                    timestamp: timestamp.to_string(),
                })
            }
            Kind::Style => {
                let slug = filename
                    .strip_prefix("style-")?
                    .strip_suffix("-template.md")?;
                Some(FileName::Style {
                    slug: slug.to_string(),
                })
            }
            Kind::Template => {
                let rest = filename.strip_prefix("template-")?.strip_suffix(MD_SUFFIX)?;
                let (template_type, slug) = rest.split_once('-')?;
                Some(FileName::Template {
                    template_type: template_type.to_string(),
                    slug: slug.to_string(),
                })
            }
            Kind::Unknown => None,
        }
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileName::Novel { novel_id } => write!(f, "novel-{novel_id}-main.md"),
            FileName::Chapter { novel_id, number } => {
                write!(f, "novel-{novel_id}-chapter-{number:03}.md")
            }
            FileName::Character { novel_id, slug } => {
                write!(f, "novel-{novel_id}-character-{slug}.md")
            }
            FileName::World { novel_id, slug } => write!(f, "novel-{novel_id}-world-{slug}.md"),
            FileName::Plot { novel_id, slug } => write!(f, "novel-{novel_id}-plot-{slug}.md"),
            FileName::Analysis {
                novel_id,
                analysis,
                timestamp,
            } => write!(f, "novel-{novel_id}-analysis-{analysis}-{timestamp}.md"),
            FileName::Style { slug } => write!(f, "style-{slug}-template.md"),
            FileName::Template {
                template_type,
                slug,
            } => write!(f, "template-{template_type}-{slug}.md"),
        }
    }
}

/// `novel-N<marker>REST.md` -> `(N, REST)`
fn novel_segments<'a>(filename: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let inner = filename.strip_prefix(NOVEL_PREFIX)?.strip_suffix(MD_SUFFIX)?;
    inner.split_once(marker)
}

/// Novel id of any `novel-N-...` file with a recognized pattern.
pub fn novel_id_of(filename: &str) -> Option<String> {
    FileName::decode(filename).and_then(|name| name.novel_id().map(str::to_string))
}

/// String-typed entry point over [`FileName`].
///
/// `parent_id` is the novel id for novel-scoped kinds and the template type
/// for `Kind::Template`; it is ignored for `Kind::Style`. `free_text` is the
/// chapter number, entity name, analysis kind, style name or template name.
/// A missing timestamp means "now" in local time.
pub fn generate_name(
    kind: Kind,
    parent_id: &str,
    free_text: Option<&str>,
    timestamp: Option<NaiveDateTime>,
) -> Result<String, NamingError> {
    let segment = || free_text.ok_or(NamingError::MissingSegment(kind));

    let name = match kind {
        Kind::Novel => FileName::novel(parent_id),
        Kind::Chapter => {
            let raw = segment()?;
            let number = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| NamingError::InvalidChapterNumber(raw.to_string()))?;
            FileName::chapter(parent_id, number)
        }
        Kind::Character => FileName::character(parent_id, segment()?),
        Kind::World => FileName::world(parent_id, segment()?),
        Kind::Plot => FileName::plot(parent_id, segment()?),
        Kind::Analysis => {
            let at = timestamp.unwrap_or_else(|| Local::now().naive_local());
            FileName::analysis(parent_id, segment()?, at)
        }
        Kind::Style => FileName::style(segment()?),
        Kind::Template => FileName::template(parent_id, segment()?),
        Kind::Unknown => return Err(NamingError::UnnameableKind(kind)),
    };

    Ok(name.render())
}
