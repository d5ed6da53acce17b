use crate::types::Kind;

/// Second half of a classification rule, applied after the prefix check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    EndsWith(&'static str),
    Contains(&'static str),
    Any,
}

/// One tagged filename pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub kind: Kind,
    pub prefix: &'static str,
    pub matcher: Matcher,
}

impl Rule {
    pub fn matches(&self, filename: &str) -> bool {
        if !filename.starts_with(self.prefix) {
            return false;
        }
        match self.matcher {
            Matcher::EndsWith(suffix) => filename.ends_with(suffix),
            Matcher::Contains(marker) => filename.contains(marker),
            Matcher::Any => true,
        }
    }
}

/// Classification rules in priority order. First match wins.
///
/// The patterns overlap as plain substrings, so the order here is part of
/// the filename contract. Analysis sits right after the novel rule because
/// its own kind segment repeats an entity marker
/// (`novel-7-analysis-plot-20240101_000000.md` contains `-plot-`).
pub static RULES: [Rule; 8] = [
    Rule {
        kind: Kind::Novel,
        prefix: "novel-",
        matcher: Matcher::EndsWith("-main.md"),
    },
    Rule {
        kind: Kind::Analysis,
        prefix: "novel-",
        matcher: Matcher::Contains("-analysis-"),
    },
    Rule {
        kind: Kind::Chapter,
        prefix: "novel-",
        matcher: Matcher::Contains("-chapter-"),
    },
    Rule {
        kind: Kind::Character,
        prefix: "novel-",
        matcher: Matcher::Contains("-character-"),
    },
    Rule {
        kind: Kind::World,
        prefix: "novel-",
        matcher: Matcher::Contains("-world-"),
    },
    Rule {
        kind: Kind::Plot,
        prefix: "novel-",
        matcher: Matcher::Contains("-plot-"),
    },
    Rule {
        kind: Kind::Style,
        prefix: "style-",
        matcher: Matcher::EndsWith("-template.md"),
    },
    Rule {
        kind: Kind::Template,
        prefix: "template-",
        matcher: Matcher::Any,
    },
];

/// Infer a document kind from its filename alone.
///
/// An unrecognized filename is `Kind::Unknown`, never an error.
pub fn classify(filename: &str) -> Kind {
    matching_rule(filename).map_or(Kind::Unknown, |rule| rule.kind)
}

/// The rule that decided `filename`, if any.
pub fn matching_rule(filename: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(filename))
}
