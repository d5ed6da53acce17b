use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved key for the text before the first second-level heading.
pub const HEADER_KEY: &str = "header";

/// Second-level sections in document order.
///
/// Behaves like an insertion-ordered map whose first key is always
/// `"header"`. Re-inserting a heading replaces its body in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sections {
    header: String,
    entries: Vec<(String, String)>,
}

// `len` is never zero, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl Sections {
    pub fn new(header: impl Into<String>) -> Self {
        Sections {
            header: header.into(),
            entries: Vec::new(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn insert(&mut self, heading: impl Into<String>, body: impl Into<String>) {
        let heading = heading.into();
        let body = body.into();
        if heading == HEADER_KEY {
            self.header = body;
            return;
        }
        match self.entries.iter_mut().find(|(h, _)| *h == heading) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((heading, body)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        if key == HEADER_KEY {
            return Some(&self.header);
        }
        self.entries
            .iter()
            .find(|(h, _)| h == key)
            .map(|(_, body)| body.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys, `"header"` included. Empty content still has the
    /// header key, so this is at least 1.
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Number of distinct second-level headings.
    pub fn heading_count(&self) -> usize {
        self.entries.len()
    }

    /// All keys in order, starting with `"header"`.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(HEADER_KEY).chain(self.headings())
    }

    /// Second-level headings in order, without `"header"`.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once((HEADER_KEY, self.header.as_str()))
            .chain(self.entries.iter().map(|(h, b)| (h.as_str(), b.as_str())))
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, body) in self.iter() {
            map.serialize_entry(key, body)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SectionsVisitor)
    }
}

struct SectionsVisitor;

impl<'de> Visitor<'de> for SectionsVisitor {
    type Value = Sections;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of section headings to bodies")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Sections, A::Error> {
        let mut sections = Sections::default();
        while let Some((key, body)) = access.next_entry::<String, String>()? {
            sections.insert(key, body);
        }
        Ok(sections)
    }
}
