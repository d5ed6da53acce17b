use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub const TITLE_KEY: &str = "title";
pub const TAGS_KEY: &str = "tags";

/// A `title` or `tags` value with no sensible typed reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reserved metadata key {key} cannot hold a {found} value")]
pub struct ReservedKeyError {
    pub key: String,
    pub found: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(i64),
    String(String),
    List(Vec<String>),
    Structured(Value),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(b) => MetadataValue::Bool(b),
            Value::String(s) => MetadataValue::String(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => MetadataValue::Number(i),
                None => MetadataValue::Structured(Value::Number(n)),
            },
            Value::Array(items) if items.iter().all(Value::is_string) => MetadataValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => MetadataValue::Structured(other),
        }
    }
}

/// Document metadata: `title` and `tags` are first-class, everything else
/// lands in a key-ordered extension map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(flatten)]
    extra: BTreeMap<String, MetadataValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Tags, empty when no source supplied any.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = Some(tags);
    }

    /// Insert a string entry. `title` and `tags` go to their typed fields;
    /// a `tags` string is read as a comma-separated list.
    pub fn insert_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if key == TITLE_KEY {
            self.title = Some(value);
        } else if key == TAGS_KEY {
            self.tags = Some(split_tags(&value));
        } else {
            self.extra.insert(key, MetadataValue::String(value));
        }
    }

    pub fn insert_number(&mut self, key: impl Into<String>, value: i64) {
        let key = key.into();
        if key == TITLE_KEY {
            self.title = Some(value.to_string());
        } else if key == TAGS_KEY {
            self.tags = Some(vec![value.to_string()]);
        } else {
            self.extra.insert(key, MetadataValue::Number(value));
        }
    }

    /// Insert an arbitrary structured value, e.g. one decoded from front matter.
    ///
    /// `title` takes any scalar. `tags` takes a comma-separated string, a
    /// list, or a single scalar. Anything else under those two keys is
    /// rejected and leaves the metadata untouched; `null` is ignored.
    pub fn insert_json(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), ReservedKeyError> {
        let key = key.into();
        if key == TITLE_KEY {
            match value {
                Value::Null => {}
                other => match scalar_text(&other) {
                    Some(title) => self.title = Some(title),
                    None => return Err(reserved(key, &other)),
                },
            }
        } else if key == TAGS_KEY {
            match value {
                Value::Null => {}
                Value::String(s) => self.tags = Some(split_tags(&s)),
                Value::Array(items) => {
                    self.tags = Some(items.iter().filter_map(scalar_text).collect());
                }
                other => match scalar_text(&other) {
                    Some(tag) => self.tags = Some(vec![tag]),
                    None => return Err(reserved(key, &other)),
                },
            }
        } else {
            self.extra.insert(key, MetadataValue::from_json(value));
        }
        Ok(())
    }

    // Merge another metadata into this one (overriding common keys)
    pub fn merge(&mut self, other: Metadata) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.tags.is_some() {
            self.tags = other.tags;
        }
        for (k, v) in other.extra {
            self.extra.insert(k, v);
        }
    }

    /// Extension entries only; `title` and `tags` have their own accessors.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.extra.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match key {
            TITLE_KEY => self.title(),
            _ => self.get(key).and_then(MetadataValue::as_str),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataValue)> {
        self.extra.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.tags.is_none() && self.extra.is_empty()
    }
}

/// Comma-split, trimmed, empties dropped.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn reserved(key: String, value: &Value) -> ReservedKeyError {
    let found = match value {
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
        _ => "non-text",
    };
    ReservedKeyError { key, found }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
