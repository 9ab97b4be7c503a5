//! Frontmatter parsing for content files.

use std::{collections::BTreeMap, path::Path};

use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for content files.
///
/// Only the keys the pipeline acts on are lifted out. Everything else, and any
/// recognised key whose value has an unexpected shape, lands in
/// [`Frontmatter::extra`] and is carried into the feed item untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    /// Item title.
    pub title: Option<String>,

    /// Language code, compared against the publishing locale.
    pub lang: Option<String>,

    /// Publication date as written by the author.
    pub date: Option<Value>,

    /// Hero image, possibly root-relative.
    pub image: Option<String>,

    /// Short summary.
    pub description: Option<String>,

    /// Tags, exported as feed categories. A single scalar is one tag.
    pub tags: Vec<String>,

    /// Passthrough keys.
    pub extra: BTreeMap<String, Value>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// The opening delimiter must be the first line and the closing delimiter a
/// line of its own. Returns `None` when either is missing.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != delimiter {
        return None;
    }

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = rest[..offset].trim();
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter from a string.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        // No frontmatter found, return default with full content
        return Ok((Frontmatter::default(), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((Frontmatter::default(), body.to_string()));
    }

    let value = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            toml_to_yaml(toml::Value::Table(table))
        }
    };

    let frontmatter = match value {
        Value::Mapping(mapping) => Frontmatter::from_mapping(mapping),
        Value::Null => Frontmatter::default(),
        _ => {
            return Err(CoreError::frontmatter(
                path,
                "front matter must be a key-value mapping",
            ));
        }
    };

    Ok((frontmatter, body.to_string()))
}

/// Convert a TOML value into the YAML value model so both formats share one
/// metadata representation. Datetimes become their RFC 3339 text.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}

/// Text of a scalar value. Sequences, mappings and null have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Store a scalar in `slot`; hand anything else back for `extra`.
fn take_text(value: Value, slot: &mut Option<String>) -> Option<Value> {
    if value.is_null() {
        return None;
    }
    match scalar_text(&value) {
        Some(text) => {
            *slot = Some(text);
            None
        }
        None => Some(value),
    }
}

/// Accept one scalar tag or a sequence of scalars.
fn take_tags(value: Value, tags: &mut Vec<String>) -> Option<Value> {
    let parsed = match &value {
        Value::Null => Some(Vec::new()),
        Value::Sequence(items) => items.iter().map(scalar_text).collect(),
        other => scalar_text(other).map(|tag| vec![tag]),
    };

    match parsed {
        Some(list) => {
            *tags = list;
            None
        }
        None => Some(value),
    }
}

impl Frontmatter {
    /// Split a metadata mapping into recognised and passthrough keys.
    pub fn from_mapping(mapping: Mapping) -> Self {
        let mut fm = Self::default();

        for (key, value) in mapping {
            let Some(key) = scalar_text(&key) else {
                continue;
            };

            let leftover = match key.as_str() {
                "title" => take_text(value, &mut fm.title),
                "lang" => take_text(value, &mut fm.lang),
                "image" => take_text(value, &mut fm.image),
                "description" => take_text(value, &mut fm.description),
                "tags" => take_tags(value, &mut fm.tags),
                "date" => {
                    fm.date = (!value.is_null()).then_some(value);
                    None
                }
                _ => Some(value),
            };

            if let Some(value) = leftover {
                fm.extra.insert(key, value);
            }
        }

        fm
    }

    /// The raw date text, if the date key holds a scalar.
    pub fn date_text(&self) -> Option<String> {
        match self.date.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether the declared language equals `locale` exactly.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.lang.as_deref() == Some(locale)
    }
}
