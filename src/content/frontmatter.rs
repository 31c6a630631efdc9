//! Front-matter parsing
//!
//! Template READMEs open with a `---` fenced block of flat `key: value`
//! lines. This is not YAML: values are only ever a string, a bracketed
//! list of strings, or empty.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key written by the updater when a commit date is known
pub const LAST_COMMIT_DATE_KEY: &str = "last-commit-date";

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// `key:` with nothing after the colon
    Null,
    /// `key: [a, b, c]`
    List(Vec<String>),
    /// Anything else, trimmed
    Text(String),
}

impl FieldValue {
    /// Classify a raw, already trimmed value
    fn classify(raw: &str) -> Self {
        if let Some(inner) = raw.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect();
            FieldValue::List(items)
        } else if raw.is_empty() {
            FieldValue::Null
        } else {
            FieldValue::Text(raw.to_string())
        }
    }
}

/// Front-matter of a template README, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FieldValue>,
}

impl FrontMatter {
    /// Parse front-matter from the start of a document.
    ///
    /// Returns `None` when the document does not open with a fenced block.
    /// A block without any `key: value` line yields an empty `FrontMatter`,
    /// which is not the same thing.
    pub fn parse(content: &str) -> Option<Self> {
        let block = extract_block(content)?;
        let mut fm = FrontMatter::default();

        for line in block.split('\n') {
            let line = strip_comment(line).trim();

            // Also covers empty lines
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            fm.insert(key.trim(), FieldValue::classify(value.trim()));
        }

        Some(fm)
    }

    /// Insert a field, replacing an earlier one with the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Record the template's last commit date, overriding any value
    /// written in the README itself
    pub fn set_last_commit_date(&mut self, date: &str) {
        self.insert(LAST_COMMIT_DATE_KEY, FieldValue::Text(date.to_string()));
    }

    /// Convert into a JSON object for the registry
    pub fn into_json(self) -> Map<String, Value> {
        self.fields
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    FieldValue::Null => Value::Null,
                    FieldValue::List(items) => {
                        Value::Array(items.into_iter().map(Value::String).collect())
                    }
                    FieldValue::Text(s) => Value::String(s),
                };
                (key, value)
            })
            .collect()
    }
}

/// Find the fenced block at the very start of `content`.
///
/// The opening fence must be the first line. The block ends at the first
/// later fence line that is itself terminated by a newline.
fn extract_block(content: &str) -> Option<&str> {
    let mut lines = content.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_fence(opening) {
        return None;
    }

    let body_start = opening.len();
    let mut offset = body_start;
    for (index, line) in lines.enumerate() {
        // The fence right after the opening one has no body line before it
        if index > 0 && is_fence(line) {
            // Drop the newline that ends the last body line
            return Some(&content[body_start..offset - 1]);
        }
        offset += line.len();
    }

    None
}

/// `---`, optionally followed by whitespace, then a newline
fn is_fence(line: &str) -> bool {
    line.ends_with('\n') && line.trim_end() == "---"
}

/// Everything from the first `#` on is a comment, quoted or not
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}
