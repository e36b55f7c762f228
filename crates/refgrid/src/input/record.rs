//! Record shapes consumed read-only by table extraction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RefgridError, Result};

/// One answer entry. Table answers hold a JSON string in `value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerEntry {
    #[serde(default)]
    pub value: Value,
}

impl AnswerEntry {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// The reviewer's answer to a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answer {
    /// Answers keyed by question/field name.
    #[serde(default)]
    pub value: IndexMap<String, AnswerEntry>,
    /// Accumulated review time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Per-field display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Render the field content as a table.
    #[serde(default)]
    pub use_table: bool,
}

/// A record field shown to the reviewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub settings: FieldSettings,
}

impl Field {
    /// Create a field whose content is rendered as a table.
    pub fn table(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Some(content.into()),
            settings: FieldSettings { use_table: true },
        }
    }
}

/// A reviewed record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub answer: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Add a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add an answer entry, creating the answer if needed.
    pub fn with_answer(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.answer
            .get_or_insert_with(Answer::default)
            .value
            .insert(name.into(), AnswerEntry::new(value));
        self
    }

    /// Whether the reviewer has answered at least one question.
    pub fn has_any_question_answered(&self) -> bool {
        self.answer.as_ref().is_some_and(|a| !a.value.is_empty())
    }
}

/// Load a JSON array of records from a file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RefgridError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}
