//! Normalization of per-record table payloads.
//!
//! A record can carry tables in two places: JSON strings in its answer
//! (tables the reviewer corrected) and fields flagged `use_table` (tables
//! as originally extracted). Answer tables take precedence: when a record
//! has any usable answer table, its field tables are ignored.

use serde_json::Value;
use tracing::{trace, warn};

use crate::error::{RefgridError, Result};
use crate::input::Record;
use crate::table::{RecordTables, Table};

/// Extracts table collections from records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor;

impl TableExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract tables from every record accepted by `predicate`.
    ///
    /// Records without usable tables are left out of the result.
    pub fn extract_tables<'a, I, P>(&self, records: I, predicate: P) -> Vec<RecordTables>
    where
        I: IntoIterator<Item = &'a Record>,
        P: FnMut(&Record) -> bool,
    {
        self.extract_indexed(records, predicate)
            .into_iter()
            .map(|(_, tables)| tables)
            .collect()
    }

    /// Like [`extract_tables`](Self::extract_tables), pairing each collection
    /// with the position of its record in `records`.
    pub fn extract_indexed<'a, I, P>(&self, records: I, mut predicate: P) -> Vec<(usize, RecordTables)>
    where
        I: IntoIterator<Item = &'a Record>,
        P: FnMut(&Record) -> bool,
    {
        records
            .into_iter()
            .enumerate()
            .filter(|(_, record)| predicate(record))
            .map(|(index, record)| (index, self.extract_one(record)))
            .filter(|(_, tables)| !tables.is_empty())
            .collect()
    }

    /// Extract the tables of one record, preferring answer tables over field tables.
    pub fn extract_one(&self, record: &Record) -> RecordTables {
        let answer_tables = self.answer_tables(record);
        if !answer_tables.is_empty() {
            return answer_tables;
        }
        self.field_tables(record)
    }

    /// Parseable tables from the record's answer. Malformed entries are logged and skipped.
    pub fn answer_tables(&self, record: &Record) -> RecordTables {
        let mut tables = RecordTables::new();
        let Some(answer) = &record.answer else {
            return tables;
        };

        for (entry, answer_entry) in &answer.value {
            let Value::String(payload) = &answer_entry.value else {
                continue;
            };
            if !payload.starts_with('{') {
                continue;
            }
            match Self::try_parse_answer(entry, payload) {
                Ok(table) => {
                    tables.insert(entry.clone(), table);
                }
                Err(e) => {
                    warn!(record = %record.id, entry = %entry, error = %e, "skipping answer table");
                }
            }
        }

        tables
    }

    /// Parseable tables from the record's `use_table` fields. Malformed fields are dropped.
    pub fn field_tables(&self, record: &Record) -> RecordTables {
        let mut tables = RecordTables::new();

        for field in &record.fields {
            if !field.settings.use_table {
                continue;
            }
            let Some(content) = field.content.as_deref() else {
                continue;
            };
            if !content.starts_with('{') {
                continue;
            }
            match Self::try_parse_field(&field.name, content) {
                Ok(table) => {
                    tables.insert(field.name.clone(), table);
                }
                Err(e) => {
                    trace!(record = %record.id, field = %field.name, error = %e, "dropping field table");
                }
            }
        }

        tables
    }

    /// Parse one answer payload.
    pub fn try_parse_answer(entry: &str, payload: &str) -> Result<Table> {
        Table::parse(payload).map_err(|e| RefgridError::MalformedTablePayload {
            entry: entry.to_string(),
            message: e.to_string(),
        })
    }

    /// Parse one field payload.
    pub fn try_parse_field(field: &str, content: &str) -> Result<Table> {
        Table::parse(content).map_err(|e| RefgridError::MalformedFieldPayload {
            field: field.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Field;

    const SITES: &str = r#"{"data": [{"reference": "S1"}], "validation": {"name": "Site", "columns": {}}}"#;
    const LABS: &str = r#"{"data": [{"reference": "L1"}], "validation": {"name": "Lab"}}"#;

    #[test]
    fn test_extract_indexed_keeps_record_positions() {
        let records = vec![
            Record::new("plain"),
            Record::new("sites").with_answer("sites", SITES),
            Record::new("labs").with_field(Field::table("labs", LABS)),
        ];
        let indexed = TableExtractor::new().extract_indexed(&records, |_| true);

        let positions: Vec<usize> = indexed.iter().map(|(index, _)| *index).collect();
        assert_eq!(positions, vec![1, 2]);
        assert!(indexed[0].1.contains_key("sites"));
    }

    #[test]
    fn test_answer_tables_parsed() {
        let record = Record::new("r1").with_answer("sites", SITES);
        let tables = TableExtractor::new().extract_one(&record);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables["sites"].name(), "Site");
        assert!(!tables["sites"].validation.extra.contains_key("columns"));
    }

    #[test]
    fn test_answer_precedence_over_fields() {
        let record = Record::new("r1")
            .with_answer("sites", SITES)
            .with_field(Field::table("labs", LABS));
        let tables = TableExtractor::new().extract_one(&record);

        assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["sites"]);
    }

    #[test]
    fn test_fallback_to_fields() {
        let record = Record::new("r1")
            .with_answer("comment", "looks fine")
            .with_field(Field::table("labs", LABS));
        let tables = TableExtractor::new().extract_one(&record);

        assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["labs"]);
    }

    #[test]
    fn test_malformed_answer_does_not_abort_siblings() {
        let record = Record::new("r1")
            .with_answer("broken", "{not json")
            .with_answer("sites", SITES)
            .with_answer("no_validation", r#"{"data": []}"#);
        let tables = TableExtractor::new().extract_one(&record);

        assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["sites"]);
    }

    #[test]
    fn test_all_answers_malformed_falls_back_to_fields() {
        let record = Record::new("r1")
            .with_answer("broken", "{not json")
            .with_field(Field::table("labs", LABS));
        let tables = TableExtractor::new().extract_one(&record);

        assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["labs"]);
    }

    #[test]
    fn test_fields_require_use_table() {
        let mut field = Field::table("labs", LABS);
        field.settings.use_table = false;
        let record = Record::new("r1").with_field(field);

        assert!(TableExtractor::new().extract_one(&record).is_empty());
    }

    #[test]
    fn test_non_string_answers_ignored() {
        let record = Record::new("r1").with_answer("count", 3);
        assert!(TableExtractor::new().answer_tables(&record).is_empty());
    }

    #[test]
    fn test_extract_tables_filters_empty_and_predicate() {
        let records = vec![
            Record::new("a").with_answer("sites", SITES),
            Record::new("b"),
            Record::new("c").with_field(Field::table("labs", LABS)),
        ];
        let tables = TableExtractor::new().extract_tables(&records, |r| r.id != "c");

        assert_eq!(tables.len(), 1);
        assert!(tables[0].contains_key("sites"));
    }

    #[test]
    fn test_try_parse_reports_kind() {
        let err = TableExtractor::try_parse_answer("x", "{").unwrap_err();
        assert!(matches!(err, RefgridError::MalformedTablePayload { .. }));

        let err = TableExtractor::try_parse_field("y", "{").unwrap_err();
        assert!(matches!(err, RefgridError::MalformedFieldPayload { .. }));
    }
}
