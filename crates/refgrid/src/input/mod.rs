//! Reviewed records as supplied by the record repository.

mod record;

pub use record::{load_records, Answer, AnswerEntry, Field, FieldSettings, Record};
