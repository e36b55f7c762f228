//! Integration tests for Refgrid.

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use refgrid::resolve::ResolveOrder;
use refgrid::{
    generate_combinations, load_records, Field, Record, RefgridError, Refgrid, StatsCache,
    TableExtractor,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn sites_payload(rows: serde_json::Value) -> String {
    json!({
        "data": rows,
        "validation": {"name": "Site", "columns": {"reference": {}, "city": {}}}
    })
    .to_string()
}

fn labs_payload(rows: serde_json::Value) -> String {
    json!({"data": rows, "validation": {"name": "lab"}}).to_string()
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_two_fields_two_rows_each_yield_four_combinations() {
    let record = Record::new("r1")
        .with_answer(
            "sites",
            sites_payload(json!([
                {"reference": "S1", "city": "Boston", "region": "east"},
                {"reference": "S2", "city": "Austin", "region": "south"}
            ])),
        )
        .with_answer(
            "labs",
            labs_payload(json!([
                {"reference": "L1", "method": "PCR"},
                {"reference": "L2", "method": "ELISA"}
            ])),
        );

    let mut refgrid = Refgrid::new();
    let result = refgrid.reconcile(&[record], &["site_ref", "lab_ref"]);

    assert_eq!(result.combinations.len(), 4);
    for combo in &result.combinations {
        assert_eq!(combo.len(), 2);
        assert!(combo.contains_key("site_ref"));
        assert!(combo.contains_key("lab_ref"));
    }

    let pairs: Vec<(String, String)> = result
        .combinations
        .iter()
        .map(|c| (c["site_ref"].clone(), c["lab_ref"].clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("S1".to_string(), "L1".to_string()),
            ("S1".to_string(), "L2".to_string()),
            ("S2".to_string(), "L1".to_string()),
            ("S2".to_string(), "L2".to_string()),
        ]
    );
}

#[test]
fn test_reconcile_from_file() {
    let records = json!([
        {
            "id": "corrected",
            "answer": {"value": {"sites": {"value": sites_payload(json!([
                {"reference": "S1", "city": "Boston", "country": "US"},
                {"reference": "S2", "city": "Austin", "country": "US"}
            ]))}}},
            "fields": []
        },
        {
            "id": "original",
            "fields": [{
                "name": "sites",
                "content": sites_payload(json!([{"reference": "X1", "city": "Paris"}])),
                "settings": {"use_table": true}
            }]
        },
        {"id": "empty", "fields": [{"name": "text", "content": "hello"}]}
    ]);
    let file = create_test_file(&records.to_string());

    let records = load_records(file.path()).expect("Failed to load records");
    assert_eq!(records.len(), 3);

    let mut refgrid = Refgrid::new();
    let result = refgrid.reconcile(&records, &["site_ref", "unknown_ref"]);

    // The record without tables is absent.
    assert_eq!(result.tables.len(), 2);
    assert!(!result.ref_values.contains_key("unknown_ref"));

    let sites = &result.ref_values["site_ref"];
    assert_eq!(sites.keys().collect::<Vec<_>>(), vec!["S1", "S2"]);
    assert_eq!(sites["S1"].keys().collect::<Vec<_>>(), vec!["city"]);
    assert_eq!(result.combinations.len(), 2);
}

#[test]
fn test_authoritative_order_selects_later_record() {
    let first = Record::new("a").with_answer("sites", sites_payload(json!([{"reference": "A1"}])));
    let second = Record::new("b").with_answer("sites", sites_payload(json!([{"reference": "B1"}])));

    let mut refgrid = Refgrid::new().with_order(ResolveOrder::Authoritative(1));
    let result = refgrid.reconcile(&[first, second], &["site_ref"]);

    assert_eq!(result.combinations.len(), 1);
    assert_eq!(result.combinations[0]["site_ref"], "B1");
}

#[test]
fn test_authoritative_order_counts_records_without_tables() {
    let records = [
        Record::new("notes").with_field(Field::table("comment", "plain text")),
        Record::new("auth").with_answer("sites", sites_payload(json!([{"reference": "AUTH"}]))),
        Record::new("other").with_answer("sites", sites_payload(json!([{"reference": "OTHER"}]))),
    ];

    let mut refgrid = Refgrid::new().with_order(ResolveOrder::Authoritative(1));
    let result = refgrid.reconcile(&records, &["site_ref"]);

    assert_eq!(result.sources, vec![1, 2]);
    assert_eq!(result.combinations.len(), 1);
    assert_eq!(result.combinations[0]["site_ref"], "AUTH");

    let mut refgrid = Refgrid::new().with_order(ResolveOrder::Authoritative(0));
    let result = refgrid.reconcile(&records, &["site_ref"]);
    assert_eq!(result.combinations[0]["site_ref"], "AUTH");
}

#[test]
fn test_empty_reference_table_does_not_erase_combinations() {
    let record = Record::new("r1")
        .with_answer("sites", sites_payload(json!([])))
        .with_answer(
            "labs",
            labs_payload(json!([{"reference": "L1"}, {"reference": "L2"}])),
        );

    let mut refgrid = Refgrid::new();
    let result = refgrid.reconcile(&[record], &["site_ref", "lab_ref"]);

    assert!(!result.ref_values.contains_key("site_ref"));
    assert_eq!(result.combinations.len(), 2);
    assert_eq!(result.combinations[0]["lab_ref"], "L1");
}

#[test]
fn test_load_records_missing_file() {
    let err = load_records("/nonexistent/records.json").unwrap_err();
    assert!(matches!(err, RefgridError::Io { .. }));
}

#[test]
fn test_load_records_invalid_json() {
    let file = create_test_file("not json");
    assert!(matches!(load_records(file.path()), Err(RefgridError::Json(_))));
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn test_precedence_answer_over_fields() {
    let record = Record::new("r1")
        .with_answer("sites", sites_payload(json!([{"reference": "S1"}])))
        .with_field(Field::table("labs", labs_payload(json!([{"reference": "L1"}]))));

    let tables = TableExtractor::new().extract_one(&record);
    assert_eq!(tables.len(), 1);
    assert!(tables.contains_key("sites"));
}

#[test]
fn test_malformed_payloads_do_not_affect_other_records() {
    let records = vec![
        Record::new("bad").with_answer("sites", "{\"data\": ["),
        Record::new("bad_field").with_field(Field::table("sites", "{oops")),
        Record::new("good").with_answer("sites", sites_payload(json!([{"reference": "S1"}]))),
    ];

    let tables = TableExtractor::new().extract_tables(&records, |_| true);
    assert_eq!(tables.len(), 1);
}

#[test]
fn test_shared_cache_across_calls() {
    let record = Record::new("r1").with_answer(
        "sites",
        sites_payload(json!([{"reference": "S1", "c": 1}, {"reference": "S2", "c": 2}])),
    );

    let records = [record];
    let mut refgrid = Refgrid::new();
    let first = refgrid.ref_values(&["site_ref"], &records);
    let second = refgrid.ref_values(&["site_ref"], &records);

    assert_eq!(first, second);
    assert_eq!(refgrid.cache().len(), 1);
    assert_eq!(refgrid.cache().hits(), 1);
}

#[test]
fn test_resolver_and_generator_directly() {
    let record = Record::new("r1").with_answer("labs", labs_payload(json!([{"reference": "L1"}])));
    let tables = TableExtractor::new().extract_tables(&[record], |_| true);

    let values = refgrid::ReferenceResolver::default().find_matching_ref_values(
        &["lab_ref"],
        &tables,
        &mut StatsCache::new(),
    );
    let combos = generate_combinations(&values);

    assert_eq!(combos.len(), 1);
    assert_eq!(combos[0]["lab_ref"], "L1");
}
