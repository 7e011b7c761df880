//! Tests for the ingestion pipeline

use super::*;
use crate::app::services::record_store::RecordStore;
use crate::error::{IngestError, ParseError, PersistenceError, RowError};

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[test]
fn test_valid_upload_is_stored_in_order() {
    let (result, store) = ingest_str("field1,field2\n x ,y\np,q\n", "data.csv");

    let summary = result.unwrap();
    assert_eq!(summary.filename, "data.csv");
    assert_eq!(summary.records_persisted, 2);
    assert_eq!(summary.last_line(), Some(3));
    assert_eq!(stored_pairs(&store), pairs(&[("x", "y"), ("p", "q")]));
}

#[test]
fn test_extra_header_column_stores_nothing() {
    let (result, store) = ingest_str("field1,field2,field3\na,b,c\n", "data.csv");

    match result {
        Err(IngestError::HeaderCountMismatch { expected, actual, .. }) => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 3);
        }
        other => panic!("Expected header count mismatch, got {:?}", other),
    }
    assert_eq!(store.attempts(), 0);
}

#[test]
fn test_wrong_header_count_never_stores() {
    for columns in [1, 3, 4, 5] {
        let header: Vec<String> = (1..=columns).map(|i| format!("field{}", i)).collect();
        let content = format!("{}\na,b\n", header.join(","));

        let (result, store) = ingest_str(&content, "data.csv");

        assert!(
            matches!(result, Err(IngestError::HeaderCountMismatch { actual, .. }) if actual == columns),
            "header with {} columns",
            columns
        );
        assert_eq!(store.attempts(), 0);
    }
}

#[test]
fn test_swapped_header_stores_nothing() {
    let (result, store) = ingest_str("field2,field1\na,b\n", "data.csv");

    assert!(matches!(
        result,
        Err(IngestError::HeaderNameMismatch { position: 0, .. })
    ));
    assert!(store.is_empty());
}

#[test]
fn test_empty_field_aborts_at_its_line() {
    let (result, store) = ingest_str("field1,field2\na,\n", "data.csv");

    let error = result.unwrap_err();
    assert_eq!(error.line(), Some(2));
    assert_eq!(error.kind(), "empty_field");
    assert_eq!(
        error.to_string(),
        "Error processing line 2: Empty value found for 'field2' at line 2"
    );
    match error {
        IngestError::RowProcessing {
            reason: RowError::Parse(parse),
            ..
        } => assert_eq!(
            parse,
            ParseError::EmptyField {
                line: 2,
                field_name: "field2".to_string(),
            }
        ),
        other => panic!("Expected parse failure, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[test]
fn test_persistence_failure_keeps_earlier_records() {
    let mut store = MemoryRecordStore::rejecting_attempt(2);
    let result = IngestPipeline::new().ingest(
        "field1,field2\na,b\nc,d\ne,f\n".as_bytes(),
        "data.csv",
        &mut store,
    );

    let error = result.unwrap_err();
    assert_eq!(error.line(), Some(3));
    assert_eq!(error.kind(), "persistence_failure");
    assert!(matches!(
        error,
        IngestError::RowProcessing {
            reason: RowError::Persistence(PersistenceError::Rejected { .. }),
            ..
        }
    ));
    assert_eq!(stored_pairs(&store), pairs(&[("a", "b")]));
    // Row 4 is never attempted
    assert_eq!(store.attempts(), 2);
}

#[test]
fn test_parse_failure_stops_later_rows() {
    let (result, store) = ingest_str("field1,field2\na,b\nonly\nc,d\n", "data.csv");

    let error = result.unwrap_err();
    assert_eq!(error.line(), Some(3));
    assert_eq!(error.kind(), "insufficient_columns");
    assert_eq!(stored_pairs(&store), pairs(&[("a", "b")]));
    assert_eq!(store.attempts(), 1);
}

#[test]
fn test_blank_line_is_a_row() {
    let (result, store) = ingest_str("field1,field2\na,b\n\nc,d\n", "data.csv");

    let error = result.unwrap_err();
    assert_eq!(error.line(), Some(3));
    assert_eq!(
        error.to_string(),
        "Error processing line 3: Record at line 3 has insufficient columns. Expected: 2, Found: 1"
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn test_whitespace_only_field() {
    let (result, _store) = ingest_str("field1,field2\n   ,b\n", "data.csv");

    let error = result.unwrap_err();
    assert_eq!(
        error.to_string(),
        "Error processing line 2: Empty value found for 'field1' at line 2"
    );
}

#[test]
fn test_empty_input() {
    let (result, store) = ingest_str("", "data.csv");

    assert!(matches!(result, Err(IngestError::EmptyInput)));
    assert_eq!(result.unwrap_err().to_string(), "File is empty or null");
    assert_eq!(store.attempts(), 0);
}

#[test]
fn test_empty_input_is_checked_before_extension() {
    let (result, _store) = ingest_str("", "notes.txt");
    assert!(matches!(result, Err(IngestError::EmptyInput)));
}

#[test]
fn test_unsupported_format() {
    let (result, store) = ingest_str("field1,field2\na,b\n", "upload.txt");

    match result {
        Err(IngestError::UnsupportedFormat {
            filename,
            required_extension,
        }) => {
            assert_eq!(filename, "upload.txt");
            assert_eq!(required_extension, ".csv");
        }
        other => panic!("Expected unsupported format, got {:?}", other),
    }
    assert_eq!(store.attempts(), 0);
}

#[test]
fn test_extension_must_be_a_suffix() {
    for filename in ["data.csv.txt", "csv", "datacsv", ""] {
        let (result, _store) = ingest_str("field1,field2\na,b\n", filename);
        assert!(
            matches!(result, Err(IngestError::UnsupportedFormat { .. })),
            "filename {:?}",
            filename
        );
    }
}

#[test]
fn test_extension_is_case_insensitive() {
    let (result, store) = ingest_str("field1,field2\na,b\n", "DATA.CSV");

    assert_eq!(result.unwrap().records_persisted, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_custom_extension() {
    let pipeline = IngestPipeline::new().with_required_extension(".txt");
    let mut store = MemoryRecordStore::new();

    let summary = pipeline
        .ingest("field1,field2\na,b\n".as_bytes(), "upload.TXT", &mut store)
        .unwrap();
    assert_eq!(summary.records_persisted, 1);

    let result = pipeline.ingest("field1,field2\na,b\n".as_bytes(), "upload.csv", &mut store);
    assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
}

#[test]
fn test_header_only() {
    for content in ["field1,field2\n", "field1,field2"] {
        let (result, store) = ingest_str(content, "data.csv");

        assert!(matches!(result, Err(IngestError::NoDataRows)));
        assert_eq!(store.attempts(), 0);
    }
}

#[test]
fn test_leading_blank_line_is_the_header() {
    let (result, _store) = ingest_str("\nfield1,field2\na,b\n", "data.csv");

    assert!(matches!(
        result,
        Err(IngestError::HeaderCountMismatch { actual: 1, .. })
    ));
}

#[test]
fn test_quoted_values_are_stored_intact() {
    let (result, store) = ingest_str(
        "field1,field2\n\"a, b\",\"multi\nline\"\nc,d\n",
        "data.csv",
    );

    assert_eq!(result.unwrap().records_persisted, 2);
    assert_eq!(
        stored_pairs(&store),
        pairs(&[("a, b", "multi\nline"), ("c", "d")])
    );
}

#[test]
fn test_undecodable_row_is_reported_at_its_line() {
    let content: &[u8] = b"field1,field2\na,b\n\xff,c\n";
    let mut store = MemoryRecordStore::new();

    let error = IngestPipeline::new()
        .ingest(content, "data.csv", &mut store)
        .unwrap_err();

    assert_eq!(error.line(), Some(3));
    assert_eq!(error.kind(), "malformed_row");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_read_failure_is_io_error() {
    let mut store = MemoryRecordStore::new();
    let result = IngestPipeline::new().ingest(FailingReader, "data.csv", &mut store);

    assert!(matches!(result, Err(IngestError::Io { .. })));
    assert_eq!(result.unwrap_err().kind(), "io");
}

#[test]
fn test_stream_is_released_on_every_outcome() {
    for content in ["field1,field2\na,b\n", "field1,field2\na,\n", "bad\n"] {
        let (reader, dropped) = DropTrackingReader::new(content);
        let mut store = MemoryRecordStore::new();

        let _ = IngestPipeline::new().ingest(reader, "data.csv", &mut store);

        assert!(dropped.get(), "stream left open for {:?}", content);
    }
}

#[test]
fn test_trait_object_store() {
    let mut store: Box<dyn RecordStore> = Box::new(MemoryRecordStore::new());

    let summary = IngestPipeline::new()
        .ingest("field1,field2\na,b\n".as_bytes(), "data.csv", store.as_mut())
        .unwrap();

    assert_eq!(summary.records_persisted, 1);
}

#[test]
fn test_ingest_path() {
    let temp_file = create_temp_csv("field1,field2\nalpha,beta\ngamma,delta\n");
    let mut store = MemoryRecordStore::new();

    let summary = IngestPipeline::new()
        .ingest_path(temp_file.path(), &mut store)
        .unwrap();

    assert_eq!(summary.records_persisted, 2);
    assert!(summary.filename.ends_with(".csv"));
    assert_eq!(
        stored_pairs(&store),
        pairs(&[("alpha", "beta"), ("gamma", "delta")])
    );
}

#[test]
fn test_ingest_missing_path() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut store = MemoryRecordStore::new();

    let result = IngestPipeline::new().ingest_path(&temp_dir.path().join("gone.csv"), &mut store);

    assert!(matches!(result, Err(IngestError::Io { .. })));
}

#[test]
fn test_rows_after_bare_cr_are_stored() {
    let (result, store) = ingest_str("field1,field2\na,b\rc,d\ne,f\n", "data.csv");

    assert_eq!(result.unwrap().records_persisted, 3);
    assert_eq!(
        stored_pairs(&store),
        pairs(&[("a", "b"), ("c", "d"), ("e", "f")])
    );
}

#[test]
fn test_cr_only_upload() {
    let (result, store) = ingest_str("field1,field2\ra,b\rc,d\r", "data.csv");

    assert_eq!(result.unwrap().records_persisted, 2);
    assert_eq!(stored_pairs(&store), pairs(&[("a", "b"), ("c", "d")]));
}

#[test]
fn test_bare_cr_row_is_validated() {
    let (result, store) = ingest_str("field1,field2\na,b\rc,\ne,f\n", "data.csv");

    let error = result.unwrap_err();
    assert_eq!(error.line(), Some(3));
    assert_eq!(error.kind(), "empty_field");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_non_breaking_space_is_a_value() {
    let (result, store) = ingest_str("field1,field2\n\u{00A0},b\n", "data.csv");

    assert_eq!(result.unwrap().records_persisted, 1);
    assert_eq!(stored_pairs(&store), pairs(&[("\u{00A0}", "b")]));
}

#[test]
fn test_prepare_then_persist() {
    let pipeline = IngestPipeline::new();
    let upload = match pipeline.prepare("field1,field2\na,b\nc,d\n".as_bytes(), "data.csv") {
        Ok(upload) => upload,
        Err(e) => panic!("Expected a prepared upload, got {:?}", e),
    };
    assert_eq!(upload.filename(), "data.csv");

    let mut store = MemoryRecordStore::new();
    let summary = upload.persist_into(&mut store).unwrap();

    assert_eq!(summary.records_persisted, 2);
    assert_eq!(stored_pairs(&store), pairs(&[("a", "b"), ("c", "d")]));
}

#[test]
fn test_prepare_reports_precondition_failures() {
    let pipeline = IngestPipeline::new();

    let cases = [
        ("", "data.csv", "empty_input"),
        ("field1,field2\na,b\n", "data.txt", "unsupported_format"),
        ("field2,field1\na,b\n", "data.csv", "header_name_mismatch"),
        ("field1,field2\n", "data.csv", "no_data_rows"),
    ];

    for (content, filename, kind) in cases {
        let error = pipeline.prepare(content.as_bytes(), filename).err();
        assert_eq!(error.map(|e| e.kind()), Some(kind), "{:?}", content);
    }
}

#[test]
fn test_pipeline_from_config() {
    let config = crate::config::Config::default().with_required_extension(".tsv");
    let pipeline = IngestPipeline::from_config(&config);

    assert_eq!(pipeline.required_extension(), ".tsv");
    assert_eq!(pipeline.schema(), &crate::app::models::Schema::REQUIRED);
}
