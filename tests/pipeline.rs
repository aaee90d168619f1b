use std::fs;
use std::path::PathBuf;

use cercalc::CerError;
use cercalc::batch::compute_batch;
use cercalc::io::load_table;
use cercalc::model::CellValue;
use cercalc::session::{PREVIEW_ROWS, Session, format_cer};
use tempfile::tempdir;

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("CSV written");
    path
}

#[test]
fn csv_round_trip_preserves_column_values() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(
        &temp_dir,
        "data.csv",
        "id,groundtruths,predictions\n1,hello,world\n2,world,hello\n",
    );

    let table = load_table(&path).expect("CSV loaded");
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.columns(), &["id", "groundtruths", "predictions"]);

    let groundtruths = table.column("groundtruths").expect("column extracted");
    assert_eq!(
        groundtruths,
        vec![
            CellValue::Text("hello".into()),
            CellValue::Text("world".into()),
        ]
    );
    let predictions = table.column("predictions").expect("column extracted");
    assert_eq!(
        predictions,
        vec![
            CellValue::Text("world".into()),
            CellValue::Text("hello".into()),
        ]
    );
}

#[test]
fn csv_cells_are_typed_at_the_boundary() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(&temp_dir, "typed.csv", "id,value\n1,3.5\n2,\n3,text\n");

    let table = load_table(&path).expect("CSV loaded");
    let values = table.column("value").expect("column extracted");
    assert_eq!(
        values,
        vec![
            CellValue::Number(3.5),
            CellValue::Missing,
            CellValue::Text("text".into()),
        ]
    );
}

#[test]
fn xlsx_first_sheet_is_loaded_with_typed_cells() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("data.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "id").expect("header written");
    worksheet.write_string(0, 1, "text").expect("header written");
    worksheet.write_number(1, 0, 1.0).expect("cell written");
    worksheet.write_string(1, 1, "hello").expect("cell written");
    worksheet.write_number(2, 0, 2.0).expect("cell written");
    worksheet.write_number(2, 1, 3.5).expect("cell written");
    workbook.save(&path).expect("workbook saved");

    let table = load_table(&path).expect("XLSX loaded");
    assert_eq!(table.columns(), &["id", "text"]);
    assert_eq!(table.row_count(), 2);

    let values = table.column("text").expect("column extracted");
    assert_eq!(
        values,
        vec![CellValue::Text("hello".into()), CellValue::Number(3.5)]
    );
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(&temp_dir, "data.txt", "id,text\n1,hello\n");

    let error = load_table(&path).expect_err("format rejected");
    assert!(matches!(error, CerError::UnsupportedFormat(_)));
}

#[test]
fn missing_input_is_reported_as_such() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("absent.csv");

    let error = load_table(&path).expect_err("missing file rejected");
    assert!(matches!(error, CerError::MissingInput(_)));
}

#[test]
fn column_extraction_rejects_unknown_names() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(&temp_dir, "data.csv", "id,text\n1,hello\n");

    let table = load_table(&path).expect("CSV loaded");
    let error = table.column("nope").expect_err("column rejected");
    assert!(matches!(error, CerError::ColumnNotFound(name) if name == "nope"));
}

#[test]
fn batch_computes_cer_over_named_columns() {
    let temp_dir = tempdir().expect("temporary directory");
    let pred_path = write_csv(&temp_dir, "pred.csv", "id,pred\n1,hellx\n2,world\n");
    let truth_path = write_csv(&temp_dir, "truth.csv", "id,truth\n1,Hello\n2,World\n");

    // One substitution against ten reference characters.
    let cer = compute_batch(&pred_path, &truth_path, "pred", "truth").expect("cer computed");
    assert_eq!(cer, 0.1);
}

#[test]
fn batch_rejects_numeric_cells_on_raw_values() {
    let temp_dir = tempdir().expect("temporary directory");
    let pred_path = write_csv(&temp_dir, "pred.csv", "id,pred\n1,hello\n2,42\n");
    let truth_path = write_csv(&temp_dir, "truth.csv", "id,truth\n1,hello\n2,world\n");

    // The numeric cell normalizes to the perfectly scoreable text "42"; only
    // the raw-value check can still tell it apart.
    let error = compute_batch(&pred_path, &truth_path, "pred", "truth").expect_err("rejected");
    assert!(matches!(
        error,
        CerError::InvalidValue { column, value } if column == "pred" && value == "42"
    ));
}

#[test]
fn batch_rejects_values_empty_after_normalization() {
    let temp_dir = tempdir().expect("temporary directory");
    let pred_path = write_csv(&temp_dir, "pred.csv", "id,pred\n1,hello\n2,world\n");
    let truth_path = write_csv(&temp_dir, "truth.csv", "id,truth\n1,hello\n2,   \n");

    let error = compute_batch(&pred_path, &truth_path, "pred", "truth").expect_err("rejected");
    assert!(matches!(error, CerError::EmptyValue(column) if column == "truth"));
}

#[test]
fn batch_rejects_mismatched_row_counts() {
    let temp_dir = tempdir().expect("temporary directory");
    let pred_path = write_csv(&temp_dir, "pred.csv", "id,pred\n1,hello\n2,world\n");
    let truth_path = write_csv(&temp_dir, "truth.csv", "id,truth\n1,hello\n");

    let error = compute_batch(&pred_path, &truth_path, "pred", "truth").expect_err("rejected");
    assert!(matches!(
        error,
        CerError::LengthMismatch {
            hypotheses: 2,
            references: 1,
        }
    ));
}

#[test]
fn batch_rejects_unknown_columns() {
    let temp_dir = tempdir().expect("temporary directory");
    let pred_path = write_csv(&temp_dir, "pred.csv", "id,pred\n1,hello\n");
    let truth_path = write_csv(&temp_dir, "truth.csv", "id,truth\n1,hello\n");

    let error = compute_batch(&pred_path, &truth_path, "nope", "truth").expect_err("rejected");
    assert!(matches!(error, CerError::ColumnNotFound(name) if name == "nope"));
}

#[test]
fn session_requires_both_tables() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(&temp_dir, "hyp.csv", "id,text\n1,hello\n");

    let mut session = Session::new();
    let error = session.compute_cer().expect_err("computation refused");
    assert_eq!(error.to_string(), "load both files first");

    session.load_hypotheses(&path).expect("hypotheses loaded");
    let error = session.compute_cer().expect_err("still refused");
    assert!(matches!(error, CerError::TablesNotLoaded));
}

#[test]
fn session_computes_zero_for_identical_tables() {
    let temp_dir = tempdir().expect("temporary directory");
    let content = "id,text\n1,Hello\n2,World\n";
    let hyp_path = write_csv(&temp_dir, "hyp.csv", content);
    let ref_path = write_csv(&temp_dir, "ref.csv", content);

    let mut session = Session::new();
    session.load_hypotheses(&hyp_path).expect("hypotheses loaded");
    session.load_references(&ref_path).expect("references loaded");

    let score = session.compute_cer().expect("cer computed");
    assert_eq!(score, 0.0);
    assert_eq!(format_cer(score), "0.0000");
}

#[test]
fn session_scores_scrambled_text_across_matched_columns() {
    let temp_dir = tempdir().expect("temporary directory");
    let hyp_path = write_csv(&temp_dir, "hyp.csv", "id,text,extra\n1,abcd\n2,efgh\n");
    let ref_path = write_csv(&temp_dir, "ref.csv", "id,text,other\n1,dcab\n2,hgfe\n");

    let mut session = Session::new();
    session.load_hypotheses(&hyp_path).expect("hypotheses loaded");
    session.load_references(&ref_path).expect("references loaded");

    // Only 'text' matches; 'extra' and 'other' are ignored, 'id' is the index.
    let score = session.compute_cer().expect("cer computed");
    assert_eq!(score, 1.0);
    assert_eq!(format_cer(score), "1.0000");
}

#[test]
fn session_reports_missing_column_overlap() {
    let temp_dir = tempdir().expect("temporary directory");
    let hyp_path = write_csv(&temp_dir, "hyp.csv", "id,pred\n1,hello\n");
    let ref_path = write_csv(&temp_dir, "ref.csv", "id,truth\n1,hello\n");

    let mut session = Session::new();
    session.load_hypotheses(&hyp_path).expect("hypotheses loaded");
    session.load_references(&ref_path).expect("references loaded");

    // Only 'id' is shared and the index column never counts as data.
    let error = session.compute_cer().expect_err("nothing to compare");
    assert!(matches!(error, CerError::NoMatchedColumns));
}

#[test]
fn session_reports_length_mismatch_without_dying() {
    let temp_dir = tempdir().expect("temporary directory");
    let hyp_path = write_csv(&temp_dir, "hyp.csv", "id,text\n1,hello\n2,world\n");
    let ref_path = write_csv(&temp_dir, "ref.csv", "id,text\n1,hello\n");

    let mut session = Session::new();
    session.load_hypotheses(&hyp_path).expect("hypotheses loaded");
    session.load_references(&ref_path).expect("references loaded");

    let error = session.compute_cer().expect_err("mismatch reported");
    assert!(matches!(error, CerError::LengthMismatch { .. }));

    // The session stays usable after a reported failure.
    session
        .load_references(&hyp_path)
        .expect("references reloaded");
    let score = session.compute_cer().expect("cer computed");
    assert_eq!(score, 0.0);
}

#[test]
fn session_rejects_numeric_cells_in_matched_columns() {
    let temp_dir = tempdir().expect("temporary directory");
    let hyp_path = write_csv(&temp_dir, "hyp.csv", "id,text\n1,hello\n2,42\n");
    let ref_path = write_csv(&temp_dir, "ref.csv", "id,text\n1,hello\n2,world\n");

    let mut session = Session::new();
    session.load_hypotheses(&hyp_path).expect("hypotheses loaded");
    session.load_references(&ref_path).expect("references loaded");

    let error = session.compute_cer().expect_err("numeric cell reported");
    assert!(matches!(
        error,
        CerError::InvalidValue { column, .. } if column == "text"
    ));
}

#[test]
fn preview_is_capped_at_five_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut content = String::from("id,text\n");
    for index in 0..8 {
        content.push_str(&format!("{index},row{index}\n"));
    }
    let path = write_csv(&temp_dir, "long.csv", &content);

    let mut session = Session::new();
    assert!(session.hypothesis_preview().is_none());
    session.load_hypotheses(&path).expect("hypotheses loaded");

    let preview = session.hypothesis_preview().expect("preview available");
    assert_eq!(preview.columns, &["id", "text"]);
    assert_eq!(preview.rows.len(), PREVIEW_ROWS);
    assert_eq!(preview.rows[0][1], CellValue::Text("row0".into()));
}

#[test]
fn sorting_reorders_the_preview() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = write_csv(
        &temp_dir,
        "unsorted.csv",
        "id,text\n3,cherry\n1,apple\n2,banana\n",
    );

    let mut session = Session::new();
    session.load_references(&path).expect("references loaded");
    session.sort_references_by("text").expect("sorted");

    let preview = session.reference_preview().expect("preview available");
    assert_eq!(preview.rows[0][1], CellValue::Text("apple".into()));
    assert_eq!(preview.rows[1][1], CellValue::Text("banana".into()));
    assert_eq!(preview.rows[2][1], CellValue::Text("cherry".into()));

    let error = session.sort_references_by("nope").expect_err("rejected");
    assert!(matches!(error, CerError::ColumnNotFound(_)));
}

#[test]
fn sorting_requires_a_loaded_table() {
    let mut session = Session::new();
    let error = session.sort_hypotheses_by("text").expect_err("rejected");
    assert!(matches!(error, CerError::TablesNotLoaded));
}
