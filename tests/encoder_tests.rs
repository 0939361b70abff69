//! Encoder Tests
//!
//! Workbook and delimited-text layouts of exported forms.

use calamine::{open_workbook, Data, Reader, Xlsx};
use pretty_assertions::assert_eq;
use royalbit_xlsform::encode::{
    to_csv, to_xls, DelimitedEncoder, TableEncoder, WorkbookEncoder, SHEET_MARKER,
};
use royalbit_xlsform::export::{ExportResult, ListNameSource, XlsFormExporter};
use royalbit_xlsform::types::{ChoiceOption, MultipleChoiceQuestion, Question, Survey};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

struct FixedSuffix([u8; 8]);

impl ListNameSource for FixedSuffix {
    fn suffix_bytes(&mut self) -> [u8; 8] {
        self.0
    }
}

fn sample_result() -> ExportResult {
    let survey = Survey::new()
        .with_id_string("f")
        .with_child(Question::new("q1", "text").with_label("Q1"))
        .with_child(
            MultipleChoiceQuestion::new("q2", "select one")
                .with_choice(ChoiceOption::new("a").with_label("A"))
                .with_choice(ChoiceOption::new("b")),
        );
    XlsFormExporter::with_list_names(FixedSuffix([0; 8]))
        .unwrap()
        .export(&survey)
        .unwrap()
}

fn sheet_rows(workbook: &mut Xlsx<Cursor<Vec<u8>>>, sheet: &str) -> Vec<Vec<String>> {
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    Data::Empty => String::new(),
                    other => panic!("unexpected cell {:?}", other),
                })
                .collect()
        })
        .collect()
}

fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKBOOK ENCODER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_workbook_sheets_in_order() {
    let bytes = to_xls(&sample_result(), None).unwrap().expect("bytes without a path");
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["survey", "choices", "settings"]);
}

#[test]
fn test_workbook_survey_and_choices_content() {
    let bytes = WorkbookEncoder
        .encode(&sample_result(), None)
        .unwrap()
        .unwrap();
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();

    assert_eq!(
        sheet_rows(&mut workbook, "survey"),
        strings(&[
            &["type", "name", "label"],
            &["text", "q1", "Q1"],
            &["select_one q2_AAAAAAAAAAA_", "q2", ""],
        ])
    );
    assert_eq!(
        sheet_rows(&mut workbook, "choices"),
        strings(&[
            &["list name", "name", "label"],
            &["q2_AAAAAAAAAAA_", "a", "A"],
            &["q2_AAAAAAAAAAA_", "b", ""],
        ])
    );
    assert_eq!(
        sheet_rows(&mut workbook, "settings"),
        strings(&[&["form_id"], &["f"]])
    );
}

#[test]
fn test_workbook_empty_tables_still_get_sheets() {
    let result = XlsFormExporter::seeded(1)
        .unwrap()
        .export(&Survey::new())
        .unwrap();
    let bytes = to_xls(&result, None).unwrap().unwrap();
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();

    assert_eq!(workbook.sheet_names().len(), 3);
    assert!(sheet_rows(&mut workbook, "choices").is_empty());
}

#[test]
fn test_workbook_written_to_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("form.xlsx");

    let returned = to_xls(&sample_result(), Some(&path)).unwrap();
    assert!(returned.is_none(), "Writing to a path returns no bytes");
    assert!(path.exists(), "Workbook should be written");

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let survey = workbook.worksheet_range("survey").unwrap();
    assert_eq!(survey.height(), 3);
}

// ═══════════════════════════════════════════════════════════════════════════
// DELIMITED ENCODER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_csv_layout() {
    let bytes = to_csv(&sample_result(), None).unwrap().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text,
        "sheet,survey\n\
         survey,type,name,label\n\
         survey,text,q1,Q1\n\
         survey,select_one q2_AAAAAAAAAAA_,q2,\n\
         sheet,choices\n\
         choices,list name,name,label\n\
         choices,q2_AAAAAAAAAAA_,a,A\n\
         choices,q2_AAAAAAAAAAA_,b,\n\
         sheet,settings\n\
         settings,form_id\n\
         settings,f\n"
    );
}

#[test]
fn test_csv_empty_tables_keep_markers() {
    let result = XlsFormExporter::seeded(1)
        .unwrap()
        .export(&Survey::new())
        .unwrap();
    let text = String::from_utf8(to_csv(&result, None).unwrap().unwrap()).unwrap();
    let markers = text
        .lines()
        .filter(|line| line.starts_with(&format!("{},", SHEET_MARKER)))
        .count();
    assert_eq!(markers, 3);
    assert_eq!(
        text,
        "sheet,survey\nsurvey\nsheet,choices\nchoices\nsheet,settings\nsettings\n"
    );
}

#[test]
fn test_csv_quotes_cells_with_commas() {
    let survey =
        Survey::new().with_child(Question::new("q1", "text").with_label("Name, in full"));
    let result = XlsFormExporter::seeded(1).unwrap().export(&survey).unwrap();
    let text = String::from_utf8(to_csv(&result, None).unwrap().unwrap()).unwrap();
    assert!(text.contains("survey,text,q1,\"Name, in full\"\n"));
}

#[test]
fn test_csv_is_utf8() {
    let survey = Survey::new().with_child(Question::new("q1", "text").with_label("Prénom"));
    let result = XlsFormExporter::seeded(1).unwrap().export(&survey).unwrap();
    let bytes = DelimitedEncoder.encode(&result, None).unwrap().unwrap();
    let text = String::from_utf8(bytes).expect("CSV output is UTF-8");
    assert!(text.contains("Prénom"));
}

#[test]
fn test_csv_written_to_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("form.csv");

    let returned = to_csv(&sample_result(), Some(&path)).unwrap();
    assert!(returned.is_none());

    let on_disk = fs::read_to_string(&path).unwrap();
    let in_memory =
        String::from_utf8(to_csv(&sample_result(), None).unwrap().unwrap()).unwrap();
    assert_eq!(on_disk, in_memory);
}

#[test]
fn test_csv_to_unwritable_path_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("form.csv");
    assert!(to_csv(&sample_result(), Some(&path)).is_err());
}
