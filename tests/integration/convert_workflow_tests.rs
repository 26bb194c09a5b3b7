/*!
 * End-to-end export/import workflow tests driving the controller the same way
 * the CLI does.
 */

use std::fs;

use xlifftab::app_config::Config;
use xlifftab::app_controller::Controller;
use xlifftab::table::read_table;
use xlifftab::xml_tree::XmlDocument;

use crate::common::{create_temp_dir, create_test_file, sample_xliff, single_unit_xliff};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_controller(output_dir: &std::path::Path) -> Controller {
    let mut config = Config::default();
    config.output_dir = output_dir.to_path_buf();
    config.run_log.enabled = false;
    Controller::with_config(config).unwrap()
}

/// The full scenario: export, edit one row, drop another, import.
/// The edited row lands in the document; the dropped unit falls back to its
/// own source text.
#[test]
fn test_workflow_withExportEditImport_shouldMergeEdits() {
    init_logging();
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let out_dir = dir.join("out");
    let controller = test_controller(&out_dir);

    let document_path = create_test_file(&dir, "F_REPORT_FR.xlf", single_unit_xliff()).unwrap();

    // Export
    let table_path = controller.run_export(&document_path, None).unwrap();
    assert_eq!(table_path, out_dir.join("F_REPORT.csv"));

    let records = read_table(fs::read(&table_path).unwrap().as_slice()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].field_id, "age");
    assert_eq!(records[0].source_text, "30");
    assert_eq!(records[0].target_text, "");
    assert_eq!(records[0].language_code, "FR");

    // Edit: translate the first row, drop the second entirely
    let edited = "id,source,target,lang,auto_translate\nage,30,trente,FR,\n";
    fs::write(&table_path, edited).unwrap();

    // Import against the explicit original document
    let output_path = controller.run_import(&document_path, &table_path, None).unwrap();
    assert_eq!(output_path, out_dir.join("F_REPORT_FR.xlf"));

    let tree = XmlDocument::parse(&fs::read(&output_path).unwrap()).unwrap();
    let body = tree.root.child("file").unwrap().child("body").unwrap();
    let targets: Vec<String> = body
        .children_named("trans-unit")
        .map(|unit| unit.child("target").unwrap().text_content())
        .collect();
    assert_eq!(targets, vec!["trente".to_string(), "Armand".to_string()]);

    // Untouched structure survived
    assert_eq!(tree.root.attribute("version"), Some("1.2"));
    assert_eq!(
        tree.root.child("file").unwrap().attribute("source-language"),
        Some("en")
    );
}

/// Exporting a richer document and importing the unedited table reproduces
/// every attribute and element, with targets filled from the sources.
#[test]
fn test_workflow_withUneditedTable_shouldRoundTripDocument() {
    init_logging();
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let out_dir = dir.join("out");
    let controller = test_controller(&out_dir);

    let document_path = create_test_file(&dir, "AM_REPORT_DE.xlf", sample_xliff()).unwrap();

    let table_path = controller.run_export(&document_path, None).unwrap();
    let output_path = controller.run_import(&document_path, &table_path, None).unwrap();
    assert_eq!(output_path, out_dir.join("AM_REPORT_DE.xlf"));

    let original = XmlDocument::parse(sample_xliff().as_bytes()).unwrap();
    let merged = XmlDocument::parse(&fs::read(&output_path).unwrap()).unwrap();

    // Strip the injected targets; the rest must be identical to the original
    let mut stripped = merged.clone();
    let body = stripped
        .root
        .child_mut("file")
        .unwrap()
        .child_mut("body")
        .unwrap();
    for node in &mut body.children {
        if let xlifftab::xml_tree::XmlNode::Element(unit) = node {
            if unit.name == "trans-unit" {
                unit.children.retain(|child| {
                    !matches!(child, xlifftab::xml_tree::XmlNode::Element(e) if e.name == "target")
                });
            }
        }
    }
    assert_eq!(stripped, original);

    // And the injected targets equal the sources (nothing was translated)
    let targets: Vec<String> = merged
        .root
        .child("file")
        .unwrap()
        .child("body")
        .unwrap()
        .children_named("trans-unit")
        .map(|unit| unit.child("target").map(|t| t.text_content()).unwrap_or_default())
        .collect();
    assert_eq!(targets, vec!["Customer name".to_string(), "30".to_string(), String::new()]);
}

/// Import writes into the configured output directory, or an explicit
/// override when given
#[test]
fn test_workflow_withOutputDirOverride_shouldWriteThere() {
    init_logging();
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let controller = test_controller(&dir.join("default_out"));

    let document_path = create_test_file(&dir, "AM_REPORT_DE.xlf", sample_xliff()).unwrap();
    let override_dir = dir.join("elsewhere");

    let table_path = controller.run_export(&document_path, Some(&override_dir)).unwrap();
    assert!(table_path.starts_with(&override_dir));
    assert!(table_path.exists());
}

#[test]
fn test_run_convert_withXliffInput_shouldExport() {
    init_logging();
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let out_dir = dir.join("out");
    let controller = test_controller(&out_dir);

    let document_path = create_test_file(&dir, "AM_REPORT_DE.xlf", sample_xliff()).unwrap();
    let table_path = controller.run_convert(&document_path, None).unwrap();
    assert_eq!(table_path, out_dir.join("AM_REPORT.csv"));
}

/// A table alone cannot be converted; the merge needs the original document
#[test]
fn test_run_convert_withTableInput_shouldFail() {
    init_logging();
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let controller = test_controller(&dir);

    let table_path =
        create_test_file(&dir, "AM_REPORT.csv", "id,source,target,lang,auto_translate\n").unwrap();
    assert!(controller.run_convert(&table_path, None).is_err());
}

#[test]
fn test_run_import_withEmptyTableFile_shouldFailWithMissingInput() {
    init_logging();
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let controller = test_controller(&dir);

    let document_path = create_test_file(&dir, "AM_REPORT_DE.xlf", sample_xliff()).unwrap();
    let empty_table = create_test_file(&dir, "AM_REPORT.csv", "").unwrap();

    let error = controller
        .run_import(&document_path, &empty_table, None)
        .unwrap_err();
    assert!(error.to_string().contains("missing required input"));
}
