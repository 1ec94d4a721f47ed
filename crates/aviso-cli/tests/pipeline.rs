//! Integration tests for the generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use aviso_cli::pipeline::{EXIT_CONFIGURATION, PipelineError, RunRequest, run};
use aviso_model::{HtsEntry, OutputFormat};
use aviso_output::xlsx_available;
use proptest::prelude::*;
use tempfile::TempDir;

const RULES: &str = r#"
industries:
  - key: auto
    name: Automotive
    sector: Manufacturing
    notice_type: Type A
    hts_entries:
      - code: "8703.23"
        description: Passenger vehicles
        requires_notice: true
        rule_reference: Art. 5
  - key: textil
    name: Textil y Confección
    notice_type: Aviso automático
    notes: "Incluye prendas, telas y accesorios"
    hts_entries:
      - code: "5208.11.01"
        description: Tejidos de algodón
        requires_notice: true
      - code: "6109.10.01"
        description: Camisetas de punto
"#;

fn setup(rules: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let rules_path = dir.path().join("config").join("rules.yaml");
    fs::create_dir_all(rules_path.parent().expect("rules parent")).expect("config dir");
    fs::write(&rules_path, rules).expect("write rules");
    let output_dir = dir.path().join("output");
    (dir, rules_path, output_dir)
}

fn text_only(rules_path: &Path, output_dir: &Path) -> RunRequest {
    RunRequest {
        skip_xlsx: true,
        ..RunRequest::new(rules_path, output_dir)
    }
}

fn csv_lines(output_dir: &Path) -> Vec<String> {
    fs::read_to_string(output_dir.join("master_sheet.csv"))
        .expect("read csv")
        .split_terminator("\r\n")
        .map(str::to_string)
        .collect()
}

#[test]
fn writes_csv_and_json_with_one_row_per_entry() {
    let (_dir, rules_path, output_dir) = setup(RULES);

    let summary = run(&text_only(&rules_path, &output_dir)).expect("run pipeline");

    assert_eq!(summary.entry_count, 3);
    assert_eq!(summary.industry_count, 2);
    let formats: Vec<OutputFormat> = summary.outputs.iter().map(|o| o.format).collect();
    assert_eq!(formats, vec![OutputFormat::Csv, OutputFormat::Json]);
    assert!(summary.outputs.iter().all(|o| o.rows == 3));

    let lines = csv_lines(&output_dir);
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[1],
        "Automotive,Manufacturing,Type A,8703.23,Passenger vehicles,Sí,Art. 5,,,auto"
    );
    assert_eq!(
        lines[3],
        "Textil y Confección,,Aviso automático,6109.10.01,Camisetas de punto,No,,,\
         \"Incluye prendas, telas y accesorios\",textil"
    );
    assert!(!output_dir.join("master_sheet.xlsx").exists());
}

#[test]
fn json_output_round_trips_loaded_entries() {
    let (_dir, rules_path, output_dir) = setup(RULES);
    run(&text_only(&rules_path, &output_dir)).expect("run pipeline");

    let loaded = aviso_ingest::load_rules(&rules_path).expect("load rules");
    let json = fs::read_to_string(output_dir.join("master_sheet.json")).expect("read json");
    let parsed: Vec<HtsEntry> = serde_json::from_str(&json).expect("parse json");

    assert_eq!(parsed, loaded);
    assert!(!parsed[2].requires_notice);
    assert!(json.contains("Textil y Confección"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let (_dir, rules_path, output_dir) = setup(RULES);
    let request = text_only(&rules_path, &output_dir);

    run(&request).expect("first run");
    let csv = fs::read(output_dir.join("master_sheet.csv")).expect("read csv");
    let json = fs::read(output_dir.join("master_sheet.json")).expect("read json");

    run(&request).expect("second run");
    assert_eq!(fs::read(output_dir.join("master_sheet.csv")).expect("reread csv"), csv);
    assert_eq!(fs::read(output_dir.join("master_sheet.json")).expect("reread json"), json);
}

#[test]
fn missing_identity_writes_nothing() {
    let (_dir, rules_path, output_dir) = setup("industries:\n  - key: auto\n    hts_entries:\n      - code: '1'\n");

    let err = run(&RunRequest::new(&rules_path, &output_dir)).expect_err("missing name");

    assert!(err.is_configuration());
    assert_eq!(err.exit_code(), EXIT_CONFIGURATION);
    assert!(!output_dir.exists());
}

#[test]
fn empty_industries_is_configuration_error() {
    let (_dir, rules_path, output_dir) = setup("industries: []\n");

    let err = run(&text_only(&rules_path, &output_dir)).expect_err("no industries");

    assert!(matches!(err, PipelineError::Load(_)));
    assert!(err.is_configuration());
}

#[test]
fn suppressing_every_format_still_validates() {
    let (_dir, rules_path, output_dir) = setup(RULES);
    let request = RunRequest {
        skip_csv: true,
        skip_xlsx: true,
        skip_json: true,
        ..RunRequest::new(&rules_path, &output_dir)
    };

    let summary = run(&request).expect("run pipeline");
    assert!(summary.outputs.is_empty());
    assert_eq!(summary.entry_count, 3);
}

#[test]
fn spreadsheet_request_honours_capability() {
    let (_dir, rules_path, output_dir) = setup(RULES);

    let result = run(&RunRequest::new(&rules_path, &output_dir));
    if xlsx_available() {
        let summary = result.expect("run pipeline");
        assert_eq!(summary.outputs.len(), 3);
        assert!(output_dir.join("master_sheet.xlsx").exists());
    } else {
        let err = result.expect_err("xlsx unavailable");
        assert_eq!(err.exit_code(), EXIT_CONFIGURATION);
        assert!(!output_dir.join("master_sheet.csv").exists());
    }
}

#[test]
fn unwritable_output_dir_is_io_error() {
    let (dir, rules_path, _) = setup(RULES);
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").expect("seed blocker");

    let err = run(&text_only(&rules_path, &blocker)).expect_err("output dir is a file");

    assert!(matches!(err, PipelineError::Output(_)));
    assert!(!err.is_configuration());
}

fn rules_document(industries: &[Vec<bool>]) -> String {
    let mut yaml = String::from("industries:\n");
    for (idx, entries) in industries.iter().enumerate() {
        yaml.push_str(&format!("  - key: ind{idx}\n    name: Industria {idx}\n"));
        if entries.is_empty() {
            continue;
        }
        yaml.push_str("    hts_entries:\n");
        for (entry_idx, requires_notice) in entries.iter().enumerate() {
            yaml.push_str(&format!(
                "      - code: \"{idx:04}.{entry_idx:02}\"\n        requires_notice: {requires_notice}\n"
            ));
        }
    }
    yaml
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn row_count_matches_nested_entries(
        industries in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..5), 1..5)
    ) {
        let (_dir, rules_path, output_dir) = setup(&rules_document(&industries));
        let expected: usize = industries.iter().map(Vec::len).sum();

        let summary = run(&text_only(&rules_path, &output_dir)).expect("run pipeline");

        prop_assert_eq!(summary.entry_count, expected);
        prop_assert_eq!(csv_lines(&output_dir).len(), expected + 1);
        let json = fs::read_to_string(output_dir.join("master_sheet.json")).expect("read json");
        let parsed: Vec<HtsEntry> = serde_json::from_str(&json).expect("parse json");
        prop_assert_eq!(parsed.len(), expected);

        let codes: Vec<String> = parsed.iter().map(|entry| entry.hts_code.clone()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        prop_assert_eq!(codes, sorted);
    }
}
