use serde_json::Value;
use std::path::{Path, PathBuf};

use elections_lib::ingest::read_calendar_csv;
use elections_lib::{read_results_csv, Db, ElectionConfig, Renderer};

const CONFIG: &str = r#"
accepted_presidential_candidates: [Clinton, Trump]
selected_house_races: ["40001"]
prior_composition:
  senate: {Dem: 34, GOP: 30, Other: 2}
races:
  "39347": {current_party: GOP}
  "30131": {current_party: GOP}
  "40001": {current_party: GOP}
"#;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read artifact {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("artifact is valid JSON")
}

/// Renders the library's fixture into `out` and returns it.
fn render_fixture(dir: &Path) -> PathBuf {
    let config = ElectionConfig::from_yaml(CONFIG).expect("test config parses");
    let mut db = Db::open(dir.join("elections.db")).expect("open db");
    db.init().expect("init db");
    let results = read_results_csv(workspace_root().join("elections_lib/tests/fixtures/results.csv"))
        .expect("read fixture");
    db.replace_results(&results).expect("load results");
    db.create_calls().expect("seed calls");
    let calendar =
        read_calendar_csv(workspace_root().join("seed_data/calendar.csv")).expect("read calendar");
    db.seed_race_meta(&calendar, &config.races).expect("seed meta");

    let out = dir.join("rendered");
    let report = Renderer::new(&db, &config, &out)
        .expect("renderer")
        .render_all()
        .expect("render all");
    assert!(report.is_success(), "render failures: {:?}", report.failed);
    out
}

fn assert_valid(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    if let Err(e) = validator.validate(data) {
        panic!("{} validation failed: {e}", schema_name);
    }
}

// ---------------------------------------------------------------------------
// Positive validation: rendered artifacts conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_top_level_conforms_to_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let out = render_fixture(tmp.path());
    assert_valid("top-level.schema.json", &read_json(&out.join("top-level-results.json")));
}

#[test]
fn test_national_artifacts_conform_to_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let out = render_fixture(tmp.path());
    for name in [
        "presidential-national.json",
        "governor-national.json",
        "senate-national.json",
        "house-national.json",
        "ballot-measures-national.json",
        "presidential-pa-counties.json",
    ] {
        assert_valid("grouped-results.schema.json", &read_json(&out.join(name)));
    }
}

#[test]
fn test_big_board_and_state_sections_conform_to_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let out = render_fixture(tmp.path());

    let board = read_json(&out.join("presidential-big-board.json"));
    for bucket in board.as_object().expect("big board is an object").values() {
        assert_valid("grouped-results.schema.json", bucket);
    }

    let state = read_json(&out.join("nh.json"));
    for section in ["senate", "house", "governor", "ballot_measures"] {
        assert_valid("grouped-results.schema.json", &state[section]);
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_top_level_schema_rejects_missing_chamber() {
    let tmp = tempfile::tempdir().unwrap();
    let out = render_fixture(tmp.path());
    let mut data = read_json(&out.join("top-level-results.json"));
    data.as_object_mut()
        .expect("top level is an object")
        .remove("house_bop");

    let validator = jsonschema::draft202012::new(&load_schema("top-level.schema.json"))
        .expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject top level missing house_bop"
    );
}

#[test]
fn test_grouped_schema_rejects_result_without_winner_flag() {
    let tmp = tempfile::tempdir().unwrap();
    let out = render_fixture(tmp.path());
    let mut data = read_json(&out.join("senate-national.json"));
    data["39347"][0]
        .as_object_mut()
        .expect("result is an object")
        .remove("nprWinner");

    let validator = jsonschema::draft202012::new(&load_schema("grouped-results.schema.json"))
        .expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject a result missing nprWinner"
    );
}

#[test]
fn test_grouped_schema_rejects_string_pickup() {
    let data = serde_json::json!({
        "39347": [{"id": "1", "statepostal": "PA", "nprWinner": true, "pickup": "yes"}]
    });
    let validator = jsonschema::draft202012::new(&load_schema("grouped-results.schema.json"))
        .expect("schema compiles");
    assert!(validator.validate(&data).is_err());
}
