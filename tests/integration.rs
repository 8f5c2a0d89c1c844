use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cellar_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("cellar");
    path
}

const SMALL_DATASET: &str = r#"[
  {"id": "a", "name": "Château A", "vintage": 2015, "type": "red",
   "region": "Bordeaux", "country": "France",
   "coordinates": {"lat": 44.84, "lng": -0.58}, "favorite": true, "status": "cellar",
   "aromas": ["cassis"], "tags": ["cheese"]},
  {"id": "b", "name": "Tenuta B", "vintage": 2019, "type": "white",
   "region": "Tuscany", "country": "Italy",
   "coordinates": {"lat": 43.77, "lng": 11.25}, "favorite": false, "status": "consumed"},
  {"id": "c", "name": "Nameless C", "vintage": 2021, "type": "rosé",
   "region": "Somewhere", "coordinates": {"lat": -10.0, "lng": 20.0},
   "favorite": false, "status": "cellar"}
]"#;

fn setup_test_env() -> (TempDir, PathBuf) {
    setup_with_dataset(SMALL_DATASET)
}

fn setup_with_dataset(dataset: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("wines.json"), dataset).unwrap();

    let config_content = r#"[dataset]
path = "wines.json"

[server]
bind = "127.0.0.1:7340"

[map]
center = [20.0, 0.0]
zoom = 2
"#;

    let config_path = config_dir.join("cellar.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_cellar(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = cellar_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run cellar binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn listed_ids(stdout: &str) -> Vec<String> {
    let json: serde_json::Value = serde_json::from_str(stdout).unwrap();
    json["wines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_validate_configured_dataset() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_cellar(&config_path, &["validate"]);
    assert!(success, "validate failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("3 wines"));
}

#[test]
fn test_validate_reports_offending_record() {
    let broken = SMALL_DATASET.replace("43.77", "143.77");
    let (_tmp, config_path) = setup_with_dataset(&broken);

    let (_, stderr, success) = run_cellar(&config_path, &["validate"]);
    assert!(!success);
    assert!(
        stderr.contains("wine record #1 (id 'b')"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_list_all() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["list"]);
    assert!(success);
    assert!(stdout.contains("Château A"));
    assert!(stdout.contains("3 of 3 wines"));
}

#[test]
fn test_list_by_type() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["list", "--type", "red", "--json"]);
    assert!(success);
    assert_eq!(listed_ids(&stdout), vec!["a"]);
}

#[test]
fn test_list_favorite_false() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_cellar(&config_path, &["list", "--favorite", "false", "--json"]);
    assert!(success);
    assert_eq!(listed_ids(&stdout), vec!["b", "c"]);
}

#[test]
fn test_list_keyword_and_country() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, _) = run_cellar(&config_path, &["list", "--keyword", "bord", "--json"]);
    assert_eq!(listed_ids(&stdout), vec!["a"]);

    let (stdout, _, _) = run_cellar(&config_path, &["list", "--country", "ITALY", "--json"]);
    assert_eq!(listed_ids(&stdout), vec!["b"]);
}

#[test]
fn test_list_no_matches() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["list", "--keyword", "zinfandel"]);
    assert!(success);
    assert!(stdout.contains("No wines match."));
}

#[test]
fn test_list_rejects_unknown_type() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_cellar(&config_path, &["list", "--type", "blue"]);
    assert!(!success);
    assert!(stderr.contains("invalid wine type"));
}

#[test]
fn test_get_wine() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["get", "a"]);
    assert!(success);
    assert!(stdout.contains("Château A 2015"));
    assert!(stdout.contains("In Cellar"));
    assert!(stdout.contains("Cheese board"));
}

#[test]
fn test_get_missing_wine() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_cellar(&config_path, &["get", "z"]);
    assert!(!success);
    assert!(stderr.contains("wine not found: z"));
}

#[test]
fn test_facets() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["facets"]);
    assert!(success);
    assert!(stdout.contains("Types (6):"));
    assert!(stdout.contains("Regions (3):"));
    assert!(stdout.contains("Countries (2):"));
    let bordeaux = stdout.find("Bordeaux").unwrap();
    let tuscany = stdout.find("Tuscany").unwrap();
    assert!(bordeaux < tuscany);
}

#[test]
fn test_stats_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["stats", "--json"]);
    assert!(success);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total_wines"], 3);
    assert_eq!(stats["favorites"], 1);
    assert_eq!(stats["consumed"], 1);
    assert_eq!(stats["countries"], 2);
    assert_eq!(stats["oldest_vintage"], 2015);
    assert_eq!(stats["newest_vintage"], 2021);
    assert_eq!(stats["by_type"][2]["type"], "rosé");
    assert_eq!(stats["by_type"][2]["count"], 1);
}

#[test]
fn test_near_orders_by_distance() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_cellar(&config_path, &["near", "43.7", "11.2", "--limit", "2"]);
    assert!(success);
    let b = stdout.find(" b ").unwrap();
    let a = stdout.find(" a ").unwrap();
    assert!(b < a, "expected b before a: {}", stdout);
    assert!(!stdout.contains(" c "));
}

#[test]
fn test_distance_accepts_negative_coordinates() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_cellar(&config_path, &["distance", "0", "0", "0", "-180"]);
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("20015.1 km"), "got {}", stdout);
}

#[test]
fn test_distance_rejects_invalid_coordinates() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_cellar(&config_path, &["distance", "91", "0", "0", "0"]);
    assert!(!success);
    assert!(stderr.contains("invalid coordinates"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let (_, stderr, success) = run_cellar(&missing, &["validate"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
