use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn shelf_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("shelf");
    path
}

const BOOKS: &str = "\
Name,Author,User Rating,Reviews,Price,Year,Genre
Dune,Herbert,4.8,1000,9,2019,SciFi
Dune Messiah,Herbert,4.5,200,8,2019,SciFi
Cookbook,Smith,4.0,50,20,2018,Food
Garden Notes,Green,4.2,300,12,2017,Home
";

fn setup_test_env(csv: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(root.join("books.csv"), csv).unwrap();

    let config_content = format!(
        r#"[dataset]
path = "{}/books.csv"

[ranking]
top_n = 10
weight_content = 0.7
weight_popularity = 0.3
"#,
        root.display()
    );

    let config_path = config_dir.join("shelf.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_shelf(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = shelf_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run shelf binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_recommend_text() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, stderr, success) =
        run_shelf(&config_path, &["recommend", "dune", "--top-n", "2"]);
    assert!(success, "recommend failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("1. ["), "{}", stdout);
    assert!(stdout.contains("Dune Messiah / Herbert"));
    assert!(!stdout.contains("] Dune / Herbert"));
    assert!(!stdout.contains("3. ["));
}

#[test]
fn test_recommend_json() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, stderr, success) =
        run_shelf(&config_path, &["recommend", "Dune", "--format", "json"]);
    assert!(success, "recommend failed: stderr={}", stderr);

    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = results.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["title"], "Dune Messiah");
    assert_eq!(arr[0]["author"], "Herbert");
    assert_eq!(arr[0]["year"], 2019);
    assert!(arr.iter().all(|r| r["title"] != "Dune"));

    let scores: Vec<f64> = arr.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_recommend_explain_json() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, _, success) = run_shelf(
        &config_path,
        &["recommend", "Dune", "--format", "json", "--explain", "--top-n", "1"],
    );
    assert!(success);
    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let shared = &results[0]["explain"]["shared_terms"];
    assert_eq!(shared, &serde_json::json!(["dune", "herbert", "scifi"]));
}

#[test]
fn test_recommend_popularity_only() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, _, success) = run_shelf(
        &config_path,
        &[
            "recommend",
            "Cookbook",
            "--weight-content",
            "0",
            "--weight-popularity",
            "1",
            "--format",
            "json",
        ],
    );
    assert!(success);
    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let titles: Vec<&str> = results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dune", "Dune Messiah", "Garden Notes"]);
}

#[test]
fn test_recommend_chart() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, _, success) = run_shelf(
        &config_path,
        &["recommend", "Dune", "--top-n", "2", "--format", "chart"],
    );
    assert!(success);
    assert!(stdout.starts_with("Top 2 Recommendations for 'Dune'"));
    assert!(stdout.contains('█'));
}

#[test]
fn test_recommend_unknown_title_fails() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, stderr, success) = run_shelf(&config_path, &["recommend", "Dun"]);
    assert!(!success, "expected failure: stdout={}", stdout);
    assert!(stderr.contains("Book 'Dun' not found in dataset."), "{}", stderr);
}

#[test]
fn test_recommend_is_deterministic() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let args = ["recommend", "Garden Notes", "--format", "json"];
    let (first, _, _) = run_shelf(&config_path, &args);
    let (second, _, _) = run_shelf(&config_path, &args);
    assert_eq!(first, second);
}

#[test]
fn test_unknown_format_fails() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (_, stderr, success) = run_shelf(&config_path, &["recommend", "Dune", "--format", "xml"]);
    assert!(!success);
    assert!(stderr.contains("Unknown output format"));
}

#[test]
fn test_empty_dataset_fails() {
    let (_tmp, config_path) = setup_test_env("Name,Author,User Rating,Reviews,Price,Year,Genre\n");

    let (_, stderr, success) = run_shelf(&config_path, &["stats"]);
    assert!(!success);
    assert!(stderr.contains("dataset is empty"), "{}", stderr);
}

#[test]
fn test_missing_column_fails() {
    let (_tmp, config_path) = setup_test_env("Name,Author,Genre\nDune,Herbert,SciFi\n");

    let (_, stderr, success) = run_shelf(&config_path, &["stats"]);
    assert!(!success);
    assert!(stderr.contains("User Rating"), "{}", stderr);
}

#[test]
fn test_non_finite_rating_fails() {
    let csv = BOOKS.replace("Cookbook,Smith,4.0", "Cookbook,Smith,NaN");
    let (_tmp, config_path) = setup_test_env(&csv);

    let (_, stderr, success) = run_shelf(&config_path, &["recommend", "Dune"]);
    assert!(!success);
    assert!(stderr.contains("non-finite value 'NaN'"), "{}", stderr);
}

#[test]
fn test_duplicate_titles_keep_first() {
    let csv = format!("{}dune,Someone Else,3.0,5,1,2000,SciFi\n", BOOKS);
    let (_tmp, config_path) = setup_test_env(&csv);

    let (stdout, stderr, success) = run_shelf(&config_path, &["stats"]);
    assert!(success, "stats failed: {}", stderr);
    assert!(stdout.contains("Items:       4"), "{}", stdout);
}

#[test]
fn test_stats() {
    let (_tmp, config_path) = setup_test_env(BOOKS);

    let (stdout, stderr, success) = run_shelf(&config_path, &["stats"]);
    assert!(success, "stats failed: {}", stderr);
    assert!(stdout.contains("Items:       4"));
    assert!(stdout.contains("Rating:      4 – 4.8"));
    assert!(stdout.contains("Reviews:     50 – 1000"));
}

#[test]
fn test_dataset_override() {
    let (tmp, config_path) = setup_test_env(BOOKS);
    let other = tmp.path().join("other.csv");
    fs::write(
        &other,
        "Name,Author,User Rating,Reviews,Genre\nAlpha,A,4.0,1,X\nBeta,B,4.5,2,X\n",
    )
    .unwrap();

    let (stdout, stderr, success) = run_shelf(
        &config_path,
        &["--dataset", other.to_str().unwrap(), "recommend", "alpha"],
    );
    assert!(success, "{}", stderr);
    assert!(stdout.contains("Beta / B"));
}
