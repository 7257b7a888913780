use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn fabcat_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("fabcat");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(
        data_dir.join("patterns.json"),
        r#"[
  {
    "id": "p1",
    "name": "Medallion Architecture",
    "domain": "Storage",
    "summary": "Layered lakehouse organization.",
    "description": "Bronze, silver, and gold layers.",
    "complexity": "Medium",
    "maturity": "GA",
    "prerequisites": [],
    "compatibleWith": ["p2"],
    "incompatibleWith": [],
    "fabricComponents": ["Lakehouse", "Pipelines"],
    "pros": ["Clear layering"],
    "cons": ["More copies"],
    "peopleAnalyticsUseCases": ["Headcount reporting"],
    "governanceConsiderations": "Restrict bronze access.",
    "estimatedImplementationEffort": "4-8 weeks",
    "referenceLinks": [{"label": "Docs", "url": "https://example.com"}]
  },
  {
    "id": "p2",
    "name": "Direct Lake",
    "domain": "Serving",
    "summary": "Reports without import refresh.",
    "complexity": "Low",
    "maturity": "GA",
    "prerequisites": ["p1"],
    "compatibleWith": [],
    "incompatibleWith": [],
    "fabricComponents": ["Power BI", "Lakehouse"]
  },
  {
    "id": "p3",
    "name": "Spiky <Name> & Co",
    "domain": "Streaming",
    "summary": "Has markup in its name.",
    "complexity": "Weird",
    "prerequisites": ["ghost-pattern"],
    "fabricComponents": ["Eventstream"]
  }
]"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[catalog]
path = "{}/data/patterns.json"

[server]
bind = "127.0.0.1:7979"
"#,
        root.display()
    );

    let config_path = config_dir.join("catalog.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_fabcat(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = fabcat_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run fabcat binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_list_all_patterns() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_fabcat(&config_path, &["list"]);
    assert!(success, "list failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("3 pattern(s)"));
    assert!(stdout.contains("Medallion Architecture"));
    assert!(stdout.contains("Direct Lake"));
    // Unknown complexity "Weird" appears in the list but in no bucket.
    assert!(stdout.contains("low: 1  medium: 1  high: 0"));
}

#[test]
fn test_list_search_filter() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["list", "--search", "REFRESH"]);
    assert!(success);
    assert!(stdout.contains("1 pattern(s)"));
    assert!(stdout.contains("Direct Lake"));
    assert!(!stdout.contains("Medallion"));
}

#[test]
fn test_list_domain_and_complexity_filters() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(
        &config_path,
        &["list", "--domain", "Storage", "--complexity", "medium"],
    );
    assert!(success);
    assert!(stdout.contains("1 pattern(s)"));
    assert!(stdout.contains("Medallion Architecture"));
}

#[test]
fn test_list_no_matches() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["list", "--search", "zzz-no-match"]);
    assert!(success);
    assert!(stdout.contains("No patterns match the filters."));
}

#[test]
fn test_show_pattern_detail() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["show", "p1"]);
    assert!(success);
    assert!(stdout.contains("--- Medallion Architecture ---"));
    assert!(stdout.contains("Bronze, silver, and gold layers."));
    assert!(stdout.contains("+ Clear layering"));
    assert!(stdout.contains("- More copies"));
    assert!(stdout.contains("Restrict bronze access."));
    assert!(stdout.contains("Docs: https://example.com"));
}

#[test]
fn test_show_unknown_id_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_fabcat(&config_path, &["show", "nope"]);
    assert!(!success);
    assert!(stderr.contains("pattern not found: nope"));
}

#[test]
fn test_domains_sorted() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["domains"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Serving", "Storage", "Streaming"]);
}

#[test]
fn test_stats_breakdown() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Patterns:    3"));
    assert!(stdout.contains("low: 1  medium: 1  high: 0"));
    assert!(stdout.contains("Storage"));
}

#[test]
fn test_analyze_compatible_stack() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["analyze", "p1", "p2"]);
    assert!(success);
    assert!(stdout.contains("Compatible Pairings (1)"));
    assert!(stdout.contains("Medallion Architecture ↔ Direct Lake"));
    assert!(!stdout.contains("Missing Prerequisites"));
    assert!(stdout.contains("components: Lakehouse, Pipelines, Power BI"));
}

#[test]
fn test_analyze_missing_prerequisite() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["analyze", "p2"]);
    assert!(success);
    assert!(stdout.contains("Missing Prerequisites (1)"));
    assert!(stdout.contains("Direct Lake requires Medallion Architecture"));
}

#[test]
fn test_analyze_unresolved_prerequisite_uses_raw_id() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["analyze", "p3"]);
    assert!(success);
    assert!(stdout.contains("Spiky <Name> & Co requires ghost-pattern"));
}

#[test]
fn test_analyze_skips_unknown_ids() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["analyze", "bogus", "p1", "p2"]);
    assert!(success, "unknown ids must not fail analyze: {}", stdout);
    assert!(stdout.contains("Medallion Architecture ↔ Direct Lake"));
}

#[test]
fn test_export_json_round_trip() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("out").join("stack.json");

    let (_, _, success) = run_fabcat(
        &config_path,
        &[
            "export",
            "p1",
            "p2",
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(success);

    let content = fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["count"], 2);
    assert_eq!(parsed["patterns"].as_array().unwrap().len(), 2);
    let components: Vec<&str> = parsed["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(components, vec!["Lakehouse", "Pipelines", "Power BI"]);
}

#[test]
fn test_export_json_to_stdout() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_fabcat(&config_path, &["export", "p1"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["count"], 1);
}

#[test]
fn test_export_html_escapes_markup() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("stack.html");

    let (_, _, success) = run_fabcat(
        &config_path,
        &[
            "export",
            "p3",
            "--format",
            "html",
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(success);

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("Spiky &lt;Name&gt; &amp; Co"));
    assert!(!content.contains("Spiky <Name>"));
}

#[test]
fn test_missing_catalog_fails_startup() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("catalog.toml");
    fs::write(
        &config_path,
        r#"[catalog]
path = "/nonexistent/patterns.json"
"#,
    )
    .unwrap();

    let (_, stderr, success) = run_fabcat(&config_path, &["list"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read catalog file"));
}

#[test]
fn test_unparseable_catalog_fails_startup() {
    let tmp = TempDir::new().unwrap();
    let bad = tmp.path().join("patterns.json");
    fs::write(&bad, "{\"not\": \"an array\"}").unwrap();
    let config_path = tmp.path().join("catalog.toml");
    fs::write(
        &config_path,
        format!("[catalog]\npath = \"{}\"\n", bad.display()),
    )
    .unwrap();

    let (_, stderr, success) = run_fabcat(&config_path, &["domains"]);
    assert!(!success);
    assert!(stderr.contains("Failed to parse catalog file"));
}
