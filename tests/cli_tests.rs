mod common;

use common::{no_config, rtl, setup_test_db, temp_out, write_dataset};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

/// Global flags pointing every run at throwaway files.
fn base_args(name: &str) -> Vec<String> {
    vec![
        "--db".into(),
        setup_test_db(name),
        "--data".into(),
        write_dataset(name),
        "--config".into(),
        no_config(name),
        "--no-color".into(),
    ]
}

#[test]
fn test_list_groups_by_year() {
    rtl()
        .args(base_args("cli_list"))
        .arg("list")
        .assert()
        .success()
        .stdout(contains("▾ 1939 (2)"))
        .stdout(contains("▾ 1940 (1)"))
        .stdout(contains("▾ Unknown Year (1)"))
        .stdout(contains("Darkest Hour"))
        .stdout(contains("Selected: 5 of 5"));
}

#[test]
fn test_list_with_filters_and_collapse() {
    rtl()
        .args(base_args("cli_list_filters"))
        .args(["list", "--period", "wwii", "--collapse", "1939"])
        .assert()
        .success()
        .stdout(contains("▸ 1939 (1)"))
        .stdout(contains("Invasion of Poland").not())
        .stdout(contains("The King's Speech").not())
        .stdout(contains("Band of Brothers"))
        .stdout(contains("Selected: 3 of 5"));
}

#[test]
fn test_list_without_matches_shows_placeholder() {
    rtl()
        .args(base_args("cli_list_empty"))
        .args(["list", "-q", "year:1800"])
        .assert()
        .success()
        .stdout(contains("No events match the current filters"));
}

#[test]
fn test_pin_toggles_and_persists() {
    let args = base_args("cli_pin");

    rtl()
        .args(&args)
        .args(["pin", "2"])
        .assert()
        .success()
        .stdout(contains("Pinned #2 Band of Brothers"));

    rtl()
        .args(&args)
        .args(["list", "--pinned", "yes"])
        .assert()
        .success()
        .stdout(contains("Band of Brothers"))
        .stdout(contains("Darkest Hour").not());

    rtl()
        .args(&args)
        .args(["pin", "2"])
        .assert()
        .success()
        .stdout(contains("Unpinned #2 Band of Brothers"));

    rtl()
        .args(&args)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("pin (2)"))
        .stdout(contains("unpin (2)"));
}

#[test]
fn test_pin_unknown_record_fails() {
    rtl()
        .args(base_args("cli_pin_unknown"))
        .args(["pin", "99"])
        .assert()
        .failure()
        .stderr(contains("Unknown record id: 99"));
}

#[test]
fn test_stats_command() {
    rtl()
        .args(base_args("cli_stats"))
        .args(["stats", "--classification", "drama"])
        .assert()
        .success()
        .stdout(contains("Selected: 2 of 5"))
        .stdout(contains("Watched: 1 of 2 (50%)"))
        .stdout(contains("Netflix 2"));
}

#[test]
fn test_export_json_and_csv() {
    let args = base_args("cli_export");
    let json_out = temp_out("cli_export", "json");
    let csv_out = temp_out("cli_export", "csv");

    rtl()
        .args(&args)
        .args(["export", "--to", "json", "--file", json_out.as_str(), "--period", "WWII"])
        .assert()
        .success()
        .stdout(contains("JSON export completed: 3 record(s)"));

    let body = fs::read_to_string(&json_out).expect("json written");
    let rows: serde_json::Value = serde_json::from_str(&body).expect("valid json");
    let titles: Vec<&str> = rows
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Darkest Hour", "Band of Brothers", "Invasion of Poland"]);

    rtl()
        .args(&args)
        .args(["export", "--file", csv_out.as_str()])
        .assert()
        .success();

    let csv = fs::read_to_string(&csv_out).expect("csv written");
    assert!(csv.starts_with("id,year,title,date,end_year,watched,pinned,level"));
    assert_eq!(csv.lines().count(), 6);

    // existing file, no --force, stdin not a terminal
    rtl()
        .args(&args)
        .args(["export", "--file", csv_out.as_str()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("use --force"));
}

#[test]
fn test_export_requires_absolute_path() {
    rtl()
        .args(base_args("cli_export_relative"))
        .args(["export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_missing_data_url_is_fatal() {
    let name = "cli_no_data";
    rtl()
        .args([
            "--db",
            setup_test_db(name).as_str(),
            "--config",
            no_config(name).as_str(),
            "list",
        ])
        .assert()
        .failure()
        .stderr(contains("dataUrl"));
}

#[test]
fn test_init_writes_config() {
    let name = "cli_init";
    let conf = no_config(name);
    let db = setup_test_db(name);

    rtl()
        .args(["--db", db.as_str(), "--config", conf.as_str(), "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    let written = fs::read_to_string(&conf).expect("config written");
    assert!(written.contains("dataUrl"));
    assert!(written.contains(&db));

    rtl()
        .args(["--config", conf.as_str(), "config", "--print"])
        .assert()
        .success()
        .stdout(contains("showMinorEvents: true"));
}

#[test]
fn test_export_with_media_format_filter() {
    let out = temp_out("cli_export_media", "json");
    rtl()
        .args(base_args("cli_export_media"))
        .args([
            "export",
            "--to",
            "json",
            "--media-format",
            "series",
            "--file",
            out.as_str(),
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed: 1 record(s)"));

    let body = fs::read_to_string(&out).expect("json written");
    assert!(body.contains("Band of Brothers"));
    assert!(!body.contains("Darkest Hour"));
}
