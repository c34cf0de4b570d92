use chrono::{Duration, TimeZone, Utc};
use pdp_validator::export::{parse_export, write_export, ExportedReport};
use pdp_validator::history::{HistoryEntry, DEFAULT_CAPACITY};
use pdp_validator::{Evaluator, History, HtmlPage, JsonFileStore, MemoryStore, Report, ValidatorConfig};
use std::fs;

const URL: &str = "https://www.samsung.com/pe/smartphones/galaxy-s24-ultra/buy/";

fn fixture_report() -> Report {
    let html = fs::read_to_string("tests/fixtures/pdp_galaxy_s24.html").expect("read fixture");
    let page = HtmlPage::parse(URL, &html).expect("parse page");
    Evaluator::new(ValidatorConfig::default())
        .unwrap()
        .evaluate_at(&page, Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap())
        .unwrap()
}

#[test]
fn full_history_evicts_the_oldest() {
    let report = fixture_report();
    let mut history = History::new(MemoryStore::new(), DEFAULT_CAPACITY);
    for id in 1..=50 {
        history.record(report.clone(), id).unwrap();
    }
    assert_eq!(history.entries().len(), 50);

    history.record(report.clone(), 51).unwrap();
    let entries = history.entries();
    assert_eq!(entries.len(), 50);
    assert_eq!(entries[0].id, 51);
    assert_eq!(entries.last().unwrap().id, 2);
    assert!(entries.iter().all(|e| e.id != 1));
}

#[test]
fn history_file_round_trips_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let report = fixture_report();

    let mut history = History::new(JsonFileStore::new(&path), DEFAULT_CAPACITY);
    let stamp = report.timestamp.timestamp_millis();
    history.record(report.clone(), stamp).unwrap();
    history
        .record(report.clone(), stamp + Duration::seconds(5).num_milliseconds())
        .unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["validationHistory"].as_array().unwrap().len(), 2);

    let entries: Vec<HistoryEntry> = History::new(JsonFileStore::new(&path), DEFAULT_CAPACITY).entries();
    assert_eq!(entries[1].report, report);
}

#[test]
fn missing_history_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let history = History::new(JsonFileStore::new(dir.path().join("absent.json")), DEFAULT_CAPACITY);
    assert!(history.entries().is_empty());
}

#[test]
fn export_round_trip_keeps_summary_fields() {
    let dir = tempfile::tempdir().unwrap();
    let report = fixture_report();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap();

    let path = write_export(&report, dir.path(), now).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        format!("samsung-validation-{}.json", now.timestamp_millis())
    );

    let parsed: ExportedReport = parse_export(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.url, report.url);
    assert_eq!(parsed.puntuacion, report.score);
    assert_eq!(parsed.aprobados, report.pass_count);
    assert_eq!(parsed.advertencias, report.warning_count);
    assert_eq!(parsed.errores, report.fail_count);
    assert_eq!(parsed.resultados, report.checks);
}
