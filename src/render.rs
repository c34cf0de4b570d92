//! Text presentation of reports and history.
//!
//! Evidence is shortened here and only here: values to 80 characters,
//! detail lists to 5 entries.

use crate::export::format_local;
use crate::history::HistoryEntry;
use crate::report::{Report, Status};
use chrono::Local;
use std::io::{self, Write};
use url::Url;

pub const VALUE_LIMIT: usize = 80;
pub const DETAILS_LIMIT: usize = 5;

/// Colour band of the overall score.
pub fn score_band(score: u8) -> Status {
    if score < 70 {
        Status::Fail
    } else if score < 90 {
        Status::Warning
    } else {
        Status::Pass
    }
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Pass => "✅",
        Status::Warning => "⚠️",
        Status::Fail => "❌",
    }
}

pub fn status_badge(status: Status) -> &'static str {
    match status {
        Status::Pass => "✓",
        Status::Warning => "⚠",
        Status::Fail => "✗",
    }
}

/// First `max` characters of `value`, with `...` when anything was cut.
pub fn truncate_value(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_string(),
    }
}

pub fn render_report<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    writeln!(out, "URL: {}", report.url)?;
    writeln!(
        out,
        "Puntuación: {}% [{}]",
        report.score,
        score_band(report.score)
    )?;
    writeln!(
        out,
        "{} {}  {} {}  {} {}",
        status_badge(Status::Pass),
        report.pass_count,
        status_badge(Status::Warning),
        report.warning_count,
        status_badge(Status::Fail),
        report.fail_count
    )?;

    for (category, checks) in &report.checks {
        writeln!(out)?;
        writeln!(
            out,
            "{} {} {}",
            category.icon(),
            category.display_name(),
            status_badge(checks.worst_status())
        )?;
        for (_, check) in checks.iter() {
            writeln!(out, "  {} {}", status_icon(check.status), check.message)?;
            if let Some(value) = check.value.as_deref().filter(|v| !v.is_empty()) {
                writeln!(out, "     \"{}\"", truncate_value(value, VALUE_LIMIT))?;
            }
            if let Some(details) = &check.details {
                for d in details.iter().take(DETAILS_LIMIT) {
                    writeln!(out, "     - {}", d)?;
                }
            }
        }
    }
    Ok(())
}

/// Short label for a history row: the last path segment, or `página`.
pub fn history_label(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.path().rsplit('/').next().map(|s| s.to_string()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "página".to_string())
}

pub fn render_history<W: Write>(entries: &[HistoryEntry], out: &mut W) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "📂 No hay validaciones guardadas");
    }

    for entry in entries {
        let r = &entry.report;
        let when = r.timestamp.with_timezone(&Local).format("%d/%m/%Y %H:%M");
        writeln!(
            out,
            "{}  {}  {}  {} {}  {} {}  {} {}",
            entry.id,
            history_label(&r.url),
            when,
            status_badge(Status::Pass),
            r.pass_count,
            status_badge(Status::Warning),
            r.warning_count,
            status_badge(Status::Fail),
            r.fail_count
        )?;
    }
    Ok(())
}

/// One-line summary printed after a run.
pub fn summary_line(report: &Report) -> String {
    format!(
        "{} {}% ({})",
        status_icon(score_band(report.score)),
        report.score,
        format_local(report.timestamp)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Category, CategoryChecks, CheckResult};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn report() -> Report {
        let mut content = CategoryChecks::new();
        content.insert("productTitle", CheckResult::pass("Título completo").with_value("x".repeat(100)));
        content.insert(
            "noPlaceholders",
            CheckResult::fail("7 placeholder(s) encontrado(s)")
                .with_details((1..=7).map(|i| format!("[{}]", i)).collect()),
        );
        let mut seo = CategoryChecks::new();
        seo.insert("canonical", CheckResult::warning("Canonical tag no encontrado"));
        let mut checks = BTreeMap::new();
        checks.insert(Category::Seo, seo);
        checks.insert(Category::Content, content);
        Report::new(
            "https://www.samsung.com/pe/smartphones/galaxy-s24/buy",
            Utc.with_ymd_and_hms(2026, 10, 19, 15, 30, 0).unwrap(),
            checks,
        )
    }

    #[test]
    fn score_bands() {
        assert_eq!(score_band(69), Status::Fail);
        assert_eq!(score_band(70), Status::Warning);
        assert_eq!(score_band(89), Status::Warning);
        assert_eq!(score_band(90), Status::Pass);
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_value("abc", 3), "abc");
        assert_eq!(truncate_value("abcd", 3), "abc...");
        assert_eq!(truncate_value("ñandú", 2), "ña...");
    }

    #[test]
    fn render_truncates_only_for_display() {
        let r = report();
        let mut out = Vec::new();
        render_report(&r, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(&format!("\"{}...\"", "x".repeat(80))));
        assert!(text.contains("- [5]"));
        assert!(!text.contains("- [6]"));
        assert!(text.contains("📄 Contenido ✗"));
        assert!(text.contains("🔍 SEO ⚠"));

        // stored evidence is untouched
        let details = r.check(Category::Content, "noPlaceholders").unwrap().details.as_ref().unwrap();
        assert_eq!(details.len(), 7);
    }

    #[test]
    fn history_rows() {
        assert_eq!(history_label("https://www.samsung.com/pe/smartphones/galaxy-s24/buy"), "buy");
        assert_eq!(history_label("https://www.samsung.com/pe/smartphones/"), "página");

        let mut out = Vec::new();
        render_history(&[], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No hay validaciones guardadas"));

        let entry = HistoryEntry { id: 99, report: report() };
        let mut out = Vec::new();
        render_history(&[entry], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("99  buy  "));
        assert!(text.contains("✓ 1  ⚠ 1  ✗ 1"));
    }
}
