use crate::page::Page;
use crate::report::{CategoryChecks, CheckResult};
use crate::{Result, ValidatorConfig};
use std::ops::RangeInclusive;

pub(super) fn run(page: &dyn Page, config: &ValidatorConfig) -> Result<CategoryChecks> {
    let mut checks = CategoryChecks::new();
    checks.insert("title", title(page, &config.title_length)?);
    checks.insert("description", description(page, &config.description_length)?);
    checks.insert("h1", h1_count(page)?);
    checks.insert("canonical", canonical(page)?);
    Ok(checks)
}

fn title(page: &dyn Page, passing: &RangeInclusive<usize>) -> Result<CheckResult> {
    let Some(title) = page.query("title")? else {
        return Ok(CheckResult::fail("Meta title no encontrado"));
    };

    let len = title.text.chars().count();
    let msg = format!("Meta title: {} caracteres", len);
    let result = if passing.contains(&len) {
        CheckResult::pass(msg)
    } else {
        CheckResult::warning(msg)
    };
    Ok(result.with_value(title.text))
}

fn description(page: &dyn Page, passing: &RangeInclusive<usize>) -> Result<CheckResult> {
    let Some(meta) = page.query(r#"meta[name="description"]"#)? else {
        return Ok(CheckResult::fail("Meta description no encontrada"));
    };

    let len = meta.attr("content").unwrap_or("").chars().count();
    let msg = format!("Meta description: {} caracteres", len);
    Ok(if passing.contains(&len) {
        CheckResult::pass(msg)
    } else {
        CheckResult::warning(msg)
    })
}

fn h1_count(page: &dyn Page) -> Result<CheckResult> {
    let count = page.query_all("h1")?.len();
    let msg = format!(
        "{} H1 encontrado(s){}",
        count,
        if count == 1 { "" } else { " (debe haber exactamente 1)" }
    );
    Ok(match count {
        0 => CheckResult::fail(msg),
        1 => CheckResult::pass(msg),
        _ => CheckResult::warning(msg),
    })
}

fn canonical(page: &dyn Page) -> Result<CheckResult> {
    let Some(link) = page.query(r#"link[rel="canonical"]"#)? else {
        return Ok(CheckResult::warning("Canonical tag no encontrado"));
    };

    let href = link
        .attr("href")
        .map(|h| page.resolve(h).map(|u| u.to_string()).unwrap_or_else(|| h.to_string()))
        .unwrap_or_default();
    Ok(CheckResult::pass("Canonical tag presente").with_value(href))
}
