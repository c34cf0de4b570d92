use super::{file_name, MAX_EVIDENCE};
use crate::page::{ElementView, Page};
use crate::report::{CategoryChecks, CheckResult};
use crate::{Result, ValidatorConfig};

const HERO: &str = r#"[class*="hero"] img, .product-image img, [class*="main-image"] img"#;

pub(super) fn run(page: &dyn Page, config: &ValidatorConfig) -> Result<CategoryChecks> {
    let images = page.query_all("img")?;

    let mut checks = CategoryChecks::new();
    checks.insert("altText", alt_text(page, &images, config.alt_text_fail_threshold));
    checks.insert("hero", hero(page)?);
    checks.insert("broken", broken(page, &images));
    Ok(checks)
}

fn evidence<'a>(page: &dyn Page, offending: impl Iterator<Item = &'a ElementView>) -> Vec<String> {
    offending
        .take(MAX_EVIDENCE)
        .map(|img| file_name(page, img.attr("src")))
        .collect()
}

fn alt_text(page: &dyn Page, images: &[ElementView], fail_threshold: usize) -> CheckResult {
    let missing: Vec<&ElementView> = images
        .iter()
        .filter(|img| img.attr("alt").map_or(true, |alt| alt.trim().is_empty()))
        .collect();

    let msg = format!("{} de {} imágenes sin alt text", missing.len(), images.len());
    let result = match missing.len() {
        0 => return CheckResult::pass(msg),
        n if n < fail_threshold => CheckResult::warning(msg),
        _ => CheckResult::fail(msg),
    };
    result.with_details(evidence(page, missing.into_iter()))
}

fn hero(page: &dyn Page) -> Result<CheckResult> {
    let Some(img) = page.query(HERO)? else {
        return Ok(CheckResult::warning("Imagen hero no identificada claramente"));
    };

    let state = img.image.unwrap_or_default();
    let dim = |d: Option<u32>| d.map_or_else(|| "?".to_string(), |v| v.to_string());
    let src = img
        .attr("src")
        .map(|s| page.resolve(s).map(|u| u.to_string()).unwrap_or_else(|| s.to_string()))
        .unwrap_or_default();

    Ok(CheckResult::pass(format!(
        "Imagen hero: {}x{}",
        dim(state.natural_width),
        dim(state.natural_height)
    ))
    .with_value(src))
}

fn broken(page: &dyn Page, images: &[ElementView]) -> CheckResult {
    let broken: Vec<&ElementView> = images
        .iter()
        .filter(|img| img.image.map_or(false, |s| s.is_broken()))
        .collect();

    if broken.is_empty() {
        return CheckResult::pass("Todas las imágenes cargan");
    }
    CheckResult::fail(format!("{} imagen(es) rota(s)", broken.len()))
        .with_details(evidence(page, broken.into_iter()))
}
