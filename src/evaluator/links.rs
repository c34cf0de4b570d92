use crate::page::Page;
use crate::report::{CategoryChecks, CheckResult};
use crate::Result;

/// `href` values that go nowhere.
const EMPTY_HREFS: [&str; 3] = ["", "#", "javascript:void(0)"];

pub(super) fn run(page: &dyn Page) -> Result<CategoryChecks> {
    let links = page.query_all("a[href]")?;
    let page_host = page.hostname().unwrap_or_default();

    // Links without a host (mailto:, javascript:, unparseable) count as external.
    let internal = links
        .iter()
        .filter(|a| {
            let host = a
                .attr("href")
                .and_then(|href| page.resolve(href))
                .and_then(|u| u.host_str().map(|h| h.to_string()))
                .unwrap_or_default();
            host == page_host
        })
        .count();
    let external = links.len() - internal;

    let empty = links
        .iter()
        .filter(|a| {
            let href = a.attr("href").unwrap_or("").trim();
            EMPTY_HREFS.contains(&href)
        })
        .count();

    let mut checks = CategoryChecks::new();
    checks.insert(
        "internal",
        CheckResult::pass(format!("{} enlaces internos encontrados", internal)),
    );
    checks.insert(
        "external",
        CheckResult::pass(format!("{} enlaces externos encontrados", external)),
    );
    checks.insert(
        "empty",
        if empty == 0 {
            CheckResult::pass("Sin enlaces vacíos")
        } else {
            CheckResult::warning(format!("{} enlace(s) vacío(s)", empty))
        },
    );
    Ok(checks)
}
