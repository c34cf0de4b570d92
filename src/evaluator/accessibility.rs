use crate::page::Page;
use crate::report::{CategoryChecks, CheckResult};
use crate::Result;

pub(super) fn run(page: &dyn Page) -> Result<CategoryChecks> {
    // An aria-label of only spaces still counts as a label
    let unlabeled = page
        .query_all("button")?
        .iter()
        .filter(|b| b.text.trim().is_empty() && b.attr("aria-label").map_or(true, str::is_empty))
        .count();

    let mut checks = CategoryChecks::new();
    checks.insert(
        "ariaLabels",
        if unlabeled == 0 {
            CheckResult::pass("Todos los botones tienen texto/ARIA")
        } else {
            CheckResult::warning(format!("{} botón(es) sin aria-label", unlabeled))
        },
    );
    Ok(checks)
}
