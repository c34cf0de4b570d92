use crate::page::Page;
use crate::report::{CategoryChecks, CheckResult};
use crate::Result;

pub(super) fn run(page: &dyn Page) -> Result<CategoryChecks> {
    let mut checks = CategoryChecks::new();
    checks.insert(
        "viewport",
        match page.query(r#"meta[name="viewport"]"#)? {
            Some(_) => CheckResult::pass("Meta viewport presente"),
            None => CheckResult::fail("Meta viewport no encontrado"),
        },
    );
    Ok(checks)
}
