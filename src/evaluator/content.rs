use super::MAX_EVIDENCE;
use crate::page::Page;
use crate::report::{CategoryChecks, CheckResult};
use crate::Result;
use regex::Regex;

const PRODUCT_TITLE: &str = r#"h1, .product-title, [class*="product-name"]"#;
const PRICE: &str = r#"[class*="price"], .product-price"#;
const CTA: &str = r#"button[class*="buy"], button[class*="cart"], a[class*="buy"]"#;

pub(super) fn run(page: &dyn Page, body_text: &str, placeholders: &Regex) -> Result<CategoryChecks> {
    let mut checks = CategoryChecks::new();
    checks.insert("productTitle", product_title(page)?);
    checks.insert("price", price(page)?);
    checks.insert("cta", cta(page)?);
    checks.insert("noPlaceholders", no_placeholders(body_text, placeholders));
    Ok(checks)
}

fn product_title(page: &dyn Page) -> Result<CheckResult> {
    let Some(title) = page.query(PRODUCT_TITLE)? else {
        return Ok(CheckResult::fail("Título de producto no encontrado"));
    };

    let result = if title.metrics.is_clipped() {
        CheckResult::warning("Título puede estar cortado")
    } else {
        CheckResult::pass("Título completo")
    };
    Ok(result.with_value(title.text.trim()))
}

fn price(page: &dyn Page) -> Result<CheckResult> {
    Ok(match page.query(PRICE)? {
        Some(price) => CheckResult::pass("Precio visible").with_value(price.text.trim()),
        None => CheckResult::fail("Precio no encontrado claramente"),
    })
}

fn cta(page: &dyn Page) -> Result<CheckResult> {
    let count = page.query_all(CTA)?.len();
    let msg = format!("{} botón(es) CTA encontrado(s)", count);
    Ok(if count > 0 {
        CheckResult::pass(msg)
    } else {
        CheckResult::fail(msg)
    })
}

fn no_placeholders(body_text: &str, placeholders: &Regex) -> CheckResult {
    let found: Vec<&str> = placeholders.find_iter(body_text).map(|m| m.as_str()).collect();
    if found.is_empty() {
        return CheckResult::pass("Sin placeholders");
    }

    CheckResult::fail(format!("{} placeholder(s) encontrado(s)", found.len())).with_details(
        found
            .iter()
            .take(MAX_EVIDENCE)
            .map(|s| s.to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{HtmlPage, RenderHints};
    use crate::{Status, Viewport};

    const URL: &str = "https://www.samsung.com/pe/smartphones/galaxy-z-fold6/";

    fn content(body: &str) -> CategoryChecks {
        let html = format!("<html><body>{}</body></html>", body);
        let page = HtmlPage::parse(URL, &html).unwrap();
        let re = Regex::new(super::super::PLACEHOLDER_PATTERN).unwrap();
        run(&page, &page.body_text().unwrap(), &re).unwrap()
    }

    #[test]
    fn product_title_falls_back_to_class_selectors() {
        let checks = content(r#"<div class="pd-product-name">  Galaxy Z Fold6  </div>"#);
        let title = checks.get("productTitle").unwrap();
        assert_eq!(title.status, Status::Pass);
        assert_eq!(title.value.as_deref(), Some("Galaxy Z Fold6"));

        assert_eq!(content("").get("productTitle").unwrap().status, Status::Fail);
    }

    #[test]
    fn clipped_title_warns() {
        let hints = RenderHints::from_json(r#"{"boxes": {"h1": {"offsetHeight": 24, "scrollHeight": 48}}}"#).unwrap();
        let page = HtmlPage::with_hints(URL, "<html><body><h1>Galaxy Z Fold6</h1></body></html>", hints, Viewport::default()).unwrap();
        let re = Regex::new(super::super::PLACEHOLDER_PATTERN).unwrap();
        let checks = run(&page, "", &re).unwrap();
        let title = checks.get("productTitle").unwrap();
        assert_eq!(title.status, Status::Warning);
        assert_eq!(title.message, "Título puede estar cortado");
    }

    #[test]
    fn price_and_cta() {
        let checks = content(
            r#"<span class="product-card__price-current"> S/ 7,999 </span>
               <button class="cta-buy-now">Comprar</button>
               <a class="buy-link" href="/pe/buy">Comprar ahora</a>"#,
        );
        let price = checks.get("price").unwrap();
        assert_eq!(price.status, Status::Pass);
        assert_eq!(price.value.as_deref(), Some("S/ 7,999"));
        let cta = checks.get("cta").unwrap();
        assert_eq!(cta.status, Status::Pass);
        assert_eq!(cta.message, "2 botón(es) CTA encontrado(s)");

        let bare = content("<p>Galaxy</p>");
        assert_eq!(bare.get("price").unwrap().status, Status::Fail);
        assert_eq!(bare.get("cta").unwrap().message, "0 botón(es) CTA encontrado(s)");
    }

    #[test]
    fn placeholder_evidence_is_capped() {
        let checks = content("<p>TBD [1] [2] [3] [4] [5] xxx</p>");
        let ph = checks.get("noPlaceholders").unwrap();
        assert_eq!(ph.status, Status::Fail);
        assert_eq!(ph.message, "7 placeholder(s) encontrado(s)");
        assert_eq!(ph.details.as_ref().unwrap().len(), 5);
        assert_eq!(ph.details.as_ref().unwrap()[0], "TBD");

        let clean = content("<p>Pantalla Dynamic AMOLED 2X</p>");
        assert_eq!(clean.get("noPlaceholders").unwrap().status, Status::Pass);
        assert!(clean.get("noPlaceholders").unwrap().details.is_none());
    }
}
