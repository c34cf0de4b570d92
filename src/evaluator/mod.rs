//! The page-evaluation engine.
//!
//! A fixed battery of independent checks, grouped by [`Category`], each
//! reading the page through the [`Page`] capability and producing a
//! [`CheckResult`]. The checks only read; a failing DOM read aborts the
//! whole run and no partial report is produced.

mod accessibility;
mod content;
mod images;
pub mod language;
mod links;
mod responsive;
mod seo;

use crate::page::Page;
use crate::report::{Category, CategoryChecks, Report};
use crate::{Result, ValidatorConfig};
use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use std::collections::BTreeMap;

pub use language::{Language, LanguageCounts};

/// Placeholder copy left in production pages. `.` stops at line
/// terminators the way it does in a browser regex.
const PLACEHOLDER_PATTERN: &str = r"(?i)lorem ipsum|placeholder|todo|tbd|\[[^\r\n\x{2028}\x{2029}]*?\]|xxx";

/// Evidence lists are cut to this many entries.
pub(crate) const MAX_EVIDENCE: usize = 5;

/// Runs every check against a page and scores the outcome.
#[derive(Debug)]
pub struct Evaluator {
    config: ValidatorConfig,
    placeholders: Regex,
    languages: language::LanguageDetector,
}

impl Evaluator {
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            placeholders: Regex::new(PLACEHOLDER_PATTERN)?,
            languages: language::LanguageDetector::new()?,
        })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Evaluate the page as it is right now.
    pub fn evaluate(&self, page: &dyn Page) -> Result<Report> {
        self.evaluate_at(page, Utc::now())
    }

    /// Evaluate the page, stamping the report with `timestamp`.
    pub fn evaluate_at(&self, page: &dyn Page, timestamp: DateTime<Utc>) -> Result<Report> {
        let body_text = page.body_text()?;

        let mut checks: BTreeMap<Category, CategoryChecks> = BTreeMap::new();
        checks.insert(Category::Seo, seo::run(page, &self.config)?);
        checks.insert(
            Category::Content,
            content::run(page, &body_text, &self.placeholders)?,
        );
        checks.insert(Category::Images, images::run(page, &self.config)?);
        checks.insert(Category::Links, links::run(page)?);
        checks.insert(
            Category::Language,
            language::run(page, &body_text, &self.languages)?,
        );
        checks.insert(Category::Responsive, responsive::run(page)?);
        checks.insert(Category::Accessibility, accessibility::run(page)?);

        for (category, results) in &checks {
            for (key, result) in results.iter() {
                debug!("{}.{}: {} ({})", category.key(), key, result.status, result.message);
            }
        }

        let report = Report::new(page.url(), timestamp, checks);
        info!(
            "Validated {}: score {}% ({} pass, {} warning, {} fail)",
            report.url, report.score, report.pass_count, report.warning_count, report.fail_count
        );
        Ok(report)
    }
}

/// Last path segment of an image source as the browser resolves it.
pub(crate) fn file_name(page: &dyn Page, src: Option<&str>) -> String {
    let resolved = match src {
        Some(s) => page
            .resolve(s)
            .map(|u| u.to_string())
            .unwrap_or_else(|| s.to_string()),
        None => String::new(),
    };
    resolved.rsplit('/').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementView, HtmlPage};
    use crate::{Error, Status};

    const URL: &str = "https://www.samsung.com/pe/smartphones/galaxy-s24-ultra/buy/";

    fn evaluate(html: &str) -> Report {
        let page = HtmlPage::parse(URL, html).unwrap();
        Evaluator::new(ValidatorConfig::default())
            .unwrap()
            .evaluate(&page)
            .unwrap()
    }

    #[test]
    fn every_category_is_present_in_order() {
        let report = evaluate("<html><body></body></html>");
        let order: Vec<_> = report.checks.keys().copied().collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert_eq!(report.total_checks(), 18);
        assert_eq!(
            (report.pass_count + report.warning_count + report.fail_count) as usize,
            report.total_checks()
        );
    }

    #[test]
    fn empty_document_scores_low() {
        let report = evaluate("<html><body></body></html>");
        assert_eq!(report.check(Category::Seo, "title").unwrap().status, Status::Fail);
        assert_eq!(report.check(Category::Content, "cta").unwrap().status, Status::Fail);
        assert_eq!(report.check(Category::Responsive, "viewport").unwrap().status, Status::Fail);
        assert!(report.score < 70);
    }

    #[test]
    fn placeholder_pattern_matches_browser_semantics() {
        let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();
        let found: Vec<_> = re
            .find_iter("Precio [PRECIO] TBD\n[a\nb] Lorem Ipsum xxx")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["[PRECIO]", "TBD", "Lorem Ipsum", "xxx"]);
    }

    struct DetachedPage;

    impl Page for DetachedPage {
        fn url(&self) -> &str {
            URL
        }
        fn query_all(&self, _selector: &str) -> Result<Vec<ElementView>> {
            Err(Error::EvaluationFailure("document is detached".into()))
        }
        fn html_lang(&self) -> Result<Option<String>> {
            Ok(None)
        }
        fn body_text(&self) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn dom_errors_abort_the_run() {
        let evaluator = Evaluator::new(ValidatorConfig::default()).unwrap();
        let err = evaluator.evaluate(&DetachedPage).unwrap_err();
        assert!(matches!(err, Error::EvaluationFailure(_)));
    }

    #[test]
    fn file_name_uses_resolved_source() {
        let page = HtmlPage::parse(URL, "<html></html>").unwrap();
        assert_eq!(file_name(&page, Some("/pe/img/front.png?w=200")), "front.png?w=200");
        assert_eq!(file_name(&page, None), "");
    }
}
