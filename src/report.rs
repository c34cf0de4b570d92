//! Report data model: check verdicts, categories and the scored report.

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Verdict of a single check.
///
/// Variants are ordered by severity so the worst of a set is its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warning,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Warning => "warning",
            Status::Fail => "fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one atomic check.
///
/// `value` and `details` hold raw evidence; they are only shortened when
/// rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl CheckResult {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            value: None,
            details: None,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(Status::Pass, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Status::Warning, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(Status::Fail, message)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// The fixed set of check groups.
///
/// Declaration order is the order categories appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Seo,
    Content,
    Images,
    Links,
    Language,
    Responsive,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Seo,
        Category::Content,
        Category::Images,
        Category::Links,
        Category::Language,
        Category::Responsive,
        Category::Accessibility,
    ];

    /// Key used in serialized reports.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Seo => "seo",
            Category::Content => "content",
            Category::Images => "images",
            Category::Links => "links",
            Category::Language => "language",
            Category::Responsive => "responsive",
            Category::Accessibility => "accessibility",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Seo => "🔍",
            Category::Content => "📄",
            Category::Images => "🖼️",
            Category::Links => "🔗",
            Category::Language => "🌐",
            Category::Responsive => "📱",
            Category::Accessibility => "♿",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Seo => "SEO",
            Category::Content => "Contenido",
            Category::Images => "Imágenes",
            Category::Links => "Enlaces",
            Category::Language => "Idioma",
            Category::Responsive => "Responsive",
            Category::Accessibility => "Accesibilidad",
        }
    }
}

/// Insertion-ordered mapping from check key to result.
///
/// Serialized as a JSON object whose key order is the order checks ran in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChecks {
    entries: Vec<(String, CheckResult)>,
}

impl CategoryChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result; an existing key keeps its position and is replaced.
    pub fn insert(&mut self, key: impl Into<String>, result: CheckResult) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = result,
            None => self.entries.push((key, result)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CheckResult> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CheckResult)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fail beats warning beats pass. An empty category is a pass.
    pub fn worst_status(&self) -> Status {
        self.entries
            .iter()
            .map(|(_, r)| r.status)
            .max()
            .unwrap_or(Status::Pass)
    }
}

impl Serialize for CategoryChecks {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, result) in &self.entries {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryChecks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ChecksVisitor;

        impl<'de> Visitor<'de> for ChecksVisitor {
            type Value = CategoryChecks;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of check names to results")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut checks = CategoryChecks::new();
                while let Some((key, result)) = access.next_entry::<String, CheckResult>()? {
                    checks.insert(key, result);
                }
                Ok(checks)
            }
        }

        deserializer.deserialize_map(ChecksVisitor)
    }
}

/// Tally of verdicts across a whole report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub pass: u32,
    pub warning: u32,
    pub fail: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.pass + self.warning + self.fail
    }

    /// Percentage of passing checks, rounded half up; 0 when nothing ran.
    pub fn score(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.pass) * 100.0 / f64::from(total)).round() as u8
    }
}

/// Full result of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub checks: BTreeMap<Category, CategoryChecks>,
    pub score: u8,
    pub pass_count: u32,
    pub warning_count: u32,
    pub fail_count: u32,
}

impl Report {
    /// Build a report, deriving counts and score from the checks.
    pub fn new(url: impl Into<String>, timestamp: DateTime<Utc>, checks: BTreeMap<Category, CategoryChecks>) -> Self {
        let mut tally = Tally::default();
        for result in checks.values().flat_map(|c| c.iter().map(|(_, r)| r)) {
            match result.status {
                Status::Pass => tally.pass += 1,
                Status::Warning => tally.warning += 1,
                Status::Fail => tally.fail += 1,
            }
        }

        Self {
            url: url.into(),
            timestamp,
            checks,
            score: tally.score(),
            pass_count: tally.pass,
            warning_count: tally.warning,
            fail_count: tally.fail,
        }
    }

    pub fn total_checks(&self) -> usize {
        self.checks.values().map(CategoryChecks::len).sum()
    }

    pub fn category(&self, category: Category) -> Option<&CategoryChecks> {
        self.checks.get(&category)
    }

    /// Look up one check by category and key.
    pub fn check(&self, category: Category, key: &str) -> Option<&CheckResult> {
        self.checks.get(&category).and_then(|c| c.get(key))
    }
}
