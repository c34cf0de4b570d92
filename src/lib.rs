//! PDP Validator
//!
//! Heuristic quality report for a single Samsung product detail page. A page
//! is handed to the [`Evaluator`] as a [`Page`]; the evaluator runs a fixed
//! battery of independent checks grouped into categories (SEO, content,
//! images, links, language, responsive, accessibility) and returns a scored
//! [`Report`]. Reports can be kept in a capped local history and exported as
//! JSON.
//!
//! # Example
//!
//! ```no_run
//! use pdp_validator::{Evaluator, HtmlPage, ValidatorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let html = std::fs::read_to_string("galaxy-s24.html")?;
//! let page = HtmlPage::parse("https://www.samsung.com/pe/smartphones/galaxy-s24/", &html)?;
//!
//! let evaluator = Evaluator::new(ValidatorConfig::default())?;
//! let report = evaluator.evaluate(&page)?;
//! println!("Score: {}%", report.score);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub mod error;
pub use error::{Error, Result};

pub mod evaluator;
pub mod export;
pub mod history;
pub mod layout;
pub mod page;
pub mod render;
pub mod report;
pub mod session;
pub mod site;

pub use evaluator::Evaluator;
pub use history::{History, HistoryEntry, JsonFileStore, KeyValueStore, MemoryStore};
pub use page::{ElementView, HtmlPage, ImageState, Page, RenderHints};
pub use report::{Category, CategoryChecks, CheckResult, Report, Status};
pub use session::Session;

/// Configuration for the validator
///
/// The defaults reproduce the extension's thresholds exactly:
/// - titles of 50 to 60 characters and descriptions of 150 to 160 pass
/// - three or more images without alt text fail the alt-text check
/// - only URLs containing `samsung.com` or `p6-` are validated
///
/// # Examples
///
/// ```
/// let cfg = pdp_validator::ValidatorConfig::default();
/// assert_eq!(cfg.history_capacity, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Viewport used to estimate rendered heights
    pub viewport: Viewport,
    /// URL fragments that mark a page as one we validate
    pub site_patterns: Vec<String>,
    /// Maximum number of reports kept in history
    pub history_capacity: usize,
    /// History file; defaults to the user data directory
    pub history_path: Option<PathBuf>,
    /// Passing title length, in characters
    pub title_length: RangeInclusive<usize>,
    /// Passing meta description length, in characters
    pub description_length: RangeInclusive<usize>,
    /// Images without alt text at which the check fails instead of warning
    pub alt_text_fail_threshold: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            site_patterns: vec!["samsung.com".to_string(), "p6-".to_string()],
            history_capacity: history::DEFAULT_CAPACITY,
            history_path: None,
            title_length: 50..=60,
            description_length: 150..=160,
            alt_text_fail_threshold: 3,
        }
    }
}

impl ValidatorConfig {
    /// Load a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Cannot read {}: {}", path.display(), e)))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| Error::ConfigError(format!("Cannot parse {}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::ConfigError("history_capacity must be at least 1".into()));
        }
        if self.alt_text_fail_threshold == 0 {
            return Err(Error::ConfigError("alt_text_fail_threshold must be at least 1".into()));
        }
        Ok(())
    }

    /// Configured history file, or `pdp-validator/history.json` under the
    /// platform data directory.
    pub fn history_file(&self) -> Result<PathBuf> {
        if let Some(p) = &self.history_path {
            return Ok(p.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("pdp-validator").join("history.json"))
            .ok_or_else(|| Error::ConfigError("No data directory and no history path was given".into()))
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
