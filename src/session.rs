//! State of one validation session.
//!
//! A session is bound to one page and holds the report currently on
//! display. It is created per invocation and dropped with it.

use crate::evaluator::Evaluator;
use crate::export;
use crate::history::{History, KeyValueStore};
use crate::page::Page;
use crate::report::Report;
use crate::{site, Error, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Session {
    page_url: String,
    current: Option<Report>,
}

impl Session {
    /// Start a session for `page_url`; other sites are refused.
    pub fn open<S: AsRef<str>>(page_url: &str, site_patterns: &[S]) -> Result<Self> {
        site::ensure_applicable(page_url, site_patterns)?;
        Ok(Self::unchecked(page_url))
    }

    /// Start a session without the site check.
    pub fn unchecked(page_url: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            current: None,
        }
    }

    /// Start a session on a stored report, bound to the page it was made for.
    pub fn from_history<S: KeyValueStore>(history: &History<S>, id: i64) -> Result<Self> {
        let entry = history
            .find(id)
            .ok_or_else(|| Error::Storage(format!("No report with id {} in history", id)))?;
        Ok(Self {
            page_url: entry.report.url.clone(),
            current: Some(entry.report),
        })
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn current(&self) -> Option<&Report> {
        self.current.as_ref()
    }

    /// Evaluate `page` and make the result current.
    pub fn validate(&mut self, evaluator: &Evaluator, page: &dyn Page) -> Result<&Report> {
        let report = evaluator.evaluate(page)?;
        Ok(&*self.current.insert(report))
    }

    /// Evaluate `page`, store it in `history` (id = creation time in ms) and
    /// make it current. Nothing is stored or replaced when either step fails.
    pub fn validate_and_record<S: KeyValueStore>(
        &mut self,
        evaluator: &Evaluator,
        page: &dyn Page,
        history: &mut History<S>,
    ) -> Result<&Report> {
        let report = evaluator.evaluate(page)?;
        let id = report.timestamp.timestamp_millis();
        history.record(report.clone(), id)?;
        Ok(&*self.current.insert(report))
    }

    /// Make a stored report current.
    pub fn select_from_history<S: KeyValueStore>(&mut self, history: &History<S>, id: i64) -> Result<&Report> {
        let entry = history
            .find(id)
            .ok_or_else(|| Error::Storage(format!("No report with id {} in history", id)))?;
        Ok(&*self.current.insert(entry.report))
    }

    /// Export the current report into `dir`.
    pub fn export(&self, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
        let report = self
            .current
            .as_ref()
            .ok_or_else(|| Error::Export("No hay resultados para exportar".into()))?;
        export::write_export(report, dir, now)
    }
}
