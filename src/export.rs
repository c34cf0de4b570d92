//! Downloadable JSON export of a report.

use crate::report::{Category, CategoryChecks, Report};
use crate::{Error, Result};
use chrono::{DateTime, Local, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Subset of a report written to the export file. Field names are the ones
/// downstream consumers of the JSON download expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedReport {
    pub url: String,
    /// Local date and time, `dd/mm/YYYY, HH:MM:SS`
    pub fecha: String,
    pub puntuacion: u8,
    pub aprobados: u32,
    pub advertencias: u32,
    pub errores: u32,
    pub resultados: BTreeMap<Category, CategoryChecks>,
}

impl ExportedReport {
    pub fn from_report(report: &Report) -> Self {
        Self {
            url: report.url.clone(),
            fecha: format_local(report.timestamp),
            puntuacion: report.score,
            aprobados: report.pass_count,
            advertencias: report.warning_count,
            errores: report.fail_count,
            resultados: report.checks.clone(),
        }
    }
}

/// Local date and time in day-first order.
pub fn format_local(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("samsung-validation-{}.json", now.timestamp_millis())
}

/// Write `report` as pretty JSON into `dir`, named after `now`.
pub fn write_export(report: &Report, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Export(format!("Cannot create {}: {}", dir.display(), e)))?;

    let path = dir.join(export_filename(now));
    let text = serde_json::to_string_pretty(&ExportedReport::from_report(report))?;
    std::fs::write(&path, text)
        .map_err(|e| Error::Export(format!("Cannot write {}: {}", path.display(), e)))?;
    info!("Exported report for {} to {}", report.url, path.display());
    Ok(path)
}

pub fn parse_export(text: &str) -> Result<ExportedReport> {
    Ok(serde_json::from_str(text)?)
}
