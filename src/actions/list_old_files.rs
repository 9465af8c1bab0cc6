use std::path::PathBuf;
use anyhow::{Context, Result};
use crate::known::{ensure_root, installed_version, resolve_source, SourceKind};
use crate::report::{OutputFormat, Report};
use crate::scan::{scan, ExistenceCheck, ScanLimits};

pub struct ScanRequest {
    pub root: PathBuf,
    pub source: SourceKind,
    pub list: Option<PathBuf>,
    pub limits: ScanLimits,
}

pub fn build_report(request: &ScanRequest, check: &dyn ExistenceCheck) -> Result<Report> {
    ensure_root(&request.root)?;
    let source = resolve_source(request.source, &request.root, request.list.as_deref())?;
    let known = source
        .load()
        .with_context(|| format!("Failed to load known paths from {}", source.describe()))?;
    let outcome = scan(&known, &request.root, check, &request.limits);
    Ok(Report::new(
        request.root.clone(),
        source.describe(),
        installed_version(&request.root),
        known.len(),
        outcome,
    ))
}

/// Exit status for a finished scan: 1 only when old files were found and
/// the caller asked to fail on them.
pub fn exit_status(found_any: bool, fail_if_found: bool) -> u8 {
    u8::from(found_any && fail_if_found)
}

/// Prints the report and returns whether any old file was found.
pub fn execute(request: &ScanRequest, check: &dyn ExistenceCheck, format: OutputFormat) -> Result<bool> {
    let report = build_report(request, check)?;
    let rendered = report.render(format).context("Failed to render report")?;
    print!("{}", rendered);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(report.found_any())
}
