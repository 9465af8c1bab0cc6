//! Intersects a known-path list with what is on disk right now.
//!
//! Results are never cached: every call goes back to the filesystem.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::fs::join_within_root;

/// Answers whether a path exists. Implementations must report `Ok(false)`
/// for a missing path rather than an error.
pub trait ExistenceCheck {
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// The local filesystem. Files, directories and other entries all count;
/// a dangling symlink does not.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl ExistenceCheck for LocalFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub max_paths: Option<usize>,
    pub time_budget: Duration,
}

impl Default for ScanLimits {
    fn default() -> Self {
        ScanLimits {
            max_paths: None,
            time_budget: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Known paths found on disk, in input order.
    pub existing: Vec<String>,
    /// Paths whose check failed; treated as absent.
    pub unreadable: Vec<String>,
    /// How many known paths were checked before the scan ended.
    pub checked: usize,
    pub truncated: bool,
}

/// Checks one root-relative path. Paths that would leave the root through
/// `..` are reported absent without touching the filesystem. A failed check
/// is logged here and handed back to the caller.
pub fn check_relative(check: &dyn ExistenceCheck, root: &Path, relative: &str) -> io::Result<bool> {
    let Some(path) = join_within_root(root, relative) else {
        warn!("Skipping '{}': it points outside {}", relative, root.display());
        return Ok(false);
    };
    check.exists(&path).inspect_err(|e| {
        warn!("Could not determine whether '{}' exists, treating it as absent: {}", path.display(), e);
    })
}

/// Keeps the entries of `known` that exist under `root`, preserving order
/// and duplicates. A failed check counts as "does not exist".
pub fn filter_existing(known: &[String], root: &Path, check: &dyn ExistenceCheck) -> Vec<String> {
    known
        .iter()
        .filter(|relative| matches!(check_relative(check, root, relative), Ok(true)))
        .cloned()
        .collect()
}

/// Same selection as [`filter_existing`], stopping early once either limit
/// is reached.
pub fn scan(known: &[String], root: &Path, check: &dyn ExistenceCheck, limits: &ScanLimits) -> ScanOutcome {
    let started = Instant::now();
    let mut outcome = ScanOutcome::default();

    for relative in known {
        if limits.max_paths.is_some_and(|max| outcome.checked >= max) {
            warn!("Stopping after {} of {} paths: path limit reached", outcome.checked, known.len());
            outcome.truncated = true;
            break;
        }
        if started.elapsed() >= limits.time_budget {
            warn!(
                "Stopping after {} of {} paths: time budget of {:?} exhausted",
                outcome.checked,
                known.len(),
                limits.time_budget
            );
            outcome.truncated = true;
            break;
        }

        outcome.checked += 1;
        match check_relative(check, root, relative) {
            Ok(true) => {
                debug!(path = %relative, "old file present");
                outcome.existing.push(relative.clone());
            }
            Ok(false) => {}
            Err(_) => outcome.unreadable.push(relative.clone()),
        }
    }

    info!(
        "Checked {} of {} known paths under {}: {} present",
        outcome.checked,
        known.len(),
        root.display(),
        outcome.existing.len()
    );
    outcome
}
