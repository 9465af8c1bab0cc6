use std::path::PathBuf;

use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};

use crate::scan::ScanOutcome;

pub const ABOUT: &str = "When core is being upgraded, usually some files are no longer used by WordPress, \
and they are set for removal. On some occasions, PHP has no permissions to delete these files, \
and they stay on the server, possibly exposing your site to attackers.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a caller needs to present the scan result. Holds no rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub root: PathBuf,
    pub source: String,
    pub version: Option<String>,
    pub total_known: usize,
    pub checked: usize,
    pub existing: Vec<String>,
    pub unreadable: Vec<String>,
    pub truncated: bool,
}

impl Report {
    pub fn new(root: PathBuf, source: String, version: Option<String>, total_known: usize, outcome: ScanOutcome) -> Self {
        Report {
            root,
            source,
            version,
            total_known,
            checked: outcome.checked,
            existing: outcome.existing,
            unreadable: outcome.unreadable,
            truncated: outcome.truncated,
        }
    }

    pub fn found_any(&self) -> bool {
        !self.existing.is_empty()
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    /// Colour is decided by the `colored` global override set in `main`.
    pub fn render_text(&self) -> String {
        let version = self.version.as_deref().map(|v| format!(" (WordPress {})", v)).unwrap_or_default();
        let mut lines = vec![
            format!("{}{}", self.root.display().to_string().bold(), version),
            format!("Known paths from {}", self.source),
        ];

        if self.existing.is_empty() {
            lines.push("Seems like there are no old files in your installation. Hooray!".green().to_string());
        } else {
            let summary = format!(
                "Found {} of {} known obsolete paths. Please review the files below.",
                self.existing.len(),
                self.total_known
            );
            lines.push(summary.yellow().to_string());
            lines.extend(self.existing.iter().map(|path| format!("  {}", path)));
        }

        if !self.unreadable.is_empty() {
            lines.push(format!("Could not check {} path(s):", self.unreadable.len()).red().to_string());
            lines.extend(self.unreadable.iter().map(|path| format!("  {}", path)));
        }
        if self.truncated {
            let notice = format!("Scan stopped early: checked {} of {} paths.", self.checked, self.total_known);
            lines.push(notice.red().to_string());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(existing: &[&str]) -> Report {
        let outcome = ScanOutcome {
            existing: existing.iter().map(|s| s.to_string()).collect(),
            unreadable: Vec::new(),
            checked: 3,
            truncated: false,
        };
        Report::new(PathBuf::from("/srv/wp"), "bundled list".to_string(), Some("3.5.1".to_string()), 3, outcome)
    }

    #[test]
    fn text_lists_found_paths_with_count() {
        colored::control::set_override(false);
        let text = report(&["wp-admin/old-file.php", "readme-old.txt"]).render_text();
        assert!(text.contains("/srv/wp (WordPress 3.5.1)"));
        assert!(text.contains("Found 2 of 3 known obsolete paths"));
        let listed: Vec<&str> = text.lines().filter(|l| l.starts_with("  ")).map(str::trim).collect();
        assert_eq!(listed, vec!["wp-admin/old-file.php", "readme-old.txt"]);
        assert!(!text.contains("stopped early"));
        assert!(text.ends_with("readme-old.txt\n"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn text_for_clean_install() {
        colored::control::set_override(false);
        let report = report(&[]);
        assert!(!report.found_any());
        assert!(report.render_text().contains("no old files"));
    }

    #[test]
    fn text_mentions_unreadable_and_truncation() {
        colored::control::set_override(false);
        let mut report = report(&[]);
        report.unreadable.push("wp-admin/locked.php".to_string());
        report.truncated = true;
        report.checked = 1;
        let text = report.render_text();
        assert!(text.contains("Could not check 1 path(s):"));
        assert!(text.contains("  wp-admin/locked.php"));
        assert!(text.contains("checked 1 of 3 paths"));
    }

    #[test]
    fn json_carries_counts_and_paths() -> anyhow::Result<()> {
        let rendered = report(&["readme-old.txt"]).render(OutputFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&rendered)?;
        assert_eq!(value["total_known"], 3);
        assert_eq!(value["existing"], serde_json::json!(["readme-old.txt"]));
        assert_eq!(value["version"], "3.5.1");
        assert_eq!(value["truncated"], false);
        Ok(())
    }
}
