use crate::application::dto::{FailureSummary, ReconcileResponse};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// TextReportFormatter adapter for human-readable console output
///
/// Renders the verdict with colored status lines and a per-package
/// breakdown of both partitions. Package names and identifiers stay
/// uncolored so the report greps cleanly.
pub struct TextReportFormatter;

impl TextReportFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_partition(
        output: &mut String,
        heading: &str,
        partition: &serde_json::Value,
    ) -> Result<()> {
        let Some(packages) = partition.as_object() else {
            return Ok(());
        };
        if packages.is_empty() {
            writeln!(output, "{}: none", heading)?;
            return Ok(());
        }
        writeln!(output, "{}:", heading)?;
        for (package, records) in packages {
            let identifiers: Vec<&str> = records
                .as_array()
                .map(|records| {
                    records
                        .iter()
                        .filter_map(|record| record.get("name").and_then(|name| name.as_str()))
                        .collect()
                })
                .unwrap_or_default();
            writeln!(output, "  {} ({})", package, identifiers.join(", "))?;
        }
        Ok(())
    }

    fn write_summary(output: &mut String, summary: &FailureSummary) -> Result<()> {
        Self::write_partition(
            output,
            "Fixable by package upgrade",
            &summary.fixable_vulnerabilities,
        )?;
        Self::write_partition(
            output,
            "Non-fixable, not allowlisted",
            &summary.non_fixable_vulnerabilities,
        )?;
        writeln!(output)?;
        writeln!(output, "Archived lists:")?;
        writeln!(output, "  allowlist candidate: {}", summary.archived_allowlist_candidate)?;
        writeln!(output, "  current scan:        {}", summary.archived_current_scan)?;
        writeln!(output, "  fixable:             {}", summary.archived_fixable_list)?;
        writeln!(output, "  non-fixable:         {}", summary.archived_non_fixable_list)?;
        if !summary.edited_files.is_empty() {
            writeln!(output)?;
            writeln!(output, "Files to update:")?;
            for edited in &summary.edited_files {
                writeln!(
                    output,
                    "  {} <- {}",
                    edited.original_filepath, edited.archived_filename
                )?;
            }
        }
        Ok(())
    }
}

impl Default for TextReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextReportFormatter {
    fn format(&self, response: &ReconcileResponse) -> Result<String> {
        let mut output = String::new();
        writeln!(
            output,
            "Image:     {}\nThreshold: {}\nRun:       {}",
            response.image_uri, response.threshold, response.run_id
        )?;
        writeln!(output)?;

        if response.passed() {
            writeln!(
                output,
                "{}",
                "✅ PASS - no outstanding vulnerabilities".green()
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "{}",
            "❌ FAIL - outstanding vulnerabilities found".red().bold()
        )?;
        writeln!(output)?;
        if let Some(summary) = &response.summary {
            Self::write_summary(&mut output, summary)?;
        }
        Ok(output)
    }
}
