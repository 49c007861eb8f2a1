//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use covgate_domain::{SlotKey, SlotResult, SlotStatus};
use serde::Serialize;
use std::io::Write;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One persisted record: a slot result tagged with its coverage
#[derive(Debug, Clone, Serialize)]
pub struct SlotRecord {
    /// Insurer identifier the run was invoked for
    pub insurer: String,

    /// Coverage code
    pub coverage_code: String,

    /// Coverage name as listed in the source material
    pub coverage_name: String,

    /// Slot the result belongs to
    pub slot: SlotKey,

    /// The resolved slot result
    #[serde(flatten)]
    pub result: SlotResult,
}

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Render records for stdout according to the selected format.
    pub fn render(&self, records: &[SlotRecord]) -> Result<String> {
        match self.format {
            CliFormat::Table => Ok(self.render_table(records)),
            CliFormat::Json => {
                let mut out = String::new();
                for record in records {
                    out.push_str(&serde_json::to_string(record)?);
                    out.push('\n');
                }
                Ok(out)
            }
            CliFormat::Quiet => Ok(records
                .iter()
                .map(|r| format!("{}\t{}\t{}", r.coverage_code, r.slot, r.result.status))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Write records as line-delimited JSON.
    pub fn write_records(&self, records: &[SlotRecord], writer: &mut impl Write) -> Result<()> {
        for record in records {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn render_table(&self, records: &[SlotRecord]) -> String {
        if records.is_empty() {
            return "No results.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["Coverage", "Slot", "Status", "Value", "Evidence", "Reason"]);

        for record in records {
            builder.push_record([
                record.coverage_code.as_str(),
                record.slot.as_str(),
                &self.status_cell(record.result.status),
                record.result.value.as_deref().unwrap_or("-"),
                &record.result.evidences.len().to_string(),
                record.result.reason.as_deref().unwrap_or("-"),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn status_cell(&self, status: SlotStatus) -> String {
        if !self.color_enabled {
            return status.as_str().to_string();
        }
        match status {
            SlotStatus::Found => status.as_str().green().to_string(),
            SlotStatus::FoundGlobal => status.as_str().yellow().to_string(),
            SlotStatus::Conflict => status.as_str().red().to_string(),
            SlotStatus::Unknown => status.as_str().dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: SlotStatus) -> SlotRecord {
        SlotRecord {
            insurer: "acme".to_string(),
            coverage_code: "CA001".to_string(),
            coverage_name: "암진단비(유사암제외)".to_string(),
            slot: SlotKey::WaitingPeriod,
            result: SlotResult {
                status,
                value: Some("90일".to_string()),
                match_count: 1,
                evidences: Vec::new(),
                reason: None,
            },
        }
    }

    #[test]
    fn test_json_lines_render() {
        let formatter = Formatter::new(CliFormat::Json, false);
        let out = formatter.render(&[record(SlotStatus::Found)]).unwrap();
        let line = out.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["coverage_code"], "CA001");
        assert_eq!(value["slot"], "waiting_period");
        // SlotResult fields are flattened into the record
        assert_eq!(value["status"], "FOUND");
        assert_eq!(value["value"], "90일");
    }

    #[test]
    fn test_quiet_render() {
        let formatter = Formatter::new(CliFormat::Quiet, false);
        let out = formatter.render(&[record(SlotStatus::Unknown)]).unwrap();
        assert_eq!(out, "CA001\twaiting_period\tUNKNOWN");
    }

    #[test]
    fn test_table_render_uncolored() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let out = formatter.render(&[record(SlotStatus::Conflict)]).unwrap();
        assert!(out.contains("CA001"));
        assert!(out.contains("CONFLICT"));
    }

    #[test]
    fn test_write_records_line_delimited() {
        let formatter = Formatter::new(CliFormat::Table, false);
        let mut buffer = Vec::new();
        formatter
            .write_records(
                &[record(SlotStatus::Found), record(SlotStatus::Unknown)],
                &mut buffer,
            )
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
