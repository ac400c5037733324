use anyhow::Result;
use std::io::Write;

use crate::application::{BudgetService, SpendingReport};
use crate::domain::format_cents;

/// Exporter for converting budget data to various formats
pub struct Exporter<'a> {
    service: &'a BudgetService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BudgetService) -> Self {
        Self { service }
    }

    /// Export the spending report to CSV format
    pub fn export_report_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let report = self.service.spending_report();
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record([
            "category",
            "entries",
            "balance",
            "withdrawn",
            "percentage",
            "bucket",
        ])?;

        let mut count = 0;
        for cat in &report.categories {
            csv_writer.write_record([
                cat.category.clone(),
                cat.entries.to_string(),
                format_cents(cat.balance),
                format_cents(cat.withdrawn),
                format!("{:.2}", cat.percentage),
                cat.bucket.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the spending report as pretty-printed JSON
    pub fn export_report_json<W: Write>(&self, mut writer: W) -> Result<SpendingReport> {
        let report = self.service.spending_report();

        let json = serde_json::to_string_pretty(&report)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(report)
    }
}
