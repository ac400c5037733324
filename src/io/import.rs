use anyhow::Result;
use csv::StringRecord;
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, warn};

use crate::application::{AppError, BudgetService};
use crate::domain::{Cents, parse_cents};

/// One row of a replay file: `op,category,amount,description,target`
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRecord {
    pub op: Operation,
    pub category: String,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Deposit,
    Withdraw,
    Transfer,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
            Operation::Transfer => "transfer",
        }
    }
}

/// Result of a replay
#[derive(Debug, Clone, Default)]
pub struct ReplayResult {
    pub applied: usize,
    pub errors: Vec<ReplayError>,
}

/// Error that occurred on one line of the replay file
#[derive(Debug, Clone)]
pub struct ReplayError {
    pub line: usize,
    pub error: String,
}

/// Options for replaying operations
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Create categories on first use instead of requiring a `create` row
    pub create_missing: bool,
    /// Stop at the first failing line
    pub stop_on_error: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            create_missing: true,
            stop_on_error: false,
        }
    }
}

impl ReplayOptions {
    pub fn strict() -> Self {
        Self {
            create_missing: false,
            stop_on_error: true,
        }
    }
}

/// Replays a CSV file of budget operations into a service, in file order.
pub struct Replayer<'a> {
    service: &'a mut BudgetService,
}

impl<'a> Replayer<'a> {
    pub fn new(service: &'a mut BudgetService) -> Self {
        Self { service }
    }

    /// Apply every row. Rows that fail (bad amount, unknown category,
    /// insufficient funds) record nothing, not even a category created on
    /// first use, and are reported in the result.
    pub fn replay_csv<R: Read>(
        &mut self,
        reader: R,
        options: &ReplayOptions,
    ) -> Result<ReplayResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let description_index = headers.iter().position(|header| header == "description");
        let mut result = ReplayResult::default();

        for (line_num, row) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let outcome = row
                .and_then(|row| {
                    trim_fields(&row, description_index)
                        .deserialize::<OperationRecord>(Some(&headers))
                })
                .map_err(|e| format!("CSV parse error: {}", e))
                .and_then(|record| self.apply(&record, options).map_err(|e| e.to_string()));

            match outcome {
                Ok(()) => result.applied += 1,
                Err(error) => {
                    warn!(line, %error, "replay line rejected");
                    result.errors.push(ReplayError { line, error });
                    if options.stop_on_error {
                        break;
                    }
                }
            }
        }

        debug!(
            applied = result.applied,
            errors = result.errors.len(),
            "replay finished"
        );
        Ok(result)
    }

    fn apply(&mut self, record: &OperationRecord, options: &ReplayOptions) -> Result<(), AppError> {
        let name = record.category.as_str();
        let description = record.description.as_deref().unwrap_or("");

        if record.op == Operation::Create {
            self.service.create_category(name)?;
            return Ok(());
        }

        let amount = required_amount(record)?;
        let target = match record.op {
            Operation::Transfer => {
                let target = record.target.as_deref().ok_or(AppError::MissingField {
                    operation: record.op.as_str(),
                    field: "target",
                })?;
                Some(target)
            }
            _ => None,
        };

        let mut created = Vec::new();
        if options.create_missing {
            for missing in std::iter::once(name).chain(target) {
                if !self.service.contains(missing) {
                    self.service.get_or_create_category(missing);
                    created.push(missing);
                }
            }
        }

        let outcome = match (record.op, target) {
            (Operation::Deposit, _) => self.service.deposit(name, amount, description),
            (Operation::Withdraw, _) => self.service.withdraw(name, amount, description),
            (Operation::Transfer, Some(target)) => self.service.transfer(name, target, amount),
            _ => Ok(()),
        };

        if outcome.is_err() {
            for missing in created {
                self.service.remove_empty_category(missing);
            }
        }
        outcome
    }
}

/// Trim every field except the description, which is replayed as written.
fn trim_fields(row: &StringRecord, keep: Option<usize>) -> StringRecord {
    row.iter()
        .enumerate()
        .map(|(index, field)| if Some(index) == keep { field } else { field.trim() })
        .collect()
}

fn required_amount(record: &OperationRecord) -> Result<Cents, AppError> {
    let raw = record.amount.as_deref().ok_or(AppError::MissingField {
        operation: record.op.as_str(),
        field: "amount",
    })?;
    parse_cents(raw).map_err(|e| AppError::InvalidAmount(e.to_string()))
}
