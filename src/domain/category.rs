use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    Cents, Entry, compute_balance, compute_withdrawals, format_cents, format_cents_compact,
};

const RECEIPT_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 23;
const AMOUNT_WIDTH: usize = 7;

/// Returned by withdraw/transfer when the balance does not cover the request.
/// Nothing has been recorded when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient funds: balance {balance} cents, requested {requested} cents")]
pub struct InsufficientFunds {
    pub balance: Cents,
    pub requested: Cents,
}

/// A named spending bucket with an append-only ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    ledger: Vec<Entry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ledger: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in the order they were recorded.
    pub fn ledger(&self) -> &[Entry] {
        &self.ledger
    }

    /// Record an amount unconditionally. Negative amounts are accepted.
    pub fn deposit(&mut self, amount: Cents, description: impl Into<String>) {
        self.ledger.push(Entry::new(amount, description));
    }

    /// Record `-amount` if the balance covers it.
    pub fn withdraw(
        &mut self,
        amount: Cents,
        description: impl Into<String>,
    ) -> Result<(), InsufficientFunds> {
        self.ensure_funds(amount)?;
        self.deposit(amount.saturating_neg(), description);
        Ok(())
    }

    pub fn balance(&self) -> Cents {
        compute_balance(&self.ledger)
    }

    pub fn check_funds(&self, amount: Cents) -> bool {
        self.balance() >= amount
    }

    /// Total money that left this category, as a positive number.
    pub fn withdrawals_amount(&self) -> Cents {
        compute_withdrawals(&self.ledger)
    }

    /// Move `amount` into `target`. Either both ledgers gain an entry or
    /// neither does.
    pub fn transfer(
        &mut self,
        amount: Cents,
        target: &mut Category,
    ) -> Result<(), InsufficientFunds> {
        self.ensure_funds(amount)?;
        self.deposit(amount.saturating_neg(), format!("Transfer to {}", target.name));
        target.deposit(amount, format!("Transfer from {}", self.name));
        Ok(())
    }

    /// Transfer into this same category: two entries, no net change.
    pub fn transfer_to_self(&mut self, amount: Cents) -> Result<(), InsufficientFunds> {
        self.ensure_funds(amount)?;
        let to = format!("Transfer to {}", self.name);
        let from = format!("Transfer from {}", self.name);
        self.deposit(amount.saturating_neg(), to);
        self.deposit(amount, from);
        Ok(())
    }

    fn ensure_funds(&self, amount: Cents) -> Result<(), InsufficientFunds> {
        let balance = self.balance();
        if balance >= amount {
            Ok(())
        } else {
            Err(InsufficientFunds {
                balance,
                requested: amount,
            })
        }
    }
}

/// Fixed-width receipt. Line items use two decimals, the total does not.
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:*^width$}", self.name, width = RECEIPT_WIDTH)?;
        for entry in &self.ledger {
            let description: String =
                entry.description.chars().take(DESCRIPTION_WIDTH).collect();
            write!(
                f,
                "\n{:<dw$}{:>aw$}",
                description,
                format_cents(entry.amount),
                dw = DESCRIPTION_WIDTH,
                aw = AMOUNT_WIDTH
            )?;
        }
        if self.ledger.is_empty() {
            // An empty inventory still occupies its own (blank) line
            writeln!(f)?;
        }
        write!(f, "\nTotal: {}", format_cents_compact(self.balance()))
    }
}
