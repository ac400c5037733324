use tracing::{debug, warn};

use crate::domain::{
    Category, Cents, InsufficientFunds, bucket_percentage, create_spend_chart, format_cents,
    saturating_total,
};

use super::{AppError, CategorySpending, SpendingReport};

/// Application service owning every category of a budget.
/// Categories are kept in creation order, which is also the chart order.
#[derive(Debug, Default)]
pub struct BudgetService {
    categories: Vec<Category>,
}

/// Balance entry for a category
pub struct BalanceEntry {
    pub category: String,
    pub balance: Cents,
}

impl BudgetService {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Category operations
    // ========================

    /// Create a new, empty category.
    pub fn create_category(&mut self, name: &str) -> Result<&Category, AppError> {
        if self.position(name).is_some() {
            return Err(AppError::CategoryAlreadyExists(name.to_string()));
        }

        debug!(category = name, "creating category");
        self.categories.push(Category::new(name));
        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Get a category by name, creating it when missing.
    pub fn get_or_create_category(&mut self, name: &str) -> &mut Category {
        let index = match self.position(name) {
            Some(index) => index,
            None => {
                debug!(category = name, "creating category on first use");
                self.categories.push(Category::new(name));
                self.categories.len() - 1
            }
        };
        &mut self.categories[index]
    }

    pub fn get_category(&self, name: &str) -> Result<&Category, AppError> {
        self.categories
            .iter()
            .find(|category| category.name() == name)
            .ok_or_else(|| AppError::CategoryNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Drop a category that has never recorded anything. Returns `false` and
    /// leaves the budget untouched if the category is unknown or has entries.
    pub fn remove_empty_category(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) if self.categories[index].ledger().is_empty() => {
                debug!(category = name, "removing empty category");
                self.categories.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get_balance(&self, name: &str) -> Result<BalanceEntry, AppError> {
        let category = self.get_category(name)?;
        Ok(BalanceEntry {
            category: category.name().to_string(),
            balance: category.balance(),
        })
    }

    pub fn get_all_balances(&self) -> Vec<BalanceEntry> {
        self.categories
            .iter()
            .map(|category| BalanceEntry {
                category: category.name().to_string(),
                balance: category.balance(),
            })
            .collect()
    }

    // ========================
    // Ledger operations
    // ========================

    pub fn deposit(
        &mut self,
        name: &str,
        amount: Cents,
        description: &str,
    ) -> Result<(), AppError> {
        let category = self.get_category_mut(name)?;
        category.deposit(amount, description);
        debug!(
            category = name,
            amount = %format_cents(amount),
            "recorded deposit"
        );
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        name: &str,
        amount: Cents,
        description: &str,
    ) -> Result<(), AppError> {
        let category = self.get_category_mut(name)?;
        category
            .withdraw(amount, description)
            .map_err(|e| insufficient(name, e))?;
        debug!(
            category = name,
            amount = %format_cents(amount),
            "recorded withdrawal"
        );
        Ok(())
    }

    /// Move money between two categories. A category may transfer to itself,
    /// which records both entries on the same ledger.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Cents) -> Result<(), AppError> {
        let from_index = self
            .position(from)
            .ok_or_else(|| AppError::CategoryNotFound(from.to_string()))?;
        let to_index = self
            .position(to)
            .ok_or_else(|| AppError::CategoryNotFound(to.to_string()))?;

        let result = if from_index == to_index {
            self.categories[from_index].transfer_to_self(amount)
        } else if from_index < to_index {
            let (head, tail) = self.categories.split_at_mut(to_index);
            head[from_index].transfer(amount, &mut tail[0])
        } else {
            let (head, tail) = self.categories.split_at_mut(from_index);
            tail[0].transfer(amount, &mut head[to_index])
        };
        result.map_err(|e| insufficient(from, e))?;

        debug!(
            from,
            to,
            amount = %format_cents(amount),
            "recorded transfer"
        );
        Ok(())
    }

    // ========================
    // Rendering and reporting
    // ========================

    /// Fixed-width receipt for one category.
    pub fn receipt(&self, name: &str) -> Result<String, AppError> {
        Ok(self.get_category(name)?.to_string())
    }

    /// Percentage spend chart over every category, in creation order.
    pub fn spend_chart(&self) -> String {
        if self.total_withdrawn() == 0 {
            warn!("no withdrawals recorded; every category charts at 0%");
        }
        create_spend_chart(&self.categories)
    }

    pub fn spending_report(&self) -> SpendingReport {
        let total_withdrawn = self.total_withdrawn();
        let categories = self
            .categories
            .iter()
            .map(|category| {
                let withdrawn = category.withdrawals_amount();
                let percentage = if total_withdrawn == 0 {
                    0.0
                } else {
                    100.0 * withdrawn as f64 / total_withdrawn as f64
                };
                CategorySpending {
                    category: category.name().to_string(),
                    entries: category.ledger().len(),
                    balance: category.balance(),
                    withdrawn,
                    percentage,
                    bucket: bucket_percentage(withdrawn, total_withdrawn),
                }
            })
            .collect();

        SpendingReport {
            categories,
            total_withdrawn,
        }
    }

    fn total_withdrawn(&self) -> Cents {
        saturating_total(self.categories.iter().map(Category::withdrawals_amount))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.name() == name)
    }

    fn get_category_mut(&mut self, name: &str) -> Result<&mut Category, AppError> {
        self.categories
            .iter_mut()
            .find(|category| category.name() == name)
            .ok_or_else(|| AppError::CategoryNotFound(name.to_string()))
    }
}

fn insufficient(name: &str, e: InsufficientFunds) -> AppError {
    warn!(
        category = name,
        balance = %format_cents(e.balance),
        requested = %format_cents(e.requested),
        "rejected: insufficient funds"
    );
    AppError::InsufficientFunds {
        category: name.to_string(),
        balance: e.balance,
        required: e.requested,
    }
}
