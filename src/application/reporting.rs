use serde::{Deserialize, Serialize};

use crate::domain::Cents;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingReport {
    pub categories: Vec<CategorySpending>,
    pub total_withdrawn: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub entries: usize,
    pub balance: Cents,
    pub withdrawn: Cents,
    /// Exact share of all withdrawals, 0-100
    pub percentage: f64,
    /// `percentage` floored to a multiple of 10, as drawn in the spend chart
    pub bucket: u32,
}
