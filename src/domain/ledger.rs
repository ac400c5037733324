use serde::{Deserialize, Serialize};

use super::Cents;

/// A single ledger line. Positive amounts are deposits, negative amounts are
/// money that left the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub amount: Cents,
    #[serde(default)]
    pub description: String,
}

impl Entry {
    pub fn new(amount: Cents, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount < 0
    }
}

/// Balance = sum of every recorded amount, signed. Saturates at the
/// `Cents` bounds instead of overflowing.
pub fn compute_balance(entries: &[Entry]) -> Cents {
    entries
        .iter()
        .fold(0, |balance: Cents, entry| balance.saturating_add(entry.amount))
}

/// Total money that left, as a positive number. Deposits are ignored.
pub fn compute_withdrawals(entries: &[Entry]) -> Cents {
    entries
        .iter()
        .filter(|entry| entry.is_withdrawal())
        .fold(0, |total: Cents, entry| {
            total.saturating_add(entry.amount.saturating_neg())
        })
}

/// Saturating sum, for totals across categories.
pub fn saturating_total(amounts: impl IntoIterator<Item = Cents>) -> Cents {
    amounts
        .into_iter()
        .fold(0, |total: Cents, amount| total.saturating_add(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_balance_empty() {
        assert_eq!(compute_balance(&[]), 0);
        assert_eq!(compute_withdrawals(&[]), 0);
    }

    #[test]
    fn test_compute_balance_mixed() {
        let entries = vec![
            Entry::new(5000, "salary"),
            Entry::new(-1500, "groceries"),
            Entry::new(-500, ""),
            Entry::new(250, "refund"),
        ];

        assert_eq!(compute_balance(&entries), 3250);
    }

    #[test]
    fn test_withdrawals_skip_deposits() {
        // A positive entry counts as a deposit whatever its description says
        let entries = vec![
            Entry::new(10000, "deposit"),
            Entry::new(-2500, "rent"),
            Entry::new(300, "withdrawal reversal"),
            Entry::new(-125, "coffee"),
        ];

        assert_eq!(compute_withdrawals(&entries), 2625);
    }

    #[test]
    fn test_folds_saturate_instead_of_overflowing() {
        let entries = vec![
            Entry::new(Cents::MAX, "jackpot"),
            Entry::new(Cents::MAX, "second jackpot"),
        ];
        assert_eq!(compute_balance(&entries), Cents::MAX);

        let entries = vec![Entry::new(Cents::MIN, "debt")];
        assert_eq!(compute_balance(&entries), Cents::MIN);
        assert_eq!(compute_withdrawals(&entries), Cents::MAX);

        assert_eq!(saturating_total([Cents::MAX, 1, 2]), Cents::MAX);
        assert_eq!(saturating_total([100, 250]), 350);
    }

    #[test]
    fn test_negative_deposit_counts_as_withdrawal() {
        let entries = vec![Entry::new(-700, "fee")];

        assert_eq!(compute_balance(&entries), -700);
        assert_eq!(compute_withdrawals(&entries), 700);
    }
}
