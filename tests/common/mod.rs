// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use impensa::application::BudgetService;
use impensa::domain::{Category, Cents};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const REPLAY_HEADER: &str = "op,category,amount,description,target\n";

/// Helper to write a replay file into a temporary directory
pub fn replay_file(rows: &str) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("operations.csv");
    fs::write(&path, format!("{}{}", REPLAY_HEADER, rows))?;
    Ok((path, temp_dir))
}

/// Helper to build a funded category with a single withdrawal
pub fn funded(name: &str, deposit: Cents, withdrawal: Cents) -> Category {
    let mut category = Category::new(name);
    category.deposit(deposit, "deposit");
    category.withdraw(withdrawal, "").unwrap();
    category
}

/// Test fixture: Standard category setup
pub struct StandardCategories;

impl StandardCategories {
    /// Create Food, Clothing and Auto, each funded with 1000.00
    pub fn create_funded(service: &mut BudgetService) -> Result<()> {
        for name in ["Food", "Clothing", "Auto"] {
            service.create_category(name)?;
            service.deposit(name, 100000, "initial deposit")?;
        }
        Ok(())
    }
}
