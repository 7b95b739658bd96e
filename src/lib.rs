//! Credit card benefit calculator: estimates the yearly value of each card in
//! a catalog for a monthly spending profile.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ranking;
pub mod telemetry;

use std::fs;
use std::path::Path;

pub use catalog::{Catalog, CatalogError, FilterOptions};
pub use engine::{evaluate, evaluate_all};
pub use error::{Error, Result};
pub use models::{
    BenefitResult, CalcOptions, CalculationPeriod, Category, CategoryBreakdown, CategoryRule,
    CreditCard, SpendingProfile,
};
pub use ranking::{SortOption, rank, top};

/// Reads a spending profile from a JSON file.
pub fn load_profile(path: impl AsRef<Path>) -> Result<SpendingProfile> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(Error::Profile)
}
