use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::BenefitResult;

/// How to order a set of results for display. Defaults to net benefit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    TotalBenefits,
    #[default]
    NetBenefit,
    Cashback,
    Points,
    /// Cheapest first.
    AnnualFee,
}

impl SortOption {
    fn compare(&self, a: &BenefitResult, b: &BenefitResult) -> Ordering {
        match self {
            SortOption::TotalBenefits => b.total_benefits.total_cmp(&a.total_benefits),
            SortOption::NetBenefit => b.net_annual_benefit.total_cmp(&a.net_annual_benefit),
            SortOption::Cashback => b.total_cashback.total_cmp(&a.total_cashback),
            SortOption::Points => b.total_points.total_cmp(&a.total_points),
            SortOption::AnnualFee => a.annual_fee.total_cmp(&b.annual_fee),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOption::TotalBenefits => "totalBenefits",
            SortOption::NetBenefit => "netBenefit",
            SortOption::Cashback => "cashback",
            SortOption::Points => "points",
            SortOption::AnnualFee => "annualFee",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "totalbenefits" | "total" => Ok(SortOption::TotalBenefits),
            "netbenefit" | "net" => Ok(SortOption::NetBenefit),
            "cashback" => Ok(SortOption::Cashback),
            "points" => Ok(SortOption::Points),
            "annualfee" | "fee" => Ok(SortOption::AnnualFee),
            other => Err(format!("unknown sort option '{other}'")),
        }
    }
}

/// Stable sort: ties keep their catalog order.
pub fn rank(mut results: Vec<BenefitResult>, sort: SortOption) -> Vec<BenefitResult> {
    results.sort_by(|a, b| sort.compare(a, b));
    results
}

/// First `limit` results; `None` keeps everything.
pub fn top(results: Vec<BenefitResult>, limit: Option<usize>) -> Vec<BenefitResult> {
    match limit {
        Some(limit) => results.into_iter().take(limit).collect(),
        None => results,
    }
}
