use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{CardTier, CreditCard, Network};

const BUNDLED_CARDS: &str = include_str!("../data/cards.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, read-only list of cards to compare.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    cards: Vec<CreditCard>,
}

impl Catalog {
    pub fn new(cards: Vec<CreditCard>) -> Self {
        Self { cards }
    }

    /// The card set shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CARDS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<CreditCard> = serde_json::from_str(json)?;
        Ok(Self { cards })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Loads from `path` when given, otherwise falls back to the bundled set.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn cards(&self) -> &[CreditCard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&CreditCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards matching every constraint in `filter`, in catalog order.
    pub fn filter(&self, filter: &FilterOptions) -> Catalog {
        let cards = self
            .cards
            .iter()
            .filter(|card| filter.matches(card))
            .cloned()
            .collect();
        Catalog { cards }
    }
}

/// Catalog narrowing. Empty lists and missing bounds don't constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub banks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<f64>,
    pub tiers: Vec<CardTier>,
    pub networks: Vec<Network>,
}

impl FilterOptions {
    pub fn matches(&self, card: &CreditCard) -> bool {
        let fee = card.fees.annual;
        (self.banks.is_empty() || self.banks.iter().any(|bank| *bank == card.bank))
            && (self.tiers.is_empty() || self.tiers.contains(&card.tier))
            && (self.networks.is_empty() || self.networks.contains(&card.network))
            && self.min_fee.is_none_or(|min| fee >= min)
            && self.max_fee.is_none_or(|max| fee <= max)
    }
}
