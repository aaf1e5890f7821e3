//! Distributor pricing rules.

use serde::{Deserialize, Serialize};

use candystock_core::{DistributorId, DomainError, DomainResult, ItemId};

/// Validated unit cost of an offering.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Cost(f64);

impl Cost {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("cost must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("cost cannot be negative"));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

/// One offering for a given item, as seen when shopping for a restock.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidate {
    pub distributor_id: DistributorId,
    pub distributor_name: String,
    pub cost: f64,
}

/// The cheapest offering scaled by the requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheapestOffer {
    pub distributor_id: DistributorId,
    pub distributor_name: String,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// Answer to "where should I restock this item?".
///
/// An item without offerings is an answer, not a failure; clients branch on
/// the payload shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RestockQuote {
    Offer(CheapestOffer),
    NoOfferings { message: String },
}

impl RestockQuote {
    pub fn no_offerings(item_id: ItemId) -> Self {
        RestockQuote::NoOfferings {
            message: format!("No offerings found for item {item_id}"),
        }
    }
}

/// Pick the minimum-cost candidate and price `quantity` units from it.
///
/// Ties keep the first candidate in iteration order, so callers must pass
/// candidates in storage order.
pub fn cheapest_offer(candidates: &[PriceCandidate], quantity: u32) -> Option<CheapestOffer> {
    candidates
        .iter()
        .min_by(|a, b| a.cost.total_cmp(&b.cost))
        .map(|best| CheapestOffer {
            distributor_id: best.distributor_id,
            distributor_name: best.distributor_name.clone(),
            unit_cost: best.cost,
            total_cost: best.cost * f64::from(quantity),
        })
}
