//! Budget calculation
//!
//! Pure functions combining cached ticket prices, an accommodation amount and
//! an optional transport fee into a grand total. Nothing here fails: bad
//! input is coerced to zero.

use crate::models::{CachedBudgetItem, Governorate, Money};

/// Base transport fee in cents, charged even from the capital
const TRANSPORT_BASE_CENTS: i64 = 500;

/// Per-kilometer transport rate in cents
const TRANSPORT_CENTS_PER_KM: i64 = 1;

/// Sum of ticket prices; items without a price count as zero
pub fn ticket_total(items: &[CachedBudgetItem]) -> Money {
    items.iter().map(CachedBudgetItem::price).sum()
}

/// Accommodation amount from user input
///
/// Blank, non-numeric and negative input all yield zero.
pub fn accommodation_amount(input: &str) -> Money {
    Money::parse_or_zero(input)
}

/// Distance to the capital for a governorate name, zero when unknown
pub fn distance_km(governorate: &str) -> u32 {
    Governorate::from_name(governorate).map_or(0, |g| g.distance_km())
}

/// Transport fee for travelling from a governorate
///
/// `round(5 + 0.01 * km)` in whole currency units. Unknown or blank names
/// are treated as zero distance.
pub fn transport_fee(governorate: &str) -> Money {
    let km = i64::from(distance_km(governorate));
    Money::from_cents(TRANSPORT_BASE_CENTS + TRANSPORT_CENTS_PER_KM * km).round_to_units()
}

/// User choices on the budget screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetInputs {
    pub accommodation: Money,
    pub transport_enabled: bool,

    /// Origin governorate name; ignored while transport is disabled
    pub governorate: String,
}

impl BudgetInputs {
    /// Build inputs from raw form values
    pub fn from_form(accommodation: &str, transport_enabled: bool, governorate: &str) -> Self {
        Self {
            accommodation: accommodation_amount(accommodation),
            transport_enabled,
            governorate: governorate.trim().to_string(),
        }
    }

    /// The transport contribution for these inputs
    pub fn transport(&self) -> Money {
        if self.transport_enabled {
            transport_fee(&self.governorate)
        } else {
            Money::zero()
        }
    }
}

/// Breakdown of a computed budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSummary {
    pub tickets: Money,
    pub accommodation: Money,
    pub transport: Money,
    pub total: Money,
}

/// Compute the budget for the cached items and the given inputs
pub fn calculate(items: &[CachedBudgetItem], inputs: &BudgetInputs) -> BudgetSummary {
    let tickets = ticket_total(items);
    let accommodation = inputs.accommodation.clamp_non_negative();
    let transport = inputs.transport();

    BudgetSummary {
        tickets,
        accommodation,
        transport,
        total: tickets + accommodation + transport,
    }
}
