use crate::models::{BudgetTier, PriceQuote};

/// Tier baselines are quoted for a trip of this many days.
pub const BASELINE_DAYS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRate {
    pub baseline_total: u64,
    pub margin_percent: u64,
}

pub fn tier_rate(budget: BudgetTier) -> TierRate {
    match budget {
        BudgetTier::Economique => TierRate {
            baseline_total: 30_000,
            margin_percent: 10,
        },
        BudgetTier::Confort => TierRate {
            baseline_total: 40_000,
            margin_percent: 12,
        },
        BudgetTier::Luxe => TierRate {
            baseline_total: 55_000,
            margin_percent: 15,
        },
    }
}

/// `baseline / 5 * days * (1 + margin)`, rounded half-up. Callers clamp `duration_days` to at
/// least one; this function does not.
pub fn calculate_price(budget: BudgetTier, duration_days: u32) -> u64 {
    let rate = tier_rate(budget);
    let numerator = rate.baseline_total * u64::from(duration_days) * (100 + rate.margin_percent);
    let denominator = BASELINE_DAYS * 100;
    (numerator + denominator / 2) / denominator
}

pub fn quote(budget: BudgetTier, duration_days: u32) -> PriceQuote {
    PriceQuote {
        amount: calculate_price(budget, duration_days),
        budget,
        duration_days,
    }
}
