//! Payout fee arithmetic. Everything here is pure `Decimal` math.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A percentage deduction that can be switched off.
/// Field names stay snake_case, they are read from the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeeToggle {
    pub enabled: bool,
    pub rate_percent: Decimal,
}

impl FeeToggle {
    #[must_use]
    pub const fn on(rate_percent: Decimal) -> Self {
        Self {
            enabled: true,
            rate_percent,
        }
    }

    #[must_use]
    pub const fn off(rate_percent: Decimal) -> Self {
        Self {
            enabled: false,
            rate_percent,
        }
    }

    /// Fee on `base`, or zero when disabled. The rate is not looked at when off.
    #[must_use]
    pub fn apply(&self, base: Decimal) -> Decimal {
        if !self.enabled {
            return Decimal::ZERO;
        }
        round_money(base * self.rate_percent / HUNDRED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeeSettings {
    pub commission: FeeToggle,
    pub processing_charge: FeeToggle,
    /// Charged on the sum of the other fees, not on the base amount.
    pub gst: FeeToggle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutBreakdown {
    pub final_amount: Decimal,
    pub commission: Decimal,
    pub processing_charge: Decimal,
    pub gst: Decimal,
    pub prior_payouts: Decimal,
    pub total_deductions: Decimal,
    /// Not clamped: a negative value means prior payouts exceeded the balance.
    pub net_amount: Decimal,
}

impl PayoutBreakdown {
    #[must_use]
    pub fn has_balance(&self) -> bool {
        self.net_amount > Decimal::ZERO
    }
}

#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

const CURRENCY_SYMBOLS: [char; 5] = ['₹', '$', '€', '£', '¥'];

/// Parses a user-facing currency string such as `"₹10,000.50"`.
/// Currency symbols, grouping commas and whitespace are dropped; anything else
/// that is not a plain decimal number counts as zero.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == ',' || CURRENCY_SYMBOLS.contains(c)))
        .collect();
    let digits = cleaned.strip_prefix('-').unwrap_or(&cleaned);
    let plain = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|c| *c == '.').count() <= 1;
    if !plain {
        return Decimal::ZERO;
    }
    cleaned.parse().unwrap_or(Decimal::ZERO)
}

#[must_use]
pub fn calculate_payout(
    final_amount: Decimal,
    settings: &FeeSettings,
    prior_payouts: Decimal,
) -> PayoutBreakdown {
    let commission = settings.commission.apply(final_amount);
    let processing_charge = settings.processing_charge.apply(final_amount);
    let gst = settings.gst.apply(commission + processing_charge);
    let total_deductions = commission + processing_charge + gst + prior_payouts;

    PayoutBreakdown {
        final_amount,
        commission,
        processing_charge,
        gst,
        prior_payouts,
        total_deductions,
        net_amount: final_amount - total_deductions,
    }
}
