//! Price estimation.
//!
//! `estimate = round(base_price(scope) * level_multiplier * urgency_multiplier)`
//!
//! The estimator is total: unknown labels fall back to documented defaults
//! and scope values are used as given, without range checks.

use serde::Serialize;

use crate::params::{PricingParams, Scope};
use crate::rates::{lookup_or, ACADEMIC_LEVELS, DEADLINES};

/// Level multiplier used when the level label is not in [`ACADEMIC_LEVELS`].
pub const DEFAULT_LEVEL_MULTIPLIER: f64 = 1.3;

/// Urgency multiplier used when the urgency label is not in [`DEADLINES`].
pub const DEFAULT_URGENCY_MULTIPLIER: f64 = 1.2;

/// Itemised result of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Base price from the scope formula.
    pub base_price: f64,
    /// Resolved academic-level multiplier.
    pub level_multiplier: f64,
    /// Resolved deadline multiplier.
    pub urgency_multiplier: f64,
    /// Final rounded price.
    pub estimated_price: i64,
}

/// Computes the itemised quote for `params`.
#[must_use]
pub fn quote(params: &PricingParams) -> Quote {
    let level_multiplier = lookup_or(&ACADEMIC_LEVELS, &params.level, DEFAULT_LEVEL_MULTIPLIER);
    let urgency_multiplier = lookup_or(&DEADLINES, &params.urgency, DEFAULT_URGENCY_MULTIPLIER);
    let scope = Scope::from_params(params);
    let base_price = scope.base_price();

    let estimated_price = round_half_up(base_price * level_multiplier * urgency_multiplier);

    tracing::debug!(
        %scope,
        base_price,
        level_multiplier,
        urgency_multiplier,
        estimated_price,
        "Computed estimate"
    );

    Quote {
        base_price,
        level_multiplier,
        urgency_multiplier,
        estimated_price,
    }
}

/// Computes the recommended price for `params`.
#[must_use]
pub fn estimate(params: &PricingParams) -> i64 {
    quote(params).estimated_price
}

/// Rounds to the nearest integer, halves toward positive infinity.
///
/// `-2.5` rounds to `-2`, matching how calculator UIs display prices.
/// Values beyond the `i64` range saturate.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `round` takes negative halves away from zero
    let rounded = if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    };
    rounded as i64
}
