//! Budget validation and the submission advisor.
//!
//! [`validate`] classifies a user-proposed price against the estimate. The
//! classification is advisory: [`review`] never rejects a price, it either
//! lets the submission proceed or asks the user to confirm, and a confirmed
//! price is resubmitted with `force` set so it is not checked again.

use serde::{Deserialize, Serialize};

/// Relative tolerance around the estimate inside which a price is fair.
pub const FAIR_BAND_TOLERANCE: f64 = 0.15;

/// Classification of a proposed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Within the fair band (bounds inclusive).
    Fair,
    /// Below the fair band.
    Low,
    /// Above the fair band.
    High,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fair => write!(f, "fair"),
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Outcome of comparing a proposed price with the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCheck {
    /// Where the proposed price falls relative to the fair band.
    pub status: BudgetStatus,
    /// The estimate, offered as the alternative price.
    pub suggested_price: i64,
    /// Distance from the estimate: `|user_price - estimate|` for `low`,
    /// `user_price - estimate` otherwise. Non-negative outside the band as
    /// long as the estimate is non-negative.
    pub diff: f64,
}

impl BudgetCheck {
    /// Returns `true` if no prompt is needed.
    #[must_use]
    pub const fn is_fair(&self) -> bool {
        matches!(self.status, BudgetStatus::Fair)
    }
}

/// Classifies `user_price` against `estimate`.
///
/// A zero estimate has a zero-width band, so any nonzero price is `low` or
/// `high`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn validate(user_price: f64, estimate: i64) -> BudgetCheck {
    let estimate_f = estimate as f64;
    let threshold = estimate_f * FAIR_BAND_TOLERANCE;
    let diff = user_price - estimate_f;

    let (status, diff) = if diff < -threshold {
        (BudgetStatus::Low, diff.abs())
    } else if diff > threshold {
        (BudgetStatus::High, diff)
    } else {
        (BudgetStatus::Fair, diff)
    };

    BudgetCheck {
        status,
        suggested_price: estimate,
        diff,
    }
}

// ============================================================================
// Submission Advisor
// ============================================================================

/// What the order form should do with a proposed price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum Review {
    /// Submit with this price.
    Proceed {
        /// The price to submit.
        price: f64,
    },
    /// Ask the user to keep their price or take the suggestion.
    Confirm {
        /// The failed check to show the user.
        check: BudgetCheck,
    },
}

/// The user's answer to a [`Review::Confirm`] prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptChoice {
    /// Submit the original price unchanged.
    KeepMine,
    /// Submit the suggested price instead.
    AcceptSuggested,
}

/// Reviews a proposed price before submission.
///
/// With `force` set the price is accepted without validation.
#[must_use]
pub fn review(user_price: f64, estimate: i64, force: bool) -> Review {
    if force {
        tracing::debug!(user_price, "Forced submission, skipping budget check");
        return Review::Proceed { price: user_price };
    }

    let check = validate(user_price, estimate);
    if check.is_fair() {
        Review::Proceed { price: user_price }
    } else {
        tracing::debug!(
            user_price,
            estimate,
            status = %check.status,
            diff = check.diff,
            "Budget outside fair band, confirmation required"
        );
        Review::Confirm { check }
    }
}

/// Applies the user's answer to a confirmation prompt.
///
/// Always returns [`Review::Proceed`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn resolve(user_price: f64, check: &BudgetCheck, choice: PromptChoice) -> Review {
    match choice {
        PromptChoice::KeepMine => review(user_price, check.suggested_price, true),
        PromptChoice::AcceptSuggested => Review::Proceed {
            price: check.suggested_price as f64,
        },
    }
}
