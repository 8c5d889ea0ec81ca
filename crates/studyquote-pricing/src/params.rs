//! Pricing inputs.
//!
//! [`PricingParams`] is the loose wire shape a calculator or API client
//! sends. [`Scope`] is the resolved form the estimator works on: exactly one
//! scope payload, chosen by the assignment type.

use serde::{Deserialize, Serialize};

use crate::rates::{project_scale_or_first, Category, ProjectScale};

/// Word count assumed when an essay request omits `words`.
pub const DEFAULT_WORDS: i64 = 1000;

/// Problem count assumed when a STEM request omits `problems`.
pub const DEFAULT_PROBLEMS: i64 = 5;

/// Page count assumed when a thesis request omits `pages`.
pub const DEFAULT_PAGES: i64 = 10;

/// Task-scope parameters as submitted by a client.
///
/// Only the scope field matching `category` is read; the others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingParams {
    /// Academic level label.
    pub level: String,
    /// Assignment type label.
    #[serde(rename = "type")]
    pub category: String,
    /// Deadline label.
    pub urgency: String,
    /// Word count for essays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<i64>,
    /// Number of problems for STEM work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<i64>,
    /// Page count for theses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    /// Project scale label for software work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_scale: Option<String>,
}

impl PricingParams {
    /// Creates params with no scope fields set.
    #[must_use]
    pub fn new(
        level: impl Into<String>,
        category: impl Into<String>,
        urgency: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            category: category.into(),
            urgency: urgency.into(),
            ..Default::default()
        }
    }

    /// Sets the word count.
    #[must_use]
    pub fn with_words(mut self, words: i64) -> Self {
        self.words = Some(words);
        self
    }

    /// Sets the problem count.
    #[must_use]
    pub fn with_problems(mut self, problems: i64) -> Self {
        self.problems = Some(problems);
        self
    }

    /// Sets the page count.
    #[must_use]
    pub fn with_pages(mut self, pages: i64) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Sets the project scale label.
    #[must_use]
    pub fn with_project_scale(mut self, scale: impl Into<String>) -> Self {
        self.project_scale = Some(scale.into());
        self
    }

    /// Resolves the active scope for this request.
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::from_params(self)
    }
}

/// The category-specific volume of work, with exactly one payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scope {
    /// Essay / General.
    Essay {
        /// Word count.
        words: i64,
    },
    /// STEM Problems.
    Stem {
        /// Number of problems.
        problems: i64,
    },
    /// Software / Code.
    Software {
        /// Resolved project tier.
        scale: &'static ProjectScale,
    },
    /// Thesis / Research.
    Thesis {
        /// Page count.
        pages: i64,
    },
    /// The assignment type label matched no known category.
    Unrecognized,
}

impl Scope {
    /// Picks the scope payload selected by `params.category`, applying the
    /// per-category defaults for absent fields.
    #[must_use]
    pub fn from_params(params: &PricingParams) -> Self {
        match Category::from_label(&params.category) {
            Some(Category::Essay) => Self::Essay {
                words: params.words.unwrap_or(DEFAULT_WORDS),
            },
            Some(Category::Stem) => Self::Stem {
                problems: params.problems.unwrap_or(DEFAULT_PROBLEMS),
            },
            Some(Category::Software) => Self::Software {
                scale: project_scale_or_first(params.project_scale.as_deref()),
            },
            Some(Category::Thesis) => Self::Thesis {
                pages: params.pages.unwrap_or(DEFAULT_PAGES),
            },
            None => {
                tracing::debug!(
                    category = %params.category,
                    "Unrecognized assignment type, base price is zero"
                );
                Self::Unrecognized
            }
        }
    }

    /// Returns the category, or `None` for [`Scope::Unrecognized`].
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Essay { .. } => Some(Category::Essay),
            Self::Stem { .. } => Some(Category::Stem),
            Self::Software { .. } => Some(Category::Software),
            Self::Thesis { .. } => Some(Category::Thesis),
            Self::Unrecognized => None,
        }
    }

    /// Base price before the level and urgency multipliers.
    ///
    /// Software work is priced from the tier's `value`; its multiplier is not
    /// applied.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn base_price(&self) -> f64 {
        match self {
            Self::Essay { words } => (*words as f64 / 250.0) * 8.0,
            Self::Stem { problems } => *problems as f64 * 10.0,
            Self::Software { scale } => f64::from(scale.value),
            Self::Thesis { pages } => *pages as f64 * 25.0,
            Self::Unrecognized => 0.0,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Essay { words } => write!(f, "{words} words"),
            Self::Stem { problems } => write!(f, "{problems} problems"),
            Self::Software { scale } => write!(f, "{}", scale.label),
            Self::Thesis { pages } => write!(f, "{pages} pages"),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_defaults_when_absent() {
        let essay = PricingParams::new("High School", "Essay / General", "Flexible (> 7 Days)");
        assert_eq!(essay.scope(), Scope::Essay { words: 1000 });

        let stem = PricingParams::new("High School", "STEM Problems", "Flexible (> 7 Days)");
        assert_eq!(stem.scope(), Scope::Stem { problems: 5 });

        let thesis = PricingParams::new("High School", "Thesis / Research", "Flexible (> 7 Days)");
        assert_eq!(thesis.scope(), Scope::Thesis { pages: 10 });

        let software = PricingParams::new("High School", "Software / Code", "Flexible (> 7 Days)");
        match software.scope() {
            Scope::Software { scale } => assert_eq!(scale.label, "Mini-Script"),
            other => panic!("expected software scope, got {other:?}"),
        }
    }

    #[test]
    fn test_scope_reads_only_matching_field() {
        let params = PricingParams::new("Undergraduate", "STEM Problems", "Standard (3-7 Days)")
            .with_words(5000)
            .with_pages(80)
            .with_problems(12);
        assert_eq!(params.scope(), Scope::Stem { problems: 12 });
    }

    #[test]
    fn test_zero_scope_is_not_defaulted() {
        let params = PricingParams::new("Undergraduate", "Essay / General", "Standard (3-7 Days)")
            .with_words(0);
        assert_eq!(params.scope(), Scope::Essay { words: 0 });
        assert_eq!(params.scope().base_price(), 0.0);
    }

    #[test]
    fn test_unrecognized_category() {
        let params = PricingParams::new("Undergraduate", "Podcast", "Standard (3-7 Days)");
        let scope = params.scope();
        assert_eq!(scope, Scope::Unrecognized);
        assert_eq!(scope.category(), None);
        assert_eq!(scope.base_price(), 0.0);
    }

    #[test]
    fn test_base_price_formulas() {
        assert_eq!(Scope::Essay { words: 250 }.base_price(), 8.0);
        assert_eq!(Scope::Essay { words: 1000 }.base_price(), 32.0);
        assert_eq!(Scope::Stem { problems: 7 }.base_price(), 70.0);
        assert_eq!(Scope::Thesis { pages: 50 }.base_price(), 1250.0);
        assert_eq!(Scope::Thesis { pages: -2 }.base_price(), -50.0);
    }

    #[test]
    fn test_params_deserialization() {
        let json = r#"{
            "level": "Undergraduate",
            "type": "Software / Code",
            "urgency": "Standard (3-7 Days)",
            "projectScale": "Full Project"
        }"#;
        let params: PricingParams = serde_json::from_str(json).unwrap();

        assert_eq!(params.category, "Software / Code");
        assert_eq!(params.project_scale.as_deref(), Some("Full Project"));
        assert_eq!(params.words, None);
    }

    #[test]
    fn test_params_missing_level_rejected() {
        let json = r#"{"type": "Essay / General", "urgency": "Flexible (> 7 Days)"}"#;
        let result: Result<PricingParams, _> = serde_json::from_str(json);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("level"));
    }

    #[test]
    fn test_params_serialization_skips_absent_scope() {
        let params = PricingParams::new("High School", "Essay / General", "Flexible (> 7 Days)")
            .with_words(250);
        let json = serde_json::to_string(&params).unwrap();

        assert!(json.contains(r#""type":"Essay / General""#));
        assert!(json.contains(r#""words":250"#));
        assert!(!json.contains("pages"));
        assert!(!json.contains("projectScale"));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Essay { words: 750 }.to_string(), "750 words");
        assert_eq!(Scope::Unrecognized.to_string(), "unrecognized");
    }
}
