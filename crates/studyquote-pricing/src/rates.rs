//! Rate tables for the pricing engine.
//!
//! Every table is an immutable, process-wide constant. Entry order is the
//! order a calculator UI should render them in; it has no effect on pricing.

use serde::Serialize;

// ============================================================================
// Entry Types
// ============================================================================

/// A labelled table entry carrying a price multiplier.
pub trait RateEntry {
    /// The display label, also used as the lookup key.
    fn label(&self) -> &'static str;

    /// The dimensionless multiplier for this entry.
    fn multiplier(&self) -> f64;
}

/// Academic level of the student requesting help.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcademicLevel {
    /// Display label (e.g., "Undergraduate").
    pub label: &'static str,
    /// Seniority multiplier.
    pub multiplier: f64,
}

/// Urgency tier for the requested deadline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Deadline {
    /// Display label (e.g., "Urgent (1-3 Days)").
    pub label: &'static str,
    /// Urgency multiplier.
    pub multiplier: f64,
}

/// Size tier of a software project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectScale {
    /// Display label (e.g., "Full Project").
    pub label: &'static str,
    /// Nominal complexity score; used as the base price for software work.
    pub value: u32,
    /// Scale multiplier. Carried for display only.
    pub multiplier: f64,
}

/// The category of an assignment, selecting which scope measure applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Essay / General writing, scoped in words.
    Essay,
    /// STEM problem sets, scoped in number of problems.
    Stem,
    /// Software / Code, scoped by project scale tier.
    Software,
    /// Thesis / Research, scoped in pages.
    Thesis,
}

impl Category {
    /// Resolves an assignment-type label into its category.
    ///
    /// Matching is exact; an unknown label yields `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        lookup(&ASSIGNMENT_TYPES, label).map(|entry| entry.category)
    }

    /// Returns the canonical assignment-type label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Essay => "Essay / General",
            Self::Stem => "STEM Problems",
            Self::Software => "Software / Code",
            Self::Thesis => "Thesis / Research",
        }
    }

    /// Returns the unit the scope of this category is measured in.
    #[must_use]
    pub const fn unit(self) -> ScopeUnit {
        match self {
            Self::Essay => ScopeUnit::Words,
            Self::Stem => ScopeUnit::Problems,
            Self::Software => ScopeUnit::ProjectSize,
            Self::Thesis => ScopeUnit::Pages,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit a category's scope is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScopeUnit {
    /// Word count.
    #[serde(rename = "words")]
    Words,
    /// Number of problems.
    #[serde(rename = "problems")]
    Problems,
    /// Discrete project-scale tier.
    #[serde(rename = "project size")]
    ProjectSize,
    /// Page count.
    #[serde(rename = "pages")]
    Pages,
}

impl std::fmt::Display for ScopeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Words => write!(f, "words"),
            Self::Problems => write!(f, "problems"),
            Self::ProjectSize => write!(f, "project size"),
            Self::Pages => write!(f, "pages"),
        }
    }
}

/// Assignment type entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssignmentType {
    /// The category this label selects.
    #[serde(skip)]
    pub category: Category,
    /// Display label (e.g., "STEM Problems").
    pub label: &'static str,
    /// Category multiplier. Shown to users, never applied by the estimator.
    pub multiplier: f64,
    /// Scope unit for this category.
    pub unit: ScopeUnit,
}

macro_rules! impl_rate_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl RateEntry for $ty {
                fn label(&self) -> &'static str {
                    self.label
                }

                fn multiplier(&self) -> f64 {
                    self.multiplier
                }
            }
        )+
    };
}

impl_rate_entry!(AcademicLevel, Deadline, ProjectScale, AssignmentType);

// ============================================================================
// Tables
// ============================================================================

/// Academic levels, strictly increasing with seniority.
pub const ACADEMIC_LEVELS: [AcademicLevel; 4] = [
    AcademicLevel {
        label: "High School",
        multiplier: 1.0,
    },
    AcademicLevel {
        label: "Undergraduate",
        multiplier: 1.3,
    },
    AcademicLevel {
        label: "Graduate (Master)",
        multiplier: 1.6,
    },
    AcademicLevel {
        label: "Doctorate (PhD)",
        multiplier: 2.0,
    },
];

/// Assignment types, one per [`Category`].
pub const ASSIGNMENT_TYPES: [AssignmentType; 4] = [
    AssignmentType {
        category: Category::Essay,
        label: Category::Essay.label(),
        multiplier: 1.0,
        unit: ScopeUnit::Words,
    },
    AssignmentType {
        category: Category::Stem,
        label: Category::Stem.label(),
        multiplier: 1.2,
        unit: ScopeUnit::Problems,
    },
    AssignmentType {
        category: Category::Software,
        label: Category::Software.label(),
        multiplier: 1.5,
        unit: ScopeUnit::ProjectSize,
    },
    AssignmentType {
        category: Category::Thesis,
        label: Category::Thesis.label(),
        multiplier: 2.0,
        unit: ScopeUnit::Pages,
    },
];

/// Deadline tiers, strictly increasing with urgency.
pub const DEADLINES: [Deadline; 4] = [
    Deadline {
        label: "Flexible (> 7 Days)",
        multiplier: 1.0,
    },
    Deadline {
        label: "Standard (3-7 Days)",
        multiplier: 1.2,
    },
    Deadline {
        label: "Urgent (1-3 Days)",
        multiplier: 1.5,
    },
    Deadline {
        label: "Emergency (< 24h)",
        multiplier: 2.0,
    },
];

/// Software project scales, smallest first.
pub const PROJECT_SCALES: [ProjectScale; 4] = [
    ProjectScale {
        label: "Mini-Script",
        value: 30,
        multiplier: 1.0,
    },
    ProjectScale {
        label: "Small App",
        value: 80,
        multiplier: 2.5,
    },
    ProjectScale {
        label: "Full Project",
        value: 200,
        multiplier: 6.0,
    },
    ProjectScale {
        label: "Industrial",
        value: 500,
        multiplier: 15.0,
    },
];

// ============================================================================
// Lookup
// ============================================================================

/// Finds the entry whose label matches exactly.
pub fn lookup<'a, T: RateEntry>(table: &'a [T], label: &str) -> Option<&'a T> {
    table.iter().find(|entry| entry.label() == label)
}

/// Returns the multiplier for `label`, or `default` when the label is not in
/// the table.
pub fn lookup_or<T: RateEntry>(table: &[T], label: &str, default: f64) -> f64 {
    lookup(table, label).map_or_else(
        || {
            tracing::debug!(label, default, "Unmatched rate label, using default multiplier");
            default
        },
        RateEntry::multiplier,
    )
}

/// Resolves a project scale by label, falling back to the smallest tier.
pub fn project_scale_or_first(label: Option<&str>) -> &'static ProjectScale {
    let first = &PROJECT_SCALES[0];
    let Some(label) = label else {
        return first;
    };
    lookup(&PROJECT_SCALES, label).unwrap_or_else(|| {
        tracing::debug!(label, fallback = first.label, "Unmatched project scale");
        first
    })
}

// ============================================================================
// Calculator Metadata
// ============================================================================

/// Input range a calculator UI should offer for a scope unit.
///
/// Advisory only: the estimator accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeRange {
    /// The unit this range applies to.
    pub unit: ScopeUnit,
    /// Smallest selectable value.
    pub min: i64,
    /// Largest selectable value.
    pub max: i64,
    /// Slider step.
    pub step: i64,
}

/// Slider ranges for the numeric scope units.
pub const SCOPE_RANGES: [ScopeRange; 3] = [
    ScopeRange {
        unit: ScopeUnit::Words,
        min: 250,
        max: 10_000,
        step: 250,
    },
    ScopeRange {
        unit: ScopeUnit::Problems,
        min: 1,
        max: 30,
        step: 1,
    },
    ScopeRange {
        unit: ScopeUnit::Pages,
        min: 5,
        max: 100,
        step: 5,
    },
];

/// Initial selections of the cost calculator widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorDefaults {
    /// Preselected academic level.
    pub level: &'static str,
    /// Preselected assignment type.
    #[serde(rename = "type")]
    pub category: &'static str,
    /// Preselected deadline tier.
    pub urgency: &'static str,
    /// Initial word count.
    pub words: i64,
    /// Initial problem count.
    pub problems: i64,
    /// Initial page count.
    pub pages: i64,
    /// Preselected project scale.
    pub project_scale: &'static str,
}

/// The calculator's starting state.
pub const CALCULATOR_DEFAULTS: CalculatorDefaults = CalculatorDefaults {
    level: ACADEMIC_LEVELS[1].label,
    category: Category::Essay.label(),
    urgency: DEADLINES[1].label,
    words: crate::params::DEFAULT_WORDS,
    problems: crate::params::DEFAULT_PROBLEMS,
    pages: crate::params::DEFAULT_PAGES,
    project_scale: PROJECT_SCALES[1].label,
};

/// Snapshot of every table plus calculator metadata, for UIs that render
/// the selectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSheet {
    /// See [`ACADEMIC_LEVELS`].
    pub academic_levels: &'static [AcademicLevel],
    /// See [`ASSIGNMENT_TYPES`].
    pub assignment_types: &'static [AssignmentType],
    /// See [`DEADLINES`].
    pub deadlines: &'static [Deadline],
    /// See [`PROJECT_SCALES`].
    pub project_scales: &'static [ProjectScale],
    /// See [`SCOPE_RANGES`].
    pub scope_ranges: &'static [ScopeRange],
    /// See [`CALCULATOR_DEFAULTS`].
    pub defaults: CalculatorDefaults,
}

impl RateSheet {
    /// Returns the rate sheet backed by the built-in tables.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            academic_levels: &ACADEMIC_LEVELS,
            assignment_types: &ASSIGNMENT_TYPES,
            deadlines: &DEADLINES,
            project_scales: &PROJECT_SCALES,
            scope_ranges: &SCOPE_RANGES,
            defaults: CALCULATOR_DEFAULTS,
        }
    }
}

impl Default for RateSheet {
    fn default() -> Self {
        Self::builtin()
    }
}
