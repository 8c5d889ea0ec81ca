//! StudyQuote Pricing
//!
//! Rate tables, the price estimator, and the budget validator used by the
//! tutoring marketplace's cost calculator and order form. Everything here is
//! pure and synchronous.

pub mod budget;
pub mod estimator;
pub mod params;
pub mod rates;

pub use budget::{
    resolve, review, validate, BudgetCheck, BudgetStatus, PromptChoice, Review,
    FAIR_BAND_TOLERANCE,
};
pub use estimator::{
    estimate, quote, Quote, DEFAULT_LEVEL_MULTIPLIER, DEFAULT_URGENCY_MULTIPLIER,
};
pub use params::{PricingParams, Scope, DEFAULT_PAGES, DEFAULT_PROBLEMS, DEFAULT_WORDS};
pub use rates::{
    lookup, lookup_or, project_scale_or_first, AcademicLevel, AssignmentType, Category,
    Deadline, ProjectScale, RateEntry, RateSheet, ScopeRange, ScopeUnit, ACADEMIC_LEVELS,
    ASSIGNMENT_TYPES, CALCULATOR_DEFAULTS, DEADLINES, PROJECT_SCALES, SCOPE_RANGES,
};
