//! StudyQuote Server
//!
//! Stateless HTTP front for the pricing engine, plus the configuration and
//! portal selection of a marketplace deployment.

pub mod api;
pub mod config;
pub mod error;
pub mod portal;
pub mod server;

pub use api::{
    create_router, AppState, ErrorResponse, EstimateResponse, HealthResponse, ReviewRequest,
    ValidateRequest,
};
pub use config::{Config, ENV_HOST, ENV_PORT, ENV_PORTAL};
pub use error::{QuoteError, Result};
pub use portal::{Portal, PortalInfo};
