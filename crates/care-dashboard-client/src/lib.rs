//! Provider-facing dashboard client.
//!
//! Wraps the provider endpoints of the care API behind [`ProviderApi`] and
//! drives the two dashboard views on top of it:
//!
//! - [`PatientListView`]: the provider's roster with local search, status
//!   filter and summary counters
//! - [`PatientDetailView`]: one patient's overview plus the compliance
//!   update workflow
//!
//! [`HttpProviderApi`] is the production collaborator; [`mock`] holds an
//! in-memory one for tests and demos.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod render;
pub mod session;
pub mod views;

pub use api::{ApiError, ApiResult, ProviderApi};
pub use config::{ClientConfig, ConfigError};
pub use error::{DashboardError, DashboardResult};
pub use http::HttpProviderApi;
pub use session::{LogNavigator, Navigator, Route, Session};
pub use views::{
    DetailPhase, PatientDetailView, PatientListView, UpdateOutcome, UpdateState,
};
