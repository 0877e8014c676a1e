//! Session descriptor and navigation seam handed to each view.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only description of the signed-in provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Session {
    /// Display name, without the "Dr." prefix
    pub provider_name: Option<String>,
}

impl Session {
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: Some(provider_name.into()),
        }
    }

    /// Roster page greeting.
    pub fn greeting(&self) -> String {
        format!(
            "Welcome back, Dr. {}",
            self.provider_name.as_deref().unwrap_or_default()
        )
    }
}

/// Places a view can send the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The provider's roster
    Roster,
    /// One patient's overview
    PatientDetail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Roster => "/provider/dashboard".to_string(),
            Route::PatientDetail(id) => format!("/provider/patients/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Routing facility owned by the host application.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only logs, for hosts without routing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "Navigation requested");
    }
}
