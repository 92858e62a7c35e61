use serde::{Deserialize, Serialize};

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod project;
pub mod validation;

pub use auth::{AuthCredentials, AuthSession, AuthUser};
pub use client::{
    Client, ClientOption, ClientOptionsResponse, ClientsResponse, CreateClientRequest, NewClient,
};
pub use dashboard::{DashboardCard, DashboardResponse};
pub use project::{
    CreateProjectRequest, CreatedResponse, NewProject, Project, ProjectPriority, ProjectStatus,
    ProjectType, ProjectsView, SortKey, StatusCount, StatusFilter,
};
pub use validation::{ValidationErrorResponse, ValidationErrors};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A stored value that falls outside its closed set of allowed values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized {kind}: {value:?}")]
pub struct UnrecognizedEnum {
    pub kind: &'static str,
    pub value: String,
}

impl UnrecognizedEnum {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
