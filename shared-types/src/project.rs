use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::UnrecognizedEnum;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Review,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Review,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Review => "review",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// Label shown on the status filter bar
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Review => "Review",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }

    /// Planning and in-progress projects count as active. Review and on-hold do not.
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::Planning | ProjectStatus::InProgress)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnrecognizedEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnrecognizedEnum::new("status", s))
    }
}

/// Project priority, ordered low < medium < high < urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl ProjectPriority {
    pub const ALL: [ProjectPriority; 4] = [
        ProjectPriority::Low,
        ProjectPriority::Medium,
        ProjectPriority::High,
        ProjectPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPriority::Low => "low",
            ProjectPriority::Medium => "medium",
            ProjectPriority::High => "high",
            ProjectPriority::Urgent => "urgent",
        }
    }

    /// Sort rank, higher sorts first
    pub fn rank(&self) -> u8 {
        match self {
            ProjectPriority::Low => 1,
            ProjectPriority::Medium => 2,
            ProjectPriority::High => 3,
            ProjectPriority::Urgent => 4,
        }
    }
}

impl fmt::Display for ProjectPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectPriority {
    type Err = UnrecognizedEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| UnrecognizedEnum::new("priority", s))
    }
}

/// Kind of work a project covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebDevelopment,
    MobileApp,
    Design,
    Consulting,
    Marketing,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::WebDevelopment,
        ProjectType::MobileApp,
        ProjectType::Design,
        ProjectType::Consulting,
        ProjectType::Marketing,
        ProjectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::WebDevelopment => "web-development",
            ProjectType::MobileApp => "mobile-app",
            ProjectType::Design => "design",
            ProjectType::Consulting => "consulting",
            ProjectType::Marketing => "marketing",
            ProjectType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::WebDevelopment => "Web Development",
            ProjectType::MobileApp => "Mobile App",
            ProjectType::Design => "Design",
            ProjectType::Consulting => "Consulting",
            ProjectType::Marketing => "Marketing",
            ProjectType::Other => "Other",
        }
    }
}

impl FromStr for ProjectType {
    type Err = UnrecognizedEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|project_type| project_type.as_str() == s)
            .ok_or_else(|| UnrecognizedEnum::new("project_type", s))
    }
}

/// Project record as held by the record store.
///
/// Status, priority and project type are kept as the raw strings the store
/// returned. Use [`Project::status`] and [`Project::priority`] to parse them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Project {
    pub id: String,
    pub project_name: String,
    pub client_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_type: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub budget: f64,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Project {
    pub fn status(&self) -> Result<ProjectStatus, UnrecognizedEnum> {
        self.status.parse()
    }

    pub fn priority(&self) -> Result<ProjectPriority, UnrecognizedEnum> {
        self.priority.parse()
    }

    pub fn project_type(&self) -> Result<ProjectType, UnrecognizedEnum> {
        self.project_type.parse()
    }
}

/// Raw add-project form input, exactly as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub client_id: String,
    pub description: String,
    pub project_type: String,
    pub status: String,
    pub priority: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// Validated project ready to be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    pub client_id: String,
    pub description: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub team_members: Vec<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// Status filter selected on the projects page: `all` or a single status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Projects",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// `all` followed by every status, in filter bar order
    pub fn options() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(ProjectStatus::ALL.into_iter().map(StatusFilter::Only))
            .collect()
    }
}

impl FromStr for StatusFilter {
    type Err = UnrecognizedEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<ProjectStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| UnrecognizedEnum::new("status filter", s))
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = UnrecognizedEnum;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.as_str().to_string()
    }
}

/// Sort order selected on the projects page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Name,
    #[default]
    Date,
    Budget,
    Priority,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Budget => "budget",
            SortKey::Priority => "priority",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnrecognizedEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [SortKey::Name, SortKey::Date, SortKey::Budget, SortKey::Priority]
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnrecognizedEnum::new("sort key", s))
    }
}

/// One button of the status filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCount {
    pub key: String,
    pub label: String,
    pub count: usize,
}

/// Derived view of the projects page for one filter and sort selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectsView {
    pub projects: Vec<Project>,
    pub total: usize,
    pub status_counts: Vec<StatusCount>,
    pub total_budget: f64,
    pub active_count: usize,
    /// Records whose status is outside the known set. They are part of
    /// `total` and `total_budget` but of no status bucket.
    pub unrecognized_count: usize,
}

/// Response after a record was written
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: ProjectStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(status, ProjectStatus::OnHold);
    }

    #[test]
    fn test_status_parse_matches_serde_names() {
        for status in ProjectStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_unrecognized() {
        let err = "archived".parse::<ProjectStatus>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert_eq!(err.value, "archived");
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(ProjectPriority::Urgent.rank() > ProjectPriority::High.rank());
        assert!(ProjectPriority::High.rank() > ProjectPriority::Medium.rank());
        assert!(ProjectPriority::Medium.rank() > ProjectPriority::Low.rank());
    }

    #[test]
    fn test_status_filter_round_trip() {
        let filter: StatusFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(filter, StatusFilter::All);

        let filter: StatusFilter = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(filter, StatusFilter::Only(ProjectStatus::Review));
        assert_eq!(serde_json::to_string(&filter).unwrap(), "\"review\"");

        assert!(serde_json::from_str::<StatusFilter>("\"done\"").is_err());
    }

    #[test]
    fn test_filter_options_order() {
        let keys: Vec<&str> = StatusFilter::options().iter().map(|f| f.as_str()).collect();
        assert_eq!(
            keys,
            vec!["all", "planning", "in-progress", "review", "completed", "on-hold", "cancelled"]
        );
    }

    #[test]
    fn test_project_keeps_raw_status() {
        let json = r#"{
            "id": "p1",
            "project_name": "Site",
            "client_id": "c1",
            "status": "archived",
            "priority": "high",
            "budget": 10.0,
            "notes": null,
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.status().is_err());
        assert_eq!(project.priority().unwrap(), ProjectPriority::High);
        assert!(project.team_members.is_empty());
    }
}
