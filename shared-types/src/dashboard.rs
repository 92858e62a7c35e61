use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Navigation card on the dashboard landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub route: String,
}

impl DashboardCard {
    fn new(id: &str, title: &str, description: &str, route: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            route: route.to_string(),
        }
    }

    /// Cards shown to every signed-in user
    pub fn defaults() -> Vec<DashboardCard> {
        vec![
            DashboardCard::new(
                "add-client",
                "Add Client",
                "Create and onboard new clients to your portfolio",
                "/add-client",
            ),
            DashboardCard::new(
                "view-clients",
                "View Clients",
                "Manage and explore your client database",
                "/clients",
            ),
            DashboardCard::new(
                "add-project",
                "Add Projects",
                "Launch new projects and track progress",
                "/add-project",
            ),
            DashboardCard::new(
                "view-projects",
                "View Projects",
                "Monitor and manage all active projects",
                "/projects",
            ),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardResponse {
    pub user_email: String,
    pub cards: Vec<DashboardCard>,
}
