use serde::Serialize;
use shared_types::{NewProject, Project};

use super::{decode_records, Collection, RecordStore, Snapshot, StoreError};

#[derive(Serialize)]
struct ProjectDocument<'a> {
    #[serde(flatten)]
    project: &'a NewProject,
    created_at: String,
    updated_at: String,
}

/// Write a validated project and return its id
pub async fn add_project(store: &RecordStore, project: &NewProject) -> Result<String, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();
    let document = ProjectDocument {
        project,
        created_at: now.clone(),
        updated_at: now,
    };
    store.push(Collection::Projects, &document).await
}

pub fn decode_projects(snapshot: &Snapshot) -> Vec<Project> {
    decode_records(snapshot, "project")
}

pub async fn list_projects(store: &RecordStore) -> Result<Vec<Project>, StoreError> {
    let snapshot = store.snapshot(Collection::Projects).await?;
    Ok(decode_projects(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::test_store;
    use shared_types::{ProjectPriority, ProjectStatus, ProjectType};

    fn new_project(name: &str, status: ProjectStatus, budget: f64) -> NewProject {
        NewProject {
            project_name: name.to_string(),
            client_id: "client-1".to_string(),
            description: "A project description".to_string(),
            project_type: ProjectType::Design,
            status,
            priority: ProjectPriority::Medium,
            start_date: "2026-05-01".to_string(),
            end_date: "2026-06-01".to_string(),
            budget,
            team_members: vec!["Ana".to_string()],
            tags: vec![],
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_project_round_trips_through_store() {
        let (_dir, store) = test_store();
        let id = add_project(&store, &new_project("Site", ProjectStatus::InProgress, 250.0))
            .await
            .unwrap();

        let projects = list_projects(&store).await.unwrap();
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.id, id);
        assert_eq!(project.status, "in-progress");
        assert_eq!(project.status().unwrap(), ProjectStatus::InProgress);
        assert_eq!(project.project_type, "design");
        assert_eq!(project.budget, 250.0);
        assert!(chrono::DateTime::parse_from_rfc3339(&project.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_foreign_status_survives_decoding() {
        let (_dir, store) = test_store();
        store
            .push(
                Collection::Projects,
                &serde_json::json!({
                    "project_name": "Legacy",
                    "client_id": "c",
                    "status": "archived",
                    "priority": "low",
                    "budget": 40.0,
                    "notes": null,
                    "created_at": "2025-01-01T00:00:00Z"
                }),
            )
            .await
            .unwrap();

        let projects = list_projects(&store).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert!(projects[0].status().is_err());
    }

    #[tokio::test]
    async fn test_documents_missing_fields_are_skipped() {
        let (_dir, store) = test_store();
        store
            .push(Collection::Projects, &serde_json::json!({"project_name": "Half"}))
            .await
            .unwrap();

        assert!(list_projects(&store).await.unwrap().is_empty());
    }
}
