use actix_web::{web, HttpResponse, Result as ActixResult};
use chrono::Utc;
use serde::Deserialize;
use shared_types::{CreateProjectRequest, CreatedResponse, SortKey, StatusFilter, ValidationErrors};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::auth::AuthenticatedUser;
use crate::store::projects as store_projects;
use crate::store::{Collection, RecordStore, Snapshot};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub status: Option<StatusFilter>,
    pub sort: Option<SortKey>,
}

impl ProjectsQuery {
    fn selection(&self) -> (StatusFilter, SortKey) {
        (self.status.unwrap_or_default(), self.sort.unwrap_or_default())
    }
}

pub async fn list_projects(
    _caller: AuthenticatedUser,
    store: web::Data<Arc<RecordStore>>,
    query: web::Query<ProjectsQuery>,
) -> ActixResult<HttpResponse> {
    let projects = store_projects::list_projects(&store)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    let (filter, sort_key) = query.selection();
    Ok(HttpResponse::Ok().json(views::derive_view(&projects, filter, sort_key)))
}

fn view_event(snapshot: &Snapshot, filter: StatusFilter, sort_key: SortKey) -> Option<web::Bytes> {
    let projects = store_projects::decode_projects(snapshot);
    let view = views::derive_view(&projects, filter, sort_key);
    match serde_json::to_string(&view) {
        Ok(json) => Some(web::Bytes::from(format!("data: {}\n\n", json))),
        Err(e) => {
            tracing::error!("Failed to encode projects view: {}", e);
            None
        }
    }
}

/// Server-sent events: one `ProjectsView` for the current snapshot, then one per write.
/// The subscription lives as long as the response stream.
pub async fn stream_projects(
    caller: AuthenticatedUser,
    store: web::Data<Arc<RecordStore>>,
    query: web::Query<ProjectsQuery>,
) -> ActixResult<HttpResponse> {
    let (filter, sort_key) = query.selection();
    let (tx, rx) = mpsc::unbounded_channel::<web::Bytes>();

    let subscription = store
        .subscribe(Collection::Projects, move |snapshot| {
            if let Some(event) = view_event(snapshot, filter, sort_key) {
                // A closed receiver means the stream is being torn down
                let _ = tx.send(event);
            }
        })
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    tracing::info!(
        "User {} subscribed to projects (status={}, sort={})",
        caller.user.id,
        filter.as_str(),
        sort_key.as_str()
    );

    let events = futures::stream::unfold((rx, subscription), |(mut rx, subscription)| async move {
        rx.recv()
            .await
            .map(|event| (Ok::<_, actix_web::Error>(event), (rx, subscription)))
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(events))
}

pub async fn create_project(
    caller: AuthenticatedUser,
    store: web::Data<Arc<RecordStore>>,
    request: web::Json<CreateProjectRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    let unknown_client = !request.client_id.is_empty()
        && !store
            .contains(Collection::Clients, &request.client_id)
            .await
            .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    let mut errors = match views::validate_new_project(request, Utc::now().date_naive()) {
        Ok(project) if !unknown_client => {
            return match store_projects::add_project(&store, &project).await {
                Ok(id) => {
                    tracing::info!("User {} added project {}", caller.user.id, id);
                    Ok(HttpResponse::Created().json(CreatedResponse { id }))
                }
                Err(e) => {
                    tracing::error!("Failed to add project: {}", e);
                    Ok(super::write_failed("project"))
                }
            };
        }
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if unknown_client {
        errors.add("client_id", "Please select a client");
    }
    Ok(super::validation_failed(errors))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bearer, sign_up, test_app, test_state, TestState};
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::{Duration, Utc};
    use shared_types::{NewClient, NewProject, ProjectPriority, ProjectStatus, ProjectType, ProjectsView};

    use crate::store::{clients, projects};

    async fn seed_client(state: &TestState) -> String {
        clients::add_client(
            &state.store,
            &NewClient {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "4155550100".to_string(),
                company: "Acme".to_string(),
                address: "1 Market Street".to_string(),
                city: "Oakland".to_string(),
                state: "California".to_string(),
                zip: "94607".to_string(),
                notes: None,
            },
        )
        .await
        .unwrap()
    }

    async fn seed_project(state: &TestState, name: &str, status: ProjectStatus, budget: f64) {
        projects::add_project(
            &state.store,
            &NewProject {
                project_name: name.to_string(),
                client_id: "client-1".to_string(),
                description: "A project description".to_string(),
                project_type: ProjectType::Consulting,
                status,
                priority: ProjectPriority::Low,
                start_date: "2026-05-01".to_string(),
                end_date: "2026-06-01".to_string(),
                budget,
                team_members: vec!["Ana".to_string()],
                tags: vec![],
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    fn project_request(client_id: &str) -> serde_json::Value {
        let today = Utc::now().date_naive();
        serde_json::json!({
            "project_name": "Website Redesign",
            "client_id": client_id,
            "description": "Redesign the marketing site",
            "project_type": "web-development",
            "status": "planning",
            "priority": "high",
            "start_date": (today + Duration::days(1)).format("%Y-%m-%d").to_string(),
            "end_date": (today + Duration::days(30)).format("%Y-%m-%d").to_string(),
            "budget": "1500",
            "team_members": ["Ana"],
            "tags": [],
            "notes": null
        })
    }

    fn parse_event(chunk: &[u8]) -> ProjectsView {
        let text = std::str::from_utf8(chunk).unwrap();
        let json = text.strip_prefix("data: ").unwrap().trim_end();
        serde_json::from_str(json).unwrap()
    }

    #[actix_web::test]
    async fn test_list_applies_filter_and_sort() {
        let state = test_state();
        let token = sign_up(&state).await;
        seed_project(&state, "beta", ProjectStatus::Planning, 100.0).await;
        seed_project(&state, "Alpha", ProjectStatus::Completed, 50.0).await;
        seed_project(&state, "gamma", ProjectStatus::Planning, 25.0).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/projects?status=planning&sort=name")
            .insert_header(bearer(&token))
            .to_request();
        let view: ProjectsView = test::call_and_read_body_json(&app, req).await;

        let names: Vec<&str> = view.projects.iter().map(|p| p.project_name.as_str()).collect();
        assert_eq!(names, vec!["beta", "gamma"]);
        assert_eq!(view.total, 3);
        assert_eq!(view.total_budget, 175.0);
        assert_eq!(view.active_count, 2);
        assert_eq!(view.status_counts[0].key, "all");
        assert_eq!(view.status_counts[0].count, 3);
    }

    #[actix_web::test]
    async fn test_unknown_query_values_are_rejected() {
        let state = test_state();
        let token = sign_up(&state).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/projects?status=archived")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_project_for_known_client() {
        let state = test_state();
        let token = sign_up(&state).await;
        let client_id = seed_client(&state).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header(bearer(&token))
            .set_json(project_request(&client_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let stored = projects::list_projects(&state.store).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].client_id, client_id);
        assert_eq!(stored[0].status, "planning");
        assert_eq!(stored[0].budget, 1500.0);
    }

    #[actix_web::test]
    async fn test_create_project_for_unknown_client_is_rejected() {
        let state = test_state();
        let token = sign_up(&state).await;
        let app = test_app!(state);

        let mut body = project_request("no-such-client");
        body["budget"] = serde_json::json!("");
        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header(bearer(&token))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["fields"]["client_id"], "Please select a client");
        assert_eq!(body["fields"]["budget"], "Budget is required");
        assert!(projects::list_projects(&state.store).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_stream_sends_current_view_then_updates() {
        let state = test_state();
        let token = sign_up(&state).await;
        seed_project(&state, "First", ProjectStatus::OnHold, 10.0).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/projects/stream?sort=budget")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/event-stream"
        );
        assert_eq!(state.store.subscriber_count(crate::store::Collection::Projects), 1);

        let mut body = Box::pin(resp.into_body());
        let first = futures::future::poll_fn(|cx| body.as_mut().poll_next(cx))
            .await
            .unwrap()
            .unwrap();
        let view = parse_event(&first);
        assert_eq!(view.total, 1);
        assert_eq!(view.active_count, 0);

        seed_project(&state, "Second", ProjectStatus::InProgress, 90.0).await;

        let second = futures::future::poll_fn(|cx| body.as_mut().poll_next(cx))
            .await
            .unwrap()
            .unwrap();
        let view = parse_event(&second);
        assert_eq!(view.total, 2);
        assert_eq!(view.active_count, 1);
        assert_eq!(view.projects[0].project_name, "Second");

        drop(body);
        assert_eq!(state.store.subscriber_count(crate::store::Collection::Projects), 0);
    }
}
