use actix_web::{HttpResponse, Result as ActixResult};
use shared_types::{DashboardCard, DashboardResponse};

use super::auth::AuthenticatedUser;

pub async fn get_dashboard(caller: AuthenticatedUser) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(DashboardResponse {
        user_email: caller.user.email,
        cards: DashboardCard::defaults(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bearer, sign_up, test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use shared_types::DashboardResponse;

    #[actix_web::test]
    async fn test_dashboard_lists_cards_for_signed_in_user() {
        let state = test_state();
        let token = sign_up(&state).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(bearer(&token))
            .to_request();
        let dashboard: DashboardResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dashboard.user_email, "owner@example.com");
        let routes: Vec<&str> = dashboard.cards.iter().map(|c| c.route.as_str()).collect();
        assert_eq!(routes, vec!["/add-client", "/clients", "/add-project", "/projects"]);
    }

    #[actix_web::test]
    async fn test_dashboard_requires_sign_in() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
