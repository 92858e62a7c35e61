use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, Result as ActixResult};
use futures::future::LocalBoxFuture;
use shared_types::{AuthCredentials, AuthUser, ErrorResponse};
use std::sync::Arc;

use crate::auth::{AuthError, AuthService};

/// Signed-in caller. Taking this as a handler argument makes the route protected.
pub struct AuthenticatedUser {
    pub user: AuthUser,
    pub token: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth = req.app_data::<web::Data<Arc<AuthService>>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let auth = auth.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Auth service is not configured")
            })?;
            let token =
                token.ok_or_else(|| actix_web::error::ErrorUnauthorized("Sign in required"))?;

            match auth.current_user(&token).await {
                Some(user) => Ok(AuthenticatedUser { user, token }),
                None => Err(actix_web::error::ErrorUnauthorized(
                    "Session expired, please sign in again",
                )),
            }
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn auth_error_response(e: AuthError) -> HttpResponse {
    match e {
        AuthError::Validation(errors) => super::validation_failed(errors),
        AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(ErrorResponse {
            error: e.to_string(),
        }),
        AuthError::EmailInUse => HttpResponse::Conflict().json(ErrorResponse {
            error: e.to_string(),
        }),
        AuthError::Storage(_) => {
            tracing::error!("{}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Authentication failed. Please try again.".to_string(),
            })
        }
    }
}

pub async fn sign_up(
    auth: web::Data<Arc<AuthService>>,
    request: web::Json<AuthCredentials>,
) -> ActixResult<HttpResponse> {
    match auth.sign_up(request.into_inner()).await {
        Ok(session) => Ok(HttpResponse::Created().json(session)),
        Err(e) => Ok(auth_error_response(e)),
    }
}

pub async fn sign_in(
    auth: web::Data<Arc<AuthService>>,
    request: web::Json<AuthCredentials>,
) -> ActixResult<HttpResponse> {
    match auth.sign_in(request.into_inner()).await {
        Ok(session) => Ok(HttpResponse::Ok().json(session)),
        Err(e) => Ok(auth_error_response(e)),
    }
}

pub async fn sign_out(
    caller: AuthenticatedUser,
    auth: web::Data<Arc<AuthService>>,
) -> ActixResult<HttpResponse> {
    auth.sign_out(&caller.token).await;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn me(caller: AuthenticatedUser) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(caller.user))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bearer, test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use shared_types::{AuthSession, AuthUser};

    #[actix_web::test]
    async fn test_sign_up_me_sign_out() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/sign-up")
            .set_json(serde_json::json!({"email": "ana@example.com", "password": "secret1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let session: AuthSession = test::read_body_json(resp).await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&session.token))
            .to_request();
        let user: AuthUser = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user.email, "ana@example.com");

        let req = test::TestRequest::post()
            .uri("/api/auth/sign-out")
            .insert_header(bearer(&session.token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&session.token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bad_credentials_status_codes() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/sign-in")
            .set_json(serde_json::json!({"email": "nobody@example.com", "password": "secret1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/auth/sign-up")
            .set_json(serde_json::json!({"email": "", "password": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["fields"]["email"], "Email is required");
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer("made-up"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
