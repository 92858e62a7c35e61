use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{ClientOptionsResponse, ClientsResponse, CreateClientRequest, CreatedResponse};
use std::sync::Arc;

use super::auth::AuthenticatedUser;
use crate::store::clients as store_clients;
use crate::store::RecordStore;

pub async fn list_clients(
    _caller: AuthenticatedUser,
    store: web::Data<Arc<RecordStore>>,
) -> ActixResult<HttpResponse> {
    let clients = store_clients::list_clients(&store)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ClientsResponse { clients }))
}

pub async fn list_client_options(
    _caller: AuthenticatedUser,
    store: web::Data<Arc<RecordStore>>,
) -> ActixResult<HttpResponse> {
    let clients = store_clients::client_options(&store)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ClientOptionsResponse { clients }))
}

pub async fn create_client(
    caller: AuthenticatedUser,
    store: web::Data<Arc<RecordStore>>,
    request: web::Json<CreateClientRequest>,
) -> ActixResult<HttpResponse> {
    let client = match views::validate_new_client(request.into_inner()) {
        Ok(client) => client,
        Err(errors) => return Ok(super::validation_failed(errors)),
    };

    match store_clients::add_client(&store, &client).await {
        Ok(id) => {
            tracing::info!("User {} added client {}", caller.user.id, id);
            Ok(HttpResponse::Created().json(CreatedResponse { id }))
        }
        Err(e) => {
            tracing::error!("Failed to add client: {}", e);
            Ok(super::write_failed("client"))
        }
    }
}
