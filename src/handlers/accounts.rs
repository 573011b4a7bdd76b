// src/handlers/accounts.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{DeleteAccountRequest, DeleteAccountResponse},
};

// POST /api/accounts/delete
#[utoipa::path(
    post,
    path = "/api/accounts/delete",
    tag = "Accounts",
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Conta apagada", body = DeleteAccountResponse),
        (status = 403, description = "Apenas administradores"),
        (status = 500, description = "Falha ao apagar identidade ou perfil")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(payload): Json<DeleteAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = app_state
        .account_service
        .delete_account(&caller, payload.user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(response)))
}
