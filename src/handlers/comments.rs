// src/handlers/comments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::dashboard::{CommentDeletionStatus, CommentFeedEntry},
};

// GET /api/comments
#[utoipa::path(
    get,
    path = "/api/comments",
    tag = "Comments",
    responses(
        (status = 200, description = "Feed de comentários de todo o cardápio, do mais novo ao mais antigo", body = Vec<CommentFeedEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_comments(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let feed = app_state
        .comment_service
        .feed()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(feed)))
}

// POST /api/comments/refresh
#[utoipa::path(
    post,
    path = "/api/comments/refresh",
    tag = "Comments",
    responses(
        (status = 200, description = "Feed relido do banco, incluindo comentários novos do app", body = Vec<CommentFeedEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn refresh_comments(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let feed = app_state
        .comment_service
        .refresh_feed()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(feed)))
}

// GET /api/comments/deletion
#[utoipa::path(
    get,
    path = "/api/comments/deletion",
    tag = "Comments",
    responses(
        (status = 200, description = "Estado da exclusão do admin atual", body = CommentDeletionStatus)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_deletion(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> impl IntoResponse {
    let status = app_state.comment_service.deletion_state(claims.sub).await;
    (StatusCode::OK, Json(status))
}

// POST /api/comments/{id}/deletion
#[utoipa::path(
    post,
    path = "/api/comments/{id}/deletion",
    tag = "Comments",
    params(("id" = Uuid, Path, description = "ID do comentário")),
    responses(
        (status = 200, description = "Comentário aguardando confirmação", body = CommentDeletionStatus),
        (status = 404, description = "Comentário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn request_deletion(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let status = app_state
        .comment_service
        .request_deletion(claims.sub, comment_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(status)))
}

// POST /api/comments/deletion/confirm
#[utoipa::path(
    post,
    path = "/api/comments/deletion/confirm",
    tag = "Comments",
    responses(
        (status = 200, description = "Comentário apagado e nota do item recalculada", body = CommentFeedEntry),
        (status = 409, description = "Nenhum comentário aguardando confirmação")
    ),
    security(("api_jwt" = []))
)]
pub async fn confirm_deletion(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .comment_service
        .confirm_deletion(claims.sub)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(deleted)))
}

// DELETE /api/comments/deletion
#[utoipa::path(
    delete,
    path = "/api/comments/deletion",
    tag = "Comments",
    responses(
        (status = 200, description = "Exclusão cancelada", body = CommentDeletionStatus)
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_deletion(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> impl IntoResponse {
    let status = app_state.comment_service.cancel_deletion(claims.sub).await;
    (StatusCode::OK, Json(status))
}
