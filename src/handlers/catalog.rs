// src/handlers/catalog.rs

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
    models::catalog::{CatalogItem, Category, SaveCatalogItemPayload},
};

// GET /api/catalog/{category}
#[utoipa::path(
    get,
    path = "/api/catalog/{category}",
    tag = "Catalog",
    params(("category" = Category, Path, description = "tea, coffee, blended_beverages ou milk_juice_more")),
    responses(
        (status = 200, description = "Itens da categoria", body = Vec<CatalogItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(category): Path<Category>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .catalog_service
        .list_items(category)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/catalog/{category}/{id}
#[utoipa::path(
    get,
    path = "/api/catalog/{category}/{id}",
    tag = "Catalog",
    params(
        ("category" = Category, Path, description = "Categoria do item"),
        ("id" = Uuid, Path, description = "ID do item")
    ),
    responses(
        (status = 200, description = "Item", body = CatalogItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path((category, item_id)): Path<(Category, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .catalog_service
        .get_item(category, item_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(item)))
}

// POST /api/catalog/{category}
#[utoipa::path(
    post,
    path = "/api/catalog/{category}",
    tag = "Catalog",
    request_body = SaveCatalogItemPayload,
    params(("category" = Category, Path, description = "Categoria do item")),
    responses(
        (status = 201, description = "Item criado", body = CatalogItem),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(category): Path<Category>,
    Json(payload): Json<SaveCatalogItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .catalog_service
        .save_item(category, payload, None)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/catalog/{category}/{id}
#[utoipa::path(
    put,
    path = "/api/catalog/{category}/{id}",
    tag = "Catalog",
    request_body = SaveCatalogItemPayload,
    params(
        ("category" = Category, Path, description = "Categoria do item"),
        ("id" = Uuid, Path, description = "ID do item")
    ),
    responses(
        (status = 200, description = "Item atualizado", body = CatalogItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path((category, item_id)): Path<(Category, Uuid)>,
    Json(payload): Json<SaveCatalogItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .catalog_service
        .save_item(category, payload, Some(item_id))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/catalog/{category}/{id}
#[utoipa::path(
    delete,
    path = "/api/catalog/{category}/{id}",
    tag = "Catalog",
    params(
        ("category" = Category, Path, description = "Categoria do item"),
        ("id" = Uuid, Path, description = "ID do item")
    ),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path((category, item_id)): Path<(Category, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_item(category, item_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
