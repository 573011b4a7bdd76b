// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::dashboard::{
        DashboardSnapshot, MonthlyEarnings, ProductPerformanceEntry, SalesOverview,
        TransactionFeedEntry,
    },
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Todos os agregados do dashboard (do cache)", body = DashboardSnapshot),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_snapshot(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = app_state
        .dashboard_service
        .get_snapshot()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(snapshot)))
}

// POST /api/dashboard/refresh
#[utoipa::path(
    post,
    path = "/api/dashboard/refresh",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard recalculado a partir de uma busca completa", body = DashboardSnapshot)
    ),
    security(("api_jwt" = []))
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = app_state
        .dashboard_service
        .refresh()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(snapshot)))
}

// GET /api/dashboard/monthly-earnings
#[utoipa::path(
    get,
    path = "/api/dashboard/monthly-earnings",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Faturamento mensal dos pedidos concluídos", body = MonthlyEarnings)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_monthly_earnings(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let earnings = app_state
        .dashboard_service
        .get_monthly_earnings()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(earnings)))
}

// GET /api/dashboard/sales-overview
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-overview",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Faturamento e despesas por dia (DD/MM)", body = SalesOverview)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let overview = app_state
        .dashboard_service
        .get_sales_overview()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(overview)))
}

// GET /api/dashboard/product-performance
#[utoipa::path(
    get,
    path = "/api/dashboard/product-performance",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Ranking de produtos por número de pedidos", body = Vec<ProductPerformanceEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product_performance(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let ranking = app_state
        .dashboard_service
        .get_product_performance()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(ranking)))
}

// GET /api/dashboard/recent-transactions
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-transactions",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Últimas 20 transações, da mais nova para a mais antiga", body = Vec<TransactionFeedEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_recent_transactions(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let feed = app_state
        .dashboard_service
        .get_recent_transactions()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(feed)))
}
