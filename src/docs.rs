// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::refresh_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Accounts ---
        handlers::accounts::delete_account,

        // --- Catalog ---
        handlers::catalog::list_items,
        handlers::catalog::get_item,
        handlers::catalog::create_item,
        handlers::catalog::update_item,
        handlers::catalog::delete_item,

        // --- Dashboard ---
        handlers::dashboard::get_snapshot,
        handlers::dashboard::refresh,
        handlers::dashboard::get_monthly_earnings,
        handlers::dashboard::get_sales_overview,
        handlers::dashboard::get_product_performance,
        handlers::dashboard::get_recent_transactions,

        // --- Comments ---
        handlers::comments::list_comments,
        handlers::comments::refresh_comments,
        handlers::comments::get_deletion,
        handlers::comments::request_deletion,
        handlers::comments::confirm_deletion,
        handlers::comments::cancel_deletion,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UserProfile,
            models::auth::SaveUserPayload,
            models::auth::DeleteAccountRequest,
            models::auth::DeleteAccountResponse,

            // --- Orders ---
            models::orders::PaymentStatus,
            models::orders::PriceTier,
            models::orders::LineItem,
            models::orders::Order,

            // --- Catalog ---
            models::catalog::Category,
            models::catalog::CatalogPrice,
            models::catalog::CatalogItem,
            models::catalog::Comment,
            models::catalog::SaveCatalogItemPayload,

            // --- Dashboard ---
            models::dashboard::MonthlyEarningsPoint,
            models::dashboard::MonthlyEarnings,
            models::dashboard::SalesOverview,
            models::dashboard::Priority,
            models::dashboard::ProductPerformanceEntry,
            models::dashboard::TransactionFeedEntry,
            models::dashboard::CommentFeedEntry,
            models::dashboard::DashboardSnapshot,
            models::dashboard::CommentDeletionStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Login do console"),
        (name = "Users", description = "Perfis de usuário"),
        (name = "Accounts", description = "Exclusão de conta (somente admin)"),
        (name = "Catalog", description = "Itens do cardápio por categoria"),
        (name = "Dashboard", description = "Faturamento, vendas, produtos e transações"),
        (name = "Comments", description = "Moderação de comentários e notas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
