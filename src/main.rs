//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ele, "info"
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/",
               get(handlers::users::list_users)
               .post(handlers::users::create_user)
        )
        .route("/refresh", post(handlers::users::refresh_users))
        .route("/{id}",
               put(handlers::users::update_user)
               .delete(handlers::users::delete_user)
        );

    let account_routes = Router::new()
        .route("/delete", post(handlers::accounts::delete_account));

    let catalog_routes = Router::new()
        .route("/{category}",
               get(handlers::catalog::list_items)
               .post(handlers::catalog::create_item)
        )
        .route("/{category}/{id}",
               get(handlers::catalog::get_item)
               .put(handlers::catalog::update_item)
               .delete(handlers::catalog::delete_item)
        );

    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_snapshot))
        .route("/refresh", post(handlers::dashboard::refresh))
        .route("/monthly-earnings", get(handlers::dashboard::get_monthly_earnings))
        .route("/sales-overview", get(handlers::dashboard::get_sales_overview))
        .route("/product-performance", get(handlers::dashboard::get_product_performance))
        .route("/recent-transactions", get(handlers::dashboard::get_recent_transactions));

    let comment_routes = Router::new()
        .route("/", get(handlers::comments::list_comments))
        .route("/refresh", post(handlers::comments::refresh_comments))
        .route("/deletion",
               get(handlers::comments::get_deletion)
               .delete(handlers::comments::cancel_deletion)
        )
        .route("/deletion/confirm", post(handlers::comments::confirm_deletion))
        .route("/{id}/deletion", post(handlers::comments::request_deletion));

    // Tudo do console exige token
    let console_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/accounts", account_routes)
        .nest("/catalog", catalog_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/comments", comment_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let bind_addr = app_state.config.bind_addr;

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", console_routes)
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
