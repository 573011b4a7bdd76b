// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{AuthRepository, CatalogRepository, OrderRepository, UserRepository},
    services::{
        account_service::AccountService, auth::AuthService, cache::ConsoleCache,
        catalog_service::CatalogService, comment_service::CommentService,
        dashboard_service::DashboardService, user_service::UserService,
    },
};

// Configuração lida do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR inválido")?;

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(value) => value.parse().context("DB_MAX_CONNECTIONS inválido")?,
            Err(_) => 5,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub comment_service: CommentService,
    pub catalog_service: CatalogService,
    pub user_service: UserService,
    pub account_service: AccountService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = AppConfig::from_env()?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let order_repo = Arc::new(OrderRepository::new(db_pool.clone()));
        let catalog_repo = Arc::new(CatalogRepository::new(db_pool.clone()));
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let auth_repo = Arc::new(AuthRepository::new(db_pool.clone()));

        let cache = ConsoleCache::new();

        let auth_service = AuthService::new(auth_repo.clone(), config.jwt_secret.clone());
        let dashboard_service =
            DashboardService::new(order_repo, user_repo.clone(), cache.clone());
        let comment_service = CommentService::new(catalog_repo.clone(), cache.clone());
        let catalog_service = CatalogService::new(catalog_repo, cache.clone());
        let user_service = UserService::new(
            user_repo.clone(),
            auth_repo.clone(),
            auth_service.clone(),
            cache.clone(),
        );
        let account_service = AccountService::new(auth_repo, user_repo, cache);

        Ok(Self {
            db_pool,
            config,
            auth_service,
            dashboard_service,
            comment_service,
            catalog_service,
            user_service,
            account_service,
        })
    }
}

// O guardião de rotas só precisa do serviço de tokens
impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}
