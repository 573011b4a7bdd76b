// src/db/stores.rs
//
// Fronteira com os serviços externos (banco de documentos e autenticação).
// O motor de agregação só conhece estes traits; os repositórios Postgres
// são uma das implementações possíveis.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{AuthIdentity, UserProfile},
        catalog::{CatalogItem, CatalogItemDraft, Category, Comment},
        orders::Order,
    },
};

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Histórico de pedidos de um usuário, mais recentes primeiro.
    async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError>;

    /// Leitura "collection-group": todos os pedidos de todos os usuários.
    async fn list_all_orders(&self) -> Result<Vec<Order>, AppError>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_items(&self, category: Category) -> Result<Vec<CatalogItem>, AppError>;

    async fn get_item(&self, category: Category, item_id: Uuid)
        -> Result<Option<CatalogItem>, AppError>;

    async fn create_item(
        &self,
        category: Category,
        draft: CatalogItemDraft,
    ) -> Result<CatalogItem, AppError>;

    async fn update_item(
        &self,
        category: Category,
        item_id: Uuid,
        draft: CatalogItemDraft,
    ) -> Result<CatalogItem, AppError>;

    async fn delete_item(&self, category: Category, item_id: Uuid) -> Result<(), AppError>;

    async fn update_item_rating(
        &self,
        category: Category,
        item_id: Uuid,
        average_rating: f64,
        ratings_count: i32,
    ) -> Result<(), AppError>;

    async fn list_comments(&self, category: Category, item_id: Uuid)
        -> Result<Vec<Comment>, AppError>;

    async fn delete_comment(
        &self,
        category: Category,
        item_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError>;

    /// Comparação exata, sensível a maiúsculas.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    async fn create_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError>;

    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError>;

    async fn delete_profile(&self, user_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthIdentity>, AppError>;

    async fn create_identity(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthIdentity, AppError>;

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError>;
}
