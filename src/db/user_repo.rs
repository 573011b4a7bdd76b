// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::stores::UserStore, models::auth::UserProfile};

// O repositório de perfis, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        let users = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, email, phone, address, profile_picture, created_at
            FROM users
            ORDER BY created_at ASC NULLS FIRST, id ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, email, phone, address, profile_picture, created_at
            FROM users
            WHERE id = $1
            "#,
        )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // Em Postgres '=' já é sensível a maiúsculas
    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO users (id, username, email, phone, address, profile_picture, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, phone, address, profile_picture, created_at
            "#,
        )
            .bind(profile.id)
            .bind(&profile.username)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.address)
            .bind(&profile.profile_picture)
            .bind(profile.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE users
            SET username = $2, email = $3, phone = $4, address = $5, profile_picture = $6
            WHERE id = $1
            RETURNING id, username, email, phone, address, profile_picture, created_at
            "#,
        )
            .bind(profile.id)
            .bind(&profile.username)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.address)
            .bind(&profile.profile_picture)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        Ok(user)
    }

    async fn delete_profile(&self, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }
}
