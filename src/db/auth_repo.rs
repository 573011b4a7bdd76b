// src/db/auth_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::stores::AuthDirectory, models::auth::AuthIdentity};

// Identidades de autenticação (tabela 'auth_identities').
// Vive separada dos perfis: apagar uma não apaga a outra.
#[derive(Clone)]
pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthDirectory for AuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthIdentity>, AppError> {
        let identity = sqlx::query_as::<_, AuthIdentity>(
            "SELECT id, email, password_hash, is_admin FROM auth_identities WHERE email = $1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(identity)
    }

    async fn create_identity(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthIdentity, AppError> {
        sqlx::query_as::<_, AuthIdentity>(
            r#"
            INSERT INTO auth_identities (id, email, password_hash, is_admin)
            VALUES ($1, $2, $3, false)
            RETURNING id, email, password_hash, is_admin
            "#,
        )
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // Converte violação de chave única em um erro mais amigável
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::EmailAlreadyExists;
                    }
                }
                e.into()
            })
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM auth_identities WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }
}
