// src/services/user_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{AuthDirectory, UserStore},
    models::auth::{SaveUserPayload, UserProfile},
    services::{auth::AuthService, cache::ConsoleCache},
};

pub const DEFAULT_PROFILE_PICTURE: &str =
    "https://static.vecteezy.com/system/resources/previews/018/765/757/non_2x/user-profile-icon-in-flat-style-member-avatar-illustration-on-isolated-background-human-permission-sign-business-concept-vector.jpg";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    directory: Arc<dyn AuthDirectory>,
    auth_service: AuthService,
    cache: Arc<ConsoleCache>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        directory: Arc<dyn AuthDirectory>,
        auth_service: AuthService,
        cache: Arc<ConsoleCache>,
    ) -> Self {
        Self { users, directory, auth_service, cache }
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        if let Some(users) = self.cache.users().await {
            return Ok(users);
        }
        self.refresh_users().await
    }

    /// Descarta o cache e relê os perfis (inclui cadastros feitos pelo app).
    pub async fn refresh_users(&self) -> Result<Vec<UserProfile>, AppError> {
        self.cache.invalidate_users().await;
        let users = self.users.list_users().await?;
        self.cache.store_users(users.clone()).await;
        Ok(users)
    }

    /// Cria (`editing == None`) ou edita um usuário.
    pub async fn save_user(
        &self,
        payload: SaveUserPayload,
        editing: Option<Uuid>,
    ) -> Result<UserProfile, AppError> {
        payload.validate()?;

        let saved = match editing {
            Some(user_id) => self.update_user(user_id, payload).await?,
            None => self.create_user(payload).await?,
        };

        self.cache.invalidate_users().await;
        self.cache.invalidate_dashboard().await;
        Ok(saved)
    }

    // --- MOTOR DE VALIDAÇÃO ---
    // Tudo aqui roda antes de qualquer escrita.
    async fn validate_new_user(&self, payload: &SaveUserPayload) -> Result<String, AppError> {
        let password = payload.password.clone().unwrap_or_default();
        if payload.confirm_password.as_deref().unwrap_or_default() != password {
            return Err(AppError::PasswordMismatch);
        }
        if password.is_empty() {
            let mut errors = validator::ValidationErrors::new();
            errors.add("password", validator::ValidationError::new("required"));
            return Err(AppError::ValidationError(errors));
        }

        if payload.username.trim().is_empty() {
            return Err(AppError::UsernameRequired);
        }

        // Exato e sensível a maiúsculas: "Joe" e "joe" são usuários diferentes
        if self.users.username_exists(&payload.username).await? {
            return Err(AppError::UsernameTaken);
        }

        Ok(password)
    }

    async fn create_user(&self, payload: SaveUserPayload) -> Result<UserProfile, AppError> {
        let password = self.validate_new_user(&payload).await?;
        let password_hash = self.auth_service.hash_password(&password).await?;

        // 1. Conta de autenticação primeiro
        let identity = self.directory.create_identity(&payload.email, &password_hash).await?;

        // 2. Depois o perfil, com a mesma chave
        let profile = UserProfile {
            id: identity.id,
            username: Some(payload.username),
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            profile_picture: Some(
                payload
                    .profile_picture
                    .unwrap_or_else(|| DEFAULT_PROFILE_PICTURE.to_string()),
            ),
            created_at: Some(Utc::now()),
        };

        let created = self.users.create_profile(profile).await.map_err(|e| {
            tracing::warn!(
                "⚠️ Identidade {} criada, mas o perfil falhou. Conta ficou sem perfil: {}",
                identity.id,
                e
            );
            e
        })?;

        tracing::info!("👤 Usuário {} criado", created.id);
        Ok(created)
    }

    // Edição: atualiza no lugar, sem checar unicidade do username.
    // Campo ausente (ou username em branco) mantém o valor gravado.
    async fn update_user(
        &self,
        user_id: Uuid,
        payload: SaveUserPayload,
    ) -> Result<UserProfile, AppError> {
        let existing = self
            .users
            .find_profile(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let username = match payload.username.trim() {
            "" => existing.username,
            _ => Some(payload.username),
        };

        let profile = UserProfile {
            id: user_id,
            username,
            email: payload.email,
            phone: payload.phone.or(existing.phone),
            address: payload.address.or(existing.address),
            profile_picture: payload.profile_picture.or(existing.profile_picture),
            created_at: existing.created_at,
        };

        let updated = self.users.update_profile(profile).await?;
        tracing::info!("👤 Usuário {} atualizado", updated.id);
        Ok(updated)
    }

    /// Exclusão feita pelo console: só o perfil. A identidade de
    /// autenticação continua existindo.
    pub async fn delete_profile(&self, user_id: Uuid) -> Result<(), AppError> {
        self.users.delete_profile(user_id).await?;
        self.cache.invalidate_users().await;
        self.cache.invalidate_dashboard().await;
        tracing::info!("🗑️ Perfil {} apagado", user_id);
        Ok(())
    }
}
