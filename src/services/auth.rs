// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::AuthDirectory,
    models::auth::{AuthIdentity, Claims},
};

#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn AuthDirectory>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(directory: Arc<dyn AuthDirectory>, jwt_secret: String) -> Self {
        Self { directory, jwt_secret }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let identity = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = identity.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("🔑 Login de {} (admin: {})", identity.email, identity.is_admin);
        self.create_token(&identity)
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
        ?;
        Ok(hashed)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, identity: &AuthIdentity) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: identity.id,
            email: identity.email.clone(),
            admin: identity.is_admin,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
