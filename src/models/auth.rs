// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Identidade de autenticação (separada do perfil)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

// Perfil do usuário, com a mesma chave da identidade de autenticação
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    #[schema(example = "barista_joe")]
    pub username: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown User",
        }
    }
}

// Criação ou edição de usuário pelo console
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    // Só usados na criação
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
    pub confirm_password: Option<String>,

    #[serde(default)]
    pub username: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // Subject (ID da identidade)
    pub email: String,
    #[serde(default)]
    pub admin: bool,   // Capacidade de administrador
    pub exp: usize,    // Expiration time
    pub iat: usize,    // Issued At
}

// Chamada remota de exclusão de conta
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}
