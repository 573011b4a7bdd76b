// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nosso tipo de erro interno, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("As senhas não conferem")]
    PasswordMismatch,

    #[error("Nome de usuário obrigatório")]
    UsernameRequired,

    #[error("Nome de usuário já existe")]
    UsernameTaken,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Permissão negada")]
    PermissionDenied,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Nenhuma exclusão de comentário pendente")]
    NoPendingDeletion,

    // Falha da chamada remota de exclusão de conta.
    // A causa é repassada ao chamador, traduzida quando conhecida.
    #[error("Falha na exclusão da conta: {0}")]
    AccountDeletionFailed(#[source] Box<AppError>),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Código legível por máquina, estável entre idiomas
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_)
            | AppError::PasswordMismatch
            | AppError::UsernameRequired => "invalid-argument",
            AppError::UsernameTaken | AppError::EmailAlreadyExists => "already-exists",
            AppError::InvalidCredentials | AppError::InvalidToken => "unauthenticated",
            AppError::PermissionDenied => "permission-denied",
            AppError::NotFound(_) => "not-found",
            AppError::NoPendingDeletion => "failed-precondition",
            AppError::AccountDeletionFailed(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            "invalid-argument" => StatusCode::BAD_REQUEST,
            "already-exists" => StatusCode::CONFLICT,
            "unauthenticated" => StatusCode::UNAUTHORIZED,
            "permission-denied" => StatusCode::FORBIDDEN,
            "not-found" => StatusCode::NOT_FOUND,
            "failed-precondition" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self, lang: &str) -> String {
        let pt = lang == "pt";
        let text = match self {
            AppError::ValidationError(_) if pt => "Um ou mais campos são inválidos.",
            AppError::ValidationError(_) => "One or more fields are invalid.",
            AppError::PasswordMismatch if pt => "As senhas não conferem!",
            AppError::PasswordMismatch => "Passwords do not match!",
            AppError::UsernameRequired if pt => "O nome de usuário é obrigatório.",
            AppError::UsernameRequired => "Username is required.",
            AppError::UsernameTaken if pt => "Nome de usuário já existe. Escolha outro.",
            AppError::UsernameTaken => "Username already exists. Please choose a different one.",
            AppError::EmailAlreadyExists if pt => "Este e-mail já está em uso.",
            AppError::EmailAlreadyExists => "This email is already in use.",
            AppError::InvalidCredentials if pt => "E-mail ou senha inválidos.",
            AppError::InvalidCredentials => "Invalid email or password.",
            AppError::InvalidToken if pt => "Token de autenticação inválido ou ausente.",
            AppError::InvalidToken => "Missing or invalid authentication token.",
            AppError::PermissionDenied if pt => "Apenas administradores podem realizar esta ação.",
            AppError::PermissionDenied => "Only admins can perform this action.",
            AppError::NotFound(what) if pt => {
                let noun = match *what {
                    "Comment" => "Comentário",
                    "User" => "Usuário",
                    other => other,
                };
                return format!("{} não encontrado.", noun);
            }
            AppError::NotFound(what) => return format!("{} not found.", what),
            AppError::NoPendingDeletion if pt => "Nenhum comentário aguardando confirmação.",
            AppError::NoPendingDeletion => "No comment is awaiting confirmation.",
            AppError::AccountDeletionFailed(cause) => return cause.cause_message(lang),
            _ if pt => "Ocorreu um erro inesperado.",
            _ => "An unexpected error occurred.",
        };
        text.to_string()
    }

    // Texto da causa: erros de fora vão crus, sem o prefixo em português do Display
    fn cause_message(&self, lang: &str) -> String {
        match self {
            AppError::DatabaseError(e) => e.to_string(),
            AppError::InternalServerError(e) => e.to_string(),
            AppError::BcryptError(e) => e.to_string(),
            AppError::JwtError(e) => e.to_string(),
            known => known.message(lang),
        }
    }

    // Converte para o erro de API, já traduzido para o idioma do cliente
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` loga a mensagem detalhada; o cliente não a vê.
            tracing::error!("🔥 Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => Value::String(m.to_string()),
                            None => Value::String(e.code.to_string()),
                        })
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(details))
            }
            _ => None,
        };

        ApiError {
            status,
            kind: self.kind(),
            error: self.message(&locale.0),
            details,
        }
    }
}

// Erro no formato de resposta da API
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub kind: &'static str,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "kind": self.kind,
            "error": self.error,
            "details": self.details,
        }));
        (self.status, body).into_response()
    }
}

// Sem idioma explícito (ex: rejeição de middleware) respondemos em inglês
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
