// src/services/account_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuthDirectory, UserStore},
    models::auth::{Claims, DeleteAccountResponse},
    services::cache::ConsoleCache,
};

/// Procedimento remoto de exclusão de conta: apaga a identidade de
/// autenticação e depois o perfil. Só para administradores.
#[derive(Clone)]
pub struct AccountService {
    directory: Arc<dyn AuthDirectory>,
    users: Arc<dyn UserStore>,
    cache: Arc<ConsoleCache>,
}

impl AccountService {
    pub fn new(
        directory: Arc<dyn AuthDirectory>,
        users: Arc<dyn UserStore>,
        cache: Arc<ConsoleCache>,
    ) -> Self {
        Self { directory, users, cache }
    }

    pub async fn delete_account(
        &self,
        caller: &Claims,
        user_id: Uuid,
    ) -> Result<DeleteAccountResponse, AppError> {
        if !caller.admin {
            tracing::warn!("⛔ {} tentou apagar a conta {} sem ser admin", caller.email, user_id);
            return Err(AppError::PermissionDenied);
        }

        // 1. Identidade de autenticação
        self.directory
            .delete_identity(user_id)
            .await
            .map_err(|e| AppError::AccountDeletionFailed(Box::new(e)))?;

        // 2. Perfil. Sem rollback do passo 1 se falhar aqui.
        if let Err(e) = self.users.delete_profile(user_id).await {
            tracing::warn!(
                "⚠️ Identidade {} apagada, mas o perfil continua no banco: {}",
                user_id,
                e
            );
            return Err(AppError::AccountDeletionFailed(Box::new(e)));
        }

        self.cache.invalidate_all().await;
        tracing::info!("🗑️ Conta {} apagada por {}", user_id, caller.email);

        Ok(DeleteAccountResponse {
            success: true,
            message: "User deleted successfully.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{profile, MemoryStore};
    use crate::middleware::i18n::Locale;
    use crate::models::auth::AuthIdentity;

    fn claims(admin: bool) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "admin@coffee.test".to_string(),
            admin,
            exp: 0,
            iat: 0,
        }
    }

    fn seed_account(store: &MemoryStore) -> Uuid {
        let user = profile(Some("joe"));
        let mut state = store.state();
        state.identities.push(AuthIdentity {
            id: user.id,
            email: user.email.clone(),
            password_hash: "hash".to_string(),
            is_admin: false,
        });
        state.users.push(user.clone());
        user.id
    }

    fn service(store: &Arc<MemoryStore>) -> AccountService {
        AccountService::new(store.clone(), store.clone(), ConsoleCache::new())
    }

    #[tokio::test]
    async fn admin_deletes_identity_and_profile() {
        let store = MemoryStore::new();
        let user_id = seed_account(&store);

        let response = service(&store).delete_account(&claims(true), user_id).await.unwrap();

        assert!(response.success);
        assert_eq!(response.message, "User deleted successfully.");
        let state = store.state();
        assert!(state.identities.is_empty());
        assert!(state.users.is_empty());
    }

    #[tokio::test]
    async fn non_admin_is_denied_without_side_effects() {
        let store = MemoryStore::new();
        let user_id = seed_account(&store);

        let result = service(&store).delete_account(&claims(false), user_id).await;

        assert!(matches!(result, Err(AppError::PermissionDenied)));
        assert_eq!(store.state().identities.len(), 1);
        assert_eq!(store.state().users.len(), 1);
    }

    #[tokio::test]
    async fn profile_failure_leaves_the_identity_deleted() {
        let store = MemoryStore::new();
        let user_id = seed_account(&store);
        store.fail_on("delete_profile");

        let result = service(&store).delete_account(&claims(true), user_id).await;

        match result {
            Err(AppError::AccountDeletionFailed(cause)) => {
                assert!(matches!(*cause, AppError::InternalServerError(_)));
                assert!(cause.to_string().contains("delete_profile"));
            }
            other => panic!("esperava AccountDeletionFailed, veio {:?}", other.map(|r| r.message)),
        }
        let state = store.state();
        assert!(state.identities.is_empty());
        assert_eq!(state.users.len(), 1);
    }

    #[tokio::test]
    async fn missing_account_reports_not_found_in_the_client_language() {
        let store = MemoryStore::new();

        let err = service(&store)
            .delete_account(&claims(true), Uuid::new_v4())
            .await
            .unwrap_err();

        let en = err.to_api_error(&Locale("en".into()));
        let pt = err.to_api_error(&Locale("pt".into()));
        assert_eq!(en.error, "User not found.");
        assert_eq!(pt.error, "Usuário não encontrado.");
    }
}
