// src/services/cache.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    auth::UserProfile,
    dashboard::{CommentFeedEntry, DashboardSnapshot},
};

/// Cache do console, dono dos últimos resultados calculados.
///
/// Vive no AppState e não sabe nada de renderização: quem escreve nos
/// stores chama o `invalidate_*` correspondente, e a próxima leitura
/// recalcula a partir de uma busca completa.
#[derive(Default)]
pub struct ConsoleCache {
    dashboard: RwLock<Option<Arc<DashboardSnapshot>>>,
    comments: RwLock<Option<Vec<CommentFeedEntry>>>,
    users: RwLock<Option<Vec<UserProfile>>>,
}

impl ConsoleCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // --- Dashboard ---

    pub async fn dashboard(&self) -> Option<Arc<DashboardSnapshot>> {
        self.dashboard.read().await.clone()
    }

    pub async fn store_dashboard(&self, snapshot: DashboardSnapshot) -> Arc<DashboardSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.dashboard.write().await = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub async fn invalidate_dashboard(&self) {
        self.dashboard.write().await.take();
    }

    // --- Comentários ---

    pub async fn comments(&self) -> Option<Vec<CommentFeedEntry>> {
        self.comments.read().await.clone()
    }

    pub async fn store_comments(&self, feed: Vec<CommentFeedEntry>) {
        *self.comments.write().await = Some(feed);
    }

    // Atualização local depois de uma exclusão, sem nova busca
    pub async fn remove_comment(&self, comment_id: Uuid) {
        if let Some(feed) = self.comments.write().await.as_mut() {
            feed.retain(|entry| entry.id != comment_id);
        }
    }

    pub async fn invalidate_comments(&self) {
        self.comments.write().await.take();
    }

    // --- Usuários ---

    pub async fn users(&self) -> Option<Vec<UserProfile>> {
        self.users.read().await.clone()
    }

    pub async fn store_users(&self, users: Vec<UserProfile>) {
        *self.users.write().await = Some(users);
    }

    pub async fn invalidate_users(&self) {
        self.users.write().await.take();
    }

    pub async fn invalidate_all(&self) {
        self.invalidate_dashboard().await;
        self.invalidate_comments().await;
        self.invalidate_users().await;
    }
}
