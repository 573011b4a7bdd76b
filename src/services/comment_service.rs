// src/services/comment_service.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogStore,
    models::{
        catalog::Category,
        dashboard::{CommentDeletion, CommentDeletionStatus, CommentFeedEntry},
    },
    services::{aggregation, cache::ConsoleCache, fanout::fan_out},
};

#[derive(Clone)]
pub struct CommentService {
    catalog: Arc<dyn CatalogStore>,
    cache: Arc<ConsoleCache>,
    // Uma máquina de estados por admin (chave: id do chamador)
    deletions: Arc<Mutex<HashMap<Uuid, CommentDeletion>>>,
}

impl CommentService {
    pub fn new(catalog: Arc<dyn CatalogStore>, cache: Arc<ConsoleCache>) -> Self {
        Self {
            catalog,
            cache,
            deletions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Feed global de comentários, do mais novo para o mais antigo.
    pub async fn feed(&self) -> Result<Vec<CommentFeedEntry>, AppError> {
        if let Some(feed) = self.cache.comments().await {
            return Ok(feed);
        }
        self.refresh_feed().await
    }

    pub async fn refresh_feed(&self) -> Result<Vec<CommentFeedEntry>, AppError> {
        self.cache.invalidate_comments().await;

        // 1. Itens de cada categoria, em paralelo
        let per_category = fan_out(Category::ALL.to_vec(), |category| {
            let store = Arc::clone(&self.catalog);
            let category = *category;
            async move { store.list_items(category).await }
        })
        .await?;

        let items = per_category
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect::<Vec<_>>();

        // 2. Comentários de cada item, em paralelo
        let per_item = fan_out(items, |item| {
            let store = Arc::clone(&self.catalog);
            let (category, item_id) = (item.category, item.id);
            async move { store.list_comments(category, item_id).await }
        })
        .await
        .map_err(|e| {
            tracing::error!("🔥 Falha ao carregar comentários: {}", e);
            e
        })?;

        let feed = aggregation::comment_feed(per_item);
        tracing::debug!("{} comentários carregados", feed.len());
        self.cache.store_comments(feed.clone()).await;
        Ok(feed)
    }

    // --- MÁQUINA DE ESTADOS DA EXCLUSÃO ---

    pub async fn deletion_state(&self, admin_id: Uuid) -> CommentDeletionStatus {
        let deletions = self.deletions.lock().await;
        let state = deletions.get(&admin_id).cloned().unwrap_or_default();
        CommentDeletionStatus::from(&state)
    }

    /// Idle/Pending -> PendingConfirmation{candidate}
    pub async fn request_deletion(
        &self,
        admin_id: Uuid,
        comment_id: Uuid,
    ) -> Result<CommentDeletionStatus, AppError> {
        let find =
            |feed: Vec<CommentFeedEntry>| feed.into_iter().find(|entry| entry.id == comment_id);

        // Comentários novos ainda não estão no feed em cache: busca de novo antes de desistir
        let candidate = match find(self.feed().await?) {
            Some(candidate) => candidate,
            None => find(self.refresh_feed().await?).ok_or(AppError::NotFound("Comment"))?,
        };

        let state = CommentDeletion::select(candidate);
        let status = CommentDeletionStatus::from(&state);
        self.deletions.lock().await.insert(admin_id, state);
        Ok(status)
    }

    /// Volta para Idle sem tocar em nada.
    pub async fn cancel_deletion(&self, admin_id: Uuid) -> CommentDeletionStatus {
        self.deletions.lock().await.remove(&admin_id);
        CommentDeletionStatus::from(&CommentDeletion::Idle)
    }

    /// Executa a exclusão pendente. Em caso de falha o estado continua
    /// PendingConfirmation, para o admin poder tentar de novo.
    pub async fn confirm_deletion(&self, admin_id: Uuid) -> Result<CommentFeedEntry, AppError> {
        let candidate = {
            let deletions = self.deletions.lock().await;
            deletions
                .get(&admin_id)
                .and_then(CommentDeletion::candidate)
                .cloned()
                .ok_or(AppError::NoPendingDeletion)?
        };

        self.delete_comment(&candidate).await?;

        // Só volta para Idle se ninguém selecionou outro candidato nesse meio tempo
        let mut deletions = self.deletions.lock().await;
        if deletions.get(&admin_id).and_then(CommentDeletion::candidate) == Some(&candidate) {
            deletions.remove(&admin_id);
        }
        Ok(candidate)
    }

    async fn delete_comment(&self, target: &CommentFeedEntry) -> Result<(), AppError> {
        let (category, item_id) = (target.item_type, target.item_id);

        // 1. e 2. Busca os irmãos e tira o alvo
        let remaining: Vec<_> = self
            .catalog
            .list_comments(category, item_id)
            .await?
            .into_iter()
            .filter(|comment| comment.id != target.id)
            .collect();

        // 3. e 4. Recalcula e grava a nota do item
        let rating = aggregation::recompute_rating(&remaining);
        self.catalog
            .update_item_rating(category, item_id, rating.average_rating, rating.ratings_count)
            .await?;

        // 5. Apaga o comentário. Não é transacional com o passo anterior.
        self.catalog
            .delete_comment(category, item_id, target.id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "⚠️ Nota do item {} já recalculada, mas o comentário {} não foi apagado: {}",
                    item_id,
                    target.id,
                    e
                );
                e
            })?;

        // 6. Atualiza o feed em memória
        self.cache.remove_comment(target.id).await;

        tracing::info!(
            "🗑️ Comentário {} apagado. Item {} agora tem média {:.2} ({} notas)",
            target.id,
            item_id,
            rating.average_rating,
            rating.ratings_count
        );
        Ok(())
    }
}
