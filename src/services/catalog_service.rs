// src/services/catalog_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, money::round_money},
    db::CatalogStore,
    models::catalog::{CatalogItem, CatalogItemDraft, CatalogPrice, Category, SaveCatalogItemPayload},
    services::cache::ConsoleCache,
};

// Multiplicadores por tamanho sobre o preço base
const SIZE_MULTIPLIERS: [(&str, Decimal); 3] = [
    ("Small", Decimal::ONE),
    ("Medium", Decimal::from_parts(125, 0, 0, false, 2)),
    ("Large", Decimal::from_parts(150, 0, 0, false, 2)),
];

pub fn derive_size_prices(base_price: Decimal) -> Vec<CatalogPrice> {
    SIZE_MULTIPLIERS
        .iter()
        .map(|(size, multiplier)| CatalogPrice {
            size: size.to_string(),
            price: round_money(base_price * *multiplier),
        })
        .collect()
}

// Preços explícitos > derivados do preço base > nada informado
fn resolve_prices(payload: &mut SaveCatalogItemPayload) -> Option<Vec<CatalogPrice>> {
    match (payload.prices.take(), payload.base_price) {
        (Some(prices), _) if !prices.is_empty() => Some(prices),
        (_, Some(base)) => Some(derive_size_prices(base)),
        _ => None,
    }
}

fn new_draft(mut payload: SaveCatalogItemPayload) -> CatalogItemDraft {
    let prices = resolve_prices(&mut payload).unwrap_or_default();

    CatalogItemDraft {
        name: payload.name,
        description: payload.description,
        image_ref: payload.image_ref,
        average_rating: payload.average_rating.unwrap_or(0.0),
        ratings_count: payload.ratings_count.unwrap_or(0),
        ingredients: payload.ingredients.unwrap_or_default(),
        special_ingredient: payload.special_ingredient.unwrap_or_default(),
        prices,
    }
}

// Edição parcial: campo ausente mantém o valor gravado.
// Média e contagem são agregados dos comentários e nunca vêm do formulário.
fn merged_draft(existing: CatalogItem, mut payload: SaveCatalogItemPayload) -> CatalogItemDraft {
    let prices = resolve_prices(&mut payload).unwrap_or(existing.prices);

    CatalogItemDraft {
        name: payload.name,
        description: payload.description.or(existing.description),
        image_ref: payload.image_ref.or(existing.image_ref),
        average_rating: existing.average_rating,
        ratings_count: existing.ratings_count,
        ingredients: payload.ingredients.unwrap_or(existing.ingredients),
        special_ingredient: payload.special_ingredient.unwrap_or(existing.special_ingredient),
        prices,
    }
}

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    cache: Arc<ConsoleCache>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>, cache: Arc<ConsoleCache>) -> Self {
        Self { catalog, cache }
    }

    pub async fn list_items(&self, category: Category) -> Result<Vec<CatalogItem>, AppError> {
        self.catalog.list_items(category).await
    }

    pub async fn get_item(&self, category: Category, item_id: Uuid) -> Result<CatalogItem, AppError> {
        self.catalog
            .get_item(category, item_id)
            .await?
            .ok_or(AppError::NotFound("Item"))
    }

    /// Cria (`editing == None`) ou edita um item da categoria.
    pub async fn save_item(
        &self,
        category: Category,
        payload: SaveCatalogItemPayload,
        editing: Option<Uuid>,
    ) -> Result<CatalogItem, AppError> {
        payload.validate()?;

        let saved = match editing {
            Some(item_id) => {
                let existing = self.get_item(category, item_id).await?;
                let draft = merged_draft(existing, payload);
                self.catalog.update_item(category, item_id, draft).await?
            }
            None => self.catalog.create_item(category, new_draft(payload)).await?,
        };

        // Nome e imagem aparecem no feed de comentários
        self.cache.invalidate_comments().await;
        tracing::info!("☕ Item '{}' salvo em {}", saved.name, category.key());
        Ok(saved)
    }

    pub async fn delete_item(&self, category: Category, item_id: Uuid) -> Result<(), AppError> {
        self.catalog.delete_item(category, item_id).await?;
        self.cache.invalidate_comments().await;
        tracing::info!("🗑️ Item {} removido de {}", item_id, category.key());
        Ok(())
    }
}
