// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE catalog_category do banco.
// As quatro partições fixas do cardápio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "catalog_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tea,
    Coffee,
    BlendedBeverages,
    MilkJuiceMore,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tea,
        Category::Coffee,
        Category::BlendedBeverages,
        Category::MilkJuiceMore,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Tea => "tea",
            Category::Coffee => "coffee",
            Category::BlendedBeverages => "blended_beverages",
            Category::MilkJuiceMore => "milk_juice_more",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPrice {
    #[schema(example = "Small")]
    pub size: String,
    #[schema(example = "3.50")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Uuid,
    pub category: Category,

    #[schema(example = "Caramel Macchiato")]
    pub name: String,
    pub description: Option<String>,
    pub image_ref: Option<String>,

    // Campos agregados, recalculados quando um comentário é apagado
    pub average_rating: f64,
    pub ratings_count: i32,

    pub ingredients: Vec<String>,
    pub special_ingredient: String,

    #[sqlx(json)]
    pub prices: Vec<CatalogPrice>,
}

// Dados de escrita de um item (criação ou edição)
#[derive(Debug, Clone)]
pub struct CatalogItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub image_ref: Option<String>,
    pub average_rating: f64,
    pub ratings_count: i32,
    pub ingredients: Vec<String>,
    pub special_ingredient: String,
    pub prices: Vec<CatalogPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub category: Category,
    pub item_id: Uuid,
    pub user_id: Option<Uuid>,

    pub comment: Option<String>,
    // 0..=5, onde 0 (ou ausente) significa "sem nota"
    pub rating: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn rating_value(&self) -> i32 {
        self.rating.unwrap_or(0)
    }
}

// Criação ou edição de item pelo console
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveCatalogItemPayload {
    #[validate(length(min = 1, message = "O nome do item é obrigatório."))]
    #[schema(example = "Caramel Macchiato")]
    pub name: String,
    pub description: Option<String>,
    pub image_ref: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "A média deve estar entre 0 e 5."))]
    pub average_rating: Option<f64>,
    #[validate(range(min = 0, message = "A contagem de notas não pode ser negativa."))]
    pub ratings_count: Option<i32>,

    pub ingredients: Option<Vec<String>>,
    pub special_ingredient: Option<String>,
    pub prices: Option<Vec<CatalogPrice>>,

    // Gera Small/Medium/Large quando não há preços explícitos
    #[schema(example = "3.50")]
    pub base_price: Option<Decimal>,
}
