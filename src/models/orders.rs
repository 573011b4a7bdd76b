// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE payment_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
    Refunded,
}

// Uma faixa de preço de um item do pedido (ex: "Medium", 4.50, 2 unidades)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    #[schema(example = "Medium")]
    pub size: String,
    #[schema(example = "4.50")]
    pub unit_price: Decimal,
    // Pedidos antigos não gravavam a quantidade. Ausente = 1.
    pub quantity: Option<u32>,
}

// Item de linha desnormalizado, gravado junto do pedido (JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    // String livre: é uma cópia do id do catálogo no momento da compra
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub prices: Vec<PriceTier>,
    // Total gravado pelo checkout. Nunca recalculamos a partir dos preços.
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,

    // Registros malformados podem não ter data
    pub ordered_at: Option<DateTime<Utc>>,

    pub payment_status: PaymentStatus,
    #[schema(example = "12.75")]
    pub total_amount: Decimal,
    #[schema(example = "credit_card")]
    pub payment_method: String,

    #[sqlx(json)]
    pub items: Vec<LineItem>,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        self.payment_status == PaymentStatus::Completed
    }
}
