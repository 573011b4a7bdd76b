// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    catalog::Category,
    orders::{LineItem, PaymentStatus},
};

// 1. Faturamento Mensal (gráfico de área)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEarningsPoint {
    #[schema(example = "2024-1")]
    pub month: String, // "ano-mês", sem zero à esquerda
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEarnings {
    pub series: Vec<MonthlyEarningsPoint>,
    pub grand_total: Decimal,
}

// 2. Visão de Vendas por dia (gráfico de barras)
// As três listas são paralelas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub categories: Vec<String>, // "DD/MM"
    pub earnings: Vec<Decimal>,
    pub expenses: Vec<Decimal>,
}

// 3. Desempenho de Produtos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_count(count: u32) -> Self {
        if count > 10 {
            Priority::High
        } else if count > 5 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformanceEntry {
    pub rank: usize,
    pub item_id: String,
    pub name: String,
    pub image: String,
    pub count: u32,
    pub total_revenue: Decimal,
    pub priority: Priority,
}

// 4. Transações Recentes (timeline)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFeedEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub ordered_at: Option<DateTime<Utc>>,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub items: Vec<LineItem>,
    // Dica de renderização (cor do ponto na timeline)
    #[schema(example = "primary")]
    pub color: String,
}

// 5. Feed de comentários
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentFeedEntry {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub item_type: Category,
    pub image: Option<String>,
    pub comment_text: String,
    pub rating: i32,
    pub timestamp: Option<DateTime<Utc>>,
    pub user_id: Option<Uuid>,
}

// Tudo que a página do dashboard precisa, calculado de uma vez
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub monthly_earnings: MonthlyEarnings,
    pub sales_overview: SalesOverview,
    pub product_performance: Vec<ProductPerformanceEntry>,
    pub recent_transactions: Vec<TransactionFeedEntry>,
    pub computed_at: DateTime<Utc>,
}

// Máquina de estados da exclusão de comentário (uma por admin).
// Só muda por ação explícita: selecionar, confirmar ou cancelar.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CommentDeletion {
    #[default]
    Idle,
    PendingConfirmation { candidate: CommentFeedEntry },
}

impl CommentDeletion {
    // Selecionar outro comentário substitui o candidato anterior
    pub fn select(candidate: CommentFeedEntry) -> Self {
        CommentDeletion::PendingConfirmation { candidate }
    }

    pub fn candidate(&self) -> Option<&CommentFeedEntry> {
        match self {
            CommentDeletion::Idle => None,
            CommentDeletion::PendingConfirmation { candidate } => Some(candidate),
        }
    }
}

// Como o estado aparece na API
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDeletionStatus {
    #[schema(example = "pendingConfirmation")]
    pub state: String,
    pub candidate: Option<CommentFeedEntry>,
}

impl From<&CommentDeletion> for CommentDeletionStatus {
    fn from(deletion: &CommentDeletion) -> Self {
        let state = match deletion {
            CommentDeletion::Idle => "idle",
            CommentDeletion::PendingConfirmation { .. } => "pendingConfirmation",
        };
        Self {
            state: state.to_string(),
            candidate: deletion.candidate().cloned(),
        }
    }
}
