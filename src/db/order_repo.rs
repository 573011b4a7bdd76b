// src/db/order_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::stores::OrderStore, models::orders::Order};

// Leitura do histórico de pedidos (tabela 'order_history').
// Os pedidos são imutáveis depois do checkout, então aqui só há leitura.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, ordered_at, payment_status, total_amount, payment_method, items
            FROM order_history
            WHERE user_id = $1
            ORDER BY ordered_at DESC NULLS LAST, id ASC
            "#,
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn list_all_orders(&self) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, ordered_at, payment_status, total_amount, payment_method, items
            FROM order_history
            ORDER BY user_id ASC, ordered_at DESC NULLS LAST, id ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }
}
