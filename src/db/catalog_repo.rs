// src/db/catalog_repo.rs

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::CatalogStore,
    models::catalog::{CatalogItem, CatalogItemDraft, Category, Comment},
};

const ITEM_COLUMNS: &str = "id, category, name, description, image_ref, average_rating, \
     ratings_count, ingredients, special_ingredient, prices";

// Repositório do cardápio: 'catalog_items' e a sub-coleção 'item_comments'
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn list_items(&self, category: Category) -> Result<Vec<CatalogItem>, AppError> {
        let items = sqlx::query_as::<_, CatalogItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM catalog_items WHERE category = $1 ORDER BY name ASC, id ASC"
        ))
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn get_item(
        &self,
        category: Category,
        item_id: Uuid,
    ) -> Result<Option<CatalogItem>, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM catalog_items WHERE category = $1 AND id = $2"
        ))
            .bind(category)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    async fn create_item(
        &self,
        category: Category,
        draft: CatalogItemDraft,
    ) -> Result<CatalogItem, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(&format!(
            r#"
            INSERT INTO catalog_items (
                id, category, name, description, image_ref,
                average_rating, ratings_count, ingredients, special_ingredient, prices
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
            .bind(Uuid::new_v4())
            .bind(category)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(&draft.image_ref)
            .bind(draft.average_rating)
            .bind(draft.ratings_count)
            .bind(&draft.ingredients)
            .bind(&draft.special_ingredient)
            .bind(Json(&draft.prices))
            .fetch_one(&self.pool)
            .await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        category: Category,
        item_id: Uuid,
        draft: CatalogItemDraft,
    ) -> Result<CatalogItem, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(&format!(
            r#"
            UPDATE catalog_items
            SET name = $3, description = $4, image_ref = $5,
                average_rating = $6, ratings_count = $7,
                ingredients = $8, special_ingredient = $9, prices = $10
            WHERE category = $1 AND id = $2
            RETURNING {ITEM_COLUMNS}
            "#
        ))
            .bind(category)
            .bind(item_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(&draft.image_ref)
            .bind(draft.average_rating)
            .bind(draft.ratings_count)
            .bind(&draft.ingredients)
            .bind(&draft.special_ingredient)
            .bind(Json(&draft.prices))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Item"))?;

        Ok(item)
    }

    async fn delete_item(&self, category: Category, item_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE category = $1 AND id = $2")
            .bind(category)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item"));
        }
        Ok(())
    }

    async fn update_item_rating(
        &self,
        category: Category,
        item_id: Uuid,
        average_rating: f64,
        ratings_count: i32,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE catalog_items
            SET average_rating = $3, ratings_count = $4
            WHERE category = $1 AND id = $2
            "#,
        )
            .bind(category)
            .bind(item_id)
            .bind(average_rating)
            .bind(ratings_count)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item"));
        }
        Ok(())
    }

    async fn list_comments(
        &self,
        category: Category,
        item_id: Uuid,
    ) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, category, item_id, user_id, comment, rating, created_at
            FROM item_comments
            WHERE category = $1 AND item_id = $2
            ORDER BY created_at DESC NULLS LAST, id ASC
            "#,
        )
            .bind(category)
            .bind(item_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(comments)
    }

    async fn delete_comment(
        &self,
        category: Category,
        item_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM item_comments WHERE category = $1 AND item_id = $2 AND id = $3",
        )
            .bind(category)
            .bind(item_id)
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comment"));
        }
        Ok(())
    }
}
