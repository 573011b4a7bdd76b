// src/db/memory.rs
//
// Implementação em memória de todos os stores, usada nos testes.
// Permite injetar falhas por operação para exercitar os caminhos parciais.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{AuthDirectory, CatalogStore, OrderStore, UserStore},
    models::{
        auth::{AuthIdentity, UserProfile},
        catalog::{CatalogItem, CatalogItemDraft, Category, Comment},
        orders::{LineItem, Order, PaymentStatus, PriceTier},
    },
};

#[derive(Default)]
pub struct MemoryState {
    pub orders: Vec<Order>,
    pub items: Vec<CatalogItem>,
    pub comments: Vec<Comment>,
    pub users: Vec<UserProfile>,
    pub identities: Vec<AuthIdentity>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    failures: Mutex<HashSet<&'static str>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.failures.lock().unwrap().insert(operation);
    }

    fn check(&self, operation: &'static str) -> Result<(), AppError> {
        if self.failures.lock().unwrap().contains(operation) {
            return Err(anyhow::anyhow!("falha injetada em {}", operation).into());
        }
        Ok(())
    }
}

fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> std::cmp::Ordering {
    // None vai para o fim, como NULLS LAST
    b.cmp(a)
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        self.check("list_orders_for_user")?;
        let mut orders: Vec<Order> = self
            .state()
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| newest_first(&a.ordered_at, &b.ordered_at));
        Ok(orders)
    }

    async fn list_all_orders(&self) -> Result<Vec<Order>, AppError> {
        self.check("list_all_orders")?;
        Ok(self.state().orders.clone())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_items(&self, category: Category) -> Result<Vec<CatalogItem>, AppError> {
        self.check("list_items")?;
        Ok(self
            .state()
            .items
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect())
    }

    async fn get_item(
        &self,
        category: Category,
        item_id: Uuid,
    ) -> Result<Option<CatalogItem>, AppError> {
        self.check("get_item")?;
        Ok(self
            .state()
            .items
            .iter()
            .find(|i| i.category == category && i.id == item_id)
            .cloned())
    }

    async fn create_item(
        &self,
        category: Category,
        draft: CatalogItemDraft,
    ) -> Result<CatalogItem, AppError> {
        self.check("create_item")?;
        let item = apply_draft(Uuid::new_v4(), category, draft);
        self.state().items.push(item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        category: Category,
        item_id: Uuid,
        draft: CatalogItemDraft,
    ) -> Result<CatalogItem, AppError> {
        self.check("update_item")?;
        let mut state = self.state();
        let slot = state
            .items
            .iter_mut()
            .find(|i| i.category == category && i.id == item_id)
            .ok_or(AppError::NotFound("Item"))?;
        *slot = apply_draft(item_id, category, draft);
        Ok(slot.clone())
    }

    async fn delete_item(&self, category: Category, item_id: Uuid) -> Result<(), AppError> {
        self.check("delete_item")?;
        let mut state = self.state();
        let before = state.items.len();
        state.items.retain(|i| !(i.category == category && i.id == item_id));
        if state.items.len() == before {
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
        self.check("update_item_rating")?;
        let mut state = self.state();
        let item = state
            .items
            .iter_mut()
            .find(|i| i.category == category && i.id == item_id)
            .ok_or(AppError::NotFound("Item"))?;
        item.average_rating = average_rating;
        item.ratings_count = ratings_count;
        Ok(())
    }

    async fn list_comments(
        &self,
        category: Category,
        item_id: Uuid,
    ) -> Result<Vec<Comment>, AppError> {
        self.check("list_comments")?;
        Ok(self
            .state()
            .comments
            .iter()
            .filter(|c| c.category == category && c.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn delete_comment(
        &self,
        category: Category,
        item_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        self.check("delete_comment")?;
        let mut state = self.state();
        let before = state.comments.len();
        state
            .comments
            .retain(|c| !(c.category == category && c.item_id == item_id && c.id == comment_id));
        if state.comments.len() == before {
            return Err(AppError::NotFound("Comment"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        self.check("list_users")?;
        Ok(self.state().users.clone())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        self.check("find_profile")?;
        Ok(self.state().users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        self.check("username_exists")?;
        Ok(self
            .state()
            .users
            .iter()
            .any(|u| u.username.as_deref() == Some(username)))
    }

    async fn create_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        self.check("create_profile")?;
        self.state().users.push(profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        self.check("update_profile")?;
        let mut state = self.state();
        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id == profile.id)
            .ok_or(AppError::NotFound("User"))?;
        // created_at nunca muda numa edição
        let created_at = slot.created_at;
        *slot = UserProfile { created_at, ..profile };
        Ok(slot.clone())
    }

    async fn delete_profile(&self, user_id: Uuid) -> Result<(), AppError> {
        self.check("delete_profile")?;
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|u| u.id != user_id);
        if state.users.len() == before {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthDirectory for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthIdentity>, AppError> {
        self.check("find_by_email")?;
        Ok(self
            .state()
            .identities
            .iter()
            .find(|i| i.email == email)
            .cloned())
    }

    async fn create_identity(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthIdentity, AppError> {
        self.check("create_identity")?;
        let mut state = self.state();
        if state.identities.iter().any(|i| i.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let identity = AuthIdentity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_admin: false,
        };
        state.identities.push(identity.clone());
        Ok(identity)
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError> {
        self.check("delete_identity")?;
        let mut state = self.state();
        let before = state.identities.len();
        state.identities.retain(|i| i.id != user_id);
        if state.identities.len() == before {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }
}

fn apply_draft(id: Uuid, category: Category, draft: CatalogItemDraft) -> CatalogItem {
    CatalogItem {
        id,
        category,
        name: draft.name,
        description: draft.description,
        image_ref: draft.image_ref,
        average_rating: draft.average_rating,
        ratings_count: draft.ratings_count,
        ingredients: draft.ingredients,
        special_ingredient: draft.special_ingredient,
        prices: draft.prices,
    }
}

// --- Fixtures ---

pub fn at(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single()
}

pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn line_item(item_id: &str, name: &str, unit_cents: i64, quantity: Option<u32>) -> LineItem {
    let unit_price = money(unit_cents);
    let total_price = unit_price * Decimal::from(quantity.unwrap_or(1));
    LineItem {
        item_id: item_id.to_string(),
        name: name.to_string(),
        image_ref: Some(format!("https://img.example/{}.png", item_id)),
        prices: vec![PriceTier {
            size: "Small".to_string(),
            unit_price,
            quantity,
        }],
        total_price,
    }
}

pub fn order(
    user_id: Uuid,
    ordered_at: Option<DateTime<Utc>>,
    status: PaymentStatus,
    total_cents: i64,
    items: Vec<LineItem>,
) -> Order {
    Order {
        id: Uuid::new_v4(),
        user_id,
        ordered_at,
        payment_status: status,
        total_amount: money(total_cents),
        payment_method: "card".to_string(),
        items,
    }
}

pub fn profile(username: Option<&str>) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        username: username.map(str::to_string),
        email: format!("{}@coffee.test", username.unwrap_or("anon")),
        phone: None,
        address: None,
        profile_picture: None,
        created_at: at(2024, 1, 1),
    }
}

pub fn catalog_item(category: Category, name: &str) -> CatalogItem {
    CatalogItem {
        id: Uuid::new_v4(),
        category,
        name: name.to_string(),
        description: None,
        image_ref: Some(format!("https://img.example/{}.png", name)),
        average_rating: 0.0,
        ratings_count: 0,
        ingredients: vec![],
        special_ingredient: String::new(),
        prices: vec![],
    }
}

pub fn comment(item: &CatalogItem, rating: Option<i32>, created_at: Option<DateTime<Utc>>) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        category: item.category,
        item_id: item.id,
        user_id: Some(Uuid::new_v4()),
        comment: Some("Muito bom".to_string()),
        rating,
        created_at,
    }
}
