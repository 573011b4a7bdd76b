// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{OrderStore, UserStore},
    models::{
        auth::UserProfile,
        dashboard::{
            DashboardSnapshot, MonthlyEarnings, ProductPerformanceEntry, SalesOverview,
            TransactionFeedEntry,
        },
        orders::Order,
    },
    services::{aggregation, cache::ConsoleCache, fanout::fan_out},
};

#[derive(Clone)]
pub struct DashboardService {
    orders: Arc<dyn OrderStore>,
    users: Arc<dyn UserStore>,
    cache: Arc<ConsoleCache>,
}

impl DashboardService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        users: Arc<dyn UserStore>,
        cache: Arc<ConsoleCache>,
    ) -> Self {
        Self { orders, users, cache }
    }

    // Busca os usuários e, em paralelo, o histórico de cada um
    async fn orders_per_user(&self) -> Result<Vec<(UserProfile, Vec<Order>)>, AppError> {
        let users = self.users.list_users().await?;

        let per_user = fan_out(users, |user| {
            let store = Arc::clone(&self.orders);
            let user_id = user.id;
            async move { store.list_orders_for_user(user_id).await }
        })
        .await?;

        tracing::debug!("Pedidos carregados de {} usuários", per_user.len());
        Ok(per_user)
    }

    fn flatten(per_user: &[(UserProfile, Vec<Order>)]) -> Vec<Order> {
        per_user
            .iter()
            .flat_map(|(_, orders)| orders.iter().cloned())
            .collect()
    }

    pub async fn get_monthly_earnings(&self) -> Result<MonthlyEarnings, AppError> {
        // Leitura "collection-group": inclui pedidos de perfis já apagados
        let orders = self.orders.list_all_orders().await?;
        Ok(aggregation::monthly_earnings(&orders, Utc::now()))
    }

    pub async fn get_sales_overview(&self) -> Result<SalesOverview, AppError> {
        let orders = Self::flatten(&self.orders_per_user().await?);
        Ok(aggregation::sales_overview(&orders, Utc::now()))
    }

    pub async fn get_product_performance(&self) -> Result<Vec<ProductPerformanceEntry>, AppError> {
        let orders = Self::flatten(&self.orders_per_user().await?);
        Ok(aggregation::product_performance(&orders))
    }

    pub async fn get_recent_transactions(&self) -> Result<Vec<TransactionFeedEntry>, AppError> {
        Ok(aggregation::recent_transactions(self.orders_per_user().await?))
    }

    // Calcula tudo a partir de uma busca completa
    async fn compute_snapshot(&self) -> Result<DashboardSnapshot, AppError> {
        let (all_orders, per_user) =
            tokio::try_join!(self.orders.list_all_orders(), self.orders_per_user())?;

        let now = Utc::now();
        let user_orders = Self::flatten(&per_user);

        Ok(DashboardSnapshot {
            monthly_earnings: aggregation::monthly_earnings(&all_orders, now),
            sales_overview: aggregation::sales_overview(&user_orders, now),
            product_performance: aggregation::product_performance(&user_orders),
            recent_transactions: aggregation::recent_transactions(per_user),
            computed_at: now,
        })
    }

    /// Snapshot do cache; calcula na primeira leitura.
    pub async fn get_snapshot(&self) -> Result<Arc<DashboardSnapshot>, AppError> {
        if let Some(snapshot) = self.cache.dashboard().await {
            return Ok(snapshot);
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<Arc<DashboardSnapshot>, AppError> {
        self.cache.invalidate_dashboard().await;

        let snapshot = self.compute_snapshot().await.map_err(|e| {
            tracing::error!("🔥 Falha ao calcular o dashboard: {}", e);
            e
        })?;

        tracing::info!(
            "📊 Dashboard recalculado: {} meses, {} produtos, {} transações",
            snapshot.monthly_earnings.series.len(),
            snapshot.product_performance.len(),
            snapshot.recent_transactions.len()
        );
        Ok(self.cache.store_dashboard(snapshot).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{at, line_item, money, order, profile, MemoryStore};
    use crate::models::orders::PaymentStatus;
    use uuid::Uuid;

    fn service(store: &Arc<MemoryStore>) -> DashboardService {
        DashboardService::new(store.clone(), store.clone(), ConsoleCache::new())
    }

    fn seed(store: &MemoryStore) -> (UserProfile, UserProfile) {
        let alice = profile(Some("alice"));
        let bob = profile(None);
        let mut state = store.state();
        state.orders.push(order(alice.id, at(2024, 1, 5), PaymentStatus::Completed, 1000, vec![
            line_item("latte", "Latte", 500, Some(2)),
        ]));
        state.orders.push(order(bob.id, at(2024, 1, 6), PaymentStatus::Pending, 500, vec![
            line_item("latte", "Latte", 500, None),
        ]));
        state.orders.push(order(bob.id, at(2024, 2, 1), PaymentStatus::Completed, 700, vec![
            line_item("mocha", "Mocha", 700, None),
        ]));
        // Pedido de um perfil que já foi apagado
        state.orders.push(order(Uuid::new_v4(), at(2024, 2, 2), PaymentStatus::Completed, 300, vec![]));
        state.users.push(alice.clone());
        state.users.push(bob.clone());
        (alice, bob)
    }

    #[tokio::test]
    async fn monthly_earnings_reads_across_all_users() {
        let store = MemoryStore::new();
        seed(&store);

        let monthly = service(&store).get_monthly_earnings().await.unwrap();

        assert_eq!(monthly.series.len(), 2);
        assert_eq!(monthly.series[0].total, money(1000));
        assert_eq!(monthly.series[1].total, money(1000));
        assert_eq!(monthly.grand_total, money(2000));
    }

    #[tokio::test]
    async fn per_user_aggregates_only_see_known_users() {
        let store = MemoryStore::new();
        seed(&store);
        let dashboard = service(&store);

        let overview = dashboard.get_sales_overview().await.unwrap();
        assert_eq!(overview.categories, vec!["05/01", "01/02"]);

        let ranking = dashboard.get_product_performance().await.unwrap();
        assert_eq!(ranking[0].name, "Latte");
        assert_eq!(ranking[0].count, 2);
        assert_eq!(ranking[0].total_revenue, money(1500));

        let feed = dashboard.get_recent_transactions().await.unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].user_name, "Unknown User");
        assert_eq!(feed[2].user_name, "alice");
    }

    #[tokio::test]
    async fn snapshot_is_cached_until_refreshed() {
        let store = MemoryStore::new();
        let (alice, _) = seed(&store);
        let dashboard = service(&store);

        let first = dashboard.get_snapshot().await.unwrap();
        store.state().orders.push(order(alice.id, at(2024, 3, 1), PaymentStatus::Completed, 100, vec![]));

        let cached = dashboard.get_snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&first, &cached));

        let refreshed = dashboard.refresh().await.unwrap();
        assert_eq!(refreshed.monthly_earnings.series.len(), 3);
        assert_eq!(refreshed.recent_transactions.len(), 4);
    }

    #[tokio::test]
    async fn a_failed_user_fetch_yields_no_partial_result() {
        let store = MemoryStore::new();
        seed(&store);
        store.fail_on("list_orders_for_user");
        let dashboard = service(&store);

        assert!(dashboard.get_recent_transactions().await.is_err());
        assert!(dashboard.get_snapshot().await.is_err());
        assert!(dashboard.cache.dashboard().await.is_none());
    }
}
