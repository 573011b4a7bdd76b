// src/services/aggregation.rs
//
// Motor de agregação do dashboard. Funções puras: recebem os registros já
// buscados e devolvem as séries prontas para os gráficos. Quem busca os dados
// é o DashboardService / CommentService.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::{
    common::money::round_money,
    models::{
        auth::UserProfile,
        catalog::{CatalogItem, Comment},
        dashboard::{
            CommentFeedEntry, MonthlyEarnings, MonthlyEarningsPoint, Priority,
            ProductPerformanceEntry, SalesOverview, TransactionFeedEntry,
        },
        orders::Order,
    },
};

/// Custo estimado de cada item vendido (42% do total do item).
/// Não há modelo de custo real por trás deste número.
pub const EXPENSE_RATIO: Decimal = Decimal::from_parts(42, 0, 0, false, 2);

pub const RECENT_TRANSACTIONS_LIMIT: usize = 20;

pub const TIMELINE_COLORS: [&str; 5] = ["primary", "secondary", "success", "warning", "error"];

// Registros sem data contam como "agora" nos agrupamentos por período
fn effective_date(order: &Order, now: DateTime<Utc>) -> DateTime<Utc> {
    order.ordered_at.unwrap_or(now)
}

// Registros sem data ordenam como época zero (ficam por último)
fn sort_instant(ts: Option<DateTime<Utc>>) -> DateTime<Utc> {
    ts.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

// =========================================================================
//  1. FATURAMENTO MENSAL
// =========================================================================

pub fn monthly_earnings(orders: &[Order], now: DateTime<Utc>) -> MonthlyEarnings {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    let mut grand_total = Decimal::ZERO;

    for order in orders.iter().filter(|o| o.is_completed()) {
        let date = effective_date(order, now);
        *by_month.entry((date.year(), date.month())).or_default() += order.total_amount;
        grand_total += order.total_amount;
    }

    // BTreeMap já itera em ordem (ano, mês)
    let series = by_month
        .into_iter()
        .map(|((year, month), total)| MonthlyEarningsPoint {
            month: format!("{}-{}", year, month),
            total: round_money(total),
        })
        .collect();

    MonthlyEarnings {
        series,
        grand_total: round_money(grand_total),
    }
}

// =========================================================================
//  2. VISÃO DE VENDAS POR DIA
// =========================================================================

pub fn sales_overview(orders: &[Order], now: DateTime<Utc>) -> SalesOverview {
    // Chave (mês, dia): o ano é descartado de propósito, "05/01" de 2023 e
    // de 2024 caem no mesmo balde.
    let mut by_day: BTreeMap<(u32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for order in orders.iter().filter(|o| o.is_completed()) {
        let date = effective_date(order, now);
        let expenses: Decimal = order
            .items
            .iter()
            .map(|item| item.total_price * EXPENSE_RATIO)
            .sum();

        let bucket = by_day.entry((date.month(), date.day())).or_default();
        bucket.0 += order.total_amount;
        bucket.1 += expenses;
    }

    let mut overview = SalesOverview::default();
    for ((month, day), (earnings, expenses)) in by_day {
        overview.categories.push(format!("{:02}/{:02}", day, month));
        overview.earnings.push(round_money(earnings));
        overview.expenses.push(round_money(expenses));
    }
    overview
}

// =========================================================================
//  3. DESEMPENHO DE PRODUTOS
// =========================================================================

struct ProductTally {
    item_id: String,
    name: String,
    image: String,
    count: u32,
    revenue: Decimal,
}

/// Ranking por número de pedidos que contêm o item. Todos os pedidos
/// contam, independente do status de pagamento.
pub fn product_performance(orders: &[Order]) -> Vec<ProductPerformanceEntry> {
    let mut tallies: Vec<ProductTally> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for order in orders {
        let mut seen_in_order: HashSet<usize> = HashSet::new();

        for item in &order.items {
            // Só a primeira faixa de preço entra na receita
            let (price, quantity) = item
                .prices
                .first()
                .map(|tier| (tier.unit_price, tier.quantity.unwrap_or(1)))
                .unwrap_or((Decimal::ZERO, 1));

            let key = (item.item_id.clone(), item.name.clone());
            let slot = *index.entry(key).or_insert_with(|| {
                tallies.push(ProductTally {
                    item_id: item.item_id.clone(),
                    name: item.name.clone(),
                    image: item.image_ref.clone().unwrap_or_default(),
                    count: 0,
                    revenue: Decimal::ZERO,
                });
                tallies.len() - 1
            });

            let tally = &mut tallies[slot];
            tally.revenue += price * Decimal::from(quantity);
            if seen_in_order.insert(slot) {
                tally.count += 1;
            }
        }
    }

    // sort_by é estável: empates ficam na ordem de descoberta
    tallies.sort_by(|a, b| b.count.cmp(&a.count));

    tallies
        .into_iter()
        .enumerate()
        .map(|(position, tally)| ProductPerformanceEntry {
            rank: position + 1,
            item_id: tally.item_id,
            name: tally.name,
            image: tally.image,
            count: tally.count,
            total_revenue: round_money(tally.revenue),
            priority: Priority::from_count(tally.count),
        })
        .collect()
}

// =========================================================================
//  4. TRANSAÇÕES RECENTES
// =========================================================================

pub fn recent_transactions(per_user: Vec<(UserProfile, Vec<Order>)>) -> Vec<TransactionFeedEntry> {
    let mut feed: Vec<(String, Order)> = per_user
        .into_iter()
        .flat_map(|(user, orders)| {
            let user_name = user.display_name().to_string();
            orders.into_iter().map(move |order| (user_name.clone(), order))
        })
        .collect();

    feed.sort_by(|(_, a), (_, b)| sort_instant(b.ordered_at).cmp(&sort_instant(a.ordered_at)));
    feed.truncate(RECENT_TRANSACTIONS_LIMIT);

    feed.into_iter()
        .enumerate()
        .map(|(position, (user_name, order))| TransactionFeedEntry {
            id: order.id,
            user_id: order.user_id,
            user_name,
            ordered_at: order.ordered_at,
            payment_status: order.payment_status,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            items: order.items,
            color: TIMELINE_COLORS[position % TIMELINE_COLORS.len()].to_string(),
        })
        .collect()
}

// =========================================================================
//  5. COMENTÁRIOS E NOTAS
// =========================================================================

pub fn comment_feed(per_item: Vec<(CatalogItem, Vec<Comment>)>) -> Vec<CommentFeedEntry> {
    let mut feed: Vec<CommentFeedEntry> = per_item
        .into_iter()
        .flat_map(|(item, comments)| {
            comments.into_iter().map(move |comment| CommentFeedEntry {
                id: comment.id,
                item_id: item.id,
                item_name: if item.name.is_empty() {
                    "Unknown Item".to_string()
                } else {
                    item.name.clone()
                },
                item_type: item.category,
                image: item.image_ref.clone(),
                comment_text: comment.comment.clone().unwrap_or_default(),
                rating: comment.rating_value(),
                timestamp: comment.created_at,
                user_id: comment.user_id,
            })
        })
        .collect();

    feed.sort_by(|a, b| sort_instant(b.timestamp).cmp(&sort_instant(a.timestamp)));
    feed
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub ratings_count: i32,
}

/// Média sobre os comentários com nota (> 0). Sem notas, tudo zero.
pub fn recompute_rating(remaining: &[Comment]) -> RatingSummary {
    let rated: Vec<i32> = remaining
        .iter()
        .map(Comment::rating_value)
        .filter(|rating| *rating > 0)
        .collect();

    if rated.is_empty() {
        return RatingSummary {
            average_rating: 0.0,
            ratings_count: 0,
        };
    }

    let sum: i32 = rated.iter().sum();
    RatingSummary {
        average_rating: f64::from(sum) / rated.len() as f64,
        ratings_count: rated.len() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{at, catalog_item, comment, line_item, money, order, profile};
    use crate::models::{catalog::Category, orders::PaymentStatus};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn monthly_earnings_skips_pending_orders() {
        let user = Uuid::new_v4();
        let orders = vec![
            order(user, at(2024, 1, 5), PaymentStatus::Completed, 1000, vec![]),
            order(user, at(2024, 1, 6), PaymentStatus::Pending, 500, vec![]),
            order(user, at(2024, 2, 1), PaymentStatus::Completed, 700, vec![]),
        ];

        let result = monthly_earnings(&orders, now());

        assert_eq!(
            result.series,
            vec![
                MonthlyEarningsPoint { month: "2024-1".into(), total: money(1000) },
                MonthlyEarningsPoint { month: "2024-2".into(), total: money(700) },
            ]
        );
        assert_eq!(result.grand_total, money(1700));
    }

    #[test]
    fn monthly_earnings_sorts_by_year_then_month_without_gaps() {
        let user = Uuid::new_v4();
        let orders = vec![
            order(user, at(2024, 11, 2), PaymentStatus::Completed, 250, vec![]),
            order(user, at(2023, 12, 2), PaymentStatus::Completed, 100, vec![]),
            order(user, at(2024, 2, 2), PaymentStatus::Completed, 333, vec![]),
            order(user, at(2024, 11, 20), PaymentStatus::Completed, 250, vec![]),
        ];

        let months: Vec<String> = monthly_earnings(&orders, now())
            .series
            .into_iter()
            .map(|p| p.month)
            .collect();

        // Meses sem pedidos simplesmente não aparecem
        assert_eq!(months, vec!["2023-12", "2024-2", "2024-11"]);
    }

    #[test]
    fn undated_orders_fall_into_the_current_month() {
        let user = Uuid::new_v4();
        let orders = vec![order(user, None, PaymentStatus::Completed, 420, vec![])];

        let result = monthly_earnings(&orders, now());

        assert_eq!(result.series[0].month, "2024-6");
        assert_eq!(result.series[0].total, money(420));
    }

    #[test]
    fn product_count_is_once_per_order_regardless_of_quantity() {
        let user = Uuid::new_v4();
        let latte = || line_item("latte", "Latte", 450, Some(3));
        let mut orders: Vec<Order> = (0..6)
            .map(|day| order(user, at(2024, 3, day + 1), PaymentStatus::Pending, 1350, vec![latte()]))
            .collect();
        // Mesmo item duas vezes no mesmo pedido ainda conta uma vez só
        orders[0].items.push(latte());

        let ranking = product_performance(&orders);

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].count, 6);
        assert_eq!(ranking[0].priority, Priority::Medium);
        // 7 linhas × 4.50 × 3
        assert_eq!(ranking[0].total_revenue, money(9450));
    }

    #[test]
    fn product_revenue_uses_only_the_first_price_tier() {
        let user = Uuid::new_v4();
        let mut item = line_item("mocha", "Mocha", 400, None);
        item.prices.push(crate::models::orders::PriceTier {
            size: "Large".into(),
            unit_price: money(600),
            quantity: Some(2),
        });
        let orders = vec![order(user, at(2024, 3, 1), PaymentStatus::Completed, 1600, vec![item])];

        let ranking = product_performance(&orders);

        assert_eq!(ranking[0].total_revenue, money(400));
    }

    #[test]
    fn product_ranking_is_stable_and_keyed_by_id_and_name() {
        let user = Uuid::new_v4();
        let orders = vec![
            order(user, at(2024, 3, 1), PaymentStatus::Completed, 0, vec![
                line_item("a", "Americano", 300, None),
                line_item("b", "Brew", 300, None),
            ]),
            order(user, at(2024, 3, 2), PaymentStatus::Completed, 0, vec![
                line_item("b", "Brew", 300, None),
                // Mesmo id, nome diferente: entrada separada
                line_item("a", "Americano Gelado", 350, None),
            ]),
        ];

        let ranking = product_performance(&orders);
        let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["Brew", "Americano", "Americano Gelado"]);
        assert_eq!(ranking.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(ranking.iter().all(|e| e.priority == Priority::Low));
    }

    #[test]
    fn priority_thresholds() {
        assert_eq!(Priority::from_count(11), Priority::High);
        assert_eq!(Priority::from_count(10), Priority::Medium);
        assert_eq!(Priority::from_count(6), Priority::Medium);
        assert_eq!(Priority::from_count(5), Priority::Low);
    }

    #[test]
    fn daily_expenses_apply_the_fixed_ratio() {
        let user = Uuid::new_v4();
        let orders = vec![order(
            user,
            at(2024, 1, 5),
            PaymentStatus::Completed,
            10000,
            vec![line_item("latte", "Latte", 10000, None)],
        )];

        let overview = sales_overview(&orders, now());

        assert_eq!(overview.categories, vec!["05/01"]);
        assert_eq!(overview.earnings, vec![money(10000)]);
        assert_eq!(overview.expenses, vec![money(4200)]);
    }

    #[test]
    fn daily_overview_merges_years_and_orders_by_month_then_day() {
        let user = Uuid::new_v4();
        let orders = vec![
            order(user, at(2024, 2, 3), PaymentStatus::Completed, 100, vec![]),
            order(user, at(2024, 1, 20), PaymentStatus::Completed, 200, vec![]),
            order(user, at(2023, 1, 20), PaymentStatus::Completed, 300, vec![]),
            order(user, at(2024, 1, 21), PaymentStatus::Failed, 999, vec![]),
        ];

        let overview = sales_overview(&orders, now());

        assert_eq!(overview.categories, vec!["20/01", "03/02"]);
        assert_eq!(overview.earnings, vec![money(500), money(100)]);
        assert_eq!(overview.expenses, vec![Decimal::ZERO, Decimal::ZERO]);
    }

    #[test]
    fn recent_transactions_are_capped_and_sorted_newest_first() {
        let alice = profile(Some("alice"));
        let nameless = profile(None);

        let alice_orders: Vec<Order> = (1..=15)
            .map(|day| order(alice.id, at(2024, 4, day), PaymentStatus::Completed, 100, vec![]))
            .collect();
        let mut other_orders: Vec<Order> = (1..=10)
            .map(|day| order(nameless.id, at(2024, 5, day), PaymentStatus::Pending, 100, vec![]))
            .collect();
        other_orders.push(order(nameless.id, None, PaymentStatus::Completed, 100, vec![]));

        let feed = recent_transactions(vec![(alice, alice_orders), (nameless, other_orders)]);

        assert_eq!(feed.len(), RECENT_TRANSACTIONS_LIMIT);
        assert!(feed.windows(2).all(|w| w[0].ordered_at > w[1].ordered_at));
        assert!(feed.iter().all(|e| e.ordered_at.is_some()));
        assert_eq!(feed[0].user_name, "Unknown User");
        assert_eq!(feed[10].user_name, "alice");
        assert_eq!(feed[0].color, "primary");
        assert_eq!(feed[5].color, "primary");
        assert_eq!(feed[4].color, "error");
    }

    #[test]
    fn undated_transactions_sort_last() {
        let user = profile(Some("bob"));
        let orders = vec![
            order(user.id, None, PaymentStatus::Completed, 100, vec![]),
            order(user.id, at(2020, 1, 1), PaymentStatus::Completed, 100, vec![]),
        ];

        let feed = recent_transactions(vec![(user, orders)]);

        assert!(feed[0].ordered_at.is_some());
        assert!(feed[1].ordered_at.is_none());
    }

    #[test]
    fn comment_feed_flattens_and_sorts_newest_first() {
        let mut espresso = catalog_item(Category::Coffee, "Espresso");
        let chai = catalog_item(Category::Tea, "");
        let old = comment(&espresso, Some(5), at(2024, 1, 1));
        let new = comment(&chai, None, at(2024, 3, 1));
        let undated = comment(&espresso, Some(2), None);
        espresso.image_ref = None;

        let feed = comment_feed(vec![
            (espresso, vec![old.clone(), undated.clone()]),
            (chai, vec![new.clone()]),
        ]);

        let ids: Vec<Uuid> = feed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![new.id, old.id, undated.id]);
        assert_eq!(feed[0].item_name, "Unknown Item");
        assert_eq!(feed[0].item_type, Category::Tea);
        assert_eq!(feed[0].rating, 0);
        assert_eq!(feed[1].image, None);
    }

    #[test]
    fn rating_recompute_ignores_unrated_comments() {
        let item = catalog_item(Category::Coffee, "Latte");
        let remaining = vec![comment(&item, Some(2), None), comment(&item, Some(0), None)];

        let summary = recompute_rating(&remaining);

        assert_eq!(summary, RatingSummary { average_rating: 2.0, ratings_count: 1 });
        assert_eq!(
            recompute_rating(&[comment(&item, None, None)]),
            RatingSummary { average_rating: 0.0, ratings_count: 0 }
        );
    }

    #[test]
    fn aggregators_are_idempotent() {
        let user = Uuid::new_v4();
        let orders = vec![
            order(user, at(2024, 1, 5), PaymentStatus::Completed, 1000, vec![line_item("a", "A", 100, None)]),
            order(user, at(2024, 1, 5), PaymentStatus::Completed, 1000, vec![line_item("b", "B", 100, None)]),
            order(user, at(2024, 2, 5), PaymentStatus::Pending, 1000, vec![line_item("a", "A", 100, None)]),
        ];

        assert_eq!(monthly_earnings(&orders, now()), monthly_earnings(&orders, now()));
        assert_eq!(sales_overview(&orders, now()), sales_overview(&orders, now()));
        assert_eq!(product_performance(&orders), product_performance(&orders));
    }
}
