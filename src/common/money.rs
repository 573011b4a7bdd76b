// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Arredonda um valor monetário para 2 casas (meio para longe do zero).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
