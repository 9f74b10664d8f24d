// In crates/core-types/src/pnl.rs

use crate::types::Direction;
use rust_decimal::Decimal;

/// Realized P&L of a round trip, before fees.
pub fn realized_profit_loss(
    direction: Direction,
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
) -> Decimal {
    match direction {
        Direction::Long => (exit_price - entry_price) * quantity,
        Direction::Short => (entry_price - exit_price) * quantity,
    }
}

/// Signed price move relative to the entry, in percent.
///
/// `None` for a zero entry price.
pub fn realized_return_percentage(
    direction: Direction,
    entry_price: Decimal,
    exit_price: Decimal,
) -> Option<Decimal> {
    if entry_price.is_zero() {
        return None;
    }
    let moved = match direction {
        Direction::Long => exit_price - entry_price,
        Direction::Short => entry_price - exit_price,
    };
    Some(moved / entry_price * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn long_profits_from_a_rise() {
        let pnl = realized_profit_loss(Direction::Long, dec!(150.25), dec!(155.75), dec!(50));
        assert_eq!(pnl, dec!(275.00));
    }

    #[test]
    fn short_profits_from_a_fall() {
        let pnl = realized_profit_loss(Direction::Short, dec!(100), dec!(110), dec!(2));
        assert_eq!(pnl, dec!(-20));
    }

    #[test]
    fn return_percentage_guards_zero_entry() {
        assert_eq!(realized_return_percentage(Direction::Long, dec!(0), dec!(5)), None);
        assert_eq!(
            realized_return_percentage(Direction::Long, dec!(200), dec!(210)),
            Some(dec!(5))
        );
    }
}
