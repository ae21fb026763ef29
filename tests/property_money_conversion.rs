use proptest::prelude::*;
use rust_decimal::Decimal;

use converge::domain::models::{Cents, Dollars, MoneyError};

proptest! {
    /// Property: a whole-dollar write of D reads back as exactly D x 100
    /// cents, with no rounding drift anywhere in the range.
    #[test]
    fn prop_whole_dollars_scale_by_one_hundred(dollars in -1_000_000_000i64..1_000_000_000) {
        let cents = Dollars::from(dollars).in_cents().unwrap();
        prop_assert_eq!(cents, Cents(dollars * 100));
    }

    /// Property: any amount expressed in whole cents converts exactly.
    #[test]
    fn prop_cent_precision_amounts_convert_exactly(cents in -1_000_000_000i64..1_000_000_000) {
        let dollars = Dollars::new(Decimal::new(cents, 2));
        prop_assert_eq!(dollars.in_cents().unwrap(), Cents(cents));
    }

    /// Property: sub-cent precision is always rejected, never rounded.
    #[test]
    fn prop_sub_cent_precision_is_rejected(mantissa in 1i64..1_000_000) {
        // mantissa * 10^-3 has a live thousandths digit unless it ends in 0
        prop_assume!(mantissa % 10 != 0);
        let dollars = Dollars::new(Decimal::new(mantissa, 3));
        prop_assert!(matches!(
            dollars.in_cents(),
            Err(MoneyError::FractionalCents(_))
        ));
    }

    /// Property: transfer arithmetic conserves money. For any initial
    /// balances and amount, from + to is unchanged after the transfer.
    #[test]
    fn prop_transfers_conserve_total_balance(
        from in 0i64..1_000_000,
        to in 0i64..1_000_000,
        amount in 0i64..1_000_000,
    ) {
        let from_final = Dollars::from(from).checked_sub(Dollars::from(amount)).unwrap();
        let to_final = Dollars::from(to).checked_add(Dollars::from(amount)).unwrap();
        let total_before = Dollars::from(from).checked_add(Dollars::from(to)).unwrap();
        let total_after = from_final.checked_add(to_final).unwrap();
        prop_assert_eq!(total_before, total_after);
    }
}
