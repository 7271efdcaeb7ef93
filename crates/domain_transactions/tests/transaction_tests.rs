//! Comprehensive tests for domain_transactions

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, PersonId};
use domain_transactions::{Category, Transaction, TransactionError, TransactionKind};

fn brl(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::brl())
}

fn debit(amount: rust_decimal::Decimal, category: Category) -> Transaction {
    Transaction::new(
        TransactionKind::Debit,
        category,
        brl(amount),
        "",
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    )
}

mod sharing_rules {
    use super::*;

    #[test]
    fn share_amounts_round_to_cents() {
        // 33.33% of 100 is 33.33 after rounding
        let mut txn = debit(dec!(100), Category::Food);
        txn.add_shared_expense(PersonId::new(), dec!(33.33)).unwrap();
        assert_eq!(txn.shared_with[0].amount, brl(dec!(33.33)));
    }

    #[test]
    fn crossing_call_fails_with_prior_shares_intact() {
        let mut txn = debit(dec!(100), Category::Shopping);
        txn.add_shared_expense(PersonId::new(), dec!(70)).unwrap();

        let err = txn.add_shared_expense(PersonId::new(), dec!(31)).unwrap_err();
        assert!(matches!(err, TransactionError::PercentageOverflow { .. }));
        assert_eq!(txn.shared_with.len(), 1);
        assert_eq!(txn.shared_percentage(), dec!(70));
    }

    #[test]
    fn exactly_one_hundred_percent_is_allowed() {
        let mut txn = debit(dec!(100), Category::Shopping);
        txn.add_shared_expense(PersonId::new(), dec!(60)).unwrap();
        txn.add_shared_expense(PersonId::new(), dec!(40)).unwrap();
        assert_eq!(txn.shared_percentage(), dec!(100));
        assert!(txn.personal_amount().is_zero());
    }

    #[test]
    fn clear_resets_to_fully_personal() {
        let mut txn = debit(dec!(100), Category::Food);
        txn.add_shared_expense(PersonId::new(), dec!(40)).unwrap();
        txn.clear_shared_expenses();
        assert!(txn.shared_with.is_empty());
        assert_eq!(txn.personal_amount(), brl(dec!(100)));
    }
}

mod fifty_percent_split {
    use super::*;

    #[test]
    fn two_people_get_a_quarter_each() {
        let mut txn = debit(dec!(100), Category::Food);
        txn.split_equally(&[PersonId::new(), PersonId::new()]).unwrap();

        let shares: Vec<Money> = txn.shared_with.iter().map(|s| s.amount.clone()).collect();
        assert_eq!(shares, vec![brl(dec!(25)), brl(dec!(25))]);
        assert_eq!(txn.personal_amount(), brl(dec!(50)));
    }

    #[test]
    fn single_person_gets_half() {
        let mut txn = debit(dec!(90), Category::Entertainment);
        txn.split_equally(&[PersonId::new()]).unwrap();

        assert_eq!(txn.shared_with[0].percentage, dec!(50));
        assert_eq!(txn.shared_with[0].amount, brl(dec!(45)));
    }

    #[test]
    fn three_way_split_totals_fifty_percent() {
        let mut txn = debit(dec!(100), Category::Food);
        txn.split_equally(&[PersonId::new(), PersonId::new(), PersonId::new()])
            .unwrap();

        assert_eq!(txn.shared_percentage(), dec!(50));
        // each share rounds to 16.67
        for share in &txn.shared_with {
            assert_eq!(share.amount, brl(dec!(16.67)));
        }
    }
}

mod serialization {
    use super::*;

    #[test]
    fn kind_and_category_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Debit).unwrap(),
            "\"debit\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Healthcare).unwrap(),
            "\"healthcare\""
        );
    }

    #[test]
    fn transaction_roundtrips_through_json() {
        let mut txn = debit(dec!(42.50), Category::Transportation);
        txn.add_shared_expense(PersonId::new(), dec!(50)).unwrap();

        let json = serde_json::to_string(&txn).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, txn.id);
        assert_eq!(back.amount, txn.amount);
        assert_eq!(back.shared_with.len(), 1);
        assert_eq!(back.category, Category::Transportation);
    }
}
