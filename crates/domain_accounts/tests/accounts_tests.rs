//! Comprehensive tests for domain_accounts

use rust_decimal_macros::dec;

use core_kernel::{AccountId, Currency, Money};
use domain_accounts::{Account, AccountKind, AccountsError, CreditCard};

fn brl(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::brl())
}

mod overdraft_policy {
    use super::*;

    #[test]
    fn checking_goes_negative_by_the_exact_deficit() {
        let mut account = Account::new("Main", AccountKind::Checking, brl(dec!(1000)), "daily");
        account.withdraw(&brl(dec!(1500))).unwrap();
        assert_eq!(account.balance, brl(dec!(-500)));
    }

    #[test]
    fn non_checking_kinds_reject_overdraft_unchanged() {
        for kind in [AccountKind::Savings, AccountKind::Investment] {
            let mut account = Account::new("Stash", kind, brl(dec!(1000)), "");
            let err = account.withdraw(&brl(dec!(1500))).unwrap_err();
            assert!(matches!(err, AccountsError::InsufficientFunds { .. }));
            assert_eq!(account.balance, brl(dec!(1000)));
        }
    }

    #[test]
    fn available_balance_is_the_raw_balance() {
        let account = Account::new("Main", AccountKind::Checking, brl(dec!(12.34)), "");
        assert_eq!(account.available_balance(), &brl(dec!(12.34)));
    }
}

mod credit_limit {
    use super::*;

    #[test]
    fn charge_sequence_stops_at_the_limit() {
        let mut card =
            CreditCard::new(AccountId::new(), "Visa", "4242", brl(dec!(5000)), 10).unwrap();

        card.charge(&brl(dec!(3000))).unwrap();
        card.charge(&brl(dec!(2000))).unwrap();
        assert_eq!(card.current_balance, brl(dec!(5000)));

        // one more cent fails and leaves the balance untouched
        let err = card.charge(&brl(dec!(0.01))).unwrap_err();
        assert!(matches!(err, AccountsError::CreditLimitExceeded { .. }));
        assert_eq!(card.current_balance, brl(dec!(5000)));
    }

    #[test]
    fn utilization_tracks_the_balance() {
        let mut card =
            CreditCard::new(AccountId::new(), "Visa", "4242", brl(dec!(2000)), 10).unwrap();
        card.charge(&brl(dec!(500))).unwrap();
        assert_eq!(card.utilization_percentage(), dec!(25));
    }

    #[test]
    fn payment_clamp_absorbs_overpayment() {
        let mut card =
            CreditCard::new(AccountId::new(), "Visa", "4242", brl(dec!(2000)), 10).unwrap();
        card.charge(&brl(dec!(120))).unwrap();
        card.payment(&brl(dec!(500))).unwrap();
        assert!(card.current_balance.is_zero());
        assert_eq!(card.available_credit().unwrap(), brl(dec!(2000)));
    }
}

mod card_validation {
    use super::*;

    #[test]
    fn due_day_bounds() {
        for due_day in [1u8, 15, 31] {
            assert!(
                CreditCard::new(AccountId::new(), "Visa", "4242", brl(dec!(100)), due_day).is_ok()
            );
        }
        for due_day in [0u8, 32] {
            assert!(matches!(
                CreditCard::new(AccountId::new(), "Visa", "4242", brl(dec!(100)), due_day),
                Err(AccountsError::InvalidDueDay(_))
            ));
        }
    }

    #[test]
    fn last_four_digits_must_be_four_characters() {
        for digits in ["", "12", "12345"] {
            assert!(matches!(
                CreditCard::new(AccountId::new(), "Visa", digits, brl(dec!(100)), 10),
                Err(AccountsError::InvalidLastFourDigits(_))
            ));
        }
    }
}

mod serialization {
    use super::*;

    #[test]
    fn account_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AccountKind::Checking).unwrap(),
            "\"checking\""
        );
        assert_eq!(
            serde_json::to_string(&AccountKind::Investment).unwrap(),
            "\"investment\""
        );
    }

    #[test]
    fn account_roundtrips_through_json() {
        let account = Account::new("Main", AccountKind::Savings, brl(dec!(10.50)), "rainy day");
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, account.id);
        assert_eq!(back.balance, account.balance);
        assert_eq!(back.kind, AccountKind::Savings);
    }
}
