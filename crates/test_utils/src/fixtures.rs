//! Pre-built test fixtures
//!
//! Ready-to-use values for the common cases the test suites cover.

use chrono::{Days, NaiveDate, Utc};
use core_kernel::{Currency, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Shorthand for a BRL amount
pub fn brl(amount: Decimal) -> Money {
    Money::new(amount, Currency::brl())
}

/// Shorthand for a calendar date
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard BRL amount
    pub fn brl_100() -> Money {
        brl(dec!(100.00))
    }

    /// A typical credit limit
    pub fn brl_limit() -> Money {
        brl(dec!(5000.00))
    }

    /// A zero BRL amount
    pub fn brl_zero() -> Money {
        Money::zero(Currency::brl())
    }

    /// An amount in a currency the BRL fixtures will not mix with
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::new("USD"))
    }
}

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// A window of `radius` days either side of today, for entities
    /// whose status depends on the current date
    pub fn window_around_today(radius: u64) -> (NaiveDate, NaiveDate) {
        let today = Self::today();
        (today - Days::new(radius), today + Days::new(radius))
    }

    /// A date safely in the past for overdue scenarios
    pub fn long_past() -> NaiveDate {
        Self::today() - Days::new(400)
    }
}
