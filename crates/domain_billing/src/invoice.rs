//! Monthly credit card invoices with balance carry-forward

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CreditCardId, InvoiceId, Money, MoneyError, TransactionId};

use crate::error::BillingError;

/// The `"YYYY-MM"` key identifying which calendar month an invoice covers.
///
/// Ordering follows the calendar, so the carry-forward scan can sort
/// invoices by reference month directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceMonth {
    year: i32,
    month: u32,
}

impl ReferenceMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, BillingError> {
        if !(1..=12).contains(&month) {
            return Err(BillingError::InvalidReferenceMonth(format!(
                "{year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month is validated to 1..=12")
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .expect("a month always has a preceding day")
    }

    /// The statement due date: the card's due day in the following month.
    /// A due day past the end of that month clamps to its last day.
    pub fn due_date(&self, due_day: u8) -> NaiveDate {
        let next = self.next();
        let day = u32::from(due_day).min(next.last_day().day());
        NaiveDate::from_ymd_opt(next.year, next.month, day)
            .expect("day is clamped to the month length")
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReferenceMonth {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BillingError::InvalidReferenceMonth(s.to_string());

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ReferenceMonth {
    type Error = BillingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ReferenceMonth> for String {
    fn from(month: ReferenceMonth) -> String {
        month.to_string()
    }
}

/// Invoice status state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Open,
    Closed,
    Paid,
    Overdue,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvoiceStatus::Open => "open",
            InvoiceStatus::Closed => "closed",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        };
        write!(f, "{name}")
    }
}

/// A monthly statement for one credit card.
///
/// Aggregates charges and payments against the balance carried forward
/// from the most recent closed invoice. After every add/remove the
/// identity `closing = previous + charges - payments` is recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardInvoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// The card this statement belongs to (weak id reference)
    pub credit_card_id: CreditCardId,
    /// Calendar month this statement covers
    pub reference_month: ReferenceMonth,
    /// First day of the statement period
    pub opening_date: NaiveDate,
    /// Last day of the statement period
    pub closing_date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Balance carried from the prior closed invoice
    pub previous_balance: Money,
    /// Sum of charges added this period
    pub total_charges: Money,
    /// Sum of payments added this period
    pub total_payments: Money,
    /// previous + charges - payments
    pub closing_balance: Money,
    /// Current status
    pub status: InvoiceStatus,
    /// Transactions tracked by this statement (weak id references)
    pub transaction_ids: Vec<TransactionId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CreditCardInvoice {
    /// Creates a new open invoice.
    ///
    /// Validates `opening <= closing <= due`. The closing balance starts
    /// at the previous balance; charge and payment totals start at zero
    /// in the same currency.
    pub fn new(
        credit_card_id: CreditCardId,
        reference_month: ReferenceMonth,
        opening_date: NaiveDate,
        closing_date: NaiveDate,
        due_date: NaiveDate,
        previous_balance: Money,
    ) -> Result<Self, BillingError> {
        if closing_date < opening_date {
            return Err(BillingError::InvalidDateRange(
                "closing date cannot be before opening date",
            ));
        }
        if due_date < closing_date {
            return Err(BillingError::InvalidDateRange(
                "due date cannot be before closing date",
            ));
        }

        let currency = previous_balance.currency().clone();
        let now = Utc::now();
        Ok(Self {
            id: InvoiceId::new(),
            credit_card_id,
            reference_month,
            opening_date,
            closing_date,
            due_date,
            total_charges: Money::zero(currency.clone()),
            total_payments: Money::zero(currency),
            closing_balance: previous_balance.clone(),
            previous_balance,
            status: InvoiceStatus::Open,
            transaction_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Records a transaction on the statement.
    ///
    /// Only valid while open. Payments accumulate into `total_payments`,
    /// charges into `total_charges`; the closing balance is recomputed.
    pub fn add_transaction(
        &mut self,
        transaction_id: TransactionId,
        amount: &Money,
        is_payment: bool,
    ) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Open {
            return Err(BillingError::InvoiceNotOpen(self.status));
        }

        self.transaction_ids.push(transaction_id);
        if is_payment {
            self.total_payments = self.total_payments.checked_add(amount)?;
        } else {
            self.total_charges = self.total_charges.checked_add(amount)?;
        }
        self.recalculate_balance()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reverses a previously recorded transaction. Only valid while open;
    /// fails if the id was never tracked.
    pub fn remove_transaction(
        &mut self,
        transaction_id: TransactionId,
        amount: &Money,
        is_payment: bool,
    ) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Open {
            return Err(BillingError::InvoiceNotOpen(self.status));
        }

        let before = self.transaction_ids.len();
        self.transaction_ids.retain(|id| *id != transaction_id);
        if self.transaction_ids.len() == before {
            return Err(BillingError::TransactionNotFound(transaction_id));
        }

        if is_payment {
            self.total_payments = self.total_payments.checked_sub(amount)?;
        } else {
            self.total_charges = self.total_charges.checked_sub(amount)?;
        }
        self.recalculate_balance()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn recalculate_balance(&mut self) -> Result<(), MoneyError> {
        self.closing_balance = self
            .previous_balance
            .checked_add(&self.total_charges)?
            .checked_sub(&self.total_payments)?;
        Ok(())
    }

    /// Closes the statement, then flips to overdue if the due date has
    /// passed with a balance outstanding.
    pub fn close(&mut self) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Open {
            return Err(BillingError::InvoiceNotOpen(self.status));
        }
        self.status = InvoiceStatus::Closed;
        self.updated_at = Utc::now();
        self.mark_overdue_if_past_due(Utc::now().date_naive());
        Ok(())
    }

    /// Flips a closed statement to overdue when the due date has passed
    /// with a balance outstanding. Returns whether the status changed.
    pub fn mark_overdue_if_past_due(&mut self, today: NaiveDate) -> bool {
        if self.status == InvoiceStatus::Closed
            && today > self.due_date
            && self.closing_balance.is_positive()
        {
            self.status = InvoiceStatus::Overdue;
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Applies a payment directly to the statement totals.
    ///
    /// Unlike [`add_transaction`](Self::add_transaction) this also works
    /// on closed and overdue statements, which is how a statement is
    /// normally settled. Only a paid statement rejects it.
    pub fn apply_payment(&mut self, amount: &Money) -> Result<(), BillingError> {
        if self.status == InvoiceStatus::Paid {
            return Err(BillingError::InvoiceAlreadyPaid);
        }
        self.total_payments = self.total_payments.checked_add(amount)?;
        self.recalculate_balance()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the statement paid; only allowed once the closing balance is
    /// zero or negative.
    pub fn mark_as_paid(&mut self) -> Result<(), BillingError> {
        if self.status == InvoiceStatus::Paid {
            return Err(BillingError::InvoiceAlreadyPaid);
        }
        if self.closing_balance.is_positive() {
            return Err(BillingError::OutstandingBalance(
                self.closing_balance.clone(),
            ));
        }
        self.status = InvoiceStatus::Paid;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.status == InvoiceStatus::Open
    }

    /// Closed for the purposes of carry-forward: closed, paid, or overdue
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status,
            InvoiceStatus::Closed | InvoiceStatus::Paid | InvoiceStatus::Overdue
        )
    }

    /// True when the statement period contains the date, inclusive on
    /// both ends
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.opening_date <= date && date <= self.closing_date
    }

    /// Human-readable statement period, e.g. "Mar 01 to Mar 31, 2024"
    pub fn statement_period(&self) -> String {
        format!(
            "{} to {}",
            self.opening_date.format("%b %d"),
            self.closing_date.format("%b %d, %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn brl(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::brl())
    }

    fn month(year: i32, month_num: u32) -> ReferenceMonth {
        ReferenceMonth::new(year, month_num).unwrap()
    }

    fn open_invoice(previous_balance: Money) -> CreditCardInvoice {
        let reference = month(2024, 1);
        CreditCardInvoice::new(
            CreditCardId::new(),
            reference,
            reference.first_day(),
            reference.last_day(),
            reference.due_date(10),
            previous_balance,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_month_parsing() {
        let parsed: ReferenceMonth = "2024-03".parse().unwrap();
        assert_eq!(parsed, month(2024, 3));
        assert_eq!(parsed.to_string(), "2024-03");

        for bad in ["2024", "2024-13", "2024-00", "24-03", "2024-3", "march"] {
            assert!(bad.parse::<ReferenceMonth>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_reference_month_ordering() {
        assert!(month(2023, 12) < month(2024, 1));
        assert!(month(2024, 1) < month(2024, 2));
    }

    #[test]
    fn test_reference_month_period_bounds() {
        let feb = month(2024, 2);
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        // 2024 is a leap year
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(month(2024, 12).next(), month(2025, 1));
    }

    #[test]
    fn test_due_day_clamps_to_month_length() {
        // due day 31 in a statement whose following month is February
        let jan = month(2023, 1);
        assert_eq!(
            jan.due_date(31),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            jan.due_date(10),
            NaiveDate::from_ymd_opt(2023, 2, 10).unwrap()
        );
    }

    #[test]
    fn test_new_invoice_starts_at_previous_balance() {
        let invoice = open_invoice(brl(dec!(120)));
        assert_eq!(invoice.closing_balance, brl(dec!(120)));
        assert!(invoice.total_charges.is_zero());
        assert!(invoice.total_payments.is_zero());
        assert_eq!(invoice.status, InvoiceStatus::Open);
    }

    #[test]
    fn test_balance_identity_after_add() {
        let mut invoice = open_invoice(brl(dec!(0)));
        invoice
            .add_transaction(TransactionId::new(), &brl(dec!(100)), false)
            .unwrap();
        invoice
            .add_transaction(TransactionId::new(), &brl(dec!(40)), true)
            .unwrap();

        assert_eq!(invoice.closing_balance, brl(dec!(60)));
    }

    #[test]
    fn test_remove_reverses_add() {
        let mut invoice = open_invoice(brl(dec!(50)));
        let txn = TransactionId::new();
        invoice.add_transaction(txn, &brl(dec!(30)), false).unwrap();
        invoice.remove_transaction(txn, &brl(dec!(30)), false).unwrap();

        assert_eq!(invoice.closing_balance, brl(dec!(50)));
        assert!(invoice.transaction_ids.is_empty());
    }

    #[test]
    fn test_remove_unknown_transaction_fails() {
        let mut invoice = open_invoice(brl(dec!(0)));
        let err = invoice
            .remove_transaction(TransactionId::new(), &brl(dec!(10)), false)
            .unwrap_err();
        assert!(matches!(err, BillingError::TransactionNotFound(_)));
    }

    #[test]
    fn test_mutations_rejected_when_not_open() {
        let mut invoice = open_invoice(brl(dec!(0)));
        invoice.close().unwrap();

        assert!(matches!(
            invoice.add_transaction(TransactionId::new(), &brl(dec!(10)), false),
            Err(BillingError::InvoiceNotOpen(_))
        ));
        assert!(matches!(
            invoice.close(),
            Err(BillingError::InvoiceNotOpen(_))
        ));
    }

    #[test]
    fn test_close_past_due_with_balance_goes_overdue() {
        // period far in the past so the due date has long passed
        let reference = month(2020, 1);
        let mut invoice = CreditCardInvoice::new(
            CreditCardId::new(),
            reference,
            reference.first_day(),
            reference.last_day(),
            reference.due_date(5),
            brl(dec!(0)),
        )
        .unwrap();
        invoice
            .add_transaction(TransactionId::new(), &brl(dec!(75)), false)
            .unwrap();

        invoice.close().unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Overdue);
    }

    #[test]
    fn test_mark_as_paid_requires_settled_balance() {
        let mut invoice = open_invoice(brl(dec!(0)));
        invoice
            .add_transaction(TransactionId::new(), &brl(dec!(100)), false)
            .unwrap();
        invoice
            .add_transaction(TransactionId::new(), &brl(dec!(40)), true)
            .unwrap();

        assert_eq!(invoice.closing_balance, brl(dec!(60)));
        assert!(matches!(
            invoice.mark_as_paid(),
            Err(BillingError::OutstandingBalance(_))
        ));

        invoice
            .add_transaction(TransactionId::new(), &brl(dec!(60)), true)
            .unwrap();
        invoice.mark_as_paid().unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert!(matches!(
            invoice.mark_as_paid(),
            Err(BillingError::InvoiceAlreadyPaid)
        ));
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let invoice = open_invoice(brl(dec!(0)));
        assert!(invoice.contains_date(invoice.opening_date));
        assert!(invoice.contains_date(invoice.closing_date));
        assert!(!invoice.contains_date(invoice.closing_date.succ_opt().unwrap()));
    }
}
