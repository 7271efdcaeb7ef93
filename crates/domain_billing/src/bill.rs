//! Payable bills with a coverage window and a payment ledger

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{BillId, Money, MoneyError};

use crate::error::BillingError;

/// Bill status state machine.
///
/// `paid` and `closed` are terminal with respect to `close()`; `paid` and
/// `overdue` are derived from the payment ledger and the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Open,
    Closed,
    Paid,
    Overdue,
}

impl BillStatus {
    /// Statuses that reject a further close()
    pub fn is_terminal(&self) -> bool {
        matches!(self, BillStatus::Paid | BillStatus::Closed)
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BillStatus::Open => "open",
            BillStatus::Closed => "closed",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        };
        write!(f, "{name}")
    }
}

/// A payable obligation with a start/end coverage window and due date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// Bill name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// First day of the coverage window
    pub start_date: NaiveDate,
    /// Last day of the coverage window
    pub end_date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Total amount owed
    pub total_amount: Money,
    /// Amount paid so far
    pub paid_amount: Money,
    /// Current status
    pub status: BillStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Creates a new open bill.
    ///
    /// Validates `end_date >= start_date` and `due_date >= end_date`. The
    /// paid amount starts at zero in the total's currency.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        due_date: NaiveDate,
        total_amount: Money,
    ) -> Result<Self, BillingError> {
        if end_date < start_date {
            return Err(BillingError::InvalidDateRange(
                "end date cannot be before start date",
            ));
        }
        if due_date < end_date {
            return Err(BillingError::InvalidDateRange(
                "due date cannot be before end date",
            ));
        }

        let paid_amount = Money::zero(total_amount.currency().clone());
        let now = Utc::now();
        Ok(Self {
            id: BillId::new(),
            name: name.into(),
            description: description.into(),
            start_date,
            end_date,
            due_date,
            total_amount,
            paid_amount,
            status: BillStatus::Open,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records a payment and re-derives the status: `paid` once the ledger
    /// matches the total exactly, `overdue` when past due and not fully
    /// paid, otherwise unchanged.
    pub fn add_payment(&mut self, amount: &Money) -> Result<(), BillingError> {
        self.paid_amount = self.paid_amount.checked_add(amount)?;
        self.updated_at = Utc::now();
        self.refresh_status();
        Ok(())
    }

    fn refresh_status(&mut self) {
        if self.is_fully_paid() {
            self.status = BillStatus::Paid;
        } else if Utc::now().date_naive() > self.due_date {
            self.status = BillStatus::Overdue;
        }
    }

    /// Closes the bill; fails if it is already paid or closed
    pub fn close(&mut self) -> Result<(), BillingError> {
        if self.status.is_terminal() {
            return Err(BillingError::BillAlreadyTerminal(self.status));
        }
        self.status = BillStatus::Closed;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns the amount still owed
    pub fn remaining_amount(&self) -> Result<Money, MoneyError> {
        self.total_amount.checked_sub(&self.paid_amount)
    }

    /// True when the ledger matches the total exactly
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount == self.total_amount
    }

    /// Paid share as a percentage; 100 for a zero-total bill
    pub fn payment_percentage(&self) -> Decimal {
        if self.total_amount.is_zero() {
            return dec!(100);
        }
        self.paid_amount.amount() / self.total_amount.amount() * dec!(100)
    }

    /// True when the coverage window contains the date, inclusive
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
