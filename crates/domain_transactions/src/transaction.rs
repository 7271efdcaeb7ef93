//! Ledger transactions and shared expense splits

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{AccountId, BillId, CreditCardId, InvoiceId, Money, PersonId, TransactionId};

use crate::error::TransactionError;

/// Direction of the money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Debit => write!(f, "debit"),
            TransactionKind::Credit => write!(f, "credit"),
        }
    }
}

/// Spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Education,
    Income,
    Transfer,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Income => "income",
            Category::Transfer => "transfer",
            Category::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// One person's slice of a shared transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedExpense {
    /// Who owes this slice (weak id reference)
    pub person_id: PersonId,
    /// The slice in money terms
    pub amount: Money,
    /// The slice as a percentage of the transaction amount
    pub percentage: Decimal,
}

/// A single ledger movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Funding account, for account-sourced transactions
    pub account_id: Option<AccountId>,
    /// Funding card, for card-sourced transactions
    pub credit_card_id: Option<CreditCardId>,
    /// The invoice this landed on, if card-sourced
    pub invoice_id: Option<InvoiceId>,
    /// The bill this counts toward, if any
    pub bill_id: Option<BillId>,
    /// Debit or credit
    pub kind: TransactionKind,
    /// Spending category
    pub category: Category,
    /// Transaction amount
    pub amount: Money,
    /// Free-form description
    pub description: String,
    /// Business date of the movement
    pub date: NaiveDate,
    /// Percentage shares owed by other people
    pub shared_with: Vec<SharedExpense>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates an unattached transaction. The funding source and any
    /// bill/invoice links are set by the orchestrating service.
    pub fn new(
        kind: TransactionKind,
        category: Category,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id: None,
            credit_card_id: None,
            invoice_id: None,
            bill_id: None,
            kind,
            category,
            amount,
            description: description.into(),
            date,
            shared_with: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Links the transaction to a bill (weak id reference)
    pub fn assign_to_bill(&mut self, bill_id: BillId) {
        self.bill_id = Some(bill_id);
        self.updated_at = Utc::now();
    }

    /// Links the transaction to an invoice (weak id reference)
    pub fn assign_to_invoice(&mut self, invoice_id: InvoiceId) {
        self.invoice_id = Some(invoice_id);
        self.updated_at = Utc::now();
    }

    /// Sum of all shared percentages
    pub fn shared_percentage(&self) -> Decimal {
        self.shared_with.iter().map(|s| s.percentage).sum()
    }

    /// Adds one person's percentage share.
    ///
    /// The percentage must be in (0, 100], and the running total across
    /// all shares may not exceed 100. On the crossing call nothing
    /// changes; prior shares stay intact.
    pub fn add_shared_expense(
        &mut self,
        person_id: PersonId,
        percentage: Decimal,
    ) -> Result<(), TransactionError> {
        if percentage <= dec!(0) || percentage > dec!(100) {
            return Err(TransactionError::InvalidPercentage(percentage));
        }
        let total = self.shared_percentage();
        if total + percentage > dec!(100) {
            return Err(TransactionError::PercentageOverflow { total });
        }

        let amount = self.amount.multiply(percentage / dec!(100));
        self.shared_with.push(SharedExpense {
            person_id,
            amount,
            percentage,
        });
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Splits half the transaction evenly across the given people.
    ///
    /// Replaces any existing shares. The split always totals 50%, with
    /// each person owing 50/n percent; the remaining half stays
    /// personal.
    pub fn split_equally(&mut self, people: &[PersonId]) -> Result<(), TransactionError> {
        if people.is_empty() {
            return Err(TransactionError::EmptyPersonList);
        }

        self.shared_with.clear();
        let per_person = dec!(50) / Decimal::from(people.len() as u64);
        for person_id in people {
            let amount = self.amount.multiply(per_person / dec!(100));
            self.shared_with.push(SharedExpense {
                person_id: *person_id,
                amount,
                percentage: per_person,
            });
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The share of the amount not owed by anyone else
    pub fn personal_amount(&self) -> Money {
        let retained = dec!(100) - self.shared_percentage();
        self.amount.multiply(retained / dec!(100))
    }

    pub fn clear_shared_expenses(&mut self) {
        self.shared_with.clear();
        self.updated_at = Utc::now();
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use core_kernel::Currency;
    use proptest::prelude::*;

    proptest! {
        // shares never total more than 100% no matter the call sequence
        #[test]
        fn shared_percentage_never_exceeds_hundred(
            percentages in proptest::collection::vec(1u32..=100u32, 0..20)
        ) {
            let mut txn = Transaction::new(
                TransactionKind::Debit,
                Category::Other,
                Money::new(Decimal::from(500u32), Currency::brl()),
                "",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            );

            for pct in percentages {
                let _ = txn.add_shared_expense(PersonId::new(), Decimal::from(pct));
                prop_assert!(txn.shared_percentage() <= Decimal::from(100u32));
            }
        }
    }
}
