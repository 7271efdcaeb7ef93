//! Shared expense and bill reporting

use std::sync::Arc;

use chrono::NaiveDate;

use core_kernel::{BillId, Money, PersonId, TransactionId};
use domain_billing::{Bill, BillPort};
use domain_people::{Person, PersonPort};
use domain_transactions::{Transaction, TransactionPort};

use crate::error::ServiceError;

/// One shared transaction inside a person's report
#[derive(Debug, Clone)]
pub struct SharedExpenseEntry {
    pub transaction_id: TransactionId,
    pub description: String,
    pub date: NaiveDate,
    pub amount: Money,
}

/// What one person owes across shared transactions in a period
#[derive(Debug, Clone)]
pub struct SharedExpenseReport {
    pub person: Person,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// None when the period has no shared transactions
    pub total_owed: Option<Money>,
    pub entries: Vec<SharedExpenseEntry>,
}

/// Expense roll-up for a single bill
#[derive(Debug, Clone)]
pub struct BillReport {
    pub bill: Bill,
    /// None when no transactions reference the bill
    pub total_expenses: Option<Money>,
    pub shared_total: Option<Money>,
    pub personal_total: Option<Money>,
    /// Names of people carrying a share; unresolvable ids are skipped
    pub participants: Vec<String>,
}

/// Read-only roll-ups across transactions, bills, and people
pub struct ReportService {
    transactions: Arc<dyn TransactionPort>,
    bills: Arc<dyn BillPort>,
    people: Arc<dyn PersonPort>,
}

impl ReportService {
    pub fn new(
        transactions: Arc<dyn TransactionPort>,
        bills: Arc<dyn BillPort>,
        people: Arc<dyn PersonPort>,
    ) -> Self {
        Self {
            transactions,
            bills,
            people,
        }
    }

    /// Totals what a person owes across shared transactions dated
    /// strictly inside the period (both bounds exclusive)
    pub async fn shared_expense_report(
        &self,
        person_id: PersonId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SharedExpenseReport, ServiceError> {
        let person = self.people.find_by_id(person_id).await?;
        let shared = self.transactions.find_shared_with_person(person_id).await?;

        let mut total_owed: Option<Money> = None;
        let mut entries = Vec::new();
        for transaction in shared {
            if !(start < transaction.date && transaction.date < end) {
                continue;
            }
            for share in transaction
                .shared_with
                .iter()
                .filter(|s| s.person_id == person_id)
            {
                total_owed = Some(match total_owed {
                    Some(total) => total.checked_add(&share.amount)?,
                    None => share.amount.clone(),
                });
                entries.push(SharedExpenseEntry {
                    transaction_id: transaction.id,
                    description: transaction.description.clone(),
                    date: transaction.date,
                    amount: share.amount.clone(),
                });
            }
        }

        Ok(SharedExpenseReport {
            person,
            start,
            end,
            total_owed,
            entries,
        })
    }

    /// Rolls up the transactions assigned to a bill into total, shared,
    /// and personal amounts, naming the share participants
    pub async fn bill_report(&self, bill_id: BillId) -> Result<BillReport, ServiceError> {
        let bill = self.bills.find_by_id(bill_id).await?;
        let transactions = self.transactions.find_by_bill(bill_id).await?;

        let mut total_expenses: Option<Money> = None;
        let mut shared_total: Option<Money> = None;
        let mut personal_total: Option<Money> = None;
        let mut participant_ids: Vec<PersonId> = Vec::new();

        for transaction in &transactions {
            total_expenses = add_to(total_expenses, &transaction.amount)?;
            personal_total = add_to(personal_total, &transaction.personal_amount())?;
            for share in &transaction.shared_with {
                shared_total = add_to(shared_total, &share.amount)?;
                if !participant_ids.contains(&share.person_id) {
                    participant_ids.push(share.person_id);
                }
            }
        }

        let mut participants = Vec::new();
        for person_id in participant_ids {
            match self.people.find_by_id(person_id).await {
                Ok(person) => participants.push(person.name),
                // shares may point at a person deleted since the split
                Err(error) if error.is_not_found() => continue,
                Err(error) => return Err(error.into()),
            }
        }

        Ok(BillReport {
            bill,
            total_expenses,
            shared_total,
            personal_total,
            participants,
        })
    }

    /// Transactions dated inside the range, inclusive, for ad hoc
    /// period summaries
    pub async fn transactions_in_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_date_range(start, end).await?)
    }
}

fn add_to(total: Option<Money>, amount: &Money) -> Result<Option<Money>, ServiceError> {
    Ok(Some(match total {
        Some(total) => total.checked_add(amount)?,
        None => amount.clone(),
    }))
}
