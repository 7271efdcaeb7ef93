//! Transaction creation workflow and queries
//!
//! Creating a transaction moves the money first, then attaches the
//! transaction to the covering invoice and bill on a best-effort basis:
//! an attachment failure is logged and swallowed so the movement itself
//! still lands.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use core_kernel::{AccountId, CreditCardId, InvoiceId, Money, PersonId, TransactionId};
use domain_accounts::{AccountPort, CreditCard, CreditCardPort};
use domain_billing::{BillPort, BillStatus, CreditCardInvoice, InvoicePort, ReferenceMonth};
use domain_transactions::{Category, Transaction, TransactionKind, TransactionPort};

use crate::error::ServiceError;

/// Where the money for a transaction comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSource {
    Account(AccountId),
    CreditCard(CreditCardId),
}

/// Everything needed to create a transaction
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub source: TransactionSource,
}

/// Transaction orchestration across accounts, cards, invoices, and bills
pub struct TransactionService {
    transactions: Arc<dyn TransactionPort>,
    accounts: Arc<dyn AccountPort>,
    cards: Arc<dyn CreditCardPort>,
    invoices: Arc<dyn InvoicePort>,
    bills: Arc<dyn BillPort>,
}

impl TransactionService {
    pub fn new(
        transactions: Arc<dyn TransactionPort>,
        accounts: Arc<dyn AccountPort>,
        cards: Arc<dyn CreditCardPort>,
        invoices: Arc<dyn InvoicePort>,
        bills: Arc<dyn BillPort>,
    ) -> Self {
        Self {
            transactions,
            accounts,
            cards,
            invoices,
            bills,
        }
    }

    /// Creates a transaction and applies its money movement.
    ///
    /// The movement itself is all-or-nothing: an insufficient-funds or
    /// over-limit failure aborts the whole operation. Invoice and bill
    /// attachment afterwards is best-effort.
    pub async fn create_transaction(
        &self,
        draft: TransactionDraft,
    ) -> Result<Transaction, ServiceError> {
        let mut transaction = Transaction::new(
            draft.kind,
            draft.category,
            draft.amount,
            draft.description,
            draft.date,
        );

        match draft.source {
            TransactionSource::Account(account_id) => {
                let mut account = self.accounts.find_by_id(account_id).await?;
                match draft.kind {
                    TransactionKind::Debit => account.withdraw(&transaction.amount)?,
                    TransactionKind::Credit => account.deposit(&transaction.amount)?,
                }
                self.accounts.update(&account).await?;
                transaction.account_id = Some(account_id);
            }
            TransactionSource::CreditCard(card_id) => {
                let mut card = self.cards.find_by_id(card_id).await?;
                match draft.kind {
                    TransactionKind::Debit => card.charge(&transaction.amount)?,
                    TransactionKind::Credit => card.payment(&transaction.amount)?,
                }
                self.cards.update(&card).await?;
                transaction.credit_card_id = Some(card_id);

                if let Err(error) = self.attach_to_invoice(&card, &mut transaction).await {
                    warn!(
                        transaction_id = %transaction.id,
                        card_id = %card_id,
                        %error,
                        "could not attach transaction to an invoice"
                    );
                }
            }
        }

        if let Err(error) = self.auto_assign_to_bill(&mut transaction).await {
            warn!(
                transaction_id = %transaction.id,
                %error,
                "could not auto-assign transaction to a bill"
            );
        }

        self.transactions.create(&transaction).await?;
        debug!(
            transaction_id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            invoice = transaction.invoice_id.is_some(),
            bill = transaction.bill_id.is_some(),
            "transaction created"
        );
        Ok(transaction)
    }

    /// Finds or creates the invoice covering the transaction date and
    /// records the transaction on it.
    ///
    /// Resolution order: an invoice whose period contains the date, then
    /// the card's open invoice, then a fresh invoice for the date's
    /// calendar month seeded from the most recent closed earlier
    /// invoice.
    async fn attach_to_invoice(
        &self,
        card: &CreditCard,
        transaction: &mut Transaction,
    ) -> Result<(), ServiceError> {
        let mut invoice = self.resolve_invoice(card, transaction.date).await?;
        let is_payment = transaction.kind == TransactionKind::Credit;
        invoice.add_transaction(transaction.id, &transaction.amount, is_payment)?;
        self.invoices.update(&invoice).await?;
        transaction.assign_to_invoice(invoice.id);
        Ok(())
    }

    async fn resolve_invoice(
        &self,
        card: &CreditCard,
        date: NaiveDate,
    ) -> Result<CreditCardInvoice, ServiceError> {
        let mut history = self.invoices.find_by_card(card.id).await?;

        if let Some(covering) = history.iter().find(|i| i.contains_date(date)) {
            return Ok(covering.clone());
        }
        if let Some(open) = history.iter().find(|i| i.is_open()) {
            return Ok(open.clone());
        }

        // no invoice fits, open one for the transaction's month seeded
        // with the latest closed balance; a gap in the sequence carries
        // the balance across it
        let month = ReferenceMonth::from_date(date);
        history.sort_by(|a, b| b.reference_month.cmp(&a.reference_month));
        let previous_balance = history
            .iter()
            .find(|i| i.is_closed() && i.reference_month < month)
            .map(|i| i.closing_balance.clone())
            .unwrap_or_else(|| Money::zero(card.credit_limit.currency().clone()));

        let invoice = CreditCardInvoice::new(
            card.id,
            month,
            month.first_day(),
            month.last_day(),
            month.due_date(card.due_day),
            previous_balance,
        )?;
        self.invoices.create(&invoice).await?;
        Ok(invoice)
    }

    /// Links the transaction to the open bill whose window contains its
    /// date, preferring the tightest window when several match
    async fn auto_assign_to_bill(
        &self,
        transaction: &mut Transaction,
    ) -> Result<(), ServiceError> {
        let open_bills = self.bills.find_by_status(BillStatus::Open).await?;
        let covering = open_bills
            .into_iter()
            .filter(|b| b.covers_date(transaction.date))
            .min_by_key(|b| b.end_date - b.start_date);

        if let Some(bill) = covering {
            transaction.assign_to_bill(bill.id);
        }
        Ok(())
    }

    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, ServiceError> {
        Ok(self.transactions.find_by_id(id).await?)
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_all().await?)
    }

    pub async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_account(account_id).await?)
    }

    pub async fn list_by_card(
        &self,
        card_id: CreditCardId,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_card(card_id).await?)
    }

    pub async fn list_by_invoice(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_invoice(invoice_id).await?)
    }

    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_date_range(start, end).await?)
    }

    pub async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_category(category).await?)
    }

    /// Splits half the transaction evenly across the given people
    pub async fn split_equally(
        &self,
        id: TransactionId,
        people: &[PersonId],
    ) -> Result<Transaction, ServiceError> {
        let mut transaction = self.transactions.find_by_id(id).await?;
        transaction.split_equally(people)?;
        self.transactions.update(&transaction).await?;
        Ok(transaction)
    }

    pub async fn add_shared_expense(
        &self,
        id: TransactionId,
        person_id: PersonId,
        percentage: Decimal,
    ) -> Result<Transaction, ServiceError> {
        let mut transaction = self.transactions.find_by_id(id).await?;
        transaction.add_shared_expense(person_id, percentage)?;
        self.transactions.update(&transaction).await?;
        Ok(transaction)
    }
}
