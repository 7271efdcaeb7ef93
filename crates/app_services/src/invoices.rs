//! Credit card invoice use cases

use std::sync::Arc;

use chrono::Utc;

use core_kernel::{CreditCardId, InvoiceId, Money, PortError, TransactionId};
use domain_accounts::{CreditCard, CreditCardPort};
use domain_billing::{CreditCardInvoice, InvoicePort, InvoiceStatus, ReferenceMonth};

use crate::error::ServiceError;

/// Invoice lifecycle management with month-to-month balance carry-forward
pub struct InvoiceService {
    invoices: Arc<dyn InvoicePort>,
    cards: Arc<dyn CreditCardPort>,
}

impl InvoiceService {
    pub fn new(invoices: Arc<dyn InvoicePort>, cards: Arc<dyn CreditCardPort>) -> Self {
        Self { invoices, cards }
    }

    /// Opens the card's invoice for a reference month.
    ///
    /// Fails with a conflict when the card already has an invoice for
    /// that month. The previous balance is carried from the most recent
    /// closed invoice with an earlier reference month; a gap in the
    /// month sequence carries across it.
    pub async fn create_invoice(
        &self,
        card_id: CreditCardId,
        month: ReferenceMonth,
    ) -> Result<CreditCardInvoice, ServiceError> {
        let card = self.cards.find_by_id(card_id).await?;
        if self.invoices.find_by_month(card_id, month).await?.is_some() {
            return Err(PortError::conflict(format!(
                "invoice for {month} already exists on card {card_id}"
            ))
            .into());
        }

        let previous_balance = self.previous_closed_balance(&card, month).await?;
        let invoice = CreditCardInvoice::new(
            card_id,
            month,
            month.first_day(),
            month.last_day(),
            month.due_date(card.due_day),
            previous_balance,
        )?;
        self.invoices.create(&invoice).await?;
        Ok(invoice)
    }

    /// Closing balance of the most recent closed invoice before `month`,
    /// or zero when the card has none
    async fn previous_closed_balance(
        &self,
        card: &CreditCard,
        month: ReferenceMonth,
    ) -> Result<Money, ServiceError> {
        let mut history = self.invoices.find_by_card(card.id).await?;
        history.sort_by(|a, b| b.reference_month.cmp(&a.reference_month));

        let carried = history
            .iter()
            .find(|i| i.is_closed() && i.reference_month < month)
            .map(|i| i.closing_balance.clone());
        Ok(carried.unwrap_or_else(|| Money::zero(card.credit_limit.currency().clone())))
    }

    /// The card's open invoice, created for the current month when none
    /// is open yet
    pub async fn current_invoice(
        &self,
        card_id: CreditCardId,
    ) -> Result<CreditCardInvoice, ServiceError> {
        if let Some(open) = self.invoices.find_open(card_id).await? {
            return Ok(open);
        }
        let month = ReferenceMonth::from_date(Utc::now().date_naive());
        self.create_invoice(card_id, month).await
    }

    /// Closes an invoice and optionally opens the next month's,
    /// carrying the closing balance forward
    pub async fn close_invoice(
        &self,
        id: InvoiceId,
        create_next: bool,
    ) -> Result<CreditCardInvoice, ServiceError> {
        let mut invoice = self.invoices.find_by_id(id).await?;
        invoice.close()?;
        self.invoices.update(&invoice).await?;

        if create_next {
            let next = invoice.reference_month.next();
            if self
                .invoices
                .find_by_month(invoice.credit_card_id, next)
                .await?
                .is_none()
            {
                self.create_invoice(invoice.credit_card_id, next).await?;
            }
        }
        Ok(invoice)
    }

    pub async fn get_invoice(&self, id: InvoiceId) -> Result<CreditCardInvoice, ServiceError> {
        Ok(self.invoices.find_by_id(id).await?)
    }

    pub async fn add_transaction(
        &self,
        id: InvoiceId,
        transaction_id: TransactionId,
        amount: &Money,
        is_payment: bool,
    ) -> Result<CreditCardInvoice, ServiceError> {
        let mut invoice = self.invoices.find_by_id(id).await?;
        invoice.add_transaction(transaction_id, amount, is_payment)?;
        self.invoices.update(&invoice).await?;
        Ok(invoice)
    }

    pub async fn remove_transaction(
        &self,
        id: InvoiceId,
        transaction_id: TransactionId,
        amount: &Money,
        is_payment: bool,
    ) -> Result<CreditCardInvoice, ServiceError> {
        let mut invoice = self.invoices.find_by_id(id).await?;
        invoice.remove_transaction(transaction_id, amount, is_payment)?;
        self.invoices.update(&invoice).await?;
        Ok(invoice)
    }

    /// Applies a payment to the statement, marking it paid once the
    /// closing balance reaches zero or below
    pub async fn process_payment(
        &self,
        id: InvoiceId,
        amount: &Money,
    ) -> Result<CreditCardInvoice, ServiceError> {
        let mut invoice = self.invoices.find_by_id(id).await?;
        invoice.apply_payment(amount)?;
        if !invoice.closing_balance.is_positive() {
            invoice.mark_as_paid()?;
        }
        self.invoices.update(&invoice).await?;
        Ok(invoice)
    }

    pub async fn list_by_card(
        &self,
        card_id: CreditCardId,
    ) -> Result<Vec<CreditCardInvoice>, ServiceError> {
        Ok(self.invoices.find_by_card(card_id).await?)
    }

    pub async fn list_by_status(
        &self,
        status: InvoiceStatus,
    ) -> Result<Vec<CreditCardInvoice>, ServiceError> {
        Ok(self.invoices.find_by_status(status).await?)
    }

    /// Sweeps closed invoices past their due date into overdue,
    /// returning how many flipped
    pub async fn update_overdue_invoices(&self) -> Result<usize, ServiceError> {
        let today = Utc::now().date_naive();
        let mut flipped = 0;
        for mut invoice in self.invoices.find_by_status(InvoiceStatus::Closed).await? {
            if invoice.mark_overdue_if_past_due(today) {
                self.invoices.update(&invoice).await?;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}
