//! Billing Domain Ports
//!
//! Port traits the billing domain needs from its persistence collaborator,
//! plus the in-memory mocks (behind the `mock` feature) that back the test
//! suites without external dependencies.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{BillId, CreditCardId, DomainPort, InvoiceId, PortError};

use crate::bill::{Bill, BillStatus};
use crate::invoice::{CreditCardInvoice, InvoiceStatus, ReferenceMonth};

/// Persistence port for bills
#[async_trait]
pub trait BillPort: DomainPort {
    async fn create(&self, bill: &Bill) -> Result<(), PortError>;
    async fn update(&self, bill: &Bill) -> Result<(), PortError>;
    async fn delete(&self, id: BillId) -> Result<(), PortError>;
    async fn find_by_id(&self, id: BillId) -> Result<Bill, PortError>;
    async fn find_all(&self) -> Result<Vec<Bill>, PortError>;
    async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, PortError>;
    /// Bills whose coverage window overlaps the given range
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bill>, PortError>;
    /// Unpaid bills past their due date
    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Bill>, PortError>;
}

/// Persistence port for credit card invoices
#[async_trait]
pub trait InvoicePort: DomainPort {
    async fn create(&self, invoice: &CreditCardInvoice) -> Result<(), PortError>;
    async fn update(&self, invoice: &CreditCardInvoice) -> Result<(), PortError>;
    async fn delete(&self, id: InvoiceId) -> Result<(), PortError>;
    async fn find_by_id(&self, id: InvoiceId) -> Result<CreditCardInvoice, PortError>;
    async fn find_by_card(
        &self,
        card_id: CreditCardId,
    ) -> Result<Vec<CreditCardInvoice>, PortError>;
    /// The card's invoice for a specific reference month, if any
    async fn find_by_month(
        &self,
        card_id: CreditCardId,
        month: ReferenceMonth,
    ) -> Result<Option<CreditCardInvoice>, PortError>;
    /// The card's currently open invoice, if any
    async fn find_open(
        &self,
        card_id: CreditCardId,
    ) -> Result<Option<CreditCardInvoice>, PortError>;
    async fn find_by_status(
        &self,
        status: InvoiceStatus,
    ) -> Result<Vec<CreditCardInvoice>, PortError>;
}

/// In-memory mock adapters for testing without a document store
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of BillPort
    #[derive(Debug, Default)]
    pub struct MockBillPort {
        bills: Arc<RwLock<HashMap<BillId, Bill>>>,
    }

    impl MockBillPort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockBillPort {}

    #[async_trait]
    impl BillPort for MockBillPort {
        async fn create(&self, bill: &Bill) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            if bills.contains_key(&bill.id) {
                return Err(PortError::conflict(format!(
                    "bill already exists: {}",
                    bill.id
                )));
            }
            bills.insert(bill.id, bill.clone());
            Ok(())
        }

        async fn update(&self, bill: &Bill) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            if !bills.contains_key(&bill.id) {
                return Err(PortError::not_found("Bill", bill.id));
            }
            bills.insert(bill.id, bill.clone());
            Ok(())
        }

        async fn delete(&self, id: BillId) -> Result<(), PortError> {
            self.bills
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Bill", id))
        }

        async fn find_by_id(&self, id: BillId) -> Result<Bill, PortError> {
            self.bills
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Bill", id))
        }

        async fn find_all(&self) -> Result<Vec<Bill>, PortError> {
            Ok(self.bills.read().await.values().cloned().collect())
        }

        async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, PortError> {
            Ok(self
                .bills
                .read()
                .await
                .values()
                .filter(|b| b.status == status)
                .cloned()
                .collect())
        }

        async fn find_by_date_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Bill>, PortError> {
            Ok(self
                .bills
                .read()
                .await
                .values()
                .filter(|b| b.start_date <= end && b.end_date >= start)
                .cloned()
                .collect())
        }

        async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Bill>, PortError> {
            Ok(self
                .bills
                .read()
                .await
                .values()
                .filter(|b| b.due_date < today && !b.is_fully_paid())
                .cloned()
                .collect())
        }
    }

    /// In-memory mock implementation of InvoicePort
    #[derive(Debug, Default)]
    pub struct MockInvoicePort {
        invoices: Arc<RwLock<HashMap<InvoiceId, CreditCardInvoice>>>,
    }

    impl MockInvoicePort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockInvoicePort {}

    #[async_trait]
    impl InvoicePort for MockInvoicePort {
        async fn create(&self, invoice: &CreditCardInvoice) -> Result<(), PortError> {
            let mut invoices = self.invoices.write().await;
            if invoices.contains_key(&invoice.id) {
                return Err(PortError::conflict(format!(
                    "invoice already exists: {}",
                    invoice.id
                )));
            }
            invoices.insert(invoice.id, invoice.clone());
            Ok(())
        }

        async fn update(&self, invoice: &CreditCardInvoice) -> Result<(), PortError> {
            let mut invoices = self.invoices.write().await;
            if !invoices.contains_key(&invoice.id) {
                return Err(PortError::not_found("CreditCardInvoice", invoice.id));
            }
            invoices.insert(invoice.id, invoice.clone());
            Ok(())
        }

        async fn delete(&self, id: InvoiceId) -> Result<(), PortError> {
            self.invoices
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("CreditCardInvoice", id))
        }

        async fn find_by_id(&self, id: InvoiceId) -> Result<CreditCardInvoice, PortError> {
            self.invoices
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("CreditCardInvoice", id))
        }

        async fn find_by_card(
            &self,
            card_id: CreditCardId,
        ) -> Result<Vec<CreditCardInvoice>, PortError> {
            Ok(self
                .invoices
                .read()
                .await
                .values()
                .filter(|i| i.credit_card_id == card_id)
                .cloned()
                .collect())
        }

        async fn find_by_month(
            &self,
            card_id: CreditCardId,
            month: ReferenceMonth,
        ) -> Result<Option<CreditCardInvoice>, PortError> {
            Ok(self
                .invoices
                .read()
                .await
                .values()
                .find(|i| i.credit_card_id == card_id && i.reference_month == month)
                .cloned())
        }

        async fn find_open(
            &self,
            card_id: CreditCardId,
        ) -> Result<Option<CreditCardInvoice>, PortError> {
            Ok(self
                .invoices
                .read()
                .await
                .values()
                .find(|i| i.credit_card_id == card_id && i.is_open())
                .cloned())
        }

        async fn find_by_status(
            &self,
            status: InvoiceStatus,
        ) -> Result<Vec<CreditCardInvoice>, PortError> {
            Ok(self
                .invoices
                .read()
                .await
                .values()
                .filter(|i| i.status == status)
                .cloned()
                .collect())
        }
    }
}
