//! Transactions Domain Ports

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{
    AccountId, BillId, CreditCardId, DomainPort, InvoiceId, PersonId, PortError, TransactionId,
};

use crate::transaction::{Category, Transaction};

/// Persistence port for transactions
#[async_trait]
pub trait TransactionPort: DomainPort {
    async fn create(&self, transaction: &Transaction) -> Result<(), PortError>;
    async fn update(&self, transaction: &Transaction) -> Result<(), PortError>;
    async fn delete(&self, id: TransactionId) -> Result<(), PortError>;
    async fn find_by_id(&self, id: TransactionId) -> Result<Transaction, PortError>;
    async fn find_all(&self) -> Result<Vec<Transaction>, PortError>;
    async fn find_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, PortError>;
    async fn find_by_card(&self, card_id: CreditCardId) -> Result<Vec<Transaction>, PortError>;
    async fn find_by_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Transaction>, PortError>;
    async fn find_by_bill(&self, bill_id: BillId) -> Result<Vec<Transaction>, PortError>;
    /// Transactions dated inside the range, inclusive on both ends
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, PortError>;
    async fn find_by_category(&self, category: Category) -> Result<Vec<Transaction>, PortError>;
    /// Transactions carrying a share owed by the given person
    async fn find_shared_with_person(
        &self,
        person_id: PersonId,
    ) -> Result<Vec<Transaction>, PortError>;
}

/// In-memory mock adapter for testing without a document store
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of TransactionPort
    #[derive(Debug, Default)]
    pub struct MockTransactionPort {
        transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
    }

    impl MockTransactionPort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockTransactionPort {}

    #[async_trait]
    impl TransactionPort for MockTransactionPort {
        async fn create(&self, transaction: &Transaction) -> Result<(), PortError> {
            let mut transactions = self.transactions.write().await;
            if transactions.contains_key(&transaction.id) {
                return Err(PortError::conflict(format!(
                    "transaction already exists: {}",
                    transaction.id
                )));
            }
            transactions.insert(transaction.id, transaction.clone());
            Ok(())
        }

        async fn update(&self, transaction: &Transaction) -> Result<(), PortError> {
            let mut transactions = self.transactions.write().await;
            if !transactions.contains_key(&transaction.id) {
                return Err(PortError::not_found("Transaction", transaction.id));
            }
            transactions.insert(transaction.id, transaction.clone());
            Ok(())
        }

        async fn delete(&self, id: TransactionId) -> Result<(), PortError> {
            self.transactions
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Transaction", id))
        }

        async fn find_by_id(&self, id: TransactionId) -> Result<Transaction, PortError> {
            self.transactions
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Transaction", id))
        }

        async fn find_all(&self) -> Result<Vec<Transaction>, PortError> {
            Ok(self.transactions.read().await.values().cloned().collect())
        }

        async fn find_by_account(
            &self,
            account_id: AccountId,
        ) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| t.account_id == Some(account_id))
                .cloned()
                .collect())
        }

        async fn find_by_card(&self, card_id: CreditCardId) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| t.credit_card_id == Some(card_id))
                .cloned()
                .collect())
        }

        async fn find_by_invoice(
            &self,
            invoice_id: InvoiceId,
        ) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| t.invoice_id == Some(invoice_id))
                .cloned()
                .collect())
        }

        async fn find_by_bill(&self, bill_id: BillId) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| t.bill_id == Some(bill_id))
                .cloned()
                .collect())
        }

        async fn find_by_date_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| start <= t.date && t.date <= end)
                .cloned()
                .collect())
        }

        async fn find_by_category(&self, category: Category) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| t.category == category)
                .cloned()
                .collect())
        }

        async fn find_shared_with_person(
            &self,
            person_id: PersonId,
        ) -> Result<Vec<Transaction>, PortError> {
            Ok(self
                .transactions
                .read()
                .await
                .values()
                .filter(|t| t.shared_with.iter().any(|s| s.person_id == person_id))
                .cloned()
                .collect())
        }
    }
}
