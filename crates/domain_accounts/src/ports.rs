//! Accounts Domain Ports
//!
//! Port traits the accounts domain needs from its persistence collaborator.
//! The document-store adapter implements these in the application shell;
//! the in-memory mocks here (behind the `mock` feature) back the test
//! suites without external dependencies.

use async_trait::async_trait;

use core_kernel::{AccountId, CreditCardId, DomainPort, PortError};

use crate::account::{Account, AccountKind};
use crate::credit_card::CreditCard;

/// Persistence port for accounts
#[async_trait]
pub trait AccountPort: DomainPort {
    async fn create(&self, account: &Account) -> Result<(), PortError>;
    async fn update(&self, account: &Account) -> Result<(), PortError>;
    async fn delete(&self, id: AccountId) -> Result<(), PortError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Account, PortError>;
    async fn find_all(&self) -> Result<Vec<Account>, PortError>;
    async fn find_by_kind(&self, kind: AccountKind) -> Result<Vec<Account>, PortError>;
}

/// Persistence port for credit cards
#[async_trait]
pub trait CreditCardPort: DomainPort {
    async fn create(&self, card: &CreditCard) -> Result<(), PortError>;
    async fn update(&self, card: &CreditCard) -> Result<(), PortError>;
    async fn delete(&self, id: CreditCardId) -> Result<(), PortError>;
    async fn find_by_id(&self, id: CreditCardId) -> Result<CreditCard, PortError>;
    async fn find_all(&self) -> Result<Vec<CreditCard>, PortError>;
    async fn find_by_account(&self, account_id: AccountId) -> Result<Vec<CreditCard>, PortError>;
}

/// In-memory mock adapters for testing without a document store
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of AccountPort
    #[derive(Debug, Default)]
    pub struct MockAccountPort {
        accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    }

    impl MockAccountPort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockAccountPort {}

    #[async_trait]
    impl AccountPort for MockAccountPort {
        async fn create(&self, account: &Account) -> Result<(), PortError> {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&account.id) {
                return Err(PortError::conflict(format!(
                    "account already exists: {}",
                    account.id
                )));
            }
            accounts.insert(account.id, account.clone());
            Ok(())
        }

        async fn update(&self, account: &Account) -> Result<(), PortError> {
            let mut accounts = self.accounts.write().await;
            if !accounts.contains_key(&account.id) {
                return Err(PortError::not_found("Account", account.id));
            }
            accounts.insert(account.id, account.clone());
            Ok(())
        }

        async fn delete(&self, id: AccountId) -> Result<(), PortError> {
            self.accounts
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Account", id))
        }

        async fn find_by_id(&self, id: AccountId) -> Result<Account, PortError> {
            self.accounts
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Account", id))
        }

        async fn find_all(&self) -> Result<Vec<Account>, PortError> {
            Ok(self.accounts.read().await.values().cloned().collect())
        }

        async fn find_by_kind(&self, kind: AccountKind) -> Result<Vec<Account>, PortError> {
            Ok(self
                .accounts
                .read()
                .await
                .values()
                .filter(|a| a.kind == kind)
                .cloned()
                .collect())
        }
    }

    /// In-memory mock implementation of CreditCardPort
    #[derive(Debug, Default)]
    pub struct MockCreditCardPort {
        cards: Arc<RwLock<HashMap<CreditCardId, CreditCard>>>,
    }

    impl MockCreditCardPort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockCreditCardPort {}

    #[async_trait]
    impl CreditCardPort for MockCreditCardPort {
        async fn create(&self, card: &CreditCard) -> Result<(), PortError> {
            let mut cards = self.cards.write().await;
            if cards.contains_key(&card.id) {
                return Err(PortError::conflict(format!(
                    "credit card already exists: {}",
                    card.id
                )));
            }
            cards.insert(card.id, card.clone());
            Ok(())
        }

        async fn update(&self, card: &CreditCard) -> Result<(), PortError> {
            let mut cards = self.cards.write().await;
            if !cards.contains_key(&card.id) {
                return Err(PortError::not_found("CreditCard", card.id));
            }
            cards.insert(card.id, card.clone());
            Ok(())
        }

        async fn delete(&self, id: CreditCardId) -> Result<(), PortError> {
            self.cards
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("CreditCard", id))
        }

        async fn find_by_id(&self, id: CreditCardId) -> Result<CreditCard, PortError> {
            self.cards
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("CreditCard", id))
        }

        async fn find_all(&self) -> Result<Vec<CreditCard>, PortError> {
            Ok(self.cards.read().await.values().cloned().collect())
        }

        async fn find_by_account(
            &self,
            account_id: AccountId,
        ) -> Result<Vec<CreditCard>, PortError> {
            Ok(self
                .cards
                .read()
                .await
                .values()
                .filter(|c| c.account_id == account_id)
                .cloned()
                .collect())
        }
    }
}
