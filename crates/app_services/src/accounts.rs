//! Account use cases

use std::sync::Arc;

use core_kernel::{AccountId, Money};
use domain_accounts::{Account, AccountKind, AccountPort};

use crate::error::ServiceError;

/// Account management and money movement between accounts
pub struct AccountService {
    accounts: Arc<dyn AccountPort>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountPort>) -> Self {
        Self { accounts }
    }

    pub async fn create_account(
        &self,
        name: impl Into<String>,
        kind: AccountKind,
        initial_balance: Money,
        description: impl Into<String>,
    ) -> Result<Account, ServiceError> {
        let account = Account::new(name, kind, initial_balance, description);
        self.accounts.create(&account).await?;
        Ok(account)
    }

    pub async fn get_account(&self, id: AccountId) -> Result<Account, ServiceError> {
        Ok(self.accounts.find_by_id(id).await?)
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.accounts.find_all().await?)
    }

    pub async fn list_accounts_by_kind(
        &self,
        kind: AccountKind,
    ) -> Result<Vec<Account>, ServiceError> {
        Ok(self.accounts.find_by_kind(kind).await?)
    }

    pub async fn update_account(
        &self,
        id: AccountId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Account, ServiceError> {
        let mut account = self.accounts.find_by_id(id).await?;
        account.update_details(name, description);
        self.accounts.update(&account).await?;
        Ok(account)
    }

    pub async fn delete_account(&self, id: AccountId) -> Result<(), ServiceError> {
        Ok(self.accounts.delete(id).await?)
    }

    pub async fn deposit(&self, id: AccountId, amount: &Money) -> Result<Account, ServiceError> {
        let mut account = self.accounts.find_by_id(id).await?;
        account.deposit(amount)?;
        self.accounts.update(&account).await?;
        Ok(account)
    }

    pub async fn withdraw(&self, id: AccountId, amount: &Money) -> Result<Account, ServiceError> {
        let mut account = self.accounts.find_by_id(id).await?;
        account.withdraw(amount)?;
        self.accounts.update(&account).await?;
        Ok(account)
    }

    /// Moves funds between two accounts.
    ///
    /// The withdrawal lands before the deposit is attempted; a failure
    /// in between leaves the source already debited.
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: &Money,
    ) -> Result<(), ServiceError> {
        if from == to {
            return Err(ServiceError::Validation(
                "cannot transfer an account to itself".to_string(),
            ));
        }

        let mut source = self.accounts.find_by_id(from).await?;
        let mut destination = self.accounts.find_by_id(to).await?;

        source.withdraw(amount)?;
        self.accounts.update(&source).await?;

        destination.deposit(amount)?;
        self.accounts.update(&destination).await?;
        Ok(())
    }
}
