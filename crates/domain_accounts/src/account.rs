//! Bank accounts with kind-dependent overdraft policy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Money};

use crate::error::AccountsError;

/// The kind of account, which determines the overdraft policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Investment,
}

impl AccountKind {
    /// Only checking accounts may hold a negative balance
    pub fn allows_overdraft(&self) -> bool {
        matches!(self, AccountKind::Checking)
    }
}

/// A bank-like store of funds with a balance and overdraft policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Account name
    pub name: String,
    /// Account kind
    pub kind: AccountKind,
    /// Current balance
    pub balance: Money,
    /// Free-form description
    pub description: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with an initial balance
    pub fn new(
        name: impl Into<String>,
        kind: AccountKind,
        initial_balance: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            kind,
            balance: initial_balance,
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the name and description
    pub fn update_details(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.name = name.into();
        self.description = description.into();
        self.updated_at = Utc::now();
    }

    /// Adds funds to the account; fails only on currency mismatch
    pub fn deposit(&mut self, amount: &Money) -> Result<(), AccountsError> {
        self.balance = self.balance.checked_add(amount)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Removes funds from the account.
    ///
    /// A withdrawal that would leave the balance negative fails with
    /// `InsufficientFunds` unless the account kind allows overdraft, in
    /// which case the balance goes negative by the exact deficit. The
    /// balance is unchanged on failure.
    pub fn withdraw(&mut self, amount: &Money) -> Result<(), AccountsError> {
        let new_balance = self.balance.checked_sub(amount)?;
        if new_balance.is_negative() && !self.kind.allows_overdraft() {
            return Err(AccountsError::InsufficientFunds {
                would_be: new_balance,
            });
        }
        self.balance = new_balance;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns the balance available for withdrawal
    pub fn available_balance(&self) -> &Money {
        &self.balance
    }
}
