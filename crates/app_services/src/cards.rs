//! Credit card use cases

use std::sync::Arc;

use core_kernel::{AccountId, CreditCardId, Money};
use domain_accounts::{AccountPort, CreditCard, CreditCardPort};

use crate::error::ServiceError;

/// Credit card management, charges, and payments
pub struct CreditCardService {
    cards: Arc<dyn CreditCardPort>,
    accounts: Arc<dyn AccountPort>,
}

impl CreditCardService {
    pub fn new(cards: Arc<dyn CreditCardPort>, accounts: Arc<dyn AccountPort>) -> Self {
        Self { cards, accounts }
    }

    /// Creates a card linked to an existing account
    pub async fn create_card(
        &self,
        account_id: AccountId,
        name: impl Into<String>,
        last_four_digits: impl Into<String>,
        credit_limit: Money,
        due_day: u8,
    ) -> Result<CreditCard, ServiceError> {
        // the owning account must exist before a card can point at it
        self.accounts.find_by_id(account_id).await?;

        let card = CreditCard::new(account_id, name, last_four_digits, credit_limit, due_day)?;
        self.cards.create(&card).await?;
        Ok(card)
    }

    pub async fn get_card(&self, id: CreditCardId) -> Result<CreditCard, ServiceError> {
        Ok(self.cards.find_by_id(id).await?)
    }

    pub async fn list_cards(&self) -> Result<Vec<CreditCard>, ServiceError> {
        Ok(self.cards.find_all().await?)
    }

    pub async fn list_cards_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<CreditCard>, ServiceError> {
        Ok(self.cards.find_by_account(account_id).await?)
    }

    pub async fn delete_card(&self, id: CreditCardId) -> Result<(), ServiceError> {
        Ok(self.cards.delete(id).await?)
    }

    pub async fn charge(
        &self,
        id: CreditCardId,
        amount: &Money,
    ) -> Result<CreditCard, ServiceError> {
        let mut card = self.cards.find_by_id(id).await?;
        card.charge(amount)?;
        self.cards.update(&card).await?;
        Ok(card)
    }

    /// Pays down the card from its linked account.
    ///
    /// The account withdrawal lands first; if the card-side payment or
    /// update then fails, the account stays debited.
    pub async fn make_payment(
        &self,
        id: CreditCardId,
        amount: &Money,
    ) -> Result<CreditCard, ServiceError> {
        let mut card = self.cards.find_by_id(id).await?;
        let mut account = self.accounts.find_by_id(card.account_id).await?;

        account.withdraw(amount)?;
        self.accounts.update(&account).await?;

        card.payment(amount)?;
        self.cards.update(&card).await?;
        Ok(card)
    }
}
