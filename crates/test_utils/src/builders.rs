//! Test data builders
//!
//! Builders construct entities with sensible defaults so tests only
//! specify the fields relevant to them.

use chrono::{Days, NaiveDate, Utc};
use rust_decimal_macros::dec;

use core_kernel::{AccountId, CreditCardId, Money};
use domain_accounts::CreditCard;
use domain_billing::{Bill, CreditCardInvoice, ReferenceMonth};
use domain_transactions::{Category, Transaction, TransactionKind};

use crate::fixtures::brl;

/// Builder for test credit cards
pub struct CreditCardBuilder {
    account_id: AccountId,
    name: String,
    last_four_digits: String,
    credit_limit: Money,
    due_day: u8,
}

impl Default for CreditCardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditCardBuilder {
    pub fn new() -> Self {
        Self {
            account_id: AccountId::new(),
            name: "Test Card".to_string(),
            last_four_digits: "4242".to_string(),
            credit_limit: brl(dec!(5000)),
            due_day: 10,
        }
    }

    pub fn with_account(mut self, account_id: AccountId) -> Self {
        self.account_id = account_id;
        self
    }

    pub fn with_limit(mut self, credit_limit: Money) -> Self {
        self.credit_limit = credit_limit;
        self
    }

    pub fn with_due_day(mut self, due_day: u8) -> Self {
        self.due_day = due_day;
        self
    }

    pub fn build(self) -> CreditCard {
        CreditCard::new(
            self.account_id,
            self.name,
            self.last_four_digits,
            self.credit_limit,
            self.due_day,
        )
        .expect("builder defaults are valid")
    }
}

/// Builder for test bills; the default window surrounds today
pub struct BillBuilder {
    name: String,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    due_date: NaiveDate,
    total_amount: Money,
}

impl Default for BillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillBuilder {
    pub fn new() -> Self {
        let today = Utc::now().date_naive();
        Self {
            name: "Test Bill".to_string(),
            description: String::new(),
            start_date: today - Days::new(5),
            end_date: today + Days::new(5),
            due_date: today + Days::new(10),
            total_amount: brl(dec!(350)),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        if self.due_date < end {
            self.due_date = end;
        }
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_total(mut self, total_amount: Money) -> Self {
        self.total_amount = total_amount;
        self
    }

    pub fn build(self) -> Bill {
        Bill::new(
            self.name,
            self.description,
            self.start_date,
            self.end_date,
            self.due_date,
            self.total_amount,
        )
        .expect("builder defaults are valid")
    }
}

/// Builder for test invoices; the period derives from the reference month
pub struct InvoiceBuilder {
    credit_card_id: CreditCardId,
    reference_month: ReferenceMonth,
    due_day: u8,
    previous_balance: Money,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self {
            credit_card_id: CreditCardId::new(),
            reference_month: ReferenceMonth::from_date(Utc::now().date_naive()),
            due_day: 10,
            previous_balance: brl(dec!(0)),
        }
    }

    pub fn with_card(mut self, credit_card_id: CreditCardId) -> Self {
        self.credit_card_id = credit_card_id;
        self
    }

    pub fn with_month(mut self, reference_month: ReferenceMonth) -> Self {
        self.reference_month = reference_month;
        self
    }

    pub fn with_previous_balance(mut self, previous_balance: Money) -> Self {
        self.previous_balance = previous_balance;
        self
    }

    pub fn build(self) -> CreditCardInvoice {
        let month = self.reference_month;
        CreditCardInvoice::new(
            self.credit_card_id,
            month,
            month.first_day(),
            month.last_day(),
            month.due_date(self.due_day),
            self.previous_balance,
        )
        .expect("builder defaults are valid")
    }
}

/// Builder for test transactions; defaults to a BRL debit dated today
pub struct TransactionBuilder {
    kind: TransactionKind,
    category: Category,
    amount: Money,
    description: String,
    date: NaiveDate,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            kind: TransactionKind::Debit,
            category: Category::Other,
            amount: brl(dec!(100)),
            description: String::new(),
            date: Utc::now().date_naive(),
        }
    }

    pub fn credit(mut self) -> Self {
        self.kind = TransactionKind::Credit;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn build(self) -> Transaction {
        Transaction::new(
            self.kind,
            self.category,
            self.amount,
            self.description,
            self.date,
        )
    }
}
