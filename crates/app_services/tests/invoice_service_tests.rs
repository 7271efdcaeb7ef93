//! Invoice service tests: carry-forward, lifecycle, and overdue sweeps

use std::sync::Arc;

use rust_decimal_macros::dec;

use app_services::{InvoiceService, ServiceError};
use core_kernel::{PortError, TransactionId};
use domain_accounts::ports::mock::MockCreditCardPort;
use domain_accounts::CreditCardPort;
use domain_billing::ports::mock::MockInvoicePort;
use domain_billing::{BillingError, InvoicePort, InvoiceStatus, ReferenceMonth};
use test_utils::{brl, CreditCardBuilder, InvoiceBuilder};

async fn service_with_card() -> (InvoiceService, core_kernel::CreditCardId, Arc<MockInvoicePort>) {
    let cards = Arc::new(MockCreditCardPort::new());
    let card = CreditCardBuilder::new().with_due_day(10).build();
    cards.create(&card).await.unwrap();
    let invoices = Arc::new(MockInvoicePort::new());
    (InvoiceService::new(invoices.clone(), cards), card.id, invoices)
}

fn month(year: i32, month_num: u32) -> ReferenceMonth {
    ReferenceMonth::new(year, month_num).unwrap()
}

#[tokio::test]
async fn first_invoice_starts_from_zero() {
    let (service, card_id, _invoices) = service_with_card().await;
    let invoice = service.create_invoice(card_id, month(2024, 1)).await.unwrap();

    assert!(invoice.previous_balance.is_zero());
    assert_eq!(invoice.status, InvoiceStatus::Open);
    assert_eq!(invoice.opening_date, month(2024, 1).first_day());
    assert_eq!(invoice.due_date, month(2024, 1).due_date(10));
}

#[tokio::test]
async fn duplicate_month_is_a_conflict() {
    let (service, card_id, _invoices) = service_with_card().await;
    service.create_invoice(card_id, month(2024, 1)).await.unwrap();

    let err = service.create_invoice(card_id, month(2024, 1)).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Port(PortError::Conflict { .. })
    ));
}

#[tokio::test]
async fn closing_balance_carries_into_the_next_month() {
    let (service, card_id, _invoices) = service_with_card().await;
    let january = service.create_invoice(card_id, month(2024, 1)).await.unwrap();
    service
        .add_transaction(january.id, TransactionId::new(), &brl(dec!(150)), false)
        .await
        .unwrap();
    service.close_invoice(january.id, false).await.unwrap();

    let february = service.create_invoice(card_id, month(2024, 2)).await.unwrap();
    assert_eq!(february.previous_balance, brl(dec!(150)));
    assert_eq!(february.closing_balance, brl(dec!(150)));
}

#[tokio::test]
async fn carry_forward_skips_open_invoices_and_month_gaps() {
    let (service, card_id, _invoices) = service_with_card().await;
    let january = service.create_invoice(card_id, month(2024, 1)).await.unwrap();
    service
        .add_transaction(january.id, TransactionId::new(), &brl(dec!(80)), false)
        .await
        .unwrap();
    service.close_invoice(january.id, false).await.unwrap();

    // the gap from January to April carries January's balance
    let april = service.create_invoice(card_id, month(2024, 4)).await.unwrap();
    assert_eq!(april.previous_balance, brl(dec!(80)));
}

#[tokio::test]
async fn close_with_create_next_opens_the_following_month() {
    let (service, card_id, _invoices) = service_with_card().await;
    let january = service.create_invoice(card_id, month(2024, 1)).await.unwrap();
    service
        .add_transaction(january.id, TransactionId::new(), &brl(dec!(60)), false)
        .await
        .unwrap();

    service.close_invoice(january.id, true).await.unwrap();

    let by_card = service.list_by_card(card_id).await.unwrap();
    assert_eq!(by_card.len(), 2);
    let february = by_card
        .iter()
        .find(|i| i.reference_month == month(2024, 2))
        .unwrap();
    assert_eq!(february.previous_balance, brl(dec!(60)));
}

#[tokio::test]
async fn scenario_charge_then_partial_payment() {
    // charge 100, pay 40, expect 60 outstanding and mark_as_paid rejected
    let (service, card_id, _invoices) = service_with_card().await;
    let invoice = service.create_invoice(card_id, month(2024, 1)).await.unwrap();

    service
        .add_transaction(invoice.id, TransactionId::new(), &brl(dec!(100)), false)
        .await
        .unwrap();
    let after_payment = service
        .add_transaction(invoice.id, TransactionId::new(), &brl(dec!(40)), true)
        .await
        .unwrap();
    assert_eq!(after_payment.closing_balance, brl(dec!(60)));

    let mut reread = service.get_invoice(invoice.id).await.unwrap();
    let err = reread.mark_as_paid().unwrap_err();
    assert!(matches!(err, BillingError::OutstandingBalance(_)));
}

#[tokio::test]
async fn process_payment_settles_and_marks_paid() {
    let (service, card_id, _invoices) = service_with_card().await;
    let invoice = service.create_invoice(card_id, month(2024, 1)).await.unwrap();
    service
        .add_transaction(invoice.id, TransactionId::new(), &brl(dec!(200)), false)
        .await
        .unwrap();
    service.close_invoice(invoice.id, false).await.unwrap();

    let partial = service.process_payment(invoice.id, &brl(dec!(120))).await.unwrap();
    assert_eq!(partial.closing_balance, brl(dec!(80)));
    assert_ne!(partial.status, InvoiceStatus::Paid);

    let settled = service.process_payment(invoice.id, &brl(dec!(80))).await.unwrap();
    assert!(settled.closing_balance.is_zero());
    assert_eq!(settled.status, InvoiceStatus::Paid);
}

#[tokio::test]
async fn overdue_sweep_flips_past_due_closed_invoices() {
    let (service, card_id, invoices) = service_with_card().await;

    // a statement closed before its due date, carrying a balance, whose
    // due date has since passed; seeded directly so close() does not get
    // a chance to flip it
    let mut stale = InvoiceBuilder::new()
        .with_card(card_id)
        .with_month(month(2020, 1))
        .build();
    stale
        .add_transaction(TransactionId::new(), &brl(dec!(50)), false)
        .unwrap();
    stale.status = InvoiceStatus::Closed;
    invoices.create(&stale).await.unwrap();

    // a settled one the sweep must leave alone
    let mut settled = InvoiceBuilder::new()
        .with_card(card_id)
        .with_month(month(2020, 2))
        .build();
    settled.status = InvoiceStatus::Closed;
    invoices.create(&settled).await.unwrap();

    let flipped = service.update_overdue_invoices().await.unwrap();
    assert_eq!(flipped, 1);

    assert_eq!(
        service.get_invoice(stale.id).await.unwrap().status,
        InvoiceStatus::Overdue
    );
    assert_eq!(
        service.get_invoice(settled.id).await.unwrap().status,
        InvoiceStatus::Closed
    );
}

#[tokio::test]
async fn close_flips_straight_to_overdue_when_past_due() {
    let (service, card_id, _invoices) = service_with_card().await;
    let stale = service.create_invoice(card_id, month(2020, 1)).await.unwrap();
    service
        .add_transaction(stale.id, TransactionId::new(), &brl(dec!(50)), false)
        .await
        .unwrap();
    service.close_invoice(stale.id, false).await.unwrap();

    let invoice = service.get_invoice(stale.id).await.unwrap();
    assert_eq!(invoice.status, InvoiceStatus::Overdue);

    // nothing left for the sweep
    assert_eq!(service.update_overdue_invoices().await.unwrap(), 0);
}

#[tokio::test]
async fn current_invoice_is_created_once_and_reused() {
    let (service, card_id, _invoices) = service_with_card().await;

    let first = service.current_invoice(card_id).await.unwrap();
    let second = service.current_invoice(card_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(service.list_by_card(card_id).await.unwrap().len(), 1);
}
