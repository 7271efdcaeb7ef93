//! Bill use cases

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use core_kernel::{BillId, Money};
use domain_billing::{Bill, BillPort, BillStatus};

use crate::error::ServiceError;

/// Bill management and payment tracking
pub struct BillService {
    bills: Arc<dyn BillPort>,
}

impl BillService {
    pub fn new(bills: Arc<dyn BillPort>) -> Self {
        Self { bills }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_bill(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        due_date: NaiveDate,
        total_amount: Money,
    ) -> Result<Bill, ServiceError> {
        let bill = Bill::new(name, description, start_date, end_date, due_date, total_amount)?;
        self.bills.create(&bill).await?;
        Ok(bill)
    }

    pub async fn get_bill(&self, id: BillId) -> Result<Bill, ServiceError> {
        Ok(self.bills.find_by_id(id).await?)
    }

    pub async fn list_bills(&self) -> Result<Vec<Bill>, ServiceError> {
        Ok(self.bills.find_all().await?)
    }

    pub async fn list_bills_by_status(
        &self,
        status: BillStatus,
    ) -> Result<Vec<Bill>, ServiceError> {
        Ok(self.bills.find_by_status(status).await?)
    }

    /// Bills still open and accepting payments
    pub async fn list_pending_bills(&self) -> Result<Vec<Bill>, ServiceError> {
        Ok(self.bills.find_by_status(BillStatus::Open).await?)
    }

    /// Unpaid bills past their due date as of today
    pub async fn list_overdue_bills(&self) -> Result<Vec<Bill>, ServiceError> {
        Ok(self.bills.find_overdue(Utc::now().date_naive()).await?)
    }

    /// Bills whose coverage window overlaps the given range
    pub async fn list_bills_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bill>, ServiceError> {
        Ok(self.bills.find_by_date_range(start, end).await?)
    }

    pub async fn add_payment(&self, id: BillId, amount: &Money) -> Result<Bill, ServiceError> {
        let mut bill = self.bills.find_by_id(id).await?;
        bill.add_payment(amount)?;
        self.bills.update(&bill).await?;
        Ok(bill)
    }

    pub async fn close_bill(&self, id: BillId) -> Result<Bill, ServiceError> {
        let mut bill = self.bills.find_by_id(id).await?;
        bill.close()?;
        self.bills.update(&bill).await?;
        Ok(bill)
    }

    pub async fn delete_bill(&self, id: BillId) -> Result<(), ServiceError> {
        Ok(self.bills.delete(id).await?)
    }
}
