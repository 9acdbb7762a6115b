//! VisitAggregator - derived per-customer visit counts and spend
//!
//! `record_completed` is invoked only by the scheduling service, inside
//! the same write transaction that moves an appointment to COMPLETED.
//! That transaction boundary is what makes the update exactly-once: there
//! is no observable state where the status advanced but the summary did
//! not, and a replayed check-out fails the status check before ever
//! reaching this code.

use super::error::ScheduleResult;
use super::money::{to_decimal, to_f64};
use super::storage::ScheduleStore;
use chrono::NaiveDate;
use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::models::{AppointmentStatus, VisitSummary};
use shared::util;

#[derive(Clone)]
pub struct VisitAggregator {
    store: ScheduleStore,
}

impl VisitAggregator {
    pub fn new(store: ScheduleStore) -> Self {
        Self { store }
    }

    /// Credit one completed visit to a customer
    pub fn record_completed(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
        amount: f64,
        visit_date: NaiveDate,
    ) -> ScheduleResult<VisitSummary> {
        let now = util::now_millis();
        let mut summary = self
            .store
            .get_summary_txn(txn, customer_id)?
            .unwrap_or_else(|| VisitSummary::empty(customer_id, now));

        summary.total_visits += 1;
        summary.total_spent = to_f64(to_decimal(summary.total_spent) + to_decimal(amount));
        summary.last_visit = Some(match summary.last_visit {
            Some(previous) => previous.max(visit_date),
            None => visit_date,
        });
        summary.updated_at = now;

        self.store.put_summary(txn, &summary)?;
        Ok(summary)
    }

    /// Rebuild a customer's summary from their completed appointments
    ///
    /// Repair/backfill path: a pure function of appointment state, safe to
    /// run any number of times.
    pub fn recompute(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
    ) -> ScheduleResult<VisitSummary> {
        let now = util::now_millis();
        let mut total_visits: u64 = 0;
        let mut total_spent = Decimal::ZERO;
        let mut last_visit: Option<NaiveDate> = None;

        for appointment in self.store.appointments_for_customer_txn(txn, customer_id)? {
            if appointment.status != AppointmentStatus::Completed {
                continue;
            }
            total_visits += 1;
            total_spent += to_decimal(appointment.total_amount);
            last_visit = Some(match last_visit {
                Some(previous) => previous.max(appointment.date),
                None => appointment.date,
            });
        }

        let summary = VisitSummary {
            customer_id: customer_id.to_string(),
            total_visits,
            total_spent: to_f64(total_spent),
            last_visit,
            updated_at: now,
        };
        self.store.put_summary(txn, &summary)?;
        Ok(summary)
    }
}
