//! AppointmentLedger - appointment rows and their status transitions
//!
//! The transition graph:
//!
//! ```text
//! pending ──confirm──► confirmed ──checkIn──► in-progress ──checkOut──► completed
//!    │                    │  │                    │
//!    │                    │  └──markNoShow──► no-show
//!    └──────cancel────────┴───────cancel──────────┴──────► cancelled
//! ```
//!
//! Completed, cancelled and no-show are terminal. Any move not in the
//! graph fails with `InvalidTransition` and leaves the row untouched.

use super::error::{ScheduleError, ScheduleResult};
use super::storage::ScheduleStore;
use redb::WriteTransaction;
use shared::models::{Appointment, AppointmentPatch, AppointmentStatus, BookAppointment};
use shared::util;

/// Whether `from → to` is an edge of the lifecycle graph
pub fn transition_allowed(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Confirmed, InProgress)
            | (InProgress, Completed)
            | (Pending, Cancelled)
            | (Confirmed, Cancelled)
            | (InProgress, Cancelled)
            | (Confirmed, NoShow)
    )
}

/// Owns appointment rows and enforces the status graph
#[derive(Clone)]
pub struct AppointmentLedger {
    store: ScheduleStore,
}

impl AppointmentLedger {
    pub fn new(store: ScheduleStore) -> Self {
        Self { store }
    }

    /// Load an appointment or fail with `AppointmentNotFound`
    pub fn load(&self, txn: &WriteTransaction, id: &str) -> ScheduleResult<Appointment> {
        self.store
            .get_appointment_txn(txn, id)?
            .ok_or_else(|| ScheduleError::AppointmentNotFound(id.to_string()))
    }

    /// Create a pending appointment row from a validated booking
    pub fn insert_booked(
        &self,
        txn: &WriteTransaction,
        req: &BookAppointment,
        now: i64,
    ) -> ScheduleResult<Appointment> {
        let appointment = Appointment {
            id: util::new_id(),
            customer_id: req.customer_id.clone(),
            service_id: req.service_id.clone(),
            workstation_id: req.workstation_id.clone(),
            staff_id: req.staff_id.clone(),
            date: req.date,
            time: req.time,
            duration_minutes: req.duration_minutes,
            status: AppointmentStatus::Pending,
            total_amount: req.total_amount,
            notes: req.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.store.put_appointment(txn, &appointment)?;
        self.store.mark_appointment_open(txn, &appointment.id)?;
        Ok(appointment)
    }

    /// Move an appointment along the graph and persist the row
    ///
    /// Maintains the open-appointment index: entering a terminal state
    /// removes the row from it. The caller handles resource side effects
    /// (occupancy, aggregation) in the same transaction.
    pub fn advance(
        &self,
        txn: &WriteTransaction,
        appointment: &mut Appointment,
        to: AppointmentStatus,
        event: &'static str,
    ) -> ScheduleResult<()> {
        if !transition_allowed(appointment.status, to) {
            return Err(ScheduleError::invalid_transition(appointment.status, event));
        }
        appointment.status = to;
        appointment.updated_at = util::now_millis();
        self.store.put_appointment(txn, appointment)?;
        if to.is_terminal() {
            self.store.mark_appointment_closed(txn, &appointment.id)?;
        }
        Ok(())
    }

    /// Apply an edit to a pending or confirmed appointment
    ///
    /// Reference validation (workstation/staff existence) happens in the
    /// service before this is called.
    pub fn apply_edit(
        &self,
        txn: &WriteTransaction,
        appointment: &mut Appointment,
        patch: &AppointmentPatch,
    ) -> ScheduleResult<()> {
        if !matches!(
            appointment.status,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed
        ) {
            return Err(ScheduleError::invalid_transition(appointment.status, "edit"));
        }

        if let Some(service_id) = &patch.service_id {
            appointment.service_id = service_id.clone();
        }
        if patch.clear_workstation {
            appointment.workstation_id = None;
        } else if let Some(workstation_id) = &patch.workstation_id {
            appointment.workstation_id = Some(workstation_id.clone());
        }
        if patch.clear_staff {
            appointment.staff_id = None;
        } else if let Some(staff_id) = &patch.staff_id {
            appointment.staff_id = Some(staff_id.clone());
        }
        if let Some(date) = patch.date {
            appointment.date = date;
        }
        if let Some(time) = patch.time {
            appointment.time = time;
        }
        if let Some(duration) = patch.duration_minutes {
            appointment.duration_minutes = duration;
        }
        if let Some(amount) = patch.total_amount {
            appointment.total_amount = amount;
        }
        if let Some(notes) = &patch.notes {
            appointment.notes = Some(notes.clone());
        }
        appointment.updated_at = util::now_millis();
        self.store.put_appointment(txn, appointment)?;
        Ok(())
    }
}
