//! SchedulingService - the coordination façade
//!
//! Composes the ledger, registry and aggregator and enforces the
//! cross-entity invariants. Every state-changing operation runs as a
//! single redb write transaction:
//!
//! ```text
//! operation(args)
//!     ├─ 1. Validate input (before any transaction)
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Load and validate affected rows
//!     ├─ 4. Mutate rows (ledger / registry / aggregator)
//!     ├─ 5. Commit
//!     └─ 6. Emit activity event (fire-and-forget)
//! ```
//!
//! A failed step before commit aborts the transaction on drop, so business
//! failures never leave partial effects. The check-out transaction carries
//! both the status move and the visit-summary update, which is what makes
//! the aggregation exactly-once.

use redb::WriteTransaction;
use shared::models::{
    Appointment, AppointmentPatch, AppointmentStatus, BookAppointment, StaffCreate, StaffMember,
    VisitSummary, Workstation, WorkstationCreate, WorkstationStatus, WorkstationUpdate,
};
use shared::util;
use tokio::sync::broadcast;

use super::aggregator::VisitAggregator;
use super::error::{ScheduleError, ScheduleResult};
use super::ledger::{AppointmentLedger, transition_allowed};
use super::money;
use super::registry::ResourceRegistry;
use super::storage::{ScheduleStore, StoreError};
use crate::activity::ActivityEvent;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_duration, validate_optional_text,
    validate_required_text,
};

/// Activity broadcast capacity; events are small and the sink is fast
const ACTIVITY_CHANNEL_CAPACITY: usize = 4096;

/// Scheduling façade; cheap to clone, all handles are shared
#[derive(Clone)]
pub struct SchedulingService {
    store: ScheduleStore,
    ledger: AppointmentLedger,
    registry: ResourceRegistry,
    aggregator: VisitAggregator,
    activity_tx: broadcast::Sender<ActivityEvent>,
}

impl std::fmt::Debug for SchedulingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulingService").finish_non_exhaustive()
    }
}

impl SchedulingService {
    pub fn new(store: ScheduleStore) -> Self {
        let (activity_tx, _) = broadcast::channel(ACTIVITY_CHANNEL_CAPACITY);
        Self {
            ledger: AppointmentLedger::new(store.clone()),
            registry: ResourceRegistry::new(store.clone()),
            aggregator: VisitAggregator::new(store.clone()),
            store,
            activity_tx,
        }
    }

    /// Subscribe to the activity event stream
    pub fn subscribe_activity(&self) -> broadcast::Receiver<ActivityEvent> {
        self.activity_tx.subscribe()
    }

    fn emit(&self, event: ActivityEvent) {
        // Fire and forget: the log sink is optional by contract
        if self.activity_tx.send(event).is_err() {
            tracing::debug!("Activity event dropped: no active receivers");
        }
    }

    // ========== Appointment Lifecycle ==========

    /// Book a new appointment (status `PENDING`)
    pub fn book_appointment(&self, req: BookAppointment) -> ScheduleResult<Appointment> {
        validate_required_text(&req.customer_id, "customerId", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.service_id, "serviceId", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
        validate_duration(req.duration_minutes)?;
        money::validate_amount(req.total_amount)?;

        let txn = self.store.begin_write()?;
        if let Some(workstation_id) = &req.workstation_id {
            self.registry.load_workstation(&txn, workstation_id)?;
        }
        if let Some(staff_id) = &req.staff_id {
            self.registry.load_staff(&txn, staff_id)?;
        }
        let appointment = self.ledger.insert_booked(&txn, &req, util::now_millis())?;
        txn.commit().map_err(StoreError::from)?;

        tracing::info!(
            appointment_id = %appointment.id,
            customer_id = %appointment.customer_id,
            total_amount = appointment.total_amount,
            "Appointment booked"
        );
        self.emit(ActivityEvent::appointment(
            "appointment.booked",
            &appointment,
            req.operator.as_deref(),
        ));
        Ok(appointment)
    }

    /// Edit a pending or confirmed appointment
    pub fn edit_appointment(
        &self,
        id: &str,
        patch: AppointmentPatch,
    ) -> ScheduleResult<Appointment> {
        validate_optional_text(&patch.service_id, "serviceId", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&patch.notes, "notes", MAX_NOTE_LEN)?;
        if let Some(duration) = patch.duration_minutes {
            validate_duration(duration)?;
        }
        if let Some(amount) = patch.total_amount {
            money::validate_amount(amount)?;
        }

        let txn = self.store.begin_write()?;
        let mut appointment = self.ledger.load(&txn, id)?;
        if !matches!(
            appointment.status,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed
        ) {
            return Err(ScheduleError::invalid_transition(appointment.status, "edit"));
        }
        if let Some(workstation_id) = &patch.workstation_id {
            self.registry.load_workstation(&txn, workstation_id)?;
        }
        if let Some(staff_id) = &patch.staff_id {
            self.registry.load_staff(&txn, staff_id)?;
        }
        self.ledger.apply_edit(&txn, &mut appointment, &patch)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::appointment(
            "appointment.updated",
            &appointment,
            patch.operator.as_deref(),
        ));
        Ok(appointment)
    }

    /// `PENDING → CONFIRMED`
    pub fn confirm_appointment(
        &self,
        id: &str,
        operator: Option<&str>,
    ) -> ScheduleResult<Appointment> {
        let txn = self.store.begin_write()?;
        let mut appointment = self.ledger.load(&txn, id)?;
        self.ledger
            .advance(&txn, &mut appointment, AppointmentStatus::Confirmed, "confirm")?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::appointment(
            "appointment.confirmed",
            &appointment,
            operator,
        ));
        Ok(appointment)
    }

    /// `CONFIRMED → IN_PROGRESS`; claims the assigned workstation
    ///
    /// The occupancy read and claim happen in the same write transaction,
    /// so of N concurrent check-ins against one free workstation exactly
    /// one succeeds; the rest fail with `WorkstationOccupied`.
    pub fn check_in(&self, id: &str, operator: Option<&str>) -> ScheduleResult<Appointment> {
        let txn = self.store.begin_write()?;
        let mut appointment = self.ledger.load(&txn, id)?;
        if !transition_allowed(appointment.status, AppointmentStatus::InProgress) {
            return Err(ScheduleError::invalid_transition(appointment.status, "checkIn"));
        }
        let workstation_id = appointment.workstation_id.clone().ok_or_else(|| {
            ScheduleError::Validation(
                "a workstation must be assigned before check-in".to_string(),
            )
        })?;
        let mut workstation = self.registry.load_workstation(&txn, &workstation_id)?;

        if self.store.occupant_of_txn(&txn, &workstation_id)?.is_some() {
            return Err(ScheduleError::WorkstationOccupied(workstation_id));
        }
        if !workstation.status.is_operable() {
            return Err(match workstation.status {
                WorkstationStatus::Occupied => ScheduleError::WorkstationOccupied(workstation_id),
                status => ScheduleError::WorkstationUnavailable {
                    id: workstation_id,
                    status,
                },
            });
        }

        self.store
            .set_occupant(&txn, &workstation.id, &appointment.id)?;
        workstation.status = WorkstationStatus::Occupied;
        workstation.updated_at = util::now_millis();
        self.store.put_workstation(&txn, &workstation)?;
        self.ledger
            .advance(&txn, &mut appointment, AppointmentStatus::InProgress, "checkIn")?;
        txn.commit().map_err(StoreError::from)?;

        tracing::info!(
            appointment_id = %appointment.id,
            workstation_id = %workstation.id,
            "Appointment checked in"
        );
        self.emit(ActivityEvent::appointment(
            "appointment.checked_in",
            &appointment,
            operator,
        ));
        Ok(appointment)
    }

    /// `IN_PROGRESS → COMPLETED`; releases the workstation and credits the
    /// customer's visit summary, all in one transaction
    pub fn check_out(&self, id: &str, operator: Option<&str>) -> ScheduleResult<Appointment> {
        let txn = self.store.begin_write()?;
        let mut appointment = self.ledger.load(&txn, id)?;
        self.ledger
            .advance(&txn, &mut appointment, AppointmentStatus::Completed, "checkOut")?;
        if let Some(workstation_id) = appointment.workstation_id.clone() {
            self.release_workstation(&txn, &workstation_id, &appointment.id)?;
        }
        let summary = self.aggregator.record_completed(
            &txn,
            &appointment.customer_id,
            appointment.total_amount,
            appointment.date,
        )?;
        txn.commit().map_err(StoreError::from)?;

        tracing::info!(
            appointment_id = %appointment.id,
            customer_id = %appointment.customer_id,
            total_visits = summary.total_visits,
            "Appointment checked out"
        );
        self.emit(ActivityEvent::appointment(
            "appointment.checked_out",
            &appointment,
            operator,
        ));
        Ok(appointment)
    }

    /// Cancel from `PENDING`, `CONFIRMED` or `IN_PROGRESS`
    pub fn cancel_appointment(
        &self,
        id: &str,
        operator: Option<&str>,
    ) -> ScheduleResult<Appointment> {
        let txn = self.store.begin_write()?;
        let mut appointment = self.ledger.load(&txn, id)?;
        let was_in_progress = appointment.status == AppointmentStatus::InProgress;
        self.ledger
            .advance(&txn, &mut appointment, AppointmentStatus::Cancelled, "cancel")?;
        if was_in_progress
            && let Some(workstation_id) = appointment.workstation_id.clone()
        {
            self.release_workstation(&txn, &workstation_id, &appointment.id)?;
        }
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::appointment(
            "appointment.cancelled",
            &appointment,
            operator,
        ));
        Ok(appointment)
    }

    /// `CONFIRMED → NO_SHOW`
    pub fn mark_no_show(&self, id: &str, operator: Option<&str>) -> ScheduleResult<Appointment> {
        let txn = self.store.begin_write()?;
        let mut appointment = self.ledger.load(&txn, id)?;
        self.ledger
            .advance(&txn, &mut appointment, AppointmentStatus::NoShow, "markNoShow")?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::appointment(
            "appointment.no_show",
            &appointment,
            operator,
        ));
        Ok(appointment)
    }

    /// Release a workstation held by the given appointment, if it holds it
    fn release_workstation(
        &self,
        txn: &WriteTransaction,
        workstation_id: &str,
        appointment_id: &str,
    ) -> ScheduleResult<()> {
        match self.store.occupant_of_txn(txn, workstation_id)? {
            Some(occupant) if occupant == appointment_id => {
                self.store.clear_occupant(txn, workstation_id)?;
                if let Some(mut workstation) =
                    self.store.get_workstation_txn(txn, workstation_id)?
                {
                    workstation.status = WorkstationStatus::Available;
                    workstation.updated_at = util::now_millis();
                    self.store.put_workstation(txn, &workstation)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    // ========== Appointment Queries ==========

    pub fn get_appointment(&self, id: &str) -> ScheduleResult<Option<Appointment>> {
        Ok(self.store.get_appointment(id)?)
    }

    /// All non-terminal appointments, oldest first
    pub fn list_open_appointments(&self) -> ScheduleResult<Vec<Appointment>> {
        Ok(self.store.get_open_appointments()?)
    }

    // ========== Workstation Administration ==========

    pub fn create_workstation(&self, req: WorkstationCreate) -> ScheduleResult<Workstation> {
        validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&req.kind, "kind", MAX_NAME_LEN)?;

        let txn = self.store.begin_write()?;
        if self
            .store
            .workstations_txn(&txn)?
            .iter()
            .any(|w| w.name == req.name)
        {
            return Err(ScheduleError::DuplicateName(format!(
                "Workstation '{}' already exists",
                req.name
            )));
        }
        let now = util::now_millis();
        let workstation = Workstation {
            id: util::new_id(),
            name: req.name,
            kind: req.kind,
            status: WorkstationStatus::Available,
            assigned_staff_id: None,
            created_at: now,
            updated_at: now,
        };
        self.store.put_workstation(&txn, &workstation)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::workstation(
            "workstation.created",
            &workstation.id,
            req.operator.as_deref(),
        ));
        Ok(workstation)
    }

    /// Update name, kind or operational status
    ///
    /// Status edits are rejected while the workstation is occupied;
    /// occupancy transitions belong to check-in/check-out.
    pub fn update_workstation(
        &self,
        id: &str,
        patch: WorkstationUpdate,
    ) -> ScheduleResult<Workstation> {
        validate_optional_text(&patch.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&patch.kind, "kind", MAX_NAME_LEN)?;

        let txn = self.store.begin_write()?;
        let mut workstation = self.registry.load_workstation(&txn, id)?;

        if let Some(name) = &patch.name {
            if self
                .store
                .workstations_txn(&txn)?
                .iter()
                .any(|w| w.id != workstation.id && &w.name == name)
            {
                return Err(ScheduleError::DuplicateName(format!(
                    "Workstation '{}' already exists",
                    name
                )));
            }
            workstation.name = name.clone();
        }
        if let Some(kind) = &patch.kind {
            workstation.kind = kind.clone();
        }
        if let Some(status) = patch.status {
            if self.store.occupant_of_txn(&txn, id)?.is_some() {
                return Err(ScheduleError::WorkstationOccupied(id.to_string()));
            }
            if status == WorkstationStatus::Occupied {
                return Err(ScheduleError::Validation(
                    "OCCUPIED is set by check-in, not by edit".to_string(),
                ));
            }
            workstation.status = status;
        }
        workstation.updated_at = util::now_millis();
        self.store.put_workstation(&txn, &workstation)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::workstation(
            "workstation.updated",
            &workstation.id,
            patch.operator.as_deref(),
        ));
        Ok(workstation)
    }

    /// Delete a workstation with no open appointments referencing it
    pub fn delete_workstation(&self, id: &str, operator: Option<&str>) -> ScheduleResult<()> {
        let txn = self.store.begin_write()?;
        self.registry.load_workstation(&txn, id)?;
        if !self.registry.can_delete(&txn, id)? {
            return Err(ScheduleError::WorkstationInUse(id.to_string()));
        }
        self.store.remove_workstation(&txn, id)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::workstation("workstation.deleted", id, operator));
        Ok(())
    }

    pub fn get_workstation(&self, id: &str) -> ScheduleResult<Option<Workstation>> {
        Ok(self.store.get_workstation(id)?)
    }

    pub fn list_workstations(&self) -> ScheduleResult<Vec<Workstation>> {
        Ok(self.store.list_workstations()?)
    }

    // ========== Staff Assignment ==========

    pub fn assign_staff(
        &self,
        workstation_id: &str,
        staff_id: &str,
        operator: Option<&str>,
    ) -> ScheduleResult<Workstation> {
        let txn = self.store.begin_write()?;
        let workstation = self.registry.assign_staff(&txn, workstation_id, staff_id)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::workstation(
            "workstation.staff_assigned",
            workstation_id,
            operator,
        ));
        Ok(workstation)
    }

    pub fn unassign_staff(
        &self,
        workstation_id: &str,
        operator: Option<&str>,
    ) -> ScheduleResult<Workstation> {
        let txn = self.store.begin_write()?;
        let workstation = self.registry.unassign_staff(&txn, workstation_id)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::workstation(
            "workstation.staff_unassigned",
            workstation_id,
            operator,
        ));
        Ok(workstation)
    }

    pub fn create_staff(&self, req: StaffCreate) -> ScheduleResult<StaffMember> {
        validate_required_text(&req.name, "name", MAX_NAME_LEN)?;

        let txn = self.store.begin_write()?;
        let staff = StaffMember {
            id: util::new_id(),
            name: req.name,
            role: req.role,
            created_at: util::now_millis(),
        };
        self.store.put_staff(&txn, &staff)?;
        txn.commit().map_err(StoreError::from)?;
        Ok(staff)
    }

    pub fn list_staff(&self) -> ScheduleResult<Vec<StaffMember>> {
        Ok(self.store.list_staff()?)
    }

    // ========== Customer Summaries ==========

    /// Current summary; a customer with no completed visits reads as empty
    pub fn customer_summary(&self, customer_id: &str) -> ScheduleResult<VisitSummary> {
        Ok(self
            .store
            .get_summary(customer_id)?
            .unwrap_or_else(|| VisitSummary::empty(customer_id, util::now_millis())))
    }

    /// Rebuild a summary from completed appointments (repair path)
    pub fn recompute_customer_summary(
        &self,
        customer_id: &str,
        operator: Option<&str>,
    ) -> ScheduleResult<VisitSummary> {
        let txn = self.store.begin_write()?;
        let summary = self.aggregator.recompute(&txn, customer_id)?;
        txn.commit().map_err(StoreError::from)?;

        self.emit(ActivityEvent::customer(
            "customer.summary_recomputed",
            customer_id,
            operator,
        ));
        Ok(summary)
    }
}
