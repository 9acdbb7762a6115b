//! ResourceRegistry - workstations, staff, and the 1:1 binding between them
//!
//! The staff↔workstation invariant lives here and nowhere else: a staff id
//! may appear as `assigned_staff_id` on at most one workstation. The check
//! is a scan of the workstation table inside the caller's write
//! transaction, so two racing assignments serialize and the loser sees the
//! winner's binding.

use super::error::{ScheduleError, ScheduleResult};
use super::storage::ScheduleStore;
use redb::WriteTransaction;
use shared::models::{StaffMember, Workstation};
use shared::util;

#[derive(Clone)]
pub struct ResourceRegistry {
    store: ScheduleStore,
}

impl ResourceRegistry {
    pub fn new(store: ScheduleStore) -> Self {
        Self { store }
    }

    /// Load a workstation or fail with `WorkstationNotFound`
    pub fn load_workstation(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> ScheduleResult<Workstation> {
        self.store
            .get_workstation_txn(txn, id)?
            .ok_or_else(|| ScheduleError::WorkstationNotFound(id.to_string()))
    }

    /// Load a staff member or fail with `StaffNotFound`
    pub fn load_staff(&self, txn: &WriteTransaction, id: &str) -> ScheduleResult<StaffMember> {
        self.store
            .get_staff_txn(txn, id)?
            .ok_or_else(|| ScheduleError::StaffNotFound(id.to_string()))
    }

    /// Bind a staff member to a workstation
    ///
    /// Idempotent when re-assigning the same pair. Fails with
    /// `StaffAlreadyAssigned` when the staff member is bound elsewhere;
    /// the existing binding is left untouched.
    pub fn assign_staff(
        &self,
        txn: &WriteTransaction,
        workstation_id: &str,
        staff_id: &str,
    ) -> ScheduleResult<Workstation> {
        let mut workstation = self.load_workstation(txn, workstation_id)?;
        let staff = self.load_staff(txn, staff_id)?;

        if !staff.role.is_assignable() {
            return Err(ScheduleError::Validation(format!(
                "staff member {} has role {:?} and cannot be assigned to a workstation",
                staff_id, staff.role
            )));
        }

        if workstation.assigned_staff_id.as_deref() == Some(staff_id) {
            return Ok(workstation);
        }

        // Reverse lookup is a scan: staff rows hold no back-pointer
        if let Some(other) = self
            .store
            .workstations_txn(txn)?
            .into_iter()
            .find(|w| w.id != workstation.id && w.assigned_staff_id.as_deref() == Some(staff_id))
        {
            return Err(ScheduleError::StaffAlreadyAssigned {
                staff_id: staff_id.to_string(),
                workstation_id: other.id,
            });
        }

        workstation.assigned_staff_id = Some(staff_id.to_string());
        workstation.updated_at = util::now_millis();
        self.store.put_workstation(txn, &workstation)?;
        Ok(workstation)
    }

    /// Clear a workstation's staff binding; no-op when already unassigned
    pub fn unassign_staff(
        &self,
        txn: &WriteTransaction,
        workstation_id: &str,
    ) -> ScheduleResult<Workstation> {
        let mut workstation = self.load_workstation(txn, workstation_id)?;
        if workstation.assigned_staff_id.is_none() {
            return Ok(workstation);
        }
        workstation.assigned_staff_id = None;
        workstation.updated_at = util::now_millis();
        self.store.put_workstation(txn, &workstation)?;
        Ok(workstation)
    }

    /// Whether a workstation may be deleted
    ///
    /// False while any non-terminal appointment references it.
    pub fn can_delete(&self, txn: &WriteTransaction, workstation_id: &str) -> ScheduleResult<bool> {
        for id in self.store.open_appointment_ids_txn(txn)? {
            if let Some(appointment) = self.store.get_appointment_txn(txn, &id)?
                && appointment.workstation_id.as_deref() == Some(workstation_id)
            {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
