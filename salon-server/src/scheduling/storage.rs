//! redb-based storage layer for the scheduling core
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `appointments` | `appointment_id` | `Appointment` | Appointment rows |
//! | `open_appointments` | `appointment_id` | `()` | Non-terminal appointment index |
//! | `workstations` | `workstation_id` | `Workstation` | Workstation rows |
//! | `occupancy` | `workstation_id` | `appointment_id` | In-progress occupancy guard |
//! | `staff` | `staff_id` | `StaffMember` | Staff rows |
//! | `customer_summaries` | `customer_id` | `VisitSummary` | Derived visit aggregates |
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns and the file is
//! always in a consistent state, so a crash between a status transition and
//! its aggregation side effect cannot be observed: both live in the same
//! write transaction.
//!
//! redb admits a single writer at a time, which serializes every
//! state-changing scheduling operation. The `occupancy` table read inside a
//! write transaction is therefore an effective compare-and-set: only one of
//! two racing check-ins observes the slot empty.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{Appointment, StaffMember, VisitSummary, Workstation};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Appointment rows: key = appointment_id, value = JSON-serialized Appointment
const APPOINTMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("appointments");

/// Non-terminal appointment index: key = appointment_id, value = empty
const OPEN_APPOINTMENTS_TABLE: TableDefinition<&str, ()> =
    TableDefinition::new("open_appointments");

/// Workstation rows: key = workstation_id, value = JSON-serialized Workstation
const WORKSTATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("workstations");

/// Occupancy guard: key = workstation_id, value = in-progress appointment_id
const OCCUPANCY_TABLE: TableDefinition<&str, &str> = TableDefinition::new("occupancy");

/// Staff rows: key = staff_id, value = JSON-serialized StaffMember
const STAFF_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("staff");

/// Customer summaries: key = customer_id, value = JSON-serialized VisitSummary
const CUSTOMER_SUMMARIES_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("customer_summaries");

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Scheduling store backed by redb
#[derive(Clone)]
pub struct ScheduleStore {
    db: Arc<Database>,
}

impl ScheduleStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(APPOINTMENTS_TABLE)?;
            let _ = write_txn.open_table(OPEN_APPOINTMENTS_TABLE)?;
            let _ = write_txn.open_table(WORKSTATIONS_TABLE)?;
            let _ = write_txn.open_table(OCCUPANCY_TABLE)?;
            let _ = write_txn.open_table(STAFF_TABLE)?;
            let _ = write_txn.open_table(CUSTOMER_SUMMARIES_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Appointment Operations ==========

    /// Store an appointment row
    pub fn put_appointment(
        &self,
        txn: &WriteTransaction,
        appointment: &Appointment,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(APPOINTMENTS_TABLE)?;
        let value = serde_json::to_vec(appointment)?;
        table.insert(appointment.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get an appointment by id (within transaction)
    pub fn get_appointment_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Appointment>> {
        let table = txn.open_table(APPOINTMENTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an appointment by id
    pub fn get_appointment(&self, id: &str) -> StoreResult<Option<Appointment>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(APPOINTMENTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Add an appointment to the non-terminal index
    pub fn mark_appointment_open(&self, txn: &WriteTransaction, id: &str) -> StoreResult<()> {
        let mut table = txn.open_table(OPEN_APPOINTMENTS_TABLE)?;
        table.insert(id, ())?;
        Ok(())
    }

    /// Remove an appointment from the non-terminal index
    pub fn mark_appointment_closed(&self, txn: &WriteTransaction, id: &str) -> StoreResult<()> {
        let mut table = txn.open_table(OPEN_APPOINTMENTS_TABLE)?;
        table.remove(id)?;
        Ok(())
    }

    /// Ids of all non-terminal appointments (within transaction)
    pub fn open_appointment_ids_txn(&self, txn: &WriteTransaction) -> StoreResult<Vec<String>> {
        let table = txn.open_table(OPEN_APPOINTMENTS_TABLE)?;
        let mut ids = Vec::new();
        for result in table.iter()? {
            let (key, _value) = result?;
            ids.push(key.value().to_string());
        }
        Ok(ids)
    }

    /// All non-terminal appointments, oldest first
    pub fn get_open_appointments(&self) -> StoreResult<Vec<Appointment>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(OPEN_APPOINTMENTS_TABLE)?;
        let rows = read_txn.open_table(APPOINTMENTS_TABLE)?;

        let mut appointments = Vec::new();
        for result in index.iter()? {
            let (key, _value) = result?;
            if let Some(value) = rows.get(key.value())? {
                let appointment: Appointment = serde_json::from_slice(value.value())?;
                appointments.push(appointment);
            }
        }
        appointments.sort_by_key(|a| a.created_at);
        Ok(appointments)
    }

    /// All appointments for a customer (within transaction, full scan)
    ///
    /// Only the recompute repair path uses this; appointment volume per
    /// store is small enough that a scan is acceptable there.
    pub fn appointments_for_customer_txn(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
    ) -> StoreResult<Vec<Appointment>> {
        let table = txn.open_table(APPOINTMENTS_TABLE)?;
        let mut appointments = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let appointment: Appointment = serde_json::from_slice(value.value())?;
            if appointment.customer_id == customer_id {
                appointments.push(appointment);
            }
        }
        Ok(appointments)
    }

    // ========== Workstation Operations ==========

    /// Store a workstation row
    pub fn put_workstation(
        &self,
        txn: &WriteTransaction,
        workstation: &Workstation,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(WORKSTATIONS_TABLE)?;
        let value = serde_json::to_vec(workstation)?;
        table.insert(workstation.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get a workstation by id (within transaction)
    pub fn get_workstation_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Workstation>> {
        let table = txn.open_table(WORKSTATIONS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a workstation by id
    pub fn get_workstation(&self, id: &str) -> StoreResult<Option<Workstation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WORKSTATIONS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All workstations (within transaction)
    pub fn workstations_txn(&self, txn: &WriteTransaction) -> StoreResult<Vec<Workstation>> {
        let table = txn.open_table(WORKSTATIONS_TABLE)?;
        let mut workstations = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            workstations.push(serde_json::from_slice(value.value())?);
        }
        Ok(workstations)
    }

    /// All workstations, ordered by name
    pub fn list_workstations(&self) -> StoreResult<Vec<Workstation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WORKSTATIONS_TABLE)?;
        let mut workstations: Vec<Workstation> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            workstations.push(serde_json::from_slice(value.value())?);
        }
        workstations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(workstations)
    }

    /// Remove a workstation row
    pub fn remove_workstation(&self, txn: &WriteTransaction, id: &str) -> StoreResult<()> {
        let mut table = txn.open_table(WORKSTATIONS_TABLE)?;
        table.remove(id)?;
        Ok(())
    }

    // ========== Occupancy Guard ==========

    /// The in-progress appointment currently occupying a workstation, if any
    pub fn occupant_of_txn(
        &self,
        txn: &WriteTransaction,
        workstation_id: &str,
    ) -> StoreResult<Option<String>> {
        let table = txn.open_table(OCCUPANCY_TABLE)?;
        Ok(table.get(workstation_id)?.map(|g| g.value().to_string()))
    }

    /// Claim a workstation for an in-progress appointment
    pub fn set_occupant(
        &self,
        txn: &WriteTransaction,
        workstation_id: &str,
        appointment_id: &str,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(OCCUPANCY_TABLE)?;
        table.insert(workstation_id, appointment_id)?;
        Ok(())
    }

    /// Release a workstation
    pub fn clear_occupant(&self, txn: &WriteTransaction, workstation_id: &str) -> StoreResult<()> {
        let mut table = txn.open_table(OCCUPANCY_TABLE)?;
        table.remove(workstation_id)?;
        Ok(())
    }

    // ========== Staff Operations ==========

    /// Store a staff row
    pub fn put_staff(&self, txn: &WriteTransaction, staff: &StaffMember) -> StoreResult<()> {
        let mut table = txn.open_table(STAFF_TABLE)?;
        let value = serde_json::to_vec(staff)?;
        table.insert(staff.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get a staff member by id (within transaction)
    pub fn get_staff_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<StaffMember>> {
        let table = txn.open_table(STAFF_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a staff member by id
    pub fn get_staff(&self, id: &str) -> StoreResult<Option<StaffMember>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STAFF_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All staff, ordered by name
    pub fn list_staff(&self) -> StoreResult<Vec<StaffMember>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STAFF_TABLE)?;
        let mut staff: Vec<StaffMember> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            staff.push(serde_json::from_slice(value.value())?);
        }
        staff.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(staff)
    }

    // ========== Customer Summary Operations ==========

    /// Store a customer summary
    pub fn put_summary(&self, txn: &WriteTransaction, summary: &VisitSummary) -> StoreResult<()> {
        let mut table = txn.open_table(CUSTOMER_SUMMARIES_TABLE)?;
        let value = serde_json::to_vec(summary)?;
        table.insert(summary.customer_id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get a customer summary (within transaction)
    pub fn get_summary_txn(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
    ) -> StoreResult<Option<VisitSummary>> {
        let table = txn.open_table(CUSTOMER_SUMMARIES_TABLE)?;
        match table.get(customer_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a customer summary
    pub fn get_summary(&self, customer_id: &str) -> StoreResult<Option<VisitSummary>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CUSTOMER_SUMMARIES_TABLE)?;
        match table.get(customer_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use shared::models::{AppointmentStatus, StaffRole, WorkstationStatus};

    fn sample_appointment(id: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            customer_id: "customer-1".to_string(),
            service_id: "service-1".to_string(),
            workstation_id: None,
            staff_id: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 60,
            status: AppointmentStatus::Pending,
            total_amount: 45.0,
            notes: None,
            created_at: 1_000,
            updated_at: 1_000,
        }
    }

    #[test]
    fn test_appointment_roundtrip() {
        let store = ScheduleStore::open_in_memory().unwrap();
        let appointment = sample_appointment("appt-1");

        let txn = store.begin_write().unwrap();
        store.put_appointment(&txn, &appointment).unwrap();
        store.mark_appointment_open(&txn, "appt-1").unwrap();
        txn.commit().unwrap();

        let loaded = store.get_appointment("appt-1").unwrap().unwrap();
        assert_eq!(loaded, appointment);
        assert_eq!(store.get_open_appointments().unwrap().len(), 1);
    }

    #[test]
    fn test_open_index_removal() {
        let store = ScheduleStore::open_in_memory().unwrap();
        let appointment = sample_appointment("appt-1");

        let txn = store.begin_write().unwrap();
        store.put_appointment(&txn, &appointment).unwrap();
        store.mark_appointment_open(&txn, "appt-1").unwrap();
        store.mark_appointment_closed(&txn, "appt-1").unwrap();
        txn.commit().unwrap();

        assert!(store.get_open_appointments().unwrap().is_empty());
        // The row itself is retained
        assert!(store.get_appointment("appt-1").unwrap().is_some());
    }

    #[test]
    fn test_occupancy_claim_and_release() {
        let store = ScheduleStore::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        assert!(store.occupant_of_txn(&txn, "ws-1").unwrap().is_none());
        store.set_occupant(&txn, "ws-1", "appt-1").unwrap();
        assert_eq!(
            store.occupant_of_txn(&txn, "ws-1").unwrap().as_deref(),
            Some("appt-1")
        );
        store.clear_occupant(&txn, "ws-1").unwrap();
        assert!(store.occupant_of_txn(&txn, "ws-1").unwrap().is_none());
        txn.commit().unwrap();
    }

    #[test]
    fn test_workstation_and_staff_listing_sorted() {
        let store = ScheduleStore::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        for (id, name) in [("ws-2", "Bay B"), ("ws-1", "Bay A")] {
            store
                .put_workstation(
                    &txn,
                    &Workstation {
                        id: id.to_string(),
                        name: name.to_string(),
                        kind: "styling".to_string(),
                        status: WorkstationStatus::Available,
                        assigned_staff_id: None,
                        created_at: 0,
                        updated_at: 0,
                    },
                )
                .unwrap();
        }
        store
            .put_staff(
                &txn,
                &StaffMember {
                    id: "staff-1".to_string(),
                    name: "Dana".to_string(),
                    role: StaffRole::Staff,
                    created_at: 0,
                },
            )
            .unwrap();
        txn.commit().unwrap();

        let names: Vec<String> = store
            .list_workstations()
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Bay A".to_string(), "Bay B".to_string()]);
        assert_eq!(store.list_staff().unwrap().len(), 1);
    }
}
