use super::storage::StoreError;
use shared::models::AppointmentStatus;
use thiserror::Error;

/// Scheduling core errors
///
/// Every expected business failure is a variant here; only [`ScheduleError::Storage`]
/// represents an infrastructure fault.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Workstation not found: {0}")]
    WorkstationNotFound(String),

    #[error("Staff member not found: {0}")]
    StaffNotFound(String),

    #[error("Invalid transition: cannot {event} an appointment in {from} status")]
    InvalidTransition {
        from: AppointmentStatus,
        event: &'static str,
    },

    #[error("Workstation is already occupied: {0}")]
    WorkstationOccupied(String),

    #[error("Workstation {id} is not available for service ({status:?})")]
    WorkstationUnavailable {
        id: String,
        status: shared::models::WorkstationStatus,
    },

    #[error("Staff member {staff_id} is already assigned to workstation {workstation_id}")]
    StaffAlreadyAssigned {
        staff_id: String,
        workstation_id: String,
    },

    #[error("Workstation has open appointments: {0}")]
    WorkstationInUse(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ScheduleError {
    pub fn invalid_transition(from: AppointmentStatus, event: &'static str) -> Self {
        Self::InvalidTransition { from, event }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
