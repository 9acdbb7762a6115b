//! Shared types for the salon scheduling service
//!
//! Domain records, status enums and request payloads used by the
//! scheduling core and its HTTP surface.

pub mod models;
pub mod util;

// Re-exports
pub use models::{
    Appointment, AppointmentPatch, AppointmentStatus, AssignStaffRequest, BookAppointment,
    StaffCreate, StaffMember, StaffRole, TransitionRequest, VisitSummary, Workstation,
    WorkstationCreate, WorkstationStatus, WorkstationUpdate,
};
