//! Domain model types

pub mod appointment;
pub mod customer;
pub mod staff;
pub mod workstation;

// Re-exports
pub use appointment::{
    Appointment, AppointmentPatch, AppointmentStatus, BookAppointment, TransitionRequest,
};
pub use customer::VisitSummary;
pub use staff::{StaffCreate, StaffMember, StaffRole};
pub use workstation::{
    AssignStaffRequest, Workstation, WorkstationCreate, WorkstationStatus, WorkstationUpdate,
};
