//! Service-level tests over an in-memory store

use super::error::ScheduleError;
use super::service::SchedulingService;
use super::storage::ScheduleStore;
use chrono::{NaiveDate, NaiveTime};
use shared::models::{
    Appointment, AppointmentStatus, BookAppointment, StaffCreate, StaffMember, StaffRole,
    Workstation, WorkstationCreate,
};

mod test_lifecycle;
mod test_resources;

fn create_test_service() -> SchedulingService {
    SchedulingService::new(ScheduleStore::open_in_memory().unwrap())
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
}

fn book_request(customer: &str) -> BookAppointment {
    BookAppointment {
        customer_id: customer.to_string(),
        service_id: "service-cut".to_string(),
        workstation_id: None,
        staff_id: None,
        date: test_date(),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        duration_minutes: 60,
        total_amount: 45.0,
        notes: None,
        operator: Some("front-desk".to_string()),
    }
}

fn seed_workstation(service: &SchedulingService, name: &str) -> Workstation {
    service
        .create_workstation(WorkstationCreate {
            name: name.to_string(),
            kind: "styling".to_string(),
            operator: None,
        })
        .unwrap()
}

fn seed_staff(service: &SchedulingService, name: &str, role: StaffRole) -> StaffMember {
    service
        .create_staff(StaffCreate {
            name: name.to_string(),
            role,
            operator: None,
        })
        .unwrap()
}

/// Book for a customer with a workstation attached
fn book_on(service: &SchedulingService, customer: &str, workstation_id: &str) -> Appointment {
    let mut req = book_request(customer);
    req.workstation_id = Some(workstation_id.to_string());
    service.book_appointment(req).unwrap()
}
