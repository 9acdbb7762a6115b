use super::*;
use shared::models::{WorkstationStatus, WorkstationUpdate};

#[test]
fn test_second_check_in_on_occupied_workstation_conflicts() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");

    let first = book_on(&service, "customer-a", &workstation.id);
    service.confirm_appointment(&first.id, None).unwrap();
    service.check_in(&first.id, None).unwrap();

    let second = book_on(&service, "customer-b", &workstation.id);
    service.confirm_appointment(&second.id, None).unwrap();
    let result = service.check_in(&second.id, None);
    assert!(matches!(result, Err(ScheduleError::WorkstationOccupied(_))));

    // The losing appointment is untouched and can retry after release
    let stored = service.get_appointment(&second.id).unwrap().unwrap();
    assert_eq!(stored.status, AppointmentStatus::Confirmed);

    service.check_out(&first.id, None).unwrap();
    let retried = service.check_in(&second.id, None).unwrap();
    assert_eq!(retried.status, AppointmentStatus::InProgress);
}

#[test]
fn test_staff_binding_is_one_to_one() {
    let service = create_test_service();
    let ws1 = seed_workstation(&service, "Bay A");
    let ws2 = seed_workstation(&service, "Bay B");
    let staff = seed_staff(&service, "Dana", StaffRole::Staff);

    let bound = service.assign_staff(&ws1.id, &staff.id, None).unwrap();
    assert_eq!(bound.assigned_staff_id.as_deref(), Some(staff.id.as_str()));

    // Second binding loses, first is unchanged
    let result = service.assign_staff(&ws2.id, &staff.id, None);
    assert!(matches!(
        result,
        Err(ScheduleError::StaffAlreadyAssigned { .. })
    ));
    let ws1_after = service.get_workstation(&ws1.id).unwrap().unwrap();
    assert_eq!(
        ws1_after.assigned_staff_id.as_deref(),
        Some(staff.id.as_str())
    );
    let ws2_after = service.get_workstation(&ws2.id).unwrap().unwrap();
    assert!(ws2_after.assigned_staff_id.is_none());

    // Re-assigning the same pair is idempotent
    service.assign_staff(&ws1.id, &staff.id, None).unwrap();

    // After unassignment the staff member is free again
    service.unassign_staff(&ws1.id, None).unwrap();
    let rebound = service.assign_staff(&ws2.id, &staff.id, None).unwrap();
    assert_eq!(rebound.assigned_staff_id.as_deref(), Some(staff.id.as_str()));
}

#[test]
fn test_unassign_is_noop_when_already_clear() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");

    let ws = service.unassign_staff(&workstation.id, None).unwrap();
    assert!(ws.assigned_staff_id.is_none());
}

#[test]
fn test_receptionist_cannot_be_assigned() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    let receptionist = seed_staff(&service, "Robin", StaffRole::Receptionist);

    assert!(matches!(
        service.assign_staff(&workstation.id, &receptionist.id, None),
        Err(ScheduleError::Validation(_))
    ));

    let manager = seed_staff(&service, "Morgan", StaffRole::Manager);
    assert!(service.assign_staff(&workstation.id, &manager.id, None).is_ok());
}

#[test]
fn test_delete_workstation_blocked_by_open_appointment() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");

    let appointment = book_on(&service, "customer-a", &workstation.id);
    service.confirm_appointment(&appointment.id, None).unwrap();

    assert!(matches!(
        service.delete_workstation(&workstation.id, None),
        Err(ScheduleError::WorkstationInUse(_))
    ));
    assert!(service.get_workstation(&workstation.id).unwrap().is_some());

    // Deletion succeeds once the appointment is terminal
    service.cancel_appointment(&appointment.id, None).unwrap();
    service.delete_workstation(&workstation.id, None).unwrap();
    assert!(service.get_workstation(&workstation.id).unwrap().is_none());
}

#[test]
fn test_delete_unknown_workstation_is_not_found() {
    let service = create_test_service();
    assert!(matches!(
        service.delete_workstation("ws-missing", None),
        Err(ScheduleError::WorkstationNotFound(_))
    ));
}

#[test]
fn test_duplicate_workstation_name_rejected() {
    let service = create_test_service();
    seed_workstation(&service, "Bay A");

    let result = service.create_workstation(shared::models::WorkstationCreate {
        name: "Bay A".to_string(),
        kind: "washing".to_string(),
        operator: None,
    });
    assert!(matches!(result, Err(ScheduleError::DuplicateName(_))));
}

#[test]
fn test_status_edit_rejected_while_occupied() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    let appointment = book_on(&service, "customer-a", &workstation.id);
    service.confirm_appointment(&appointment.id, None).unwrap();
    service.check_in(&appointment.id, None).unwrap();

    let result = service.update_workstation(
        &workstation.id,
        WorkstationUpdate {
            status: Some(WorkstationStatus::Maintenance),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(ScheduleError::WorkstationOccupied(_))));

    // Renaming while occupied is fine
    let renamed = service
        .update_workstation(
            &workstation.id,
            WorkstationUpdate {
                name: Some("Bay A1".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Bay A1");
}

#[test]
fn test_check_in_rejected_on_maintenance_workstation() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    service
        .update_workstation(
            &workstation.id,
            WorkstationUpdate {
                status: Some(WorkstationStatus::Maintenance),
                ..Default::default()
            },
        )
        .unwrap();

    let appointment = book_on(&service, "customer-a", &workstation.id);
    service.confirm_appointment(&appointment.id, None).unwrap();
    let result = service.check_in(&appointment.id, None);
    assert!(matches!(
        result,
        Err(ScheduleError::WorkstationUnavailable { .. })
    ));
}
