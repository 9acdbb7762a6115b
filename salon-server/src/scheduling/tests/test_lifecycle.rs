use super::*;

#[test]
fn test_book_without_workstation() {
    let service = create_test_service();

    let appointment = service.book_appointment(book_request("customer-c")).unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.total_amount, 45.0);
    assert_eq!(appointment.duration_minutes, 60);
    assert!(appointment.workstation_id.is_none());

    let open = service.list_open_appointments().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, appointment.id);
}

#[test]
fn test_book_rejects_bad_input_before_any_write() {
    let service = create_test_service();

    assert!(matches!(
        service.book_appointment(book_request("")),
        Err(ScheduleError::Validation(_))
    ));

    let mut negative_amount = book_request("customer-c");
    negative_amount.total_amount = -1.0;
    assert!(matches!(
        service.book_appointment(negative_amount),
        Err(ScheduleError::Validation(_))
    ));

    let mut nan_amount = book_request("customer-c");
    nan_amount.total_amount = f64::NAN;
    assert!(matches!(
        service.book_appointment(nan_amount),
        Err(ScheduleError::Validation(_))
    ));

    let mut bad_workstation = book_request("customer-c");
    bad_workstation.workstation_id = Some("ws-missing".to_string());
    assert!(matches!(
        service.book_appointment(bad_workstation),
        Err(ScheduleError::WorkstationNotFound(_))
    ));

    assert!(service.list_open_appointments().unwrap().is_empty());
}

#[test]
fn test_check_in_requires_workstation() {
    let service = create_test_service();

    let appointment = service.book_appointment(book_request("customer-c")).unwrap();
    service.confirm_appointment(&appointment.id, None).unwrap();

    let result = service.check_in(&appointment.id, None);
    assert!(matches!(result, Err(ScheduleError::Validation(_))));

    // Status untouched by the failed check-in
    let stored = service.get_appointment(&appointment.id).unwrap().unwrap();
    assert_eq!(stored.status, AppointmentStatus::Confirmed);
}

#[test]
fn test_check_in_from_pending_is_invalid() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    let appointment = book_on(&service, "customer-c", &workstation.id);

    let result = service.check_in(&appointment.id, None);
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidTransition {
            from: AppointmentStatus::Pending,
            event: "checkIn"
        })
    ));
}

#[test]
fn test_full_lifecycle_walk() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    let appointment = book_on(&service, "customer-c", &workstation.id);

    let confirmed = service.confirm_appointment(&appointment.id, None).unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let in_progress = service.check_in(&appointment.id, None).unwrap();
    assert_eq!(in_progress.status, AppointmentStatus::InProgress);
    let ws = service.get_workstation(&workstation.id).unwrap().unwrap();
    assert_eq!(ws.status, shared::models::WorkstationStatus::Occupied);

    let completed = service.check_out(&appointment.id, None).unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);
    let ws = service.get_workstation(&workstation.id).unwrap().unwrap();
    assert_eq!(ws.status, shared::models::WorkstationStatus::Available);

    // Completed appointments leave the open list but are retained
    assert!(service.list_open_appointments().unwrap().is_empty());
    assert!(service.get_appointment(&appointment.id).unwrap().is_some());
}

#[test]
fn test_cancel_from_every_live_state() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");

    // pending
    let a = service.book_appointment(book_request("customer-a")).unwrap();
    let cancelled = service.cancel_appointment(&a.id, None).unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    // confirmed
    let b = service.book_appointment(book_request("customer-b")).unwrap();
    service.confirm_appointment(&b.id, None).unwrap();
    let cancelled = service.cancel_appointment(&b.id, None).unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    // in-progress releases the workstation
    let c = book_on(&service, "customer-c", &workstation.id);
    service.confirm_appointment(&c.id, None).unwrap();
    service.check_in(&c.id, None).unwrap();
    let cancelled = service.cancel_appointment(&c.id, None).unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    let ws = service.get_workstation(&workstation.id).unwrap().unwrap();
    assert_eq!(ws.status, shared::models::WorkstationStatus::Available);
}

#[test]
fn test_no_show_only_from_confirmed() {
    let service = create_test_service();

    let a = service.book_appointment(book_request("customer-a")).unwrap();
    assert!(matches!(
        service.mark_no_show(&a.id, None),
        Err(ScheduleError::InvalidTransition {
            event: "markNoShow",
            ..
        })
    ));

    service.confirm_appointment(&a.id, None).unwrap();
    let no_show = service.mark_no_show(&a.id, None).unwrap();
    assert_eq!(no_show.status, AppointmentStatus::NoShow);
}

#[test]
fn test_terminal_states_reject_everything() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    let appointment = book_on(&service, "customer-c", &workstation.id);
    service.confirm_appointment(&appointment.id, None).unwrap();
    service.check_in(&appointment.id, None).unwrap();
    service.check_out(&appointment.id, None).unwrap();

    assert!(matches!(
        service.check_out(&appointment.id, None),
        Err(ScheduleError::InvalidTransition {
            from: AppointmentStatus::Completed,
            ..
        })
    ));
    assert!(matches!(
        service.cancel_appointment(&appointment.id, None),
        Err(ScheduleError::InvalidTransition { .. })
    ));
    assert!(matches!(
        service.confirm_appointment(&appointment.id, None),
        Err(ScheduleError::InvalidTransition { .. })
    ));
    assert!(matches!(
        service.edit_appointment(&appointment.id, Default::default()),
        Err(ScheduleError::InvalidTransition { event: "edit", .. })
    ));
}

#[test]
fn test_unknown_appointment_is_not_found() {
    let service = create_test_service();
    assert!(matches!(
        service.confirm_appointment("appt-missing", None),
        Err(ScheduleError::AppointmentNotFound(_))
    ));
    assert!(service.get_appointment("appt-missing").unwrap().is_none());
}

#[test]
fn test_edit_amount_flows_into_checkout() {
    let service = create_test_service();
    let workstation = seed_workstation(&service, "Bay A");
    let appointment = book_on(&service, "customer-c", &workstation.id);

    let patch = shared::models::AppointmentPatch {
        total_amount: Some(80.0),
        ..Default::default()
    };
    let edited = service.edit_appointment(&appointment.id, patch).unwrap();
    assert_eq!(edited.total_amount, 80.0);

    service.confirm_appointment(&appointment.id, None).unwrap();
    service.check_in(&appointment.id, None).unwrap();
    service.check_out(&appointment.id, None).unwrap();

    let summary = service.customer_summary("customer-c").unwrap();
    assert_eq!(summary.total_spent, 80.0);
}
