use crate::core::rotation;
use crate::core::services::{AttendanceService, ClassService, RosterService};
use crate::domain::{BucketSlot, MonthTag};
use crate::errors::ClassBookError;

use super::{date, math_class};

fn an(classes: &[crate::domain::ClassRecord], slot: BucketSlot) -> crate::domain::StudentRecord {
    classes[0].bucket(slot).student("An").unwrap().clone()
}

#[test]
fn math_101_billing_scenario() {
    let mut classes = math_class();
    let current = BucketSlot::Current;

    AttendanceService::add_attendance(&mut classes, "Math-101", current, "An", date(2024, 5, 1))
        .unwrap();
    let student = an(&classes, current);
    assert_eq!(student.accrued_fee, 100_000.0);
    assert_eq!(
        student.attendance_dates.iter().copied().collect::<Vec<_>>(),
        vec![date(2024, 5, 1)]
    );

    AttendanceService::add_attendance(&mut classes, "Math-101", current, "An", date(2024, 5, 3))
        .unwrap();
    assert_eq!(an(&classes, current).accrued_fee, 200_000.0);

    AttendanceService::remove_attendance(&mut classes, "Math-101", current, "An", date(2024, 5, 1))
        .unwrap();
    let student = an(&classes, current);
    assert_eq!(student.accrued_fee, 100_000.0);
    assert_eq!(
        student.attendance_dates.iter().copied().collect::<Vec<_>>(),
        vec![date(2024, 5, 3)]
    );
}

#[test]
fn adding_the_same_date_twice_changes_nothing() {
    let mut classes = math_class();
    let day = date(2024, 5, 6);
    assert!(
        AttendanceService::add_attendance(&mut classes, "Math-101", BucketSlot::Current, "An", day)
            .unwrap()
    );
    let once = an(&classes, BucketSlot::Current);
    assert!(
        !AttendanceService::add_attendance(&mut classes, "Math-101", BucketSlot::Current, "An", day)
            .unwrap()
    );
    assert_eq!(an(&classes, BucketSlot::Current), once);
}

#[test]
fn add_then_remove_restores_prior_state() {
    for day in 1..=28 {
        let mut classes = math_class();
        AttendanceService::add_attendance(
            &mut classes,
            "Math-101",
            BucketSlot::Current,
            "An",
            date(2024, 5, 15),
        )
        .unwrap();
        let before = an(&classes, BucketSlot::Current);
        let target = date(2024, 5, day);
        let added = AttendanceService::add_attendance(
            &mut classes,
            "Math-101",
            BucketSlot::Current,
            "An",
            target,
        )
        .unwrap();
        if added {
            AttendanceService::remove_attendance(
                &mut classes,
                "Math-101",
                BucketSlot::Current,
                "An",
                target,
            )
            .unwrap();
        }
        assert_eq!(an(&classes, BucketSlot::Current), before, "day {day}");
    }
}

#[test]
fn accrued_fee_never_goes_negative() {
    let mut classes = math_class();
    let slot = BucketSlot::Current;
    for day in [1, 2, 3] {
        AttendanceService::add_attendance(&mut classes, "Math-101", slot, "An", date(2024, 5, day))
            .unwrap();
    }
    AttendanceService::set_accrued_fee(&mut classes, "Math-101", slot, "An", 50_000.0).unwrap();
    for day in [3, 1, 2, 2, 9] {
        AttendanceService::remove_attendance(
            &mut classes,
            "Math-101",
            slot,
            "An",
            date(2024, 5, day),
        )
        .unwrap();
        assert!(an(&classes, slot).accrued_fee >= 0.0);
    }
    assert_eq!(an(&classes, slot).accrued_fee, 0.0);
    assert!(an(&classes, slot).attendance_dates.is_empty());
}

#[test]
fn removing_an_unrecorded_date_is_a_no_op() {
    let mut classes = math_class();
    let removed = AttendanceService::remove_attendance(
        &mut classes,
        "Math-101",
        BucketSlot::Current,
        "An",
        date(2024, 5, 4),
    )
    .unwrap();
    assert!(!removed);
    assert_eq!(an(&classes, BucketSlot::Current).accrued_fee, 0.0);
}

#[test]
fn archived_corrections_use_the_archived_rate() {
    let mut classes = math_class();
    rotation::rotate(&mut classes, MonthTag::new(2024, 5).unwrap());
    ClassService::update(&mut classes, "Math-101", "Math-101", 150_000.0).unwrap();

    AttendanceService::add_attendance(
        &mut classes,
        "Math-101",
        BucketSlot::OneAgo,
        "An",
        date(2024, 5, 20),
    )
    .unwrap();
    assert_eq!(an(&classes, BucketSlot::OneAgo).accrued_fee, 100_000.0);

    AttendanceService::add_attendance(
        &mut classes,
        "Math-101",
        BucketSlot::Current,
        "An",
        date(2024, 6, 3),
    )
    .unwrap();
    assert_eq!(an(&classes, BucketSlot::Current).accrued_fee, 150_000.0);
}

#[test]
fn missing_class_or_student_is_not_found() {
    let mut classes = math_class();
    let err = AttendanceService::add_attendance(
        &mut classes,
        "Art",
        BucketSlot::Current,
        "An",
        date(2024, 5, 1),
    )
    .unwrap_err();
    assert!(matches!(err, ClassBookError::NotFound(_)));

    let err = AttendanceService::add_attendance(
        &mut classes,
        "Math-101",
        BucketSlot::TwoAgo,
        "An",
        date(2024, 3, 1),
    )
    .unwrap_err();
    assert!(matches!(err, ClassBookError::NotFound(_)));
}

#[test]
fn toggle_today_only_moves_when_state_disagrees() {
    let mut classes = math_class();
    let today = date(2024, 5, 10);

    assert!(AttendanceService::toggle_today(&mut classes, "Math-101", "An", true, today).unwrap());
    assert!(!AttendanceService::toggle_today(&mut classes, "Math-101", "An", true, today).unwrap());
    assert_eq!(an(&classes, BucketSlot::Current).accrued_fee, 100_000.0);

    assert!(AttendanceService::toggle_today(&mut classes, "Math-101", "An", false, today).unwrap());
    assert!(!AttendanceService::toggle_today(&mut classes, "Math-101", "An", false, today).unwrap());
    assert_eq!(an(&classes, BucketSlot::Current).accrued_fee, 0.0);
}

#[test]
fn toggle_today_for_missing_student_is_not_found() {
    let mut classes = math_class();
    let err = AttendanceService::toggle_today(&mut classes, "Math-101", "Zed", true, date(2024, 5, 1))
        .unwrap_err();
    assert!(matches!(err, ClassBookError::NotFound(_)));
}

#[test]
fn rename_keeps_history_and_rejects_collisions() {
    let mut classes = math_class();
    let slot = BucketSlot::Current;
    AttendanceService::add_attendance(&mut classes, "Math-101", slot, "An", date(2024, 5, 1))
        .unwrap();
    AttendanceService::set_materials_fee(&mut classes, "Math-101", slot, "An", 30_000.0).unwrap();
    RosterService::add_student(&mut classes, "Math-101", "Bình", None).unwrap();

    let err = AttendanceService::rename_student(&mut classes, "Math-101", slot, "An", "Bình")
        .unwrap_err();
    assert!(matches!(err, ClassBookError::Duplicate(_)));

    AttendanceService::rename_student(&mut classes, "Math-101", slot, "An", "An Nguyen").unwrap();
    let renamed = classes[0].current().student("An Nguyen").unwrap();
    assert_eq!(renamed.accrued_fee, 100_000.0);
    assert_eq!(renamed.materials_fee, 30_000.0);
    assert_eq!(renamed.attendance_count(), 1);
    assert_eq!(renamed.mobile.as_deref(), Some("0901"));
    assert_eq!(renamed.total_owed(), 130_000.0);
}

#[test]
fn setters_validate_amounts_and_normalize_mobile() {
    let mut classes = math_class();
    let slot = BucketSlot::Current;
    let err = AttendanceService::set_materials_fee(&mut classes, "Math-101", slot, "An", -1.0)
        .unwrap_err();
    assert!(matches!(err, ClassBookError::Validation(_)));

    AttendanceService::set_mobile(&mut classes, "Math-101", slot, "An", Some("  ")).unwrap();
    assert!(an(&classes, slot).mobile.is_none());
    AttendanceService::set_mobile(&mut classes, "Math-101", slot, "An", Some("0912 345 678"))
        .unwrap();
    assert_eq!(an(&classes, slot).mobile.as_deref(), Some("0912 345 678"));
}
