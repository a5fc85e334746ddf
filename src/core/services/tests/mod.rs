mod attendance_service_tests;
mod note_service_tests;

use chrono::NaiveDate;

use crate::core::services::{ClassService, RosterService};
use crate::domain::{ClassRecord, MonthTag};

pub(super) fn may_2024() -> MonthTag {
    MonthTag::new(2024, 4).unwrap()
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// "Math-101" at 100000 per session with student "An" enrolled.
pub(super) fn math_class() -> Vec<ClassRecord> {
    let mut classes = Vec::new();
    ClassService::create(&mut classes, "Math-101", 100_000.0, may_2024()).unwrap();
    RosterService::add_student(&mut classes, "Math-101", "An", Some("0901")).unwrap();
    classes
}
