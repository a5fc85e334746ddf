pub mod attendance_service;
pub mod class_service;
pub mod note_service;
pub mod roster_service;

#[cfg(test)]
mod tests;

pub use attendance_service::AttendanceService;
pub use class_service::ClassService;
pub use note_service::NoteService;
pub use roster_service::RosterService;

use crate::domain::{BucketSlot, ClassRecord, MonthBucket, StudentRecord};
use crate::errors::{ClassBookError, Result};

pub type ServiceResult<T> = Result<T>;

pub(crate) fn find_class<'a>(classes: &'a [ClassRecord], name: &str) -> Option<&'a ClassRecord> {
    classes.iter().find(|class| class.name == name)
}

pub(crate) fn class_mut<'a>(
    classes: &'a mut [ClassRecord],
    name: &str,
) -> ServiceResult<&'a mut ClassRecord> {
    classes
        .iter_mut()
        .find(|class| class.name == name)
        .ok_or_else(|| ClassBookError::class_not_found(name))
}

pub(crate) fn bucket_mut<'a>(
    classes: &'a mut [ClassRecord],
    class: &str,
    slot: BucketSlot,
) -> ServiceResult<&'a mut MonthBucket> {
    Ok(class_mut(classes, class)?.bucket_mut(slot))
}

pub(crate) fn student_mut<'a>(
    classes: &'a mut [ClassRecord],
    class: &str,
    slot: BucketSlot,
    student: &str,
) -> ServiceResult<&'a mut StudentRecord> {
    bucket_mut(classes, class, slot)?
        .student_mut(student)
        .ok_or_else(|| ClassBookError::student_not_found(class, student))
}

pub(crate) fn required_text(label: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ClassBookError::Validation(format!("{} is required", label)))
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn validate_amount(label: &str, amount: f64) -> ServiceResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        Err(ClassBookError::Validation(format!(
            "{} must be a non-negative number",
            label
        )))
    } else {
        Ok(amount)
    }
}
