//! Attendance ledger: session dates and the running fee they accrue.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{BucketSlot, ClassRecord};
use crate::errors::ClassBookError;

use super::{bucket_mut, required_text, student_mut, validate_amount, ServiceResult};

/// Maintains `attendance_dates` and `accrued_fee` together so the stored fee
/// only moves when the set of dates does.
pub struct AttendanceService;

impl AttendanceService {
    /// Records attendance on `date` in the given bucket, charging that
    /// bucket's own session fee. Returns `false` if the date was already there.
    pub fn add_attendance(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        date: NaiveDate,
    ) -> ServiceResult<bool> {
        let bucket = bucket_mut(classes, class, slot)?;
        let fee = bucket.fee_per_session;
        let record = bucket
            .student_mut(student)
            .ok_or_else(|| ClassBookError::student_not_found(class, student))?;
        let added = record.record_attendance(date, fee);
        debug!(class, %slot, student, %date, added, accrued = record.accrued_fee, "add attendance");
        Ok(added)
    }

    /// Removes attendance on `date`, refunding the bucket's session fee with a
    /// floor of zero. Returns `false` if the date was not recorded.
    pub fn remove_attendance(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        date: NaiveDate,
    ) -> ServiceResult<bool> {
        let bucket = bucket_mut(classes, class, slot)?;
        let fee = bucket.fee_per_session;
        let record = bucket
            .student_mut(student)
            .ok_or_else(|| ClassBookError::student_not_found(class, student))?;
        let removed = record.clear_attendance(date, fee);
        debug!(class, %slot, student, %date, removed, accrued = record.accrued_fee, "remove attendance");
        Ok(removed)
    }

    /// Sets whether `student` attended on `today` in the current bucket.
    /// Nothing changes when the record already agrees with `checked`.
    pub fn toggle_today(
        classes: &mut [ClassRecord],
        class: &str,
        student: &str,
        checked: bool,
        today: NaiveDate,
    ) -> ServiceResult<bool> {
        let present = student_mut(classes, class, BucketSlot::Current, student)?.attended(today);
        match (checked, present) {
            (true, false) => {
                Self::add_attendance(classes, class, BucketSlot::Current, student, today)
            }
            (false, true) => {
                Self::remove_attendance(classes, class, BucketSlot::Current, student, today)
            }
            _ => Ok(false),
        }
    }

    /// Renames a student within one bucket, keeping history and charges.
    pub fn rename_student(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        new_name: &str,
    ) -> ServiceResult<()> {
        let new_name = required_text("Student name", new_name)?;
        let bucket = bucket_mut(classes, class, slot)?;
        if new_name != student && bucket.contains_student(&new_name) {
            return Err(ClassBookError::Duplicate(format!(
                "Student `{}` in class `{}`",
                new_name, class
            )));
        }
        let record = bucket
            .student_mut(student)
            .ok_or_else(|| ClassBookError::student_not_found(class, student))?;
        debug!(class, %slot, student, new_name = %new_name, "renamed student");
        record.name = new_name;
        Ok(())
    }

    pub fn set_mobile(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        mobile: Option<&str>,
    ) -> ServiceResult<()> {
        student_mut(classes, class, slot, student)?.set_mobile(mobile);
        Ok(())
    }

    pub fn set_materials_fee(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        amount: f64,
    ) -> ServiceResult<()> {
        let amount = validate_amount("Materials fee", amount)?;
        student_mut(classes, class, slot, student)?.materials_fee = amount;
        Ok(())
    }

    /// Overrides the stored accrued fee, e.g. to apply a discount. Later
    /// attendance edits adjust from the overridden value.
    pub fn set_accrued_fee(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        amount: f64,
    ) -> ServiceResult<()> {
        let amount = validate_amount("Accrued fee", amount)?;
        let record = student_mut(classes, class, slot, student)?;
        debug!(class, %slot, student, from = record.accrued_fee, to = amount, "accrued fee override");
        record.accrued_fee = amount;
        Ok(())
    }
}
