use tracing::{debug, warn};

use crate::domain::{ClassRecord, StudentRecord};
use crate::errors::ClassBookError;

use super::{class_mut, required_text, ServiceResult};

/// Enrollment changes. Enrollment always targets the current bucket.
pub struct RosterService;

impl RosterService {
    pub fn add_student(
        classes: &mut [ClassRecord],
        class: &str,
        name: &str,
        mobile: Option<&str>,
    ) -> ServiceResult<()> {
        let name = required_text("Student name", name)?;
        let record = class_mut(classes, class)?;
        let current = record.current_mut();
        if current.contains_student(&name) {
            return Err(ClassBookError::Duplicate(format!(
                "Student `{}` in class `{}`",
                name, class
            )));
        }
        debug!(class, student = %name, "enrolled student");
        current.students.push(StudentRecord::new(name, mobile));
        Ok(())
    }

    /// Drops a student from the current bucket. Archived months keep their
    /// records so past billing stays intact. Returns `false` when there was
    /// nothing to remove.
    pub fn delete_student(classes: &mut [ClassRecord], class: &str, name: &str) -> bool {
        let Some(record) = classes.iter_mut().find(|record| record.name == class) else {
            warn!(class, student = name, "delete skipped, class not found");
            return false;
        };
        match record.current_mut().remove_student(name) {
            Some(_) => {
                debug!(class, student = name, "removed student from current month");
                true
            }
            None => false,
        }
    }
}
