use tracing::{debug, info};

use crate::domain::{ClassRecord, MonthTag};
use crate::errors::ClassBookError;

use super::{class_mut, find_class, required_text, validate_amount, ServiceResult};

pub struct ClassService;

impl ClassService {
    /// Creates a class with an empty six-month window priced at `fee_per_session`.
    pub fn create(
        classes: &mut Vec<ClassRecord>,
        name: &str,
        fee_per_session: f64,
        today: MonthTag,
    ) -> ServiceResult<()> {
        let name = required_text("Class name", name)?;
        let fee = validate_amount("Fee per session", fee_per_session)?;
        Self::ensure_unique(classes, None, &name)?;
        info!(class = %name, fee, "created class");
        classes.push(ClassRecord::new(name, fee, today));
        Ok(())
    }

    /// Renames and reprices a class. Only the current bucket takes the new
    /// price; archived months keep the rate they were billed at.
    pub fn update(
        classes: &mut [ClassRecord],
        name: &str,
        new_name: &str,
        fee_per_session: f64,
    ) -> ServiceResult<()> {
        let new_name = required_text("Class name", new_name)?;
        let fee = validate_amount("Fee per session", fee_per_session)?;
        if find_class(classes, name).is_none() {
            return Err(ClassBookError::class_not_found(name));
        }
        Self::ensure_unique(classes, Some(name), &new_name)?;
        let class = class_mut(classes, name)?;
        debug!(class = %name, new_name = %new_name, fee, "updating class");
        class.name = new_name;
        class.current_mut().fee_per_session = fee;
        Ok(())
    }

    /// Removes a class and its whole window. Returns `false` if it was absent.
    pub fn delete(classes: &mut Vec<ClassRecord>, name: &str) -> bool {
        let before = classes.len();
        classes.retain(|class| class.name != name);
        let removed = classes.len() != before;
        if removed {
            info!(class = %name, "deleted class");
        }
        removed
    }

    pub fn get<'a>(classes: &'a [ClassRecord], name: &str) -> Option<&'a ClassRecord> {
        find_class(classes, name)
    }

    pub fn list(classes: &[ClassRecord]) -> Vec<&ClassRecord> {
        classes.iter().collect()
    }

    fn ensure_unique(
        classes: &[ClassRecord],
        exclude: Option<&str>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let duplicate = classes
            .iter()
            .any(|class| class.name == candidate && exclude.map_or(true, |own| class.name != own));
        if duplicate {
            Err(ClassBookError::Duplicate(format!("Class `{}`", candidate)))
        } else {
            Ok(())
        }
    }
}
