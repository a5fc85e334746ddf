//! Monthly advance of every class window.

use tracing::info;

use crate::domain::{ClassRecord, MonthTag};

/// Outcome of a rotation pass over the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationReport {
    pub today: MonthTag,
    pub rotated: Vec<String>,
}

impl RotationReport {
    pub fn is_empty(&self) -> bool {
        self.rotated.is_empty()
    }
}

/// Brings every class window up to `today`.
///
/// Classes already tagged with `today` are untouched, so running this more
/// than once in the same month changes nothing after the first pass.
pub fn rotate(classes: &mut [ClassRecord], today: MonthTag) -> RotationReport {
    let mut rotated = Vec::new();
    for class in classes.iter_mut() {
        let previous = class.rotation_tag;
        if class.rotate_to(today) {
            info!(
                class = %class.name,
                from = %previous,
                to = %today,
                students = class.current().students.len(),
                "rotated month window"
            );
            rotated.push(class.name.clone());
        }
    }
    RotationReport { today, rotated }
}
