use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::student::StudentRecord;
use crate::errors::ClassBookError;

/// One month of a class: the session price in force plus roster and notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthBucket {
    #[serde(default)]
    pub fee_per_session: f64,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl MonthBucket {
    pub fn empty(fee_per_session: f64) -> Self {
        Self {
            fee_per_session,
            students: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Opening state of the following month: same price, same roster
    /// identities, no attendance, charges, or notes.
    pub fn next_month(&self) -> Self {
        Self {
            fee_per_session: self.fee_per_session,
            students: self.students.iter().map(StudentRecord::carried_over).collect(),
            notes: Vec::new(),
        }
    }

    pub fn student(&self, name: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|student| student.name == name)
    }

    pub fn student_mut(&mut self, name: &str) -> Option<&mut StudentRecord> {
        self.students.iter_mut().find(|student| student.name == name)
    }

    pub fn contains_student(&self, name: &str) -> bool {
        self.student(name).is_some()
    }

    pub fn remove_student(&mut self, name: &str) -> Option<StudentRecord> {
        let index = self.students.iter().position(|student| student.name == name)?;
        Some(self.students.remove(index))
    }

    pub fn roster(&self) -> Vec<&str> {
        self.students.iter().map(|student| student.name.as_str()).collect()
    }
}

/// Position of a bucket inside a class window, newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketSlot {
    #[default]
    Current,
    OneAgo,
    TwoAgo,
    ThreeAgo,
    FourAgo,
    FiveAgo,
}

impl BucketSlot {
    pub const ALL: [BucketSlot; 6] = [
        BucketSlot::Current,
        BucketSlot::OneAgo,
        BucketSlot::TwoAgo,
        BucketSlot::ThreeAgo,
        BucketSlot::FourAgo,
        BucketSlot::FiveAgo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketSlot::Current => "current",
            BucketSlot::OneAgo => "one-ago",
            BucketSlot::TwoAgo => "two-ago",
            BucketSlot::ThreeAgo => "three-ago",
            BucketSlot::FourAgo => "four-ago",
            BucketSlot::FiveAgo => "five-ago",
        }
    }

}

impl fmt::Display for BucketSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketSlot {
    type Err = ClassBookError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        if let Ok(offset) = normalized.parse::<usize>() {
            return Self::ALL.get(offset).copied().ok_or_else(|| {
                ClassBookError::Validation(format!("month offset {} is outside 0..=5", offset))
            });
        }
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.as_str() == normalized)
            .ok_or_else(|| ClassBookError::Validation(format!("unknown month slot `{}`", value)))
    }
}
