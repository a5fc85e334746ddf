use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One student's roster entry, attendance, and charges within a single bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub attendance_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub accrued_fee: f64,
    #[serde(default)]
    pub materials_fee: f64,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, mobile: Option<&str>) -> Self {
        Self {
            name: name.into(),
            mobile: normalize_mobile(mobile),
            attendance_dates: BTreeSet::new(),
            accrued_fee: 0.0,
            materials_fee: 0.0,
            notes: Vec::new(),
        }
    }

    /// Roster entry for the next billing period: identity and contact only.
    pub fn carried_over(&self) -> Self {
        Self::new(self.name.clone(), self.mobile.as_deref())
    }

    pub fn attended(&self, date: NaiveDate) -> bool {
        self.attendance_dates.contains(&date)
    }

    pub fn attendance_count(&self) -> usize {
        self.attendance_dates.len()
    }

    /// Records a session on `date`, charging `fee`. Returns `false` when the
    /// date was already recorded and nothing changed.
    pub fn record_attendance(&mut self, date: NaiveDate, fee: f64) -> bool {
        if !self.attendance_dates.insert(date) {
            return false;
        }
        self.accrued_fee += fee;
        true
    }

    /// Removes a session on `date`, refunding `fee` without going below zero.
    pub fn clear_attendance(&mut self, date: NaiveDate, fee: f64) -> bool {
        if !self.attendance_dates.remove(&date) {
            return false;
        }
        self.accrued_fee = (self.accrued_fee - fee).max(0.0);
        true
    }

    pub fn set_mobile(&mut self, mobile: Option<&str>) {
        self.mobile = normalize_mobile(mobile);
    }

    /// Amount owed for the period. Never stored.
    pub fn total_owed(&self) -> f64 {
        self.accrued_fee + self.materials_fee
    }
}

fn normalize_mobile(mobile: Option<&str>) -> Option<String> {
    mobile
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
