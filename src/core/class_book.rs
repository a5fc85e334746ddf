//! Request/response facade over the class collection.
//!
//! Every call re-reads the whole collection from the store and brings each
//! window up to the current month before doing anything else. Mutating calls
//! write the whole collection back; reads never do.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{render_date, Config};
use crate::core::rotation::{self, RotationReport};
use crate::core::services::{
    find_class, AttendanceService, ClassService, NoteService, RosterService,
};
use crate::domain::{BucketSlot, ClassRecord, Clock, MonthTag, SystemClock};
use crate::errors::Result;
use crate::storage::CollectionStore;

/// Read model for one student in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDetail {
    pub class: String,
    pub slot: BucketSlot,
    pub name: String,
    pub mobile: Option<String>,
    pub notes: Vec<String>,
    pub attendance: Vec<String>,
    pub count: usize,
    pub accrued_fee: f64,
    pub materials_fee: f64,
    pub total_owed: f64,
}

pub struct ClassBook {
    store: Box<dyn CollectionStore>,
    clock: Box<dyn Clock>,
    key: String,
    date_format: String,
}

impl ClassBook {
    pub fn new(store: Box<dyn CollectionStore>) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: Box<dyn CollectionStore>, clock: Box<dyn Clock>) -> Self {
        Self::with_config(store, clock, &Config::default())
    }

    pub fn with_config(
        store: Box<dyn CollectionStore>,
        clock: Box<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            clock,
            key: config.collection_key.clone(),
            date_format: config.date_display_format.clone(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn month(&self) -> MonthTag {
        MonthTag::from_date(self.today())
    }

    /// Rotates every stale window and persists the result if anything moved.
    pub fn rotate(&self) -> Result<RotationReport> {
        let mut classes = self.store.load(&self.key)?;
        let report = rotation::rotate(&mut classes, self.month());
        if !report.is_empty() {
            self.store.save(&self.key, &classes)?;
            info!(rotated = report.rotated.len(), month = %report.today, "persisted rotation");
        }
        Ok(report)
    }

    fn load(&self) -> Result<Vec<ClassRecord>> {
        let mut classes = self.store.load(&self.key)?;
        rotation::rotate(&mut classes, self.month());
        Ok(classes)
    }

    fn commit<T>(&self, op: impl FnOnce(&mut Vec<ClassRecord>) -> Result<T>) -> Result<T> {
        let mut classes = self.load()?;
        let outcome = op(&mut classes)?;
        self.store.save(&self.key, &classes)?;
        Ok(outcome)
    }

    /// Like `commit`, but skips the write when `op` reports no change.
    fn commit_if(&self, op: impl FnOnce(&mut Vec<ClassRecord>) -> bool) -> Result<bool> {
        let mut classes = self.load()?;
        let changed = op(&mut classes);
        if changed {
            self.store.save(&self.key, &classes)?;
        }
        Ok(changed)
    }

    pub fn create_class(&self, name: &str, fee_per_session: f64) -> Result<()> {
        let month = self.month();
        self.commit(|classes| ClassService::create(classes, name, fee_per_session, month))
    }

    pub fn list_classes(&self) -> Result<Vec<ClassRecord>> {
        self.load()
    }

    pub fn get_class(&self, name: &str) -> Result<Option<ClassRecord>> {
        let classes = self.load()?;
        Ok(ClassService::get(&classes, name).cloned())
    }

    pub fn update_class(&self, name: &str, new_name: &str, fee_per_session: f64) -> Result<()> {
        self.commit(|classes| ClassService::update(classes, name, new_name, fee_per_session))
    }

    pub fn delete_class(&self, name: &str) -> Result<bool> {
        self.commit_if(|classes| ClassService::delete(classes, name))
    }

    pub fn add_student(&self, class: &str, name: &str, mobile: Option<&str>) -> Result<()> {
        self.commit(|classes| RosterService::add_student(classes, class, name, mobile))
    }

    pub fn delete_student(&self, class: &str, name: &str) -> Result<bool> {
        self.commit_if(|classes| RosterService::delete_student(classes, class, name))
    }

    pub fn student_detail(
        &self,
        class: &str,
        student: &str,
        slot: BucketSlot,
    ) -> Result<Option<StudentDetail>> {
        let classes = self.load()?;
        let Some(record) =
            find_class(&classes, class).and_then(|record| record.bucket(slot).student(student))
        else {
            debug!(class, student, %slot, "student detail requested for absent target");
            return Ok(None);
        };
        let attendance = record
            .attendance_dates
            .iter()
            .map(|date| render_date(*date, &self.date_format))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(StudentDetail {
            class: class.to_string(),
            slot,
            name: record.name.clone(),
            mobile: record.mobile.clone(),
            notes: record.notes.clone(),
            attendance,
            count: record.attendance_count(),
            accrued_fee: record.accrued_fee,
            materials_fee: record.materials_fee,
            total_owed: record.total_owed(),
        }))
    }

    pub fn rename_student(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        new_name: &str,
    ) -> Result<()> {
        self.commit(|classes| {
            AttendanceService::rename_student(classes, class, slot, student, new_name)
        })
    }

    pub fn set_mobile(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        mobile: Option<&str>,
    ) -> Result<()> {
        self.commit(|classes| AttendanceService::set_mobile(classes, class, slot, student, mobile))
    }

    pub fn set_materials_fee(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        amount: f64,
    ) -> Result<()> {
        self.commit(|classes| {
            AttendanceService::set_materials_fee(classes, class, slot, student, amount)
        })
    }

    pub fn set_accrued_fee(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        amount: f64,
    ) -> Result<()> {
        self.commit(|classes| {
            AttendanceService::set_accrued_fee(classes, class, slot, student, amount)
        })
    }

    pub fn add_student_note(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        note: &str,
    ) -> Result<()> {
        self.commit(|classes| NoteService::add_student_note(classes, class, slot, student, note))
    }

    pub fn delete_student_note(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        note: &str,
    ) -> Result<usize> {
        let mut removed = 0;
        self.commit_if(|classes| {
            removed = NoteService::delete_student_note(classes, class, slot, student, note);
            removed > 0
        })?;
        Ok(removed)
    }

    pub fn add_bucket_note(&self, class: &str, slot: BucketSlot, note: &str) -> Result<()> {
        self.commit(|classes| NoteService::add_bucket_note(classes, class, slot, note))
    }

    pub fn delete_bucket_note(&self, class: &str, slot: BucketSlot, note: &str) -> Result<usize> {
        let mut removed = 0;
        self.commit_if(|classes| {
            removed = NoteService::delete_bucket_note(classes, class, slot, note);
            removed > 0
        })?;
        Ok(removed)
    }

    pub fn add_attendance(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        date: NaiveDate,
    ) -> Result<bool> {
        self.commit(|classes| AttendanceService::add_attendance(classes, class, slot, student, date))
    }

    pub fn remove_attendance(
        &self,
        class: &str,
        slot: BucketSlot,
        student: &str,
        date: NaiveDate,
    ) -> Result<bool> {
        self.commit(|classes| {
            AttendanceService::remove_attendance(classes, class, slot, student, date)
        })
    }

    /// Marks or unmarks today's session for `student` in the current bucket.
    pub fn toggle_today(&self, class: &str, student: &str, checked: bool) -> Result<bool> {
        let today = self.today();
        self.commit(|classes| AttendanceService::toggle_today(classes, class, student, checked, today))
    }
}
