#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use class_book::{core::ClassBook, domain::FixedClock, storage::JsonStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh application directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a class book on `base` whose clock is pinned to `today`.
pub fn open_book(base: &PathBuf, today: NaiveDate) -> (ClassBook, JsonStore) {
    let store = JsonStore::new(Some(base.clone()), Some(3)).expect("create json store");
    let book = ClassBook::with_clock(Box::new(store.clone()), Box::new(FixedClock(today)));
    (book, store)
}

/// Isolated book backed by a unique directory.
pub fn setup_test_env(today: NaiveDate) -> (ClassBook, JsonStore, PathBuf) {
    let base = temp_base();
    let (book, store) = open_book(&base, today);
    (book, store, base)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
