mod common;

use std::{fs, path::Path};

use class_book::{
    domain::{BucketSlot, MonthTag},
    storage::{CollectionStore, JsonStore},
};
use common::{date, open_book, setup_test_env, temp_base};

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (book, store, _base) = setup_test_env(date(2024, 5, 20));
    book.create_class("Math-101", 100_000.0).unwrap();
    let path = store.document_path("classes");
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory at the temp file name makes File::create fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let result = book.create_class("Art", 50_000.0);
    assert!(
        result.is_err(),
        "expected the save to fail when the temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original);
}

#[test]
fn writes_survive_reopening() {
    let (book, _store, base) = setup_test_env(date(2024, 5, 20));
    book.create_class("Math-101", 100_000.0).unwrap();
    book.add_student("Math-101", "An", Some("0901")).unwrap();
    book.add_attendance("Math-101", BucketSlot::Current, "An", date(2024, 5, 2))
        .unwrap();
    drop(book);

    let (reopened, _) = open_book(&base, date(2024, 5, 21));
    let detail = reopened
        .student_detail("Math-101", "An", BucketSlot::Current)
        .unwrap()
        .unwrap();
    assert_eq!(detail.count, 1);
    assert_eq!(detail.accrued_fee, 100_000.0);
}

#[test]
fn legacy_documents_load_with_defaults() {
    let base = temp_base();
    let store = JsonStore::new(Some(base.clone()), None).unwrap();
    let legacy = r#"[
      {
        "name": "Math-101",
        "rotation_tag": 4,
        "window": {
          "current": {
            "fee_per_session": 100000,
            "students": [ { "name": "An", "attendance_dates": ["2024-05-02"], "accrued_fee": 100000 } ]
          }
        }
      }
    ]"#;
    fs::write(store.document_path("classes"), legacy).unwrap();

    let classes = store.load("classes").unwrap();
    assert_eq!(classes[0].rotation_tag, MonthTag::legacy(4).unwrap());
    assert!(classes[0].bucket(BucketSlot::FiveAgo).students.is_empty());
    assert_eq!(classes[0].current().students[0].materials_fee, 0.0);

    // Same month: legacy tag still matches, nothing rotates.
    let (may, _) = open_book(&base, date(2024, 5, 25));
    assert!(may.rotate().unwrap().is_empty());

    // Next month: the window shifts and the tag gains a year.
    let (june, _) = open_book(&base, date(2024, 6, 1));
    assert_eq!(june.rotate().unwrap().rotated, vec!["Math-101"]);
    let saved = store.load("classes").unwrap();
    assert_eq!(saved[0].rotation_tag, MonthTag::new(2024, 5).unwrap());
    assert_eq!(
        saved[0].bucket(BucketSlot::OneAgo).students[0].accrued_fee,
        100_000.0
    );
}

#[test]
fn tag_from_previous_year_rotates() {
    let (book, store, base) = setup_test_env(date(2023, 6, 10));
    book.create_class("Art", 50_000.0).unwrap();
    book.add_student("Art", "Chi", None).unwrap();

    let (next_year, _) = open_book(&base, date(2024, 6, 10));
    let report = next_year.rotate().unwrap();
    assert_eq!(report.rotated, vec!["Art"]);
    let saved = store.load("classes").unwrap();
    assert_eq!(saved[0].rotation_tag, MonthTag::new(2024, 5).unwrap());
}

#[test]
fn every_save_keeps_a_bounded_backup_trail() {
    let (book, store, _base) = setup_test_env(date(2024, 5, 20));
    book.create_class("Art", 50_000.0).unwrap();
    for name in ["Chi", "Dung", "Em", "Giang", "Hoa"] {
        book.add_student("Art", name, None).unwrap();
    }
    let backups = store.list_backups("classes").unwrap();
    assert!(!backups.is_empty());
    assert!(backups.len() <= 3);
}

#[test]
fn read_operations_do_not_create_documents() {
    let (book, store, _base) = setup_test_env(date(2024, 5, 20));
    assert!(book.list_classes().unwrap().is_empty());
    assert!(book.get_class("Art").unwrap().is_none());
    assert!(!store.document_path("classes").exists());
}
