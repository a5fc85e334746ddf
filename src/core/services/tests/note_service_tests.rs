use crate::core::services::NoteService;
use crate::domain::BucketSlot;
use crate::errors::ClassBookError;

use super::math_class;

#[test]
fn bucket_notes_keep_insertion_order() {
    let mut classes = math_class();
    NoteService::add_bucket_note(&mut classes, "Math-101", BucketSlot::Current, "first").unwrap();
    NoteService::add_bucket_note(&mut classes, "Math-101", BucketSlot::Current, "second").unwrap();
    assert_eq!(classes[0].current().notes, vec!["first", "second"]);
}

#[test]
fn deleting_a_duplicated_note_removes_every_copy() {
    let mut classes = math_class();
    for note in ["holiday", "exam", "holiday"] {
        NoteService::add_bucket_note(&mut classes, "Math-101", BucketSlot::Current, note).unwrap();
    }
    let removed =
        NoteService::delete_bucket_note(&mut classes, "Math-101", BucketSlot::Current, "holiday");
    assert_eq!(removed, 2);
    assert_eq!(classes[0].current().notes, vec!["exam"]);
}

#[test]
fn notes_are_removed_by_the_text_they_were_added_with() {
    let mut classes = math_class();
    NoteService::add_bucket_note(&mut classes, "Math-101", BucketSlot::Current, "exam week ")
        .unwrap();
    NoteService::add_student_note(&mut classes, "Math-101", BucketSlot::Current, "An", " paid")
        .unwrap();
    assert_eq!(classes[0].current().notes, vec!["exam week"]);

    let removed =
        NoteService::delete_bucket_note(&mut classes, "Math-101", BucketSlot::Current, "exam week ");
    assert_eq!(removed, 1);
    let removed = NoteService::delete_student_note(
        &mut classes,
        "Math-101",
        BucketSlot::Current,
        "An",
        " paid",
    );
    assert_eq!(removed, 1);
    assert!(classes[0].current().notes.is_empty());
    assert!(classes[0].current().student("An").unwrap().notes.is_empty());
}

#[test]
fn notes_can_be_removed_from_archived_buckets() {
    let mut classes = math_class();
    NoteService::add_bucket_note(&mut classes, "Math-101", BucketSlot::ThreeAgo, "old").unwrap();
    let removed =
        NoteService::delete_bucket_note(&mut classes, "Math-101", BucketSlot::ThreeAgo, "old");
    assert_eq!(removed, 1);
    assert!(classes[0].bucket(BucketSlot::ThreeAgo).notes.is_empty());
}

#[test]
fn student_notes_are_scoped_to_the_student() {
    let mut classes = math_class();
    NoteService::add_student_note(&mut classes, "Math-101", BucketSlot::Current, "An", "paid")
        .unwrap();
    NoteService::add_student_note(&mut classes, "Math-101", BucketSlot::Current, "An", "paid")
        .unwrap();
    assert_eq!(classes[0].current().student("An").unwrap().notes.len(), 2);

    let removed = NoteService::delete_student_note(
        &mut classes,
        "Math-101",
        BucketSlot::Current,
        "An",
        "paid",
    );
    assert_eq!(removed, 2);
    assert!(classes[0].current().notes.is_empty());
}

#[test]
fn adding_to_missing_targets_fails_but_deleting_does_not() {
    let mut classes = math_class();
    let err = NoteService::add_student_note(&mut classes, "Math-101", BucketSlot::Current, "Zed", "x")
        .unwrap_err();
    assert!(matches!(err, ClassBookError::NotFound(_)));
    let err =
        NoteService::add_bucket_note(&mut classes, "Art", BucketSlot::Current, "x").unwrap_err();
    assert!(matches!(err, ClassBookError::NotFound(_)));

    assert_eq!(
        NoteService::delete_student_note(&mut classes, "Math-101", BucketSlot::Current, "Zed", "x"),
        0
    );
    assert_eq!(
        NoteService::delete_bucket_note(&mut classes, "Art", BucketSlot::Current, "x"),
        0
    );
}

#[test]
fn blank_notes_are_rejected() {
    let mut classes = math_class();
    let err = NoteService::add_bucket_note(&mut classes, "Math-101", BucketSlot::Current, "   ")
        .unwrap_err();
    assert!(matches!(err, ClassBookError::Validation(_)));
}
