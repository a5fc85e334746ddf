use tracing::debug;

use crate::domain::{BucketSlot, ClassRecord};

use super::{bucket_mut, required_text, student_mut, ServiceResult};

/// Free-text notes on buckets and students.
///
/// Notes are stored trimmed. Deleting a note trims the given text the same
/// way and removes every entry with exactly that text.
pub struct NoteService;

impl NoteService {
    pub fn add_bucket_note(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        note: &str,
    ) -> ServiceResult<()> {
        let note = required_text("Note", note)?;
        bucket_mut(classes, class, slot)?.notes.push(note);
        debug!(class, %slot, "added bucket note");
        Ok(())
    }

    /// Returns how many notes were removed. An absent class removes nothing.
    pub fn delete_bucket_note(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        note: &str,
    ) -> usize {
        match bucket_mut(classes, class, slot) {
            Ok(bucket) => remove_all(&mut bucket.notes, note),
            Err(_) => 0,
        }
    }

    pub fn add_student_note(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        note: &str,
    ) -> ServiceResult<()> {
        let note = required_text("Note", note)?;
        student_mut(classes, class, slot, student)?.notes.push(note);
        debug!(class, %slot, student, "added student note");
        Ok(())
    }

    /// Returns how many notes were removed. An absent class or student
    /// removes nothing.
    pub fn delete_student_note(
        classes: &mut [ClassRecord],
        class: &str,
        slot: BucketSlot,
        student: &str,
        note: &str,
    ) -> usize {
        match student_mut(classes, class, slot, student) {
            Ok(record) => remove_all(&mut record.notes, note),
            Err(_) => 0,
        }
    }
}

fn remove_all(notes: &mut Vec<String>, note: &str) -> usize {
    let note = note.trim();
    let before = notes.len();
    notes.retain(|existing| existing != note);
    before - notes.len()
}
