use crate::model::Assignment;

/// Trimmed, lower-cased teacher identifier used for ownership comparisons.
pub fn owner_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Repairs legacy assignment rows in place: trims `teacher_id` and derives a
/// missing `owner_key` from it. Missing `status` is already defaulted to
/// published at deserialization. Returns true if any row changed.
///
/// Running it twice is a no-op the second time.
pub fn migrate_assignments(assignments: &mut [Assignment]) -> bool {
    let mut changed = false;
    for item in assignments.iter_mut() {
        let teacher_id = item.teacher_id.trim().to_string();
        let source = if item.owner_key.is_empty() {
            teacher_id.as_str()
        } else {
            item.owner_key.as_str()
        };
        let key = owner_key(source);
        if item.owner_key == key && item.teacher_id == teacher_id {
            continue;
        }
        item.teacher_id = teacher_id;
        item.owner_key = key;
        changed = true;
    }
    changed
}
