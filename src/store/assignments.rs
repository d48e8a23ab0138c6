use super::{next_id, Tracker};
use crate::error::TrackerError;
use crate::identity::owner_key;
use crate::model::{Assignment, AssignmentStatus, DEFAULT_POINTS, DEFAULT_SUBJECT};
use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    pub title: String,
    pub due_date: String,
    pub subject: String,
    pub points: String,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentEdit {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub due_date: String,
    pub points: String,
}

impl Tracker {
    /// Publishes a new assignment at the head of the list (most recent first).
    pub fn publish(
        &mut self,
        teacher: &Session,
        draft: AssignmentDraft,
    ) -> Result<Assignment, TrackerError> {
        let title = draft.title.trim();
        if title.is_empty() || draft.due_date.is_empty() {
            return Err(TrackerError::MissingTitleOrDueDate);
        }
        let id = next_id(self.assignments.iter().map(|a| a.id)).ok_or(TrackerError::IdsExhausted)?;

        let teacher_id = teacher.user_id.trim().to_string();
        let teacher_name = first_non_empty(&[teacher.full_name.as_str(), teacher_id.as_str(), "Teacher"]);
        let subject = first_non_empty(&[teacher.subject.as_str(), draft.subject.as_str(), DEFAULT_SUBJECT]);
        let points = first_non_empty(&[draft.points.as_str(), DEFAULT_POINTS]);

        let assignment = Assignment {
            id,
            title: title.to_string(),
            subject,
            due_date: draft.due_date,
            points,
            owner_key: owner_key(&teacher_id),
            teacher_id,
            teacher_name,
            status: AssignmentStatus::Published,
        };
        self.assignments.insert(0, assignment.clone());
        self.persist_assignments();
        tracing::info!(assignment_id = assignment.id, owner = %assignment.owner_key, "assignment published");
        Ok(assignment)
    }

    /// Rewrites the mutable fields of an assignment and refreshes the title
    /// snapshot on every submission that references it. This is the only
    /// path that updates `Submission::assignment` after creation.
    ///
    /// Returns false when `edit.id` is zero or names no assignment.
    pub fn update_assignment(&mut self, edit: AssignmentEdit) -> bool {
        if edit.id == 0 {
            return false;
        }
        let Some(item) = self.assignments.iter_mut().find(|a| a.id == edit.id) else {
            return false;
        };
        item.title = edit.title.clone();
        item.subject = edit.subject;
        item.due_date = edit.due_date;
        item.points = edit.points;

        let mut refreshed = 0usize;
        for sub in self
            .submissions
            .iter_mut()
            .filter(|s| s.assignment_id == edit.id)
        {
            sub.assignment = edit.title.clone();
            refreshed += 1;
        }

        self.persist_assignments();
        if refreshed > 0 {
            self.persist_submissions();
        }
        tracing::info!(assignment_id = edit.id, refreshed, "assignment updated");
        true
    }

    /// Removes an assignment and every submission that references it. Orphaned
    /// submissions are swept even when the assignment itself is already gone.
    ///
    /// Returns false when `id` is zero or neither list held a matching row.
    pub fn delete_assignment(&mut self, id: i64) -> bool {
        if id == 0 {
            return false;
        }
        let before = self.assignments.len();
        self.assignments.retain(|a| a.id != id);
        let removed_assignment = self.assignments.len() != before;

        let before_subs = self.submissions.len();
        self.submissions.retain(|s| s.assignment_id != id);
        let removed = before_subs - self.submissions.len();

        if !removed_assignment && removed == 0 {
            return false;
        }
        if removed_assignment {
            self.persist_assignments();
        }
        if removed > 0 {
            self.persist_submissions();
        }
        tracing::info!(assignment_id = id, removed_assignment, removed_submissions = removed, "assignment deleted");
        true
    }
}

fn first_non_empty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}
