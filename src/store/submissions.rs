use super::{next_id, Tracker};
use crate::error::TrackerError;
use crate::model::{
    Submission, SubmissionStatus, DEFAULT_SUBJECT, EMPTY_MARK, JUST_NOW,
};
use crate::session::Session;

/// A grade that has already passed validation: finite, within 0..=100 and
/// rounded to a whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(u8);

impl Score {
    pub fn parse(raw: &str) -> Result<Self, TrackerError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| TrackerError::InvalidGrade)?;
        Self::from_f64(value)
    }

    pub fn from_f64(value: f64) -> Result<Self, TrackerError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(TrackerError::InvalidGrade);
        }
        Ok(Self(value.round() as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Tracker {
    /// Submits (or resubmits) a file for an assignment. A student never holds
    /// more than one row per assignment: a resubmission overwrites the
    /// existing row and clears any grade.
    ///
    /// Fails when the assignment does not exist or a new row has no id left.
    pub fn submit(
        &mut self,
        student: &Session,
        assignment_id: i64,
        file_name: &str,
    ) -> Result<Submission, TrackerError> {
        let assignment = self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .ok_or(TrackerError::UnknownAssignment)?
            .clone();

        let student_id = if student.user_id.is_empty() {
            "Student".to_string()
        } else {
            student.user_id.clone()
        };
        let student_name = if student.full_name.is_empty() {
            student_id.clone()
        } else {
            student.full_name.clone()
        };
        let file_name = if file_name.trim().is_empty() {
            EMPTY_MARK.to_string()
        } else {
            file_name.to_string()
        };
        let submitted_at = chrono::Utc::now().to_rfc3339();

        let fresh_id = next_id(self.submissions.iter().map(|s| s.id));
        let existing = self
            .submissions
            .iter_mut()
            .find(|s| s.assignment_id == assignment.id && s.student_key() == student_id);

        let saved = match existing {
            Some(row) => {
                row.assignment = assignment.title.clone();
                row.subject = pick(&assignment.subject, &row.subject, DEFAULT_SUBJECT);
                row.teacher_id = pick(&assignment.teacher_id, &row.teacher_id, "");
                row.teacher_name = pick(&assignment.teacher_name, &row.teacher_name, "");
                row.submitted = JUST_NOW.to_string();
                row.submitted_at = Some(submitted_at);
                row.status = SubmissionStatus::Submitted;
                row.grade = EMPTY_MARK.to_string();
                row.feedback = EMPTY_MARK.to_string();
                row.file_name = file_name;
                tracing::info!(submission_id = row.id, assignment_id, "submission replaced");
                row.clone()
            }
            None => {
                let row = Submission {
                    id: fresh_id.ok_or(TrackerError::IdsExhausted)?,
                    assignment_id: assignment.id,
                    student_id,
                    student: student_name,
                    assignment: assignment.title.clone(),
                    subject: pick(&assignment.subject, "", DEFAULT_SUBJECT),
                    teacher_id: assignment.teacher_id.clone(),
                    teacher_name: assignment.teacher_name.clone(),
                    submitted: JUST_NOW.to_string(),
                    submitted_at: Some(submitted_at),
                    status: SubmissionStatus::Submitted,
                    grade: EMPTY_MARK.to_string(),
                    feedback: EMPTY_MARK.to_string(),
                    file_name,
                };
                self.submissions.insert(0, row.clone());
                tracing::info!(submission_id = row.id, assignment_id, "submission created");
                row
            }
        };
        self.persist_submissions();
        Ok(saved)
    }

    /// Marks a submission graded. Blank feedback is stored as the placeholder.
    ///
    /// Returns `None` when no submission has `submission_id`.
    pub fn grade(
        &mut self,
        submission_id: i64,
        score: Score,
        feedback: &str,
    ) -> Option<Submission> {
        let row = self
            .submissions
            .iter_mut()
            .find(|s| s.id == submission_id)?;
        row.status = SubmissionStatus::Graded;
        row.grade = score.value().to_string();
        row.feedback = if feedback.trim().is_empty() {
            EMPTY_MARK.to_string()
        } else {
            feedback.to_string()
        };
        let saved = row.clone();
        self.persist_submissions();
        tracing::info!(submission_id, grade = score.value(), "submission graded");
        Some(saved)
    }
}

fn pick(first: &str, second: &str, fallback: &str) -> String {
    if !first.is_empty() {
        first.to_string()
    } else if !second.is_empty() {
        second.to_string()
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::store::testing::{empty_tracker, session};
    use crate::store::AssignmentDraft;

    fn tracker_with_assignment() -> (Tracker, i64) {
        let mut t = empty_tracker();
        let teacher = session("t1", Role::Teacher, "English");
        let a = t
            .publish(
                &teacher,
                AssignmentDraft {
                    title: "Essay".into(),
                    due_date: "2025-01-01".into(),
                    ..Default::default()
                },
            )
            .expect("publish");
        (t, a.id)
    }

    #[test]
    fn score_parse_bounds_and_rounding() {
        assert_eq!(Score::parse("57").map(Score::value), Ok(57));
        assert_eq!(Score::parse(" 88.6 ").map(Score::value), Ok(89));
        assert_eq!(Score::parse("0").map(Score::value), Ok(0));
        assert_eq!(Score::parse("100").map(Score::value), Ok(100));
        assert_eq!(Score::parse("150"), Err(TrackerError::InvalidGrade));
        assert_eq!(Score::parse("-1"), Err(TrackerError::InvalidGrade));
        assert_eq!(Score::parse("abc"), Err(TrackerError::InvalidGrade));
        assert_eq!(Score::parse("NaN"), Err(TrackerError::InvalidGrade));
    }

    #[test]
    fn submit_unknown_assignment_is_noop() {
        let (mut t, _) = tracker_with_assignment();
        let student = session("s1", Role::Student, "");
        assert_eq!(
            t.submit(&student, 99, "x.pdf"),
            Err(TrackerError::UnknownAssignment)
        );
        assert!(t.submissions().is_empty());
    }

    #[test]
    fn resubmission_collapses_into_one_row() {
        let (mut t, id) = tracker_with_assignment();
        let student = session("s1", Role::Student, "");
        let first = t.submit(&student, id, "draft.pdf").expect("first");
        t.grade(first.id, Score::parse("70").expect("score"), "ok")
            .expect("grade");

        let second = t.submit(&student, id, "final.pdf").expect("second");
        assert_eq!(second.id, first.id);
        assert_eq!(t.submissions().len(), 1);
        let row = &t.submissions()[0];
        assert_eq!(row.file_name, "final.pdf");
        assert_eq!(row.status, SubmissionStatus::Submitted);
        assert_eq!(row.grade, "-");
        assert_eq!(row.feedback, "-");
        assert_eq!(row.submitted, "Just now");
        assert!(row.submitted_at.is_some());
    }

    #[test]
    fn new_submission_copies_assignment_details() {
        let (mut t, id) = tracker_with_assignment();
        let student = session("s1", Role::Student, "");
        let row = t.submit(&student, id, "  ").expect("submit");
        assert_eq!(row.id, 1);
        assert_eq!(row.student_id, "s1");
        assert_eq!(row.student, "s1 name");
        assert_eq!(row.assignment, "Essay");
        assert_eq!(row.subject, "English");
        assert_eq!(row.teacher_id, "t1");
        assert_eq!(row.file_name, "-");

        let other = session("s2", Role::Student, "");
        assert_eq!(t.submit(&other, id, "b.pdf").expect("second").id, 2);
        assert_eq!(t.submissions()[0].student_id, "s2");
    }

    #[test]
    fn grade_sets_status_grade_and_feedback() {
        let (mut t, id) = tracker_with_assignment();
        let student = session("s1", Role::Student, "");
        let sub = t.submit(&student, id, "essay.pdf").expect("submit");

        let graded = t
            .grade(sub.id, Score::parse("57").expect("score"), "Good work")
            .expect("grade");
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.grade, "57");
        assert_eq!(graded.feedback, "Good work");

        let regraded = t
            .grade(sub.id, Score::from_f64(90.0).expect("score"), "   ")
            .expect("regrade");
        assert_eq!(regraded.feedback, "-");
        assert!(t.grade(404, Score::from_f64(1.0).expect("score"), "").is_none());
    }
}
