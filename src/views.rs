//! Read-only projections of the tracker lists, recomputed on every request.

use serde::Serialize;
use std::collections::HashMap;

use crate::identity::owner_key;
use crate::model::{Assignment, Submission, SubmissionStatus, EMPTY_MARK};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Pending,
    Submitted,
    Graded,
}

impl RowStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Graded => "graded",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub due_date: String,
    pub points: String,
    pub teacher_name: String,
    pub status: RowStatus,
    pub score: String,
    pub feedback: String,
    pub file_name: String,
    pub submitted_at: String,
    pub submission_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudentCounts {
    pub pending: usize,
    pub submitted: usize,
    pub graded: usize,
}

/// Joins every assignment with the student's own submission, if any.
pub fn student_rows(
    assignments: &[Assignment],
    submissions: &[Submission],
    student_id: &str,
) -> Vec<StudentRow> {
    let mut own: HashMap<i64, &Submission> = HashMap::new();
    for sub in submissions.iter().filter(|s| s.student_key() == student_id) {
        own.entry(sub.assignment_id).or_insert(sub);
    }

    assignments
        .iter()
        .map(|a| {
            let sub = own.get(&a.id).copied();
            let status = match sub {
                None => RowStatus::Pending,
                Some(s) if s.status == SubmissionStatus::Graded => RowStatus::Graded,
                Some(_) => RowStatus::Submitted,
            };
            let score = match sub {
                Some(s) if !s.grade.is_empty() && s.grade != EMPTY_MARK => {
                    format!("{}/100", s.grade)
                }
                _ => EMPTY_MARK.to_string(),
            };
            StudentRow {
                id: a.id,
                title: a.title.clone(),
                subject: a.subject.clone(),
                due_date: a.due_date.clone(),
                points: a.points.clone(),
                teacher_name: a.teacher_name.clone(),
                status,
                score,
                feedback: mark_or_placeholder(sub.map(|s| s.feedback.as_str())),
                file_name: mark_or_placeholder(sub.map(|s| s.file_name.as_str())),
                submitted_at: mark_or_placeholder(sub.map(|s| s.submitted.as_str())),
                submission_id: sub.map(|s| s.id),
            }
        })
        .collect()
}

pub fn student_counts(rows: &[StudentRow]) -> StudentCounts {
    let mut counts = StudentCounts::default();
    for row in rows {
        match row.status {
            RowStatus::Pending => counts.pending += 1,
            RowStatus::Submitted => counts.submitted += 1,
            RowStatus::Graded => counts.graded += 1,
        }
    }
    counts
}

pub fn search_student_rows(rows: Vec<StudentRow>, query: &str) -> Vec<StudentRow> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|r| {
            format!(
                "{} {} {} {}",
                r.title,
                r.subject,
                r.due_date,
                r.status.as_str()
            )
            .to_lowercase()
            .contains(&q)
        })
        .collect()
}

// Ownership filtering. The owner key is canonical; the subject match and the
// show-everything tier exist only for rows written before owner keys did.

pub fn teacher_assignments<'a>(
    assignments: &'a [Assignment],
    teacher: &Session,
) -> Vec<&'a Assignment> {
    let me = owner_key(&teacher.user_id);
    assignments
        .iter()
        .filter(|a| {
            let key = if a.owner_key.is_empty() {
                owner_key(&a.teacher_id)
            } else {
                owner_key(&a.owner_key)
            };
            if !key.is_empty() {
                return key == me;
            }
            legacy_subject_match(&a.subject, &teacher.subject)
        })
        .collect()
}

pub fn teacher_submissions<'a>(
    submissions: &'a [Submission],
    teacher: &Session,
) -> Vec<&'a Submission> {
    let me = owner_key(&teacher.user_id);
    submissions
        .iter()
        .filter(|s| {
            if !s.teacher_id.is_empty() {
                return owner_key(&s.teacher_id) == me;
            }
            legacy_subject_match(&s.subject, &teacher.subject)
        })
        .collect()
}

fn legacy_subject_match(item_subject: &str, teacher_subject: &str) -> bool {
    if teacher_subject.is_empty() {
        return true;
    }
    owner_key(item_subject) == owner_key(teacher_subject)
}

pub fn search_submissions<'a>(rows: Vec<&'a Submission>, query: &str) -> Vec<&'a Submission> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|s| {
            format!("{} {} {}", s.student, s.assignment, s.submitted)
                .to_lowercase()
                .contains(&q)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub pending: usize,
}

/// Distinct students seen in `submissions`, in first-seen order.
pub fn roster(submissions: &[&Submission]) -> Vec<RosterEntry> {
    let mut order: Vec<RosterEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for sub in submissions {
        let key = sub.student_key();
        if key.is_empty() {
            continue;
        }
        let idx = *index.entry(key).or_insert_with(|| {
            order.push(RosterEntry {
                id: key.to_string(),
                name: if sub.student.is_empty() {
                    key.to_string()
                } else {
                    sub.student.clone()
                },
                pending: 0,
            });
            order.len() - 1
        });
        if sub.status != SubmissionStatus::Graded {
            order[idx].pending += 1;
        }
    }
    order
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    pub total_assignments: usize,
    pub total_students: usize,
    pub pending_reviews: usize,
    pub average_grade: Option<f64>,
    pub average_grade_label: String,
}

pub fn teacher_stats(assignments: &[&Assignment], submissions: &[&Submission]) -> TeacherStats {
    let pending_reviews = submissions
        .iter()
        .filter(|s| s.status != SubmissionStatus::Graded)
        .count();
    let grades: Vec<f64> = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Graded)
        .filter_map(|s| s.numeric_grade())
        .collect();
    let average_grade = if grades.is_empty() {
        None
    } else {
        Some(grades.iter().sum::<f64>() / grades.len() as f64)
    };
    let average_grade_label = match average_grade {
        Some(avg) => format!("{avg:.1}%"),
        None => "0%".to_string(),
    };
    TeacherStats {
        total_assignments: assignments.len(),
        total_students: roster(submissions).len(),
        pending_reviews,
        average_grade,
        average_grade_label,
    }
}

fn mark_or_placeholder(v: Option<&str>) -> String {
    match v {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => EMPTY_MARK.to_string(),
    }
}
