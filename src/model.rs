use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder used for grade, feedback and file name until a value exists.
pub const EMPTY_MARK: &str = "-";
pub const JUST_NOW: &str = "Just now";
pub const DEFAULT_POINTS: &str = "100";
pub const DEFAULT_SUBJECT: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    /// Anything that is not exactly "teacher" signs in as a student.
    pub fn parse_lenient(s: &str) -> Self {
        if s == "teacher" {
            Self::Teacher
        } else {
            Self::Student
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    pub password: String,
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default = "default_points", deserialize_with = "null_as_points")]
    pub points: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_name: String,
    /// Normalized `teacher_id`; legacy rows may carry it blank until migrated.
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Submitted,
    Graded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_id: String,
    /// Student display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub student: String,
    /// Title snapshot of the parent assignment. Written only by submit and by
    /// assignment edits, which keep it in sync.
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_name: String,
    #[serde(default = "default_mark", deserialize_with = "null_as_mark")]
    pub submitted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SubmissionStatus,
    #[serde(default = "default_mark", deserialize_with = "null_as_mark")]
    pub grade: String,
    #[serde(default = "default_mark", deserialize_with = "null_as_mark")]
    pub feedback: String,
    #[serde(default = "default_mark", deserialize_with = "null_as_mark")]
    pub file_name: String,
}

impl Submission {
    /// Identity of the submitting student. Old rows only have a display name.
    pub fn student_key(&self) -> &str {
        if self.student_id.is_empty() {
            &self.student
        } else {
            &self.student_id
        }
    }

    pub fn numeric_grade(&self) -> Option<f64> {
        if self.grade == EMPTY_MARK {
            return None;
        }
        self.grade.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

fn default_points() -> String {
    DEFAULT_POINTS.to_string()
}

fn default_mark() -> String {
    EMPTY_MARK.to_string()
}

/// Stored rows may carry `null` where a value belongs; read it like a missing key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn null_as_points<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_points))
}

fn null_as_mark<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_mark))
}
