use serde::Serialize;
use uuid::Uuid;

use crate::model::{Account, Role};

pub const DEFAULT_VIEW: &str = "dashboard";

/// The signed-in user. Lives only in memory for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub role: Role,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub signed_in_at: String,
}

impl Session {
    pub fn start(account: &Account) -> Self {
        let full_name = if account.full_name.is_empty() {
            account.user_id.clone()
        } else {
            account.full_name.clone()
        };
        Self {
            session_id: Uuid::new_v4().to_string(),
            role: account.role,
            user_id: account.user_id.clone(),
            full_name,
            email: account.email.clone(),
            subject: account.subject.clone(),
            signed_in_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Login,
    StudentDashboard,
    SubmitAssignment,
    TeacherDashboard,
    GradePanel,
}

pub fn route(session: Option<&Session>, view: &str) -> Screen {
    let Some(session) = session else {
        return Screen::Login;
    };
    match (session.role, view) {
        (Role::Teacher, "grade") => Screen::GradePanel,
        (Role::Teacher, _) => Screen::TeacherDashboard,
        (Role::Student, "submit") => Screen::SubmitAssignment,
        (Role::Student, _) => Screen::StudentDashboard,
    }
}
