use crate::error::TrackerError;
use crate::ipc::error::{err, ok, rejected};
use crate::ipc::helpers::{id_param, no_workspace, require_role, str_param};
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, Submission};
use crate::store::Score;
use crate::views;
use serde_json::{json, Value};

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_mut() else {
        return no_workspace(req);
    };
    let student = match require_role(state.session.as_ref(), req, Role::Student) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let Some(assignment_id) = id_param(req, "assignmentId") else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };
    let file_name = str_param(req, "fileName");
    if file_name.trim().is_empty() {
        return rejected(&req.id, TrackerError::MissingFile);
    }
    match tracker.submit(student, assignment_id, file_name) {
        Ok(submission) => ok(&req.id, json!({ "submission": submission })),
        Err(e) => rejected(&req.id, e),
    }
}

fn parse_score(raw: Option<&Value>) -> Result<Score, TrackerError> {
    match raw {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or(TrackerError::InvalidGrade)
            .and_then(Score::from_f64),
        Some(Value::String(s)) => Score::parse(s),
        _ => Err(TrackerError::InvalidGrade),
    }
}

fn handle_grade(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_mut() else {
        return no_workspace(req);
    };
    if let Err(resp) = require_role(state.session.as_ref(), req, Role::Teacher) {
        return resp;
    }
    let Some(submission_id) = id_param(req, "submissionId") else {
        return err(&req.id, "bad_params", "missing submissionId", None);
    };
    let score = match parse_score(req.params.get("grade")) {
        Ok(s) => s,
        Err(e) => return rejected(&req.id, e),
    };
    let feedback = str_param(req, "feedback").trim();
    match tracker.grade(submission_id, score, feedback) {
        Some(submission) => ok(&req.id, json!({ "submission": submission })),
        None => err(&req.id, "not_found", "submission not found", None),
    }
}

/// Teachers get submissions for their own assignments; students get their own
/// rows. Both are narrowed by the optional query.
fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_ref() else {
        return no_workspace(req);
    };
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "not_signed_in", "sign in first", None);
    };
    let rows: Vec<&Submission> = if session.is_teacher() {
        views::teacher_submissions(tracker.submissions(), session)
    } else {
        tracker
            .submissions()
            .iter()
            .filter(|s| s.student_key() == session.user_id)
            .collect()
    };
    let rows = views::search_submissions(rows, str_param(req, "query"));
    ok(&req.id, json!({ "submissions": rows }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "submissions.submit" => Some(handle_submit(state, req)),
        "submissions.grade" => Some(handle_grade(state, req)),
        "submissions.list" => Some(handle_list(state, req)),
        _ => None,
    }
}
