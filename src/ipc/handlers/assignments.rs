use crate::error::TrackerError;
use crate::ipc::error::{err, ok, rejected};
use crate::ipc::helpers::{id_param, no_workspace, require_role, str_param, text_param};
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, DEFAULT_POINTS, DEFAULT_SUBJECT};
use crate::store::{AssignmentDraft, AssignmentEdit};
use crate::views;
use serde_json::json;

fn handle_publish(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_mut() else {
        return no_workspace(req);
    };
    let teacher = match require_role(state.session.as_ref(), req, Role::Teacher) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let draft = AssignmentDraft {
        title: str_param(req, "title").to_string(),
        due_date: str_param(req, "dueDate").to_string(),
        subject: str_param(req, "subject").to_string(),
        points: text_param(req, "points"),
    };
    match tracker.publish(teacher, draft) {
        Ok(assignment) => ok(&req.id, json!({ "assignment": assignment })),
        Err(e) => rejected(&req.id, e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_mut() else {
        return no_workspace(req);
    };
    let teacher = match require_role(state.session.as_ref(), req, Role::Teacher) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let Some(id) = id_param(req, "id") else {
        return err(&req.id, "bad_params", "missing id", None);
    };

    let title = str_param(req, "title").trim().to_string();
    let due_date = str_param(req, "dueDate").to_string();
    if title.is_empty() || due_date.is_empty() {
        return rejected(&req.id, TrackerError::MissingTitleOrDueDate);
    }
    let points = match text_param(req, "points") {
        p if p.trim().is_empty() => DEFAULT_POINTS.to_string(),
        p => p,
    };
    let subject = match teacher.subject.trim() {
        "" => DEFAULT_SUBJECT.to_string(),
        s => s.to_string(),
    };

    let edit = AssignmentEdit {
        id,
        title,
        subject,
        due_date,
        points,
    };
    if !tracker.update_assignment(edit) {
        return err(&req.id, "not_found", "assignment not found", None);
    }
    let updated = tracker.assignments().iter().find(|a| a.id == id).cloned();
    ok(&req.id, json!({ "assignment": updated }))
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_mut() else {
        return no_workspace(req);
    };
    if let Err(resp) = require_role(state.session.as_ref(), req, Role::Teacher) {
        return resp;
    }
    let Some(id) = id_param(req, "id") else {
        return err(&req.id, "bad_params", "missing id", None);
    };
    if !tracker.delete_assignment(id) {
        return err(&req.id, "not_found", "assignment not found", None);
    }
    ok(&req.id, json!({ "deleted": id }))
}

/// Teachers see the assignments they own; students see every assignment.
fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_ref() else {
        return no_workspace(req);
    };
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "not_signed_in", "sign in first", None);
    };
    let assignments = if session.is_teacher() {
        views::teacher_assignments(tracker.assignments(), session)
    } else {
        tracker.assignments().iter().collect()
    };
    ok(&req.id, json!({ "assignments": assignments }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "assignments.publish" => Some(handle_publish(state, req)),
        "assignments.update" => Some(handle_update(state, req)),
        "assignments.delete" => Some(handle_delete(state, req)),
        "assignments.list" => Some(handle_list(state, req)),
        _ => None,
    }
}
